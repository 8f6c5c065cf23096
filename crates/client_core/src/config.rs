use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use shared::protocol::DEFAULT_SERVICE_URL;
use url::Url;

pub const SETTINGS_FILE_NAME: &str = "template_filler.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub download_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            download_dir: default_download_dir(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Defaults, then `template_filler.toml` in the working directory, then env.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE_NAME), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", file.display()))?;
        if let Some(v) = file_cfg.get("service_url") {
            settings.service_url = v.clone();
        }
        if let Some(v) = file_cfg.get("download_dir") {
            settings.download_dir = PathBuf::from(v);
        }
    }

    for key in ["TEMPLATE_FILLER_SERVICE_URL", "APP__SERVICE_URL"] {
        if let Some(v) = env(key).filter(|v| !v.trim().is_empty()) {
            settings.service_url = v;
        }
    }
    for key in ["TEMPLATE_FILLER_DOWNLOAD_DIR", "APP__DOWNLOAD_DIR"] {
        if let Some(v) = env(key).filter(|v| !v.trim().is_empty()) {
            settings.download_dir = PathBuf::from(v);
        }
    }

    settings.service_url = normalize_service_url(&settings.service_url)?;
    Ok(settings)
}

pub fn normalize_service_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed =
        Url::parse(trimmed).with_context(|| format!("invalid merge service url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("merge service url must be http or https, got '{raw}'");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
