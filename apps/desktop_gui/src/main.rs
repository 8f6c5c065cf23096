mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use client_core::config::{load_settings, normalize_service_url, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::TemplateFillerApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured merge service URL.
    #[arg(long)]
    service_url: Option<String>,
    /// Directory generated archives are saved into.
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(url) = args.service_url.as_deref() {
        settings.service_url = normalize_service_url(url)?;
    }
    if let Some(dir) = &args.download_dir {
        settings.download_dir = dir.clone();
    }
    Ok(settings)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let (settings, startup_warning) = match resolve_settings(&args) {
        Ok(settings) => (settings, None),
        Err(err) => {
            tracing::error!("{err:#}; falling back to defaults");
            (
                Settings::default(),
                Some(format!("Settings ignored: {err:#}")),
            )
        }
    };
    tracing::info!(
        service_url = %settings.service_url,
        download_dir = %settings.download_dir.display(),
        "starting template filler"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Template Filler")
            .with_inner_size([860.0, 600.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Template Filler",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(TemplateFillerApp::new(
                cmd_tx,
                ui_rx,
                startup_warning,
            )))
        }),
    )
}
