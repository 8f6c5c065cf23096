use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, normalize_service_url},
    DirectorySink, FileHandle, HttpMergeService, SubmissionController, SubmissionOutcome,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Fill a Word template from a spreadsheet via the merge service")]
struct Args {
    /// Overrides the configured merge service URL.
    #[arg(long, global = true)]
    service_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a data file and a template, save the returned archive.
    Submit {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        template: PathBuf,
        /// Directory the archive is saved into.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Check that the merge service is up.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings()?;
    if let Some(url) = args.service_url.as_deref() {
        settings.service_url = normalize_service_url(url)?;
    }
    let service = HttpMergeService::new(&settings.service_url);

    match args.command {
        Command::Health => {
            let health = service
                .health()
                .await
                .with_context(|| format!("health check against {}", service.service_url()))?;
            println!("{}: {}", service.service_url(), health.status);
            if !health.is_ok() {
                anyhow::bail!("merge service reported status '{}'", health.status);
            }
        }
        Command::Submit {
            data,
            template,
            out_dir,
        } => {
            let sink = DirectorySink::new(out_dir.unwrap_or(settings.download_dir));
            let mut controller = SubmissionController::new();
            controller.set_data_file(Some(FileHandle::from_path(&data)?));
            controller.set_template_file(Some(FileHandle::from_path(&template)?));

            match controller.submit(&service, &sink).await {
                SubmissionOutcome::Delivered(path) => {
                    println!("Saved {}", path.display());
                }
                SubmissionOutcome::Failed(err) => {
                    anyhow::bail!(err);
                }
            }
        }
    }

    Ok(())
}
