//! Backend worker: owns the tokio runtime, the merge service client and the
//! download sink, and runs queued commands one at a time.

use std::thread;

use client_core::{config::Settings, DirectorySink, HttpMergeService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let service = HttpMergeService::new(&settings.service_url);
            let sink = DirectorySink::new(&settings.download_dir);
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Ready. Archives are saved to {}",
                sink.dir().display()
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FillTemplates(job) => {
                        tracing::info!("backend: fill_templates");
                        let result = job.run(&service, &sink).await;
                        // Blocking send: the UI stays busy until this arrives.
                        if ui_tx.send(UiEvent::SubmissionFinished(result)).is_err() {
                            tracing::warn!("ui went away before submission result was delivered");
                            return;
                        }
                    }
                    BackendCommand::CheckHealth => {
                        tracing::info!(url = service.service_url(), "backend: check_health");
                        let result = service.health().await;
                        if let Err(err) = &result {
                            tracing::warn!("backend: health check failed: {err}");
                        }
                        let _ = ui_tx.try_send(UiEvent::HealthChecked(result));
                    }
                }
            }
        });
    });
}
