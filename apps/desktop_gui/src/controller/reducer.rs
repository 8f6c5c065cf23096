//! Applies backend events to the submission controller and the shell state
//! around it.

use client_core::{SubmissionController, SubmissionOutcome};
use shared::error::SubmitError;

use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceHealth {
    Unknown,
    Checking,
    Up,
    Degraded(String),
    Down(String),
}

#[derive(Debug, Clone)]
pub struct ShellState {
    pub status: String,
    pub service_health: ServiceHealth,
    pub backend_alive: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            status: "Backend worker starting...".to_string(),
            service_health: ServiceHealth::Unknown,
            backend_alive: true,
        }
    }
}

pub fn apply_ui_event(
    controller: &mut SubmissionController,
    shell: &mut ShellState,
    event: UiEvent,
) {
    match event {
        UiEvent::Info(message) => {
            shell.status = message;
        }
        UiEvent::SubmissionFinished(result) => {
            shell.status = match controller.finish_submission(result) {
                SubmissionOutcome::Delivered(path) => format!("Saved {}", path.display()),
                SubmissionOutcome::Failed(err) => {
                    let ui_err = UiError::from_submit_error(UiErrorContext::Submission, &err);
                    format!("{} error: {}", err_label(ui_err.category()), ui_err.message())
                }
            };
        }
        UiEvent::HealthChecked(result) => {
            shell.service_health = match result {
                Ok(health) if health.is_ok() => ServiceHealth::Up,
                Ok(health) => ServiceHealth::Degraded(health.status),
                Err(err) => {
                    let reason = match &err {
                        SubmitError::Rejected { status } => format!("HTTP {status}"),
                        other => other.to_string(),
                    };
                    let ui_err = UiError::from_submit_error(UiErrorContext::HealthCheck, &err);
                    shell.status = format!(
                        "{} error: health check failed ({reason})",
                        err_label(ui_err.category())
                    );
                    ServiceHealth::Down(reason)
                }
            };
        }
        UiEvent::Error(err) => {
            if err.context() == UiErrorContext::BackendStartup {
                shell.backend_alive = false;
            }
            shell.status = format!("{} error: {}", err_label(err.category()), err.message());
        }
    }
}

/// The worker's event sender is gone. Any outstanding submission can never
/// report back, so end it here.
pub fn apply_backend_disconnected(controller: &mut SubmissionController, shell: &mut ShellState) {
    shell.backend_alive = false;
    shell.status = "Backend worker stopped; restart the app".to_string();
    if controller.is_submitting() {
        controller.finish_submission(Err(SubmitError::Unexpected(
            "backend worker stopped".to_string(),
        )));
    }
}
