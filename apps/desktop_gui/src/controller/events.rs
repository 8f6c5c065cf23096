//! Backend -> UI events and error modeling for the desktop GUI.

use std::path::PathBuf;

use shared::{
    error::{ErrorKind, SubmitError},
    protocol::HealthResponse,
};

pub enum UiEvent {
    Info(String),
    SubmissionFinished(Result<PathBuf, SubmitError>),
    HealthChecked(Result<HealthResponse, SubmitError>),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Unknown,
}

impl From<ErrorKind> for UiErrorCategory {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::MissingInput => UiErrorCategory::Validation,
            ErrorKind::TransportFailure => UiErrorCategory::Transport,
            ErrorKind::UnexpectedFailure => UiErrorCategory::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submission,
    HealthCheck,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("connection")
            || lower.contains("timed out")
            || lower.contains("unreachable")
            || lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_submit_error(context: UiErrorContext, err: &SubmitError) -> Self {
        Self {
            category: err.kind().into(),
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_errors_keep_their_kind() {
        let err = UiError::from_submit_error(
            UiErrorContext::Submission,
            &SubmitError::Rejected { status: 500 },
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.message(), "Failed to process files");

        let missing =
            UiError::from_submit_error(UiErrorContext::Submission, &SubmitError::MissingInput);
        assert_eq!(missing.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn classifies_worker_disconnect_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "Backend command processor disconnected",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
    }
}
