use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    TransportFailure,
    UnexpectedFailure,
}

/// Every way a submission can end without delivering an archive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please upload both files")]
    MissingInput,
    #[error("Failed to process files")]
    Rejected { status: u16 },
    #[error("Could not reach the merge service: {0}")]
    Transport(String),
    #[error("An error occurred: {0}")]
    Unexpected(String),
}

impl SubmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmitError::MissingInput => ErrorKind::MissingInput,
            SubmitError::Rejected { .. } | SubmitError::Transport(_) => {
                ErrorKind::TransportFailure
            }
            SubmitError::Unexpected(_) => ErrorKind::UnexpectedFailure,
        }
    }

    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        SubmitError::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages_are_fixed() {
        assert_eq!(
            SubmitError::MissingInput.to_string(),
            "Please upload both files"
        );
        assert_eq!(
            SubmitError::Rejected { status: 500 }.to_string(),
            "Failed to process files"
        );
    }

    #[test]
    fn rejected_and_transport_share_a_kind() {
        assert_eq!(
            SubmitError::Rejected { status: 422 }.kind(),
            ErrorKind::TransportFailure
        );
        assert_eq!(
            SubmitError::Transport("connection refused".into()).kind(),
            ErrorKind::TransportFailure
        );
        assert_eq!(
            SubmitError::unexpected("disk full").kind(),
            ErrorKind::UnexpectedFailure
        );
    }
}
