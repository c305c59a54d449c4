use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug, PartialEq)]
pub enum CommandError {
    NotFound {
        message: String,
    },
    Unavailable {
        message: String,
    },
    Conflict {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Remote {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Unavailable { message, .. } => {
                CommandError::Unavailable { message }
            }
            LibraryError::AlreadyReturned { message, .. } => {
                CommandError::Conflict { message }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::Conflict { message }
            }
            LibraryError::InvalidRange { message } => {
                CommandError::Validation { message, reason_code: Some("invalid_range".to_string()) }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Remote { message, reason_code, retryable } => {
                CommandError::Remote { message, reason_code, retryable }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code }
            }
        }
    }
}
