use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    NotFound {
        message: String,
    },
    // No copy of the book is left to lend.
    Unavailable {
        message: String,
        book_id: String,
    },
    AlreadyReturned {
        message: String,
        record_id: String,
    },
    InvalidRange {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    // Transport or backend failure while synchronizing with the remote source.
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

impl LibraryError {
    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(book_id: &str) -> LibraryError {
        LibraryError::Unavailable {
            message: format!("no copies of book {} are available", book_id),
            book_id: book_id.to_string(),
        }
    }

    pub fn already_returned(record_id: &str) -> LibraryError {
        LibraryError::AlreadyReturned {
            message: format!("borrow record {} has already been returned", record_id),
            record_id: record_id.to_string(),
        }
    }

    pub fn invalid_range(message: &str) -> LibraryError {
        LibraryError::InvalidRange { message: message.to_string() }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn remote(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Remote { message: message.to_string(), reason_code, retryable }
    }

    // maps an http status returned by the backend onto the error taxonomy
    pub fn remote_status(status: u16, message: &str) -> LibraryError {
        match status {
            404 => LibraryError::not_found(
                format!("remote not found {:?}", message).as_str()),
            400 | 409 | 422 => LibraryError::validation(
                format!("remote rejected request {:?}", message).as_str(), Some(status.to_string())),
            408 | 429 | 500..=599 => LibraryError::remote(
                format!("remote unavailable {:?}", message).as_str(), Some(status.to_string()), true),
            _ => LibraryError::remote(
                format!("remote error {:?}", message).as_str(), Some(status.to_string()), false),
        }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Remote { retryable, .. } => { *retryable }
            _ => { false }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return LibraryError::serialization(
                format!("remote payload decoding {}", err).as_str());
        }
        let status = err.status().map(|s| s.as_u16().to_string());
        let retryable = err.is_timeout() || err.is_connect()
            || err.status().map(|s| s.is_server_error()).unwrap_or(false);
        LibraryError::remote(format!("remote request failed {}", err).as_str(), status, retryable)
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Unavailable { message, .. } => {
                write!(f, "{}", message)
            }
            LibraryError::AlreadyReturned { message, .. } => {
                write!(f, "{}", message)
            }
            LibraryError::InvalidRange { message } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Remote { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog and lending operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum EntityKind {
    Book,
    Author,
    Member,
    BorrowRecord,
}

impl From<String> for EntityKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Book" => EntityKind::Book,
            "Author" => EntityKind::Author,
            "Member" => EntityKind::Member,
            _ => EntityKind::BorrowRecord,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            EntityKind::Book => write!(f, "Book"),
            EntityKind::Author => write!(f, "Author"),
            EntityKind::Member => write!(f, "Member"),
            EntityKind::BorrowRecord => write!(f, "BorrowRecord"),
        }
    }
}

// EntityRef names one entity of any collection, e.g. the target of a pending delete
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: &str) -> Self {
        Self { kind, id: id.to_string() }
    }

    pub fn book(id: &str) -> Self {
        Self::new(EntityKind::Book, id)
    }

    pub fn author(id: &str) -> Self {
        Self::new(EntityKind::Author, id)
    }

    pub fn member(id: &str) -> Self {
        Self::new(EntityKind::Member, id)
    }

    pub fn borrow_record(id: &str) -> Self {
        Self::new(EntityKind::BorrowRecord, id)
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

// Non-fatal conditions reported next to a successful operation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum LibraryWarning {
    // The deleted entity is still referenced by active borrow records, which
    // now resolve to an "Unknown" placeholder at read time.
    HasActiveReferences {
        target: EntityRef,
        active_records: Vec<String>,
    },
}

impl Display for LibraryWarning {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LibraryWarning::HasActiveReferences { target, active_records } => {
                write!(f, "{} still has {} active borrow record(s)", target, active_records.len())
            }
        }
    }
}

// Removal carries a deleted entity together with any warnings raised by the delete
#[derive(Debug, PartialEq, Clone)]
pub struct Removal<T> {
    pub entity: T,
    pub warnings: Vec<LibraryWarning>,
}

impl<T> Removal<T> {
    pub fn new(entity: T, warnings: Vec<LibraryWarning>) -> Self {
        Self { entity, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Removal<U> {
        Removal { entity: f(self.entity), warnings: self.warnings }
    }
}
