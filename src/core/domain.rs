use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};

// Identifiable defines common traits that can be shared by catalog entities
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
}

// SourceKind selects the remote data source the catalog is synchronized with
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum SourceKind {
    Http,
    InMemory,
}

impl From<String> for SourceKind {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" => SourceKind::InMemory,
            _ => SourceKind::Http,
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SourceKind::Http => write!(f, "Http"),
            SourceKind::InMemory => write!(f, "InMemory"),
        }
    }
}

pub const ENV_BASE_URL: &str = "LIBRARY_API_BASE_URL";
pub const ENV_SOURCE: &str = "LIBRARY_SOURCE";
pub const ENV_LOAN_DAYS: &str = "LIBRARY_LOAN_DAYS";
pub const ENV_RESTORE_ON_DELETE: &str = "LIBRARY_RESTORE_ON_DELETE";
pub const ENV_HTTP_TIMEOUT: &str = "LIBRARY_HTTP_TIMEOUT_SECS";

// ten years
pub const MAX_LOAN_DAYS: i64 = 3650;

// Configuration abstracts config options for the lending desk
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub base_url: String,
    pub source: SourceKind,
    pub book_loan_days: i64,
    // whether deleting an active borrow record gives its copy back to the book
    pub restore_copy_on_delete: bool,
    pub http_timeout_secs: u64,
}

impl Configuration {
    pub fn new(base_url: &str) -> Self {
        Configuration {
            base_url: base_url.trim_end_matches('/').to_string(),
            source: SourceKind::Http,
            book_loan_days: 14,
            restore_copy_on_delete: true,
            http_timeout_secs: 10,
        }
    }

    pub fn in_memory() -> Self {
        Configuration {
            source: SourceKind::InMemory,
            ..Configuration::new("memory://")
        }
    }

    pub fn from_env() -> LibraryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> LibraryResult<Self> {
        let mut config = Configuration::new(
            lookup(ENV_BASE_URL).unwrap_or_else(|| "http://localhost:8080/api".to_string()).as_str());
        if let Some(source) = lookup(ENV_SOURCE) {
            config.source = SourceKind::from(source);
        }
        if let Some(days) = lookup(ENV_LOAN_DAYS) {
            config.book_loan_days = days.trim().parse::<i64>().map_err(|e| LibraryError::validation(
                format!("invalid {} {:?}: {}", ENV_LOAN_DAYS, days, e).as_str(), None))?;
        }
        if let Some(restore) = lookup(ENV_RESTORE_ON_DELETE) {
            config.restore_copy_on_delete = restore.trim().parse::<bool>().map_err(|e| LibraryError::validation(
                format!("invalid {} {:?}: {}", ENV_RESTORE_ON_DELETE, restore, e).as_str(), None))?;
        }
        if let Some(timeout) = lookup(ENV_HTTP_TIMEOUT) {
            config.http_timeout_secs = timeout.trim().parse::<u64>().map_err(|e| LibraryError::validation(
                format!("invalid {} {:?}: {}", ENV_HTTP_TIMEOUT, timeout, e).as_str(), None))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if !(0..=MAX_LOAN_DAYS).contains(&self.book_loan_days) {
            return Err(LibraryError::validation(
                format!("loan days must be between 0 and {} {}", MAX_LOAN_DAYS, self.book_loan_days).as_str(), None));
        }
        if self.source == SourceKind::Http && !self.base_url.starts_with("http") {
            return Err(LibraryError::validation(
                format!("base url must be an http(s) url {}", self.base_url).as_str(), None));
        }
        Ok(())
    }
}

// ReferenceDto is the embedded `{id, ...}` object the backend uses for relations;
// fields other than the id are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDto {
    #[serde(deserialize_with = "crate::utils::id::deserialize")]
    pub id: String,
}

impl ReferenceDto {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}
