use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{BackendKind, TradeId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{backend} storage unavailable: {reason}")]
    StorageUnavailable { backend: BackendKind, reason: String },

    #[error("invalid import format: {0}")]
    InvalidImportFormat(String),

    #[error("failed to migrate trades from {from} to {to}: {reason}")]
    BackendMigration {
        from: BackendKind,
        to: BackendKind,
        reason: String,
    },

    #[error("trade collection is not loaded")]
    NotReady,

    #[error("trade not found: {0}")]
    TradeNotFound(TradeId),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error category, stable across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    StorageUnavailable,
    InvalidImportFormat,
    BackendMigration,
    NotReady,
    NotFound,
    Config,
    Io,
}

impl Error {
    /// Shorthand for [`Error::StorageUnavailable`].
    pub fn storage(backend: BackendKind, reason: impl ToString) -> Self {
        Self::StorageUnavailable {
            backend,
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::MalformedInput,
            Self::StorageUnavailable { .. } => ErrorKind::StorageUnavailable,
            Self::InvalidImportFormat(_) | Self::Json(_) => ErrorKind::InvalidImportFormat,
            Self::BackendMigration { .. } => ErrorKind::BackendMigration,
            Self::NotReady => ErrorKind::NotReady,
            Self::TradeNotFound(_) => ErrorKind::NotFound,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}
