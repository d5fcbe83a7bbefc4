//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a member or an expense is not found.
//! - [`InvalidName`] thrown when a member name is empty.
//! - [`Storage`] thrown when the snapshot cannot be read or written.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`Storage`]: EngineError::Storage
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Corrupted snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Export error: {0}")]
    Export(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.kind() == b.kind(),
            (Self::Serialization(a), Self::Serialization(b)) => a.to_string() == b.to_string(),
            (Self::Export(a), Self::Export(b)) => a == b,
            _ => false,
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}
