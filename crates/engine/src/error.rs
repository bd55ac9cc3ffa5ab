//! The module contains the errors the engine can return.
use std::time::Duration;

use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed caller input (bad date text, missing body, zero page size).
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("\"{0}\" not found!")]
    KeyNotFound(String),
    /// The concurrent read set did not complete within the configured
    /// per-request deadline; all pending reads are dropped together.
    #[error("read deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::DeadlineExceeded(a), Self::DeadlineExceeded(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
