//! Core error types for Clankermon.
//!
//! Every failure of an evaluation falls into one of the [`ErrorKind`]s; the
//! HTTP layer maps kinds to status codes and the frame protocol collapses
//! them all into its error card.

use clankermon_execution::{ExecutionError, FailureClass};
use serde_json::Value;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for evaluations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Remote execution failed: {0}")]
    Execution(#[from] ExecutionError),
}

/// Errors raised before anything is sent to the remote service.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing parameters: {0}")]
    MissingParameters(String),
}

/// Caller-facing classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Required input was missing; no outbound call was made.
    Validation,
    /// Submission, status fetch or the remote execution itself failed.
    RemoteService,
    /// The poll budget was exhausted.
    Timeout,
    /// The wait was abandoned (client gone or server shutting down).
    Cancelled,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Execution(e) => match e.class() {
                FailureClass::Invalid => ErrorKind::Validation,
                FailureClass::Remote => ErrorKind::RemoteService,
                FailureClass::Timeout => ErrorKind::Timeout,
                FailureClass::Cancelled => ErrorKind::Cancelled,
            },
        }
    }

    /// Upstream payload to surface alongside a remote failure.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Error::Execution(e) => e.details(),
            Error::Validation(_) => None,
        }
    }
}
