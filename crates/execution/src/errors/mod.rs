//! Error types for the execution crate.
//!
//! - [`ExecutionError`]: every failure the submitter, poller or client can produce
//! - [`FailureClass`]: coarse classification used by the callers

mod class;

pub use class::FailureClass;

use serde_json::Value;
use thiserror::Error;

use crate::models::ExecutionState;

/// Errors that can occur while submitting or awaiting a remote execution.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// Required query parameters were missing or blank.
    /// Raised before any request leaves the process.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The remote service could not be reached, rejected the request, or
    /// answered with something we could not decode.
    #[error("Remote service error: {message}")]
    Remote {
        /// Short description of what failed
        message: String,
        /// Upstream error payload, when the service returned one
        details: Option<Value>,
    },

    /// The remote execution reached a terminal state other than completed.
    #[error("Execution {execution_id} ended in state {state}")]
    Failed {
        execution_id: String,
        state: ExecutionState,
        details: Option<Value>,
    },

    /// No completed state was observed within the poll budget.
    #[error("Execution {execution_id} did not complete after {attempts} attempts")]
    Timeout { execution_id: String, attempts: u32 },

    /// The wait was cancelled before the execution completed.
    #[error("Execution {execution_id} wait was cancelled")]
    Cancelled { execution_id: String },
}

impl ExecutionError {
    /// Shorthand for a [`Remote`](Self::Remote) error without upstream details.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
            details: None,
        }
    }

    /// Returns the failure classification for this error.
    ///
    /// A terminal remote failure is classified as [`FailureClass::Remote`]:
    /// the service answered, it just did not produce rows.
    pub fn class(&self) -> FailureClass {
        match self {
            Self::InvalidParameters(_) => FailureClass::Invalid,
            Self::Remote { .. } | Self::Failed { .. } => FailureClass::Remote,
            Self::Timeout { .. } => FailureClass::Timeout,
            Self::Cancelled { .. } => FailureClass::Cancelled,
        }
    }

    /// Upstream payload attached to this error, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Remote { details, .. } | Self::Failed { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ExecutionError {
    fn from(err: reqwest::Error) -> Self {
        Self::remote(err.to_string())
    }
}
