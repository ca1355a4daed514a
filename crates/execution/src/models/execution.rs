use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a completed execution, keyed by column name.
pub type ResultRow = Map<String, Value>;

/// Opaque identifier of one submitted remote execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionHandle {
    pub execution_id: String,
}

impl ExecutionHandle {
    pub fn new(execution_id: impl Into<String>) -> Self {
        Self {
            execution_id: execution_id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.execution_id
    }
}

impl fmt::Display for ExecutionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.execution_id)
    }
}

/// Lifecycle state reported by the remote service.
///
/// States are observed by polling; the service never pushes transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExecutionState {
    Pending,
    Executing,
    Completed,
    CompletedPartial,
    Failed,
    Cancelled,
    Expired,
    Unknown(String),
}

impl ExecutionState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "QUERY_STATE_PENDING",
            Self::Executing => "QUERY_STATE_EXECUTING",
            Self::Completed => "QUERY_STATE_COMPLETED",
            Self::CompletedPartial => "QUERY_STATE_COMPLETED_PARTIAL",
            Self::Failed => "QUERY_STATE_FAILED",
            Self::Cancelled => "QUERY_STATE_CANCELLED",
            Self::Expired => "QUERY_STATE_EXPIRED",
            Self::Unknown(raw) => raw,
        }
    }

    /// Only a fully completed execution carries usable rows.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// States from which the execution will never reach `Completed`.
    ///
    /// A partial completion means the result was truncated remotely, so the
    /// valuation rows cannot be trusted either.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            Self::Failed | Self::Cancelled | Self::Expired | Self::CompletedPartial
        )
    }
}

impl From<String> for ExecutionState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "QUERY_STATE_PENDING" => Self::Pending,
            "QUERY_STATE_EXECUTING" => Self::Executing,
            "QUERY_STATE_COMPLETED" => Self::Completed,
            "QUERY_STATE_COMPLETED_PARTIAL" => Self::CompletedPartial,
            "QUERY_STATE_FAILED" => Self::Failed,
            "QUERY_STATE_CANCELLED" => Self::Cancelled,
            "QUERY_STATE_EXPIRED" => Self::Expired,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<ExecutionState> for String {
    fn from(state: ExecutionState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of an execution as returned by a status fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionStatus {
    pub execution_id: String,
    pub state: ExecutionState,
    /// Present once the execution has completed.
    pub rows: Option<Vec<ResultRow>>,
    /// Error payload the service attaches to failed executions.
    pub error: Option<Value>,
}

impl ExecutionStatus {
    pub fn pending(execution_id: impl Into<String>) -> Self {
        Self {
            execution_id: execution_id.into(),
            state: ExecutionState::Pending,
            rows: None,
            error: None,
        }
    }

    pub fn completed(execution_id: impl Into<String>, rows: Vec<ResultRow>) -> Self {
        Self {
            execution_id: execution_id.into(),
            state: ExecutionState::Completed,
            rows: Some(rows),
            error: None,
        }
    }
}
