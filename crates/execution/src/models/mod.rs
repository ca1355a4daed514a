//! Execution models
//!
//! - `execution` - Handle, lifecycle state and status snapshot of a remote execution
//! - `params` - Query parameters bound into a submission

mod execution;
mod params;

pub use execution::{ExecutionHandle, ExecutionState, ExecutionStatus, ResultRow};
pub use params::QueryParameters;
