//! Remote execution API trait definition.

use async_trait::async_trait;

use crate::errors::ExecutionError;
use crate::models::{ExecutionHandle, ExecutionStatus, QueryParameters};

/// Trait for asynchronous analytics execution services.
///
/// The service model is submit-then-poll: [`submit`](Self::submit) starts an
/// execution and returns immediately, [`fetch_status`](Self::fetch_status)
/// observes its current state. Implementations perform exactly one outbound
/// request per call and never retry on their own.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use clankermon_execution::{ExecutionApi, ExecutionHandle, ExecutionStatus, QueryParameters};
///
/// struct FixedApi;
///
/// #[async_trait]
/// impl ExecutionApi for FixedApi {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn submit(&self, _params: &QueryParameters) -> Result<ExecutionHandle, ExecutionError> {
///         Ok(ExecutionHandle::new("exec-1"))
///     }
///
///     async fn fetch_status(&self, handle: &ExecutionHandle) -> Result<ExecutionStatus, ExecutionError> {
///         Ok(ExecutionStatus::completed(handle.id(), vec![]))
///     }
/// }
/// ```
#[async_trait]
pub trait ExecutionApi: Send + Sync {
    /// Identifier used in logs, e.g. "DUNE".
    fn id(&self) -> &'static str;

    /// Start a new execution bound to `params`.
    ///
    /// Every call creates an independent execution; identical parameters are
    /// not deduplicated.
    async fn submit(&self, params: &QueryParameters) -> Result<ExecutionHandle, ExecutionError>;

    /// Fetch the current state of an execution, including its rows once
    /// it has completed.
    async fn fetch_status(
        &self,
        handle: &ExecutionHandle,
    ) -> Result<ExecutionStatus, ExecutionError>;
}
