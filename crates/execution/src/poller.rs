//! Bounded, fixed-delay wait for a remote execution to complete.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::ExecutionApi;
use crate::errors::ExecutionError;
use crate::models::{ExecutionHandle, ResultRow};

/// Default number of status fetches before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Default delay before each status fetch.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Poll budget. The worst-case wait is `max_attempts * interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PollPolicy {
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// Waits for an execution to reach the completed state.
#[derive(Clone)]
pub struct CompletionPoller {
    api: Arc<dyn ExecutionApi>,
    policy: PollPolicy,
}

impl CompletionPoller {
    pub fn new(api: Arc<dyn ExecutionApi>, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Poll `handle` until it completes and return its rows.
    ///
    /// Every attempt first sleeps for the policy interval, then fetches the
    /// status once. There is no backoff and no retry of failed fetches: a
    /// transport error ends the wait immediately. Terminal failure states end
    /// it too, with [`ExecutionError::Failed`]. Any other state consumes the
    /// attempt. After `max_attempts` fetches without completion the wait
    /// fails with [`ExecutionError::Timeout`].
    ///
    /// Cancelling `cancel` aborts the pending sleep and returns
    /// [`ExecutionError::Cancelled`].
    pub async fn await_completion(
        &self,
        handle: &ExecutionHandle,
        cancel: &CancellationToken,
    ) -> Result<Vec<ResultRow>, ExecutionError> {
        let mut attempts: u32 = 0;

        while attempts < self.policy.max_attempts {
            tokio::select! {
                _ = cancel.cancelled() => {
                    warn!("Stopped waiting for execution {} after {} attempts", handle, attempts);
                    return Err(ExecutionError::Cancelled {
                        execution_id: handle.id().to_string(),
                    });
                }
                _ = tokio::time::sleep(self.policy.interval) => {}
            }

            let status = self.api.fetch_status(handle).await?;
            attempts += 1;

            if status.state.is_completed() {
                info!("Execution {} completed after {} attempts", handle, attempts);
                return status.rows.ok_or_else(|| ExecutionError::Remote {
                    message: format!("Execution {} completed without a result", handle),
                    details: status.error,
                });
            }

            if status.state.is_terminal_failure() {
                warn!("Execution {} ended in state {}", handle, status.state);
                return Err(ExecutionError::Failed {
                    execution_id: handle.id().to_string(),
                    state: status.state,
                    details: status.error,
                });
            }

            debug!(
                "Execution {} is {} (attempt {}/{})",
                handle, status.state, attempts, self.policy.max_attempts
            );
        }

        Err(ExecutionError::Timeout {
            execution_id: handle.id().to_string(),
            attempts,
        })
    }
}
