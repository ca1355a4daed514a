use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::Result;
use crate::evaluation::EvaluationRequest;
use crate::valuation::EvaluationResult;

/// Trait for evaluation service operations
#[async_trait]
pub trait EvaluationServiceTrait: Send + Sync {
    /// Submits the request remotely, waits for completion and formats the rows.
    ///
    /// Runs submit, poll and format strictly in that order. Each call starts
    /// its own remote execution; nothing is shared between calls.
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
        cancel: &CancellationToken,
    ) -> Result<EvaluationResult>;
}
