use std::sync::Arc;

use async_trait::async_trait;
use clankermon_execution::{CompletionPoller, ExecutionApi, ExecutionSubmitter, PollPolicy};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::errors::{Error, Result};
use crate::evaluation::{EvaluationRequest, EvaluationServiceTrait};
use crate::valuation::{format_result, EvaluationResult};

/// Composes submitter, poller and formatter into one evaluation.
#[derive(Clone)]
pub struct EvaluationService {
    submitter: ExecutionSubmitter,
    poller: CompletionPoller,
    donation_address: Option<String>,
}

impl EvaluationService {
    pub fn new(
        api: Arc<dyn ExecutionApi>,
        policy: PollPolicy,
        donation_address: Option<String>,
    ) -> Self {
        Self {
            submitter: ExecutionSubmitter::new(api.clone()),
            poller: CompletionPoller::new(api, policy),
            donation_address,
        }
    }

    pub fn donation_address(&self) -> Option<&str> {
        self.donation_address.as_deref()
    }
}

#[async_trait]
impl EvaluationServiceTrait for EvaluationService {
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
        cancel: &CancellationToken,
    ) -> Result<EvaluationResult> {
        info!(
            "Evaluating Clankermon: level {}, type {}",
            request.level(),
            request.cm_type()
        );

        let outcome = async {
            let handle = self
                .submitter
                .submit(request.level(), request.cm_type())
                .await?;
            let rows = self.poller.await_completion(&handle, cancel).await?;
            Ok::<_, Error>(rows)
        }
        .await;

        match outcome {
            Ok(rows) => {
                info!("Received {} valuation rows", rows.len());
                Ok(format_result(
                    request.level(),
                    request.cm_type(),
                    &rows,
                    self.donation_address(),
                ))
            }
            Err(e) => {
                error!(
                    "Error evaluating Clankermon (level {}, type {}): {} {:?}",
                    request.level(),
                    request.cm_type(),
                    e,
                    e.details()
                );
                Err(e)
            }
        }
    }
}
