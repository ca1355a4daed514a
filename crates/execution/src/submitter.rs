//! Submission of valuation executions.

use std::sync::Arc;

use tracing::info;

use crate::client::ExecutionApi;
use crate::errors::ExecutionError;
use crate::models::{ExecutionHandle, QueryParameters};

/// Query parameter carrying the Clankermon level.
pub const LEVEL_PARAM: &str = "level";

/// Query parameter carrying the Clankermon type.
pub const TYPE_PARAM: &str = "cm_type";

/// Starts one remote execution per call.
#[derive(Clone)]
pub struct ExecutionSubmitter {
    api: Arc<dyn ExecutionApi>,
}

impl ExecutionSubmitter {
    pub fn new(api: Arc<dyn ExecutionApi>) -> Self {
        Self { api }
    }

    /// Submit a valuation for `level` and `cm_type`.
    ///
    /// Both values are sent verbatim and must be non-empty; otherwise this
    /// fails with [`ExecutionError::InvalidParameters`] without touching the network.
    pub async fn submit(
        &self,
        level: &str,
        cm_type: &str,
    ) -> Result<ExecutionHandle, ExecutionError> {
        let missing: Vec<&str> = [(LEVEL_PARAM, level), (TYPE_PARAM, cm_type)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            return Err(ExecutionError::InvalidParameters(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        let params = QueryParameters::new()
            .with(LEVEL_PARAM, level)
            .with(TYPE_PARAM, cm_type);
        let handle = self.api.submit(&params).await?;
        info!(
            "Submitted {} execution {} for level {}, type {}",
            self.api.id(),
            handle,
            level,
            cm_type
        );
        Ok(handle)
    }
}
