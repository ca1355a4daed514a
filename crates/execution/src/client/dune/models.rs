//! Wire format of the Dune execution endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{ExecutionState, QueryParameters, ResultRow};

/// Body of `POST /api/v1/query/{query_id}/execute`.
#[derive(Debug, Serialize)]
pub(super) struct ExecuteRequest<'a> {
    pub query_parameters: &'a QueryParameters,
}

/// Response of the execute endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct ExecuteResponse {
    pub execution_id: String,
    #[serde(default)]
    pub state: Option<ExecutionState>,
}

/// Response of `GET /api/v1/execution/{execution_id}/results`.
#[derive(Debug, Deserialize)]
pub(super) struct ResultsResponse {
    #[serde(default)]
    pub execution_id: Option<String>,
    pub state: ExecutionState,
    #[serde(default)]
    pub result: Option<ResultPayload>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResultPayload {
    #[serde(default)]
    pub rows: Option<Vec<ResultRow>>,
}
