//! Dune execution API client.
//!
//! Runs a saved query with bound parameters and collects its rows.
//!
//! # API Endpoints
//!
//! - Execute: `POST {base_url}/api/v1/query/{query_id}/execute`
//! - Results: `GET {base_url}/api/v1/execution/{execution_id}/results`
//!
//! Both endpoints authenticate with the `X-Dune-API-Key` header.

mod models;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::client::ExecutionApi;
use crate::errors::ExecutionError;
use crate::models::{ExecutionHandle, ExecutionStatus, QueryParameters};

use self::models::{ExecuteRequest, ExecuteResponse, ResultsResponse};

const PROVIDER_ID: &str = "DUNE";

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.dune.com";

/// Saved query computing Clankermon valuations
pub const DEFAULT_QUERY_ID: u64 = 5733367;

const API_KEY_HEADER: &str = "X-Dune-API-Key";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`DuneClient`].
#[derive(Debug, Clone)]
pub struct DuneClientConfig {
    pub base_url: String,
    pub query_id: u64,
    /// Sent as `X-Dune-API-Key`; requests go out unauthenticated when absent.
    pub api_key: Option<String>,
}

impl Default for DuneClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            query_id: DEFAULT_QUERY_ID,
            api_key: None,
        }
    }
}

/// Dune implementation of [`ExecutionApi`].
///
/// # Example
///
/// ```ignore
/// let client = DuneClient::new(DuneClientConfig {
///     api_key: Some("your-api-key".to_string()),
///     ..Default::default()
/// });
/// let handle = client.submit(&QueryParameters::new().with("level", "42")).await?;
/// ```
pub struct DuneClient {
    client: Client,
    config: DuneClientConfig,
}

impl DuneClient {
    pub fn new(config: DuneClientConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// Decode a successful response, or turn an error status into
    /// [`ExecutionError::Remote`] carrying the upstream body.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ExecutionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExecutionError::Remote {
                message: format!("HTTP error: {}", status),
                details: upstream_details(&body),
            });
        }

        response.json::<T>().await.map_err(|e| ExecutionError::Remote {
            message: format!("Invalid response from {}: {}", PROVIDER_ID, e),
            details: None,
        })
    }
}

/// Upstream error payload: JSON when the body parses, otherwise the raw text.
fn upstream_details(body: &str) -> Option<Value> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
}

#[async_trait]
impl ExecutionApi for DuneClient {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn submit(&self, params: &QueryParameters) -> Result<ExecutionHandle, ExecutionError> {
        let url = format!(
            "{}/api/v1/query/{}/execute",
            self.base_url(),
            self.config.query_id
        );

        let response = self
            .authorize(self.client.post(&url))
            .json(&ExecuteRequest {
                query_parameters: params,
            })
            .send()
            .await?;

        let body: ExecuteResponse = Self::decode(response).await?;
        debug!(
            "{} accepted execution {} (state {:?})",
            PROVIDER_ID, body.execution_id, body.state
        );
        Ok(ExecutionHandle::new(body.execution_id))
    }

    async fn fetch_status(
        &self,
        handle: &ExecutionHandle,
    ) -> Result<ExecutionStatus, ExecutionError> {
        let url = format!(
            "{}/api/v1/execution/{}/results",
            self.base_url(),
            urlencoding::encode(handle.id())
        );

        let response = self.authorize(self.client.get(&url)).send().await?;
        let body: ResultsResponse = Self::decode(response).await?;

        Ok(ExecutionStatus {
            execution_id: body
                .execution_id
                .unwrap_or_else(|| handle.id().to_string()),
            state: body.state,
            rows: body.result.and_then(|r| r.rows),
            error: body.error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionState;
    use axum::{
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorded {
        api_keys: Arc<Mutex<Vec<Option<String>>>>,
        bodies: Arc<Mutex<Vec<Value>>>,
    }

    impl Recorded {
        fn record(&self, headers: &HeaderMap) {
            let key = headers
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            self.api_keys.lock().unwrap().push(key);
        }
    }

    async fn execute(
        State(recorded): State<Recorded>,
        Path(query_id): Path<u64>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        recorded.record(&headers);
        recorded.bodies.lock().unwrap().push(body);
        if query_id == 404 {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Query not found"})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({"execution_id": "01HXEXEC", "state": "QUERY_STATE_PENDING"})),
        )
    }

    async fn results(
        State(recorded): State<Recorded>,
        Path(execution_id): Path<String>,
        headers: HeaderMap,
    ) -> (StatusCode, String) {
        recorded.record(&headers);
        match execution_id.as_str() {
            "done" => (
                StatusCode::OK,
                json!({
                    "execution_id": "done",
                    "state": "QUERY_STATE_COMPLETED",
                    "result": {"rows": [{"category": "_Final", "usd_valuation": 12.3}]}
                })
                .to_string(),
            ),
            "running" => (
                StatusCode::OK,
                json!({"execution_id": "running", "state": "QUERY_STATE_EXECUTING"}).to_string(),
            ),
            "broken" => (StatusCode::BAD_GATEWAY, "upstream exploded".to_string()),
            _ => (StatusCode::OK, "not json".to_string()),
        }
    }

    async fn spawn_stub() -> (String, Recorded) {
        let recorded = Recorded::default();
        let app = Router::new()
            .route("/api/v1/query/{query_id}/execute", post(execute))
            .route("/api/v1/execution/{execution_id}/results", get(results))
            .with_state(recorded.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), recorded)
    }

    fn client(base_url: String, query_id: u64, api_key: Option<&str>) -> DuneClient {
        DuneClient::new(DuneClientConfig {
            base_url,
            query_id,
            api_key: api_key.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_submit_sends_parameters_and_key() {
        let (base_url, recorded) = spawn_stub().await;
        let client = client(base_url, DEFAULT_QUERY_ID, Some("secret"));
        let params = QueryParameters::new()
            .with("level", "42")
            .with("cm_type", "Water");

        let handle = client.submit(&params).await.unwrap();

        assert_eq!(handle.id(), "01HXEXEC");
        assert_eq!(
            recorded.api_keys.lock().unwrap().as_slice(),
            &[Some("secret".to_string())]
        );
        assert_eq!(
            recorded.bodies.lock().unwrap()[0],
            json!({"query_parameters": {"level": "42", "cm_type": "Water"}})
        );
    }

    #[tokio::test]
    async fn test_submit_without_key_omits_header() {
        let (base_url, recorded) = spawn_stub().await;
        let client = client(format!("{}/", base_url), DEFAULT_QUERY_ID, None);
        assert!(!client.has_api_key());

        client
            .submit(&QueryParameters::new().with("level", "1"))
            .await
            .unwrap();

        assert_eq!(recorded.api_keys.lock().unwrap().as_slice(), &[None]);
    }

    #[tokio::test]
    async fn test_submit_error_carries_upstream_payload() {
        let (base_url, _) = spawn_stub().await;
        let client = client(base_url, 404, Some("secret"));

        let err = client
            .submit(&QueryParameters::new().with("level", "1"))
            .await
            .unwrap_err();

        match err {
            ExecutionError::Remote { message, details } => {
                assert!(message.contains("404"));
                assert_eq!(details, Some(json!({"error": "Query not found"})));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_status_completed_rows() {
        let (base_url, _) = spawn_stub().await;
        let client = client(base_url, DEFAULT_QUERY_ID, Some("secret"));

        let status = client
            .fetch_status(&ExecutionHandle::new("done"))
            .await
            .unwrap();

        assert_eq!(status.state, ExecutionState::Completed);
        let rows = status.rows.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["category"], json!("_Final"));
    }

    #[tokio::test]
    async fn test_fetch_status_pending_has_no_rows() {
        let (base_url, _) = spawn_stub().await;
        let client = client(base_url, DEFAULT_QUERY_ID, None);

        let status = client
            .fetch_status(&ExecutionHandle::new("running"))
            .await
            .unwrap();

        assert_eq!(status.state, ExecutionState::Executing);
        assert!(status.rows.is_none());
    }

    #[tokio::test]
    async fn test_fetch_status_http_error_keeps_raw_body() {
        let (base_url, _) = spawn_stub().await;
        let client = client(base_url, DEFAULT_QUERY_ID, None);

        let err = client
            .fetch_status(&ExecutionHandle::new("broken"))
            .await
            .unwrap_err();

        assert_eq!(err.details(), Some(&json!("upstream exploded")));
    }

    #[tokio::test]
    async fn test_fetch_status_undecodable_body_is_remote_error() {
        let (base_url, _) = spawn_stub().await;
        let client = client(base_url, DEFAULT_QUERY_ID, None);

        let err = client
            .fetch_status(&ExecutionHandle::new("garbage"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::Remote { details: None, .. }));
    }

    #[test]
    fn test_upstream_details() {
        assert_eq!(upstream_details("  "), None);
        assert_eq!(upstream_details("{\"a\":1}"), Some(json!({"a": 1})));
        assert_eq!(upstream_details("oops"), Some(json!("oops")));
    }
}
