#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::to_bytes, body::Body, http::Request, response::Response, Router};
use clankermon_execution::{
    ExecutionApi, ExecutionError, ExecutionHandle, ExecutionState, ExecutionStatus, PollPolicy,
    QueryParameters, ResultRow,
};
use clankermon_server::{api::app_router, build_state_with, config::Config};
use serde_json::{json, Value};
use tower::ServiceExt;

pub enum Script {
    /// Completes with `rows` on the given status fetch.
    CompleteOn(u32, Vec<ResultRow>),
    NeverComplete,
    /// Fails terminally on the first status fetch.
    FailTerminal(Value),
    RejectSubmit(Value),
}

/// In-process stand-in for the remote execution service.
pub struct FakeExecutionApi {
    script: Script,
    submits: AtomicU32,
    fetches: AtomicU32,
    params: Mutex<Vec<QueryParameters>>,
}

impl FakeExecutionApi {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            submits: AtomicU32::new(0),
            fetches: AtomicU32::new(0),
            params: Mutex::new(Vec::new()),
        })
    }

    pub fn submits(&self) -> u32 {
        self.submits.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn params(&self) -> Vec<QueryParameters> {
        self.params.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionApi for FakeExecutionApi {
    fn id(&self) -> &'static str {
        "FAKE"
    }

    async fn submit(&self, params: &QueryParameters) -> Result<ExecutionHandle, ExecutionError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        self.params.lock().unwrap().push(params.clone());
        if let Script::RejectSubmit(details) = &self.script {
            return Err(ExecutionError::Remote {
                message: "execute rejected".to_string(),
                details: Some(details.clone()),
            });
        }
        Ok(ExecutionHandle::new("exec-1"))
    }

    async fn fetch_status(
        &self,
        handle: &ExecutionHandle,
    ) -> Result<ExecutionStatus, ExecutionError> {
        let attempt = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        match &self.script {
            Script::CompleteOn(n, rows) if attempt >= *n => {
                Ok(ExecutionStatus::completed(handle.id(), rows.clone()))
            }
            Script::FailTerminal(details) => Ok(ExecutionStatus {
                execution_id: handle.id().to_string(),
                state: ExecutionState::Failed,
                rows: None,
                error: Some(details.clone()),
            }),
            _ => Ok(ExecutionStatus::pending(handle.id())),
        }
    }
}

pub fn row(category: &str, usd: Value, eth: Value) -> ResultRow {
    match json!({ "category": category, "usd_valuation": usd, "eth_valuation": eth }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Config for in-process tests: fast polling, public URL pinned.
pub fn test_config(static_dir: &std::path::Path) -> Config {
    Config {
        poll_policy: PollPolicy {
            max_attempts: 30,
            interval: Duration::from_millis(1),
        },
        donation_address: Some("0xd0na7e".to_string()),
        static_dir: static_dir.to_string_lossy().into_owned(),
        public_url: Some("https://frames.example".to_string()),
        ..Config::default()
    }
}

pub fn app(api: Arc<FakeExecutionApi>, config: &Config) -> Router {
    let state = build_state_with(api, config);
    app_router(state, config)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
