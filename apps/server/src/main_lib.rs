use std::sync::Arc;

use crate::config::Config;
use clankermon_core::evaluation::{EvaluationService, EvaluationServiceTrait};
use clankermon_core::frames::{CardStepController, FrameImages};
use clankermon_execution::{DuneClient, ExecutionApi};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub evaluation_service: Arc<dyn EvaluationServiceTrait>,
    pub frames: CardStepController,
    pub public_url: Option<String>,
    /// Root of every per-request token; cancelled on shutdown.
    pub shutdown: CancellationToken,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let client = DuneClient::new(config.dune.clone());
    if client.has_api_key() {
        tracing::info!("Dune API key configured (query {})", config.dune.query_id);
    } else {
        tracing::warn!("DUNE_API_KEY is not set; remote executions will be rejected");
    }
    build_state_with(Arc::new(client), config)
}

/// Wires the services over an arbitrary execution API.
pub fn build_state_with(api: Arc<dyn ExecutionApi>, config: &Config) -> Arc<AppState> {
    let evaluation_service: Arc<dyn EvaluationServiceTrait> = Arc::new(EvaluationService::new(
        api,
        config.poll_policy,
        config.donation_address.clone(),
    ));
    let frames = CardStepController::new(
        evaluation_service.clone(),
        FrameImages::default(),
        config.donation_address.clone(),
    );

    Arc::new(AppState {
        evaluation_service,
        frames,
        public_url: config.public_url.clone(),
        shutdown: CancellationToken::new(),
    })
}
