use std::sync::Arc;

use crate::{
    api::{base_url, request_token},
    main_lib::AppState,
    models::DonationResponse,
};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Html,
    routing::post,
    Json, Router,
};
use clankermon_core::frames::FrameInput;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Deserialize, Debug)]
pub struct EvaluateQuery {
    level: Option<String>,
}

fn frame_input(headers: &HeaderMap, body: &Bytes) -> FrameInput {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    FrameInput::decode(content_type, body)
}

pub async fn start(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Html<String> {
    let base = base_url(&state, &headers);
    Html(state.frames.start(&base).render())
}

pub async fn get_type(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Html<String> {
    let base = base_url(&state, &headers);
    let input = frame_input(&headers, &body);
    debug!("Frame level input: {:?}", input.text());
    Html(state.frames.get_type(&base, &input).render())
}

pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EvaluateQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Html<String> {
    let base = base_url(&state, &headers);
    // An unreadable query string counts as a missing level and gets the error card
    let level = match query {
        Ok(Query(query)) => query.level,
        Err(e) => {
            warn!("Unreadable frame evaluate query: {}", e);
            None
        }
    };
    let input = frame_input(&headers, &body);
    let (cancel, _guard) = request_token(&state);
    let card = state
        .frames
        .evaluate(&base, level.as_deref(), &input, &cancel)
        .await;
    Html(card.render())
}

#[utoipa::path(
    post,
    path = "/api/frame/donate",
    responses((status = 200, body = DonationResponse, description = "Transaction to sign"))
)]
pub async fn donate(State(state): State<Arc<AppState>>) -> Json<DonationResponse> {
    Json(state.frames.donate().into())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/frame/start", post(start))
        .route("/frame/get-type", post(get_type))
        .route("/frame/evaluate", post(evaluate))
        .route("/frame/donate", post(donate))
}
