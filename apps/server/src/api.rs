use std::{path::Path, sync::Arc};

use crate::{
    config::Config,
    main_lib::AppState,
    models::{
        DonationParamsResponse, DonationResponse, ErrorBody, EvaluateBody, EvaluationResponse,
        ValuationRowResponse,
    },
};
use axum::{
    http::{header::HOST, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tokio_util::sync::{CancellationToken, DropGuard};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeFile,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub mod evaluation;
pub mod frames;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

#[utoipa::path(get, path = "/api/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(healthz, evaluation::evaluate, frames::donate),
    components(schemas(
        EvaluateBody,
        EvaluationResponse,
        ValuationRowResponse,
        ErrorBody,
        DonationResponse,
        DonationParamsResponse
    )),
    tags((name = "clankermon"))
)]
pub struct ApiDoc;

/// Origin used to build continuation URLs: the configured public URL, or
/// whatever the client (or a proxy in front of us) says it reached.
pub(crate) fn base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(url) = &state.public_url {
        return url.clone();
    }
    let proto = header_value(headers, FORWARDED_PROTO)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .unwrap_or("http");
    let host = header_value(headers, HOST.as_str()).unwrap_or("localhost");
    format!("{}://{}", proto, host)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Token scoped to one request. Cancelled on shutdown, and when the handler
/// future is dropped (client gone, request timeout) via the returned guard.
pub(crate) fn request_token(state: &AppState) -> (CancellationToken, DropGuard) {
    let token = state.shutdown.child_token();
    let guard = token.clone().drop_guard();
    (token, guard)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();
    let index = Path::new(&config.static_dir).join("index.html");

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .merge(evaluation::router())
        .merge(frames::router());

    Router::new()
        .nest("/api", api)
        .route_service("/", ServeFile::new(&index))
        .route_service("/frame", ServeFile::new(&index))
        .with_state(state)
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
