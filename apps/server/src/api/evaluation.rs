use std::sync::Arc;

use crate::{
    api::request_token,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{EvaluateBody, EvaluationResponse},
};
use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use clankermon_core::evaluation::EvaluationRequest;
use serde_json::Value;

/// Plain text of a loose parameter: strings as-is, numbers in decimal form.
fn param_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[utoipa::path(
    post,
    path = "/api/evaluate",
    request_body = EvaluateBody,
    responses(
        (status = 200, body = EvaluationResponse),
        (status = 400, body = ErrorBody, description = "Missing level or cm_type"),
        (status = 408, body = ErrorBody, description = "Execution did not finish in time"),
        (status = 500, body = ErrorBody, description = "Remote service failure")
    )
)]
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<EvaluationResponse>> {
    // Anything that is not a JSON object counts as missing parameters
    let body = match serde_json::from_slice::<Value>(&body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        _ => EvaluateBody::default(),
    };

    let request = EvaluationRequest::new(
        param_text(body.level.as_ref()).unwrap_or_default(),
        param_text(body.cm_type.as_ref()).unwrap_or_default(),
    )
    .map_err(ApiError::from)?;

    let (cancel, _guard) = request_token(&state);
    let result = state
        .evaluation_service
        .evaluate(&request, &cancel)
        .await?;
    Ok(Json(result.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/evaluate", post(evaluate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_text() {
        assert_eq!(param_text(Some(&json!("42"))).as_deref(), Some("42"));
        assert_eq!(param_text(Some(&json!(42))).as_deref(), Some("42"));
        assert_eq!(param_text(Some(&json!(1.5))).as_deref(), Some("1.5"));
        assert_eq!(param_text(Some(&json!(null))), None);
        assert_eq!(param_text(Some(&json!(["x"]))), None);
        assert_eq!(param_text(None), None);
    }
}
