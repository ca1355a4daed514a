mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use common::{app, body_json, body_text, row, send, test_config, FakeExecutionApi, Script};
use serde_json::json;
use tempfile::tempdir;

fn post(uri: &str, content_type: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn frame_action(input: &str) -> String {
    json!({ "untrustedData": { "inputText": input } }).to_string()
}

/// Content of the `<meta property=...>` tag, if present.
fn meta<'a>(html: &'a str, property: &str) -> Option<&'a str> {
    let marker = format!("property=\"{}\" content=\"", property);
    let start = html.find(&marker)? + marker.len();
    let end = html[start..].find('"')?;
    Some(&html[start..start + end])
}

#[tokio::test]
async fn level_and_type_flow_through_the_cards() {
    let dir = tempdir().unwrap();
    let api = FakeExecutionApi::new(Script::CompleteOn(
        2,
        vec![row("_Final", json!("12.3"), json!("0.001"))],
    ));
    let app = app(api.clone(), &test_config(dir.path()));

    let start = body_text(send(&app, post("/api/frame/start", "application/json", "{}")).await).await;
    assert_eq!(
        meta(&start, "fc:frame:post_url"),
        Some("https://frames.example/api/frame/get-type")
    );
    assert!(meta(&start, "fc:frame:input:text").is_some());

    let get_type = body_text(
        send(
            &app,
            post("/api/frame/get-type", "application/json", &frame_action("42")),
        )
        .await,
    )
    .await;
    let evaluate_url = meta(&get_type, "fc:frame:post_url").unwrap().to_string();
    assert_eq!(evaluate_url, "https://frames.example/api/frame/evaluate?level=42");

    let path = evaluate_url.trim_start_matches("https://frames.example");
    let result = body_text(
        send(&app, post(path, "application/json", &frame_action("Water"))).await,
    )
    .await;

    let params = api.params();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].get("level"), Some("42"));
    assert_eq!(params[0].get("cm_type"), Some("Water"));

    assert!(result.contains("Level: 42 | Type: Water"));
    assert!(result.contains("USD: $12.30"));
    assert!(result.contains("ETH: Ξ0.001000"));
    assert_eq!(meta(&result, "fc:frame:button:1:action"), Some("tx"));
    assert_eq!(
        meta(&result, "fc:frame:button:1:target"),
        Some("https://frames.example/api/frame/donate")
    );
}

#[tokio::test]
async fn form_encoded_input_is_accepted() {
    let dir = tempdir().unwrap();
    let app = app(
        FakeExecutionApi::new(Script::CompleteOn(1, vec![])),
        &test_config(dir.path()),
    );

    let html = body_text(
        send(
            &app,
            post(
                "/api/frame/get-type",
                "application/x-www-form-urlencoded",
                "inputText=9",
            ),
        )
        .await,
    )
    .await;
    assert_eq!(
        meta(&html, "fc:frame:post_url"),
        Some("https://frames.example/api/frame/evaluate?level=9")
    );
}

#[tokio::test]
async fn missing_level_renders_error_card() {
    let dir = tempdir().unwrap();
    let api = FakeExecutionApi::new(Script::CompleteOn(1, vec![]));
    let app = app(api.clone(), &test_config(dir.path()));

    let response = send(
        &app,
        post("/api/frame/evaluate", "application/json", &frame_action("Fire")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>Error</h1>"));
    assert_eq!(
        meta(&html, "fc:frame:button:1:post_url"),
        Some("https://frames.example/api/frame/start")
    );
    assert_eq!(api.submits(), 0);
}

#[tokio::test]
async fn unreadable_query_renders_error_card() {
    let dir = tempdir().unwrap();
    let api = FakeExecutionApi::new(Script::CompleteOn(1, vec![]));
    let app = app(api.clone(), &test_config(dir.path()));

    let response = send(
        &app,
        post(
            "/api/frame/evaluate?level=1&level=2",
            "application/json",
            &frame_action("Fire"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>Error</h1>"));
    assert_eq!(
        meta(&html, "fc:frame:button:1:post_url"),
        Some("https://frames.example/api/frame/start")
    );
    assert_eq!(api.submits(), 0);
}

#[tokio::test]
async fn remote_failure_renders_error_card() {
    let dir = tempdir().unwrap();
    let api = FakeExecutionApi::new(Script::NeverComplete);
    let app = app(api.clone(), &test_config(dir.path()));

    let html = body_text(
        send(
            &app,
            post("/api/frame/evaluate?level=3", "application/json", &frame_action("Fire")),
        )
        .await,
    )
    .await;
    assert!(html.contains("<h1>Error</h1>"));
    assert_eq!(api.fetches(), 30);
}

#[tokio::test]
async fn base_url_follows_forwarded_headers() {
    let dir = tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.public_url = None;
    let app = app(FakeExecutionApi::new(Script::NeverComplete), &config);

    let request = Request::builder()
        .method("POST")
        .uri("/api/frame/start")
        .header("host", "cm.example:8443")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();
    let html = body_text(send(&app, request).await).await;
    assert_eq!(
        meta(&html, "fc:frame:post_url"),
        Some("https://cm.example:8443/api/frame/get-type")
    );
}

#[tokio::test]
async fn donate_returns_fixed_transaction() {
    let dir = tempdir().unwrap();
    let app = app(
        FakeExecutionApi::new(Script::NeverComplete),
        &test_config(dir.path()),
    );

    let response = send(&app, post("/api/frame/donate", "application/json", "{}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let tx = body_json(response).await;
    assert_eq!(tx["chainId"], "eip155:8453");
    assert_eq!(tx["method"], "eth_sendTransaction");
    assert_eq!(tx["params"]["to"], "0xd0na7e");
    assert_eq!(tx["params"]["value"], "230000");
    assert_eq!(tx["params"]["abi"], json!([]));
}
