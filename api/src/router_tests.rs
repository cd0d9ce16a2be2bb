use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use ai_llm_service::config::llm_model_config::LlmModelConfig;
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::{
    core::{
        app_state::AppState,
        config::{AppConfig, LlmMode},
    },
    middleware_layer::cors::ALLOW_HEADERS,
    router,
};

/* ---------------------------- fake Gemini ---------------------------- */

#[derive(Clone)]
struct FakeGemini {
    status: StatusCode,
    body: Value,
    hits: Arc<AtomicUsize>,
}

async fn fake_generate(State(fake): State<FakeGemini>) -> (StatusCode, Json<Value>) {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    (fake.status, Json(fake.body.clone()))
}

async fn spawn_gemini(status: StatusCode, body: Value) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v1beta/models/{action}", post(fake_generate))
        .with_state(FakeGemini {
            status,
            body,
            hits: hits.clone(),
        });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), hits)
}

fn model_text(text: &str) -> Value {
    json!({ "candidates": [ { "content": { "parts": [ { "text": text } ] } } ] })
}

/* ------------------------------ helpers ------------------------------ */

fn config(endpoint: &str, key: Option<&str>, mode: LlmMode, strict: bool) -> AppConfig {
    AppConfig {
        api_address: "127.0.0.1:0".into(),
        llm: LlmModelConfig {
            model: "gemini-2.0-flash".into(),
            endpoint: endpoint.into(),
            api_key: key.map(str::to_string),
            max_tokens: None,
            temperature: None,
        },
        mode,
        strict_schema: strict,
    }
}

fn app(config: &AppConfig) -> Router {
    router(Arc::new(AppState::new(config).unwrap()))
}

fn mock_app() -> Router {
    app(&config("http://127.0.0.1:9", None, LlmMode::Mock, false))
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn read_json(res: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors(res: &Response<Body>) {
    let h = res.headers();
    assert_eq!(h[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(h[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
    assert_eq!(h[header::CONTENT_TYPE], "application/json");
}

/* ------------------------------- tests ------------------------------- */

#[tokio::test]
async fn preflight_is_bare_200_on_any_path() {
    for uri in ["/ai_mission_plan", "/ai_nebula_structurer", "/no/such/route"] {
        let req = Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let res = mock_app().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_cors(&res);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }
}

#[tokio::test]
async fn missing_or_empty_field_is_400_naming_the_field() {
    let res = mock_app()
        .oneshot(post_json("/ai_mission_plan", "{}"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_cors(&res);
    let body = read_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("idea"));

    let res = mock_app()
        .oneshot(post_json("/ai_nebula_structurer", r#"{"raw_input":""}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("raw_input"));
}

#[tokio::test]
async fn unparsable_body_is_400() {
    let res = mock_app()
        .oneshot(post_json("/ai_mission_plan", "idea=podcast"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn mock_mission_plan_embeds_idea() {
    let res = mock_app()
        .oneshot(post_json("/ai_mission_plan", r#"{"idea":"Launch a podcast"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_cors(&res);

    let body = read_json(res).await;
    assert!(body["mission_title"].as_str().unwrap().contains("Launch a podcast"));
    let priority = body["priority"].as_str().unwrap();
    assert!(["low", "medium", "high"].contains(&priority));
    assert!(body["estimated_minutes"].is_number());
    assert!(body["subtasks"].is_array());
}

#[tokio::test]
async fn mock_nebula_returns_brief_shape() {
    let res = mock_app()
        .oneshot(post_json(
            "/ai_nebula_structurer",
            r#"{"raw_input":"an app for dog walkers"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    for key in ["summary", "steps", "risks", "timeline"] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
}

#[tokio::test]
async fn upstream_failure_status_is_400_with_status_code() {
    let (base, hits) = spawn_gemini(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": { "code": 503, "message": "overloaded" } }),
    )
    .await;
    let app = app(&config(&base, Some("test-key"), LlmMode::Auto, false));

    let res = app
        .oneshot(post_json("/ai_mission_plan", r#"{"idea":"Launch a podcast"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_cors(&res);
    let body = read_json(res).await;
    let msg = body["error"].as_str().unwrap();
    assert!(msg.contains("503"), "{msg}");
    assert!(!msg.contains("test-key"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_json_model_text_is_400() {
    let (base, _) = spawn_gemini(StatusCode::OK, model_text("Here is your plan: step one...")).await;
    let app = app(&config(&base, Some("k"), LlmMode::Live, false));

    let res = app
        .oneshot(post_json("/ai_nebula_structurer", r#"{"raw_input":"x"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn envelope_without_text_is_400() {
    let (base, _) = spawn_gemini(StatusCode::OK, json!({ "promptFeedback": {} })).await;
    let app = app(&config(&base, Some("k"), LlmMode::Live, false));

    let res = app
        .oneshot(post_json("/ai_mission_plan", r#"{"idea":"x"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn model_json_is_relayed_deep_equal() {
    let doc = json!({
        "mission_title": "Launch a podcast",
        "mission_description": "Ship episode one",
        "priority": "high",
        "estimated_minutes": 90,
        "subtasks": ["Pick a topic", "Record", "Publish"],
        "unexpected": { "kept": true }
    });
    let (base, _) = spawn_gemini(StatusCode::OK, model_text(&doc.to_string())).await;
    let app = app(&config(&base, Some("k"), LlmMode::Live, false));

    let res = app
        .oneshot(post_json("/ai_mission_plan", r#"{"idea":"Launch a podcast"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_json(res).await, doc);
}

#[tokio::test]
async fn live_mode_without_key_fails_before_upstream() {
    let (base, hits) = spawn_gemini(StatusCode::OK, model_text("{}")).await;
    let app = app(&config(&base, None, LlmMode::Live, false));

    let res = app
        .oneshot(post_json("/ai_mission_plan", r#"{"idea":"x"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn strict_schema_rejects_nonconforming_output() {
    let doc = json!({ "summary": "s", "steps": "not a list" });
    let (base, _) = spawn_gemini(StatusCode::OK, model_text(&doc.to_string())).await;

    let strict = app(&config(&base, Some("k"), LlmMode::Live, true));
    let res = strict
        .oneshot(post_json("/ai_nebula_structurer", r#"{"raw_input":"x"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("nebula_structurer"));

    let lenient = app(&config(&base, Some("k"), LlmMode::Live, false));
    let res = lenient
        .oneshot(post_json("/ai_nebula_structurer", r#"{"raw_input":"x"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_json(res).await, doc);
}

#[tokio::test]
async fn health_reports_strategy_per_handler() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let res = mock_app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_cors(&res);

    let body = read_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["handlers"][0]["name"], "mission_plan");
    assert_eq!(body["handlers"][0]["strategy"], "mock");
    assert_eq!(body["handlers"][1]["input_field"], "raw_input");
    assert!(body.get("upstream").is_none());
}

#[tokio::test]
async fn unknown_route_is_json_404_with_cors() {
    let req = Request::builder()
        .uri("/nope")
        .body(Body::empty())
        .unwrap();
    let res = mock_app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_cors(&res);
    assert_eq!(read_json(res).await["error"], "not found");
}

#[tokio::test]
async fn wrong_method_is_json_405_with_cors() {
    let req = Request::builder()
        .method("GET")
        .uri("/ai_mission_plan")
        .body(Body::empty())
        .unwrap();
    let res = mock_app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&res);
    assert_eq!(read_json(res).await["error"], "method not allowed");
}

#[tokio::test]
async fn body_larger_than_two_megabytes_is_accepted() {
    let idea = "a".repeat(3 * 1024 * 1024);
    let body = json!({ "idea": idea }).to_string();

    let res = mock_app()
        .oneshot(post_json("/ai_mission_plan", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_cors(&res);
    let body = read_json(res).await;
    assert!(body["mission_title"].as_str().unwrap().starts_with("Mission: aaaa"));
}

#[tokio::test]
async fn unreachable_upstream_is_400_without_key() {
    // Nothing listens on port 1.
    let app = app(&config(
        "http://127.0.0.1:1",
        Some("secret-key-xyz"),
        LlmMode::Live,
        false,
    ));

    let res = app
        .oneshot(post_json("/ai_nebula_structurer", r#"{"raw_input":"x"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_cors(&res);
    let body = read_json(res).await;
    let msg = body["error"].as_str().unwrap();
    assert!(msg.contains("transport error"), "{msg}");
    assert!(!msg.contains("secret-key-xyz"), "{msg}");
}
