use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use brandkit_codegen::DesignEngine;
use brandkit_core::design::MemoryDesignStore;
use brandkit_core::typography::TypographyGenerator;
use brandkit_core::BrandkitConfig;
use brandkit_web::{create_router, AppState, USER_ID_HEADER};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN: &str = "admin-1";

fn test_state() -> AppState {
    let engine = DesignEngine::new(64)
        .unwrap()
        .with_typography(TypographyGenerator::with_seed(7));
    let config = BrandkitConfig {
        admin_users: vec![ADMIN.to_string()],
        ..BrandkitConfig::default()
    };
    AppState::new(Arc::new(MemoryDesignStore::new()), engine, config)
}

fn request(method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, req).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Generate a design system for `owner` and return it in the shape
/// `POST /api/design-systems` accepts as `data`.
async fn generated_data(app: &Router, owner: &str, description: &str) -> Value {
    let req = request(
        Method::POST,
        "/api/generate",
        Some(owner),
        Some(json!({ "description": description })),
    );
    let (status, generated) = send_json(app, req).await;
    assert_eq!(status, StatusCode::OK);
    json!({
        "colors": generated["colors"],
        "typography": generated["typography"],
        "spacing": generated["spacing"],
        "components": generated["components"],
    })
}

/// Assert a JSON `{"error": ...}` response with the given status; returns the message.
async fn expect_error(app: &Router, req: Request<Body>, expected: StatusCode) -> String {
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), expected);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"), "{}", content_type);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = create_router(test_state());
    let (status, body) = send_json(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_generate_requires_user() {
    let app = create_router(test_state());
    let req = request(
        Method::POST,
        "/api/generate",
        None,
        Some(json!({ "description": "A calm meditation app" })),
    );
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains(USER_ID_HEADER));
}

#[tokio::test]
async fn test_generate_rejects_blank_description() {
    let app = create_router(test_state());
    let req = request(Method::POST, "/api/generate", Some("u1"), Some(json!({ "description": "  " })));
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_generate_returns_full_system() {
    let app = create_router(test_state());
    let req = request(
        Method::POST,
        "/api/generate",
        Some("u1"),
        Some(json!({ "description": "A modern fintech app for young investors" })),
    );
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("id").is_none());
    assert!(body["analysis"]["industry"].is_string());
    assert!(body["colors"]["primary"]["500"].is_string());
    assert!(body["typography"]["fonts"]["heading"].is_string());
    assert!(body["spacing"].is_object());
    assert_eq!(body["components"].as_array().unwrap().len(), 14);
}

#[tokio::test]
async fn test_design_system_lifecycle() {
    let app = create_router(test_state());

    let req = request(
        Method::POST,
        "/api/generate",
        Some("u1"),
        Some(json!({ "description": "Organic bakery with warm vibes", "save": true, "name": "Bakery" })),
    );
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, list) = send_json(&app, request(Method::GET, "/api/design-systems", Some("u1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.as_str());
    assert_eq!(list[0]["name"], "Bakery");
    assert_eq!(list[0]["componentCount"], 14);

    let uri = format!("/api/design-systems/{}", id);
    let (status, design) = send_json(&app, request(Method::GET, &uri, Some("u1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(design["ownerId"], "u1");
    assert_eq!(design["description"], "Organic bakery with warm vibes");

    // Other owners cannot see it.
    let (status, _) = send_json(&app, request(Method::GET, &uri, Some("u2"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, request(Method::DELETE, &uri, Some("u1"), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, request(Method::DELETE, &uri, Some("u1"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send_json(&app, request(Method::GET, &uri, Some("u1"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_and_export_design_system() {
    let app = create_router(test_state());

    let data = generated_data(&app, "u1", "Playful kids learning games").await;

    let req = request(
        Method::POST,
        "/api/design-systems",
        Some("u1"),
        Some(json!({ "name": "Kids", "description": "Learning games", "data": data })),
    );
    let (status, created) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();

    let uri = format!("/api/design-systems/{}/export?format=css", id);
    let response = app
        .clone()
        .oneshot(request(Method::GET, &uri, Some("u1"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/css"));
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.contains("design-tokens.css"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let css = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(css.contains(":root"));
    assert!(css.contains("--color-primary-500"));

    let uri = format!("/api/design-systems/{}/export?format=pdf", id);
    let (status, _) = send_json(&app, request(Method::GET, &uri, Some("u1"), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_design_system_requires_name() {
    let app = create_router(test_state());
    let data = generated_data(&app, "u1", "Organic tea shop").await;
    let req = request(
        Method::POST,
        "/api/design-systems",
        Some("u1"),
        Some(json!({ "name": " ", "data": data })),
    );
    let message = expect_error(&app, req, StatusCode::BAD_REQUEST).await;
    assert_eq!(message, "name is required");
}

#[tokio::test]
async fn test_create_design_system_rejects_invalid_colors() {
    let app = create_router(test_state());
    let mut data = generated_data(&app, "u1", "Organic tea shop").await;
    data["colors"]["primary"]["500"] = json!("red; } body { display: none");

    let req = request(
        Method::POST,
        "/api/design-systems",
        Some("u1"),
        Some(json!({ "name": "Tea", "data": data })),
    );
    let message = expect_error(&app, req, StatusCode::BAD_REQUEST).await;
    assert!(message.contains("colors.primary.500"), "{}", message);

    let (_, list) = send_json(&app, request(Method::GET, "/api/design-systems", Some("u1"), None)).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_export_header_survives_hostile_name() {
    let app = create_router(test_state());
    let data = generated_data(&app, "u1", "Organic tea shop").await;
    let req = request(
        Method::POST,
        "/api/design-systems",
        Some("u1"),
        Some(json!({ "name": "Acme */ .x {", "data": data })),
    );
    let (status, created) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/design-systems/{}/export?format=css", created["id"].as_str().unwrap());
    let (status, bytes) = send(&app, request(Method::GET, &uri, Some("u1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    let css = String::from_utf8(bytes).unwrap();
    assert_eq!(
        css.lines().next().unwrap(),
        "/* Acme  .x { design tokens, generated by brandkit */"
    );
}

#[tokio::test]
async fn test_malformed_input_is_a_json_400() {
    let app = create_router(test_state());

    let message = expect_error(
        &app,
        request(Method::POST, "/api/generate", Some("u1"), Some(json!({}))),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(message.contains("description"), "{}", message);

    let not_json = Request::builder()
        .method(Method::POST)
        .uri("/api/generate")
        .header(USER_ID_HEADER, "u1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();
    expect_error(&app, not_json, StatusCode::BAD_REQUEST).await;

    expect_error(
        &app,
        request(Method::POST, "/api/accessibility", None, Some(json!({ "foreground": 1 }))),
        StatusCode::BAD_REQUEST,
    )
    .await;

    expect_error(
        &app,
        request(Method::GET, "/api/admin/metrics?days=abc", Some(ADMIN), None),
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[tokio::test]
async fn test_palette_from_primary() {
    let app = create_router(test_state());
    let req = request(Method::POST, "/api/palette", None, Some(json!({ "primary": "#0ea5e9" })));
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("analysis").is_none());
    let primary = body["palette"]["primary"]["500"].as_str().unwrap();
    assert!(primary.eq_ignore_ascii_case("#0ea5e9"));
    assert_eq!(body["palette"]["accessibility"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_palette_from_description() {
    let app = create_router(test_state());
    let req = request(
        Method::POST,
        "/api/palette",
        None,
        Some(json!({ "description": "Eco-friendly outdoor gear" })),
    );
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["analysis"].is_object());
    assert!(body["palette"]["neutral"]["900"].is_string());
}

#[tokio::test]
async fn test_palette_validation() {
    let app = create_router(test_state());
    let (status, _) = send_json(&app, request(Method::POST, "/api/palette", None, Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = request(Method::POST, "/api/palette", None, Some(json!({ "primary": "not-a-color" })));
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_typography_with_seed_is_stable() {
    let app = create_router(test_state());
    let body = json!({ "personality": "elegant", "seed": 42 });
    let (status, first) = send_json(&app, request(Method::POST, "/api/typography", None, Some(body.clone()))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send_json(&app, request(Method::POST, "/api/typography", None, Some(body))).await;
    assert_eq!(first["typography"]["fonts"], second["typography"]["fonts"]);
    assert_eq!(first["typography"]["personality"], "elegant");
}

#[tokio::test]
async fn test_components_by_kind() {
    let app = create_router(test_state());
    let req = request(
        Method::POST,
        "/api/components",
        None,
        Some(json!({ "primary": "#6366F1", "kind": "button" })),
    );
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let components = body["components"].as_array().unwrap();
    assert_eq!(components.len(), 4);
    assert!(components.iter().all(|c| c["code"]["react"].is_string()));

    let req = request(
        Method::POST,
        "/api/components",
        None,
        Some(json!({ "primary": "#6366F1", "kind": "carousel" })),
    );
    let (status, _) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_accessibility_check() {
    let app = create_router(test_state());
    let req = request(
        Method::POST,
        "/api/accessibility",
        None,
        Some(json!({ "foreground": "#000000", "background": "#FFFFFF" })),
    );
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!((body["ratio"].as_f64().unwrap() - 21.0).abs() < 0.01);
    assert_eq!(body["wcagAA"], true);
    assert_eq!(body["wcagAAA"], true);
}

#[tokio::test]
async fn test_admin_metrics_requires_admin() {
    let app = create_router(test_state());
    let (status, _) = send_json(&app, request(Method::GET, "/api/admin/metrics", Some("u1"), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send_json(&app, request(Method::GET, "/api/admin/metrics", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_metrics_reports_activity() {
    let app = create_router(test_state());
    send(&app, request(Method::GET, "/health", None, None)).await;
    let req = request(
        Method::POST,
        "/api/generate",
        Some("u1"),
        Some(json!({ "description": "Luxury fashion boutique" })),
    );
    send(&app, req).await;

    let (status, body) = send_json(&app, request(Method::GET, "/api/admin/metrics?days=1", Some(ADMIN), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"], 1);
    assert_eq!(body["usage"]["byAction"]["generate"], 1);
    assert!(body["performance"]["totalRequests"].as_u64().unwrap() >= 2);
    assert!(body["performance"]["byEndpoint"]["POST /api/generate"].is_object());
    assert!(body["cache"]["shades"].is_object());
}
