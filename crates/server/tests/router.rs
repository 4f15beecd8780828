use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::MemoryStore;
use tower::ServiceExt;

use server::startup::build_app;

fn app_with(snapshot: &str) -> anyhow::Result<Router> {
    let store = MemoryStore::from_json(snapshot)?;
    Ok(build_app(Arc::new(store), "frontend")?)
}

async fn send(app: Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

const SERVICES: &str = r#"{"services": [
    {"id": 1, "title": "A", "category": "coding"},
    {"id": 2, "title": "B", "category": "revenue"}
]}"#;

#[tokio::test]
async fn list_defaults_to_first_page() -> anyhow::Result<()> {
    let (status, body) = send(app_with(SERVICES)?, get("/api/services")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["data"][0], json!({"id": 1, "title": "A", "category": "coding"}));
    Ok(())
}

#[tokio::test]
async fn unknown_collection_lists_empty() -> anyhow::Result<()> {
    let (status, body) = send(app_with(SERVICES)?, get("/api/widgets")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": [], "total": 0}));
    Ok(())
}

#[tokio::test]
async fn get_one_missing_is_404() -> anyhow::Result<()> {
    let (status, body) = send(app_with(SERVICES)?, get("/api/services/9")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item with id \"9\" not found in \"services\"");
    Ok(())
}

#[tokio::test]
async fn create_on_empty_collection_starts_at_one() -> anyhow::Result<()> {
    let req = Request::builder()
        .method("POST")
        .uri("/api/statistics")
        .header("content-type", "application/json")
        .body(Body::from(json!({"label": "Agencies", "value": "10", "description": "Served"}).to_string()))?;
    let (status, body) = send(app_with("{}")?, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
    Ok(())
}

#[tokio::test]
async fn delete_missing_leaves_collection_alone() -> anyhow::Result<()> {
    let app = app_with(SERVICES)?;
    let req = Request::builder().method("DELETE").uri("/api/services/99").body(Body::empty())?;
    let (status, _) = send(app.clone(), req).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(app, get("/api/services")).await?;
    assert_eq!(body["total"], 2);
    Ok(())
}

#[tokio::test]
async fn auth_stub_endpoints() -> anyhow::Result<()> {
    let app = app_with(SERVICES)?;
    let (status, body) = send(app.clone(), get("/auth/identity")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 0, "email": "user@example.com"}));

    let (status, body) = send(app, get("/auth/permissions")).await?;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["message"], "Not implemented");
    Ok(())
}

#[tokio::test]
async fn public_contact_is_null_without_records() -> anyhow::Result<()> {
    let (status, body) = send(app_with(SERVICES)?, get("/api/public/contact")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": null}));
    Ok(())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn malformed_json_body_is_a_json_400() -> anyhow::Result<()> {
    let app = app_with(SERVICES)?;
    let (status, body) = send(app.clone(), post_json("/api/services/query", "{not json")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));

    // 结构不符 (字段类型错误) 同样按 400 返回
    let (status, body) = send(app.clone(), post_json("/api/services/query", r#"{"filters": 3}"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, body) = send(app, post_json("/api/public/contact-submissions", "[")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn numeric_zero_filter_in_query_string_is_ignored() -> anyhow::Result<()> {
    let snapshot = r#"{"statistics": [{"id": 1, "rank": 0}, {"id": 2, "rank": 5}]}"#;
    let (status, body) = send(app_with(snapshot)?, get("/api/statistics?filter=rank:eq:0")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    Ok(())
}
