use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod data;
pub mod public;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public pages, the JSON API, the
/// auth placeholder and the admin app.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: &str) -> Router {
    // 公开页面（服务端渲染）
    let pages = Router::new()
        .route("/", get(public::home_page))
        .route("/about", get(public::about_page))
        .route("/contact", get(public::contact_page).post(public::submit_contact_form));

    let public_api = Router::new()
        .route("/api/public/landing", get(public::landing_json))
        .route("/api/public/contact", get(public::contact_json))
        .route("/api/public/contact-submissions", post(public::submit_contact_json));

    // 通用数据接口：静态段（query、admin）优先于参数段匹配
    let data_api = Router::new()
        .route("/api/admin/statistics", put(admin::update_statistics))
        .route("/api/:resource", get(data::list).post(data::create))
        .route("/api/:resource/query", post(data::query))
        .route(
            "/api/:resource/:id",
            get(data::get_one).patch(data::update).delete(data::delete_one),
        );

    let auth_routes = Router::new()
        .route("/auth/check", get(auth::check))
        .route("/auth/identity", get(auth::identity))
        .route("/auth/login", post(auth::not_implemented))
        .route("/auth/register", post(auth::not_implemented))
        .route("/auth/logout", post(auth::not_implemented))
        .route("/auth/permissions", get(auth::not_implemented));

    let meta = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Compose
    pages
        .merge(public_api)
        .merge(data_api)
        .merge(auth_routes)
        .merge(meta)
        .with_state(state)
        .nest_service("/admin", admin::spa_service(frontend_dir))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
