//! Placeholder auth surface for the admin app. Every session counts as
//! signed in; account management is not implemented.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AuthCheck {
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct Identity {
    pub id: i64,
    pub email: &'static str,
}

#[utoipa::path(get, path = "/auth/check", tag = "auth", responses((status = 200, description = "Always authenticated")))]
pub async fn check() -> Json<AuthCheck> {
    Json(AuthCheck { authenticated: true })
}

#[utoipa::path(get, path = "/auth/identity", tag = "auth", responses((status = 200, description = "Fixed placeholder identity")))]
pub async fn identity() -> Json<Identity> {
    Json(Identity { id: 0, email: "user@example.com" })
}

/// login / register / logout / permissions
pub async fn not_implemented() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_IMPLEMENTED, Json(serde_json::json!({"message": "Not implemented"})))
}
