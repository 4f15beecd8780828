use std::path::Path;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use models::content::StatisticUpdate;
use models::Record;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::data::DataBody;
use crate::state::AppState;

/// Admin single-page app: static assets with `index.html` as the fallback
/// so client-side routes survive a reload.
pub fn spa_service(frontend_dir: &str) -> ServeDir<ServeFile> {
    let index = Path::new(frontend_dir).join("index.html");
    ServeDir::new(frontend_dir).fallback(ServeFile::new(index))
}

#[utoipa::path(
    put, path = "/api/admin/statistics", tag = "admin",
    request_body = Vec<crate::openapi::StatisticUpdateDoc>,
    responses(
        (status = 200, description = "{data}: updated statistics"),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Unknown statistic id"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update_statistics(
    State(state): State<AppState>,
    body: Result<Json<Vec<StatisticUpdate>>, JsonRejection>,
) -> Result<Json<DataBody<Vec<Record>>>, JsonApiError> {
    let Json(batch) = body?;
    let data = state.content.update_statistics(batch).await?;
    info!(count = data.len(), "admin_statistics_saved");
    Ok(Json(DataBody { data }))
}
