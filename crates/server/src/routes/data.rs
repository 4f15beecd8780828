//! Generic data-provider endpoints used by the admin app.
//! Every collection is addressed by name: `/api/services`, `/api/hero/1`...

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use models::{Record, RecordKey, Values};
use serde::{Deserialize, Serialize};
use service::pagination::Pagination;
use service::query::{parse_filters, parse_sorters, ListParams};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// Query-string form of `ListParams`, plus `ids` for fetching several records.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListQuery {
    /// 1-based page, default 1
    pub current_page: Option<usize>,
    /// Page size, default 10
    pub page_size: Option<usize>,
    /// `title:desc,category`
    pub sort: Option<String>,
    /// `category:eq:coding;title:contains:oasis`
    pub filter: Option<String>,
    /// `1,2,3`
    pub ids: Option<String>,
}

impl ListQuery {
    pub fn into_params(self) -> Result<ListParams, JsonApiError> {
        let filters = match self.filter.as_deref() {
            Some(f) => parse_filters(f)?,
            None => Vec::new(),
        };
        let sorters = match self.sort.as_deref() {
            Some(s) => parse_sorters(s)?,
            None => Vec::new(),
        };
        let pagination = match (self.current_page, self.page_size) {
            (None, None) => None,
            (page, size) => {
                let defaults = Pagination::default();
                Some(Pagination::new(page.unwrap_or(defaults.current_page), size.unwrap_or(defaults.page_size)))
            }
        };
        Ok(ListParams { filters, sorters, pagination })
    }
}

/// `{"data": ...}` envelope for single records and id lookups.
#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

fn parse_ids(ids: &str) -> Vec<RecordKey> {
    ids.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RecordKey::from)
        .collect()
}

#[utoipa::path(
    get, path = "/api/{resource}", tag = "data",
    params(
        ("resource" = String, Path, description = "Collection name"),
        ListQuery
    ),
    responses(
        (status = 200, description = "{data, total} or {data} for ids"),
        (status = 400, description = "Malformed filter or sort")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(q): Query<ListQuery>,
) -> Result<Response, JsonApiError> {
    if let Some(ids) = q.ids.as_deref() {
        let data = state.provider.get_many(&resource, parse_ids(ids)).await;
        return Ok(Json(DataBody { data }).into_response());
    }
    let params = q.into_params()?;
    let result = state.provider.list(&resource, params).await;
    Ok(Json(result).into_response())
}

#[utoipa::path(
    post, path = "/api/{resource}/query", tag = "data",
    params(("resource" = String, Path, description = "Collection name")),
    request_body = crate::openapi::ListParamsDoc,
    responses((status = 200, description = "{data, total}"), (status = 400, description = "Malformed body"))
)]
pub async fn query(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    body: Result<Json<ListParams>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(params) = body?;
    let result = state.provider.list(&resource, params).await;
    Ok(Json(result).into_response())
}

#[utoipa::path(
    get, path = "/api/{resource}/{id}", tag = "data",
    params(
        ("resource" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    responses((status = 200, description = "{data}"), (status = 404, description = "Not Found"))
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<DataBody<Record>>, JsonApiError> {
    let data = state.provider.get_one(&resource, RecordKey::from(id)).await?;
    Ok(Json(DataBody { data }))
}

#[utoipa::path(
    post, path = "/api/{resource}", tag = "data",
    params(("resource" = String, Path, description = "Collection name")),
    request_body = crate::openapi::ValuesDoc,
    responses((status = 200, description = "{data}"), (status = 422, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    body: Result<Json<Values>, JsonRejection>,
) -> Result<Json<DataBody<Record>>, JsonApiError> {
    let Json(values) = body?;
    let data = state.content.create_record(&resource, values).await?;
    info!(%resource, id = data.id, "api_record_created");
    Ok(Json(DataBody { data }))
}

#[utoipa::path(
    patch, path = "/api/{resource}/{id}", tag = "data",
    params(
        ("resource" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    request_body = crate::openapi::ValuesDoc,
    responses(
        (status = 200, description = "{data}"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    body: Result<Json<Values>, JsonRejection>,
) -> Result<Json<DataBody<Record>>, JsonApiError> {
    let Json(values) = body?;
    let data = state.content.update_record(&resource, RecordKey::from(id), values).await?;
    info!(%resource, id = data.id, "api_record_updated");
    Ok(Json(DataBody { data }))
}

#[utoipa::path(
    delete, path = "/api/{resource}/{id}", tag = "data",
    params(
        ("resource" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    responses((status = 200, description = "{data}"), (status = 404, description = "Not Found"))
)]
pub async fn delete_one(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<DataBody<Record>>, JsonApiError> {
    let data = state.provider.delete_one(&resource, RecordKey::from(id)).await?;
    info!(%resource, id = data.id, "api_record_deleted");
    Ok(Json(DataBody { data }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::query::{Filter, FilterOperator, Sorter};

    #[test]
    fn query_string_becomes_list_params() {
        let q = ListQuery {
            current_page: Some(2),
            page_size: None,
            sort: Some("title:desc".into()),
            filter: Some("category:eq:coding".into()),
            ids: None,
        };
        let params = q.into_params().unwrap();
        assert_eq!(params.filters, vec![Filter::new("category", FilterOperator::Eq, "coding")]);
        assert_eq!(params.sorters, vec![Sorter::desc("title")]);
        assert_eq!(params.pagination, Some(Pagination::new(2, 10)));
    }

    #[test]
    fn empty_query_has_no_explicit_pagination() {
        let params = ListQuery::default().into_params().unwrap();
        assert_eq!(params, ListParams::default());
    }

    #[test]
    fn bad_operator_is_rejected() {
        let q = ListQuery { filter: Some("title:like:x".into()), ..Default::default() };
        assert!(matches!(q.into_params(), Err(JsonApiError::BadRequest(_))));
    }

    #[test]
    fn ids_are_split_and_trimmed() {
        let ids = parse_ids("1, 2,,3");
        assert_eq!(ids, vec![RecordKey::from(1), RecordKey::from(2), RecordKey::from(3)]);
    }
}
