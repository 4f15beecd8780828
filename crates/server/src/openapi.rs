use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Flat record fields, e.g. `{"title": "...", "category": "coding"}`.
#[derive(ToSchema)]
pub struct ValuesDoc {
    #[schema(value_type = Object)]
    pub fields: serde_json::Value,
}

#[derive(ToSchema)]
pub struct FilterDoc {
    pub field: String,
    /// eq | ne | lt | gt | lte | gte | contains
    pub operator: String,
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
}

#[derive(ToSchema)]
pub struct SorterDoc {
    pub field: String,
    /// asc | desc
    pub order: String,
}

#[derive(ToSchema)]
pub struct PaginationDoc {
    #[schema(rename = "currentPage")]
    pub current_page: usize,
    #[schema(rename = "pageSize")]
    pub page_size: usize,
}

#[derive(ToSchema)]
pub struct ListParamsDoc {
    pub filters: Vec<FilterDoc>,
    pub sorters: Vec<SorterDoc>,
    pub pagination: Option<PaginationDoc>,
}

#[derive(ToSchema)]
pub struct ContactSubmissionDoc {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub message: String,
}

#[derive(ToSchema)]
pub struct StatisticUpdateDoc {
    pub id: i64,
    pub label: String,
    pub value: String,
    pub description: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::data::list,
        crate::routes::data::query,
        crate::routes::data::get_one,
        crate::routes::data::create,
        crate::routes::data::update,
        crate::routes::data::delete_one,
        crate::routes::admin::update_statistics,
        crate::routes::public::landing_json,
        crate::routes::public::contact_json,
        crate::routes::public::submit_contact_json,
        crate::routes::auth::check,
        crate::routes::auth::identity,
    ),
    components(
        schemas(
            HealthResponse,
            ValuesDoc,
            FilterDoc,
            SorterDoc,
            PaginationDoc,
            ListParamsDoc,
            ContactSubmissionDoc,
            StatisticUpdateDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "data"),
        (name = "public"),
        (name = "admin"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
