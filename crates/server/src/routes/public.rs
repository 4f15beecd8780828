use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use models::content::{Contact, ContactSubmissionInput};
use models::ModelError;
use service::content_service::LandingContent;
use service::ServiceError;
use tracing::{error, info};

use crate::errors::JsonApiError;
use crate::pages::{ContactView, FormEcho};
use crate::routes::data::DataBody;
use crate::state::AppState;

fn render_failed(e: impl std::fmt::Display) -> Response {
    error!(error = %e, "page render failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Html("<h1>Something went wrong</h1>".to_string())).into_response()
}

/// GET /
pub async fn home_page(State(state): State<AppState>) -> Response {
    let landing = match state.content.landing().await {
        Ok(l) => l,
        Err(e) => return render_failed(e),
    };
    let contact = state.content.contact_info().await.ok().flatten();
    match state.pages.landing(&landing, contact.as_ref()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failed(e),
    }
}

/// GET /about
pub async fn about_page(State(state): State<AppState>) -> Response {
    let contact = state.content.contact_info().await.ok().flatten();
    match state.pages.about(contact.as_ref()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failed(e),
    }
}

/// GET /contact
pub async fn contact_page(State(state): State<AppState>) -> Response {
    let contact = state.content.contact_info().await.ok().flatten();
    match state.pages.contact(contact.as_ref(), &ContactView::default()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failed(e),
    }
}

/// POST /contact (urlencoded form). Invalid input re-renders the form with
/// the field errors and a 422 status.
pub async fn submit_contact_form(
    State(state): State<AppState>,
    Form(input): Form<ContactSubmissionInput>,
) -> Response {
    let echo = FormEcho::from(&input);
    let (status, view) = match state.content.submit_contact(input).await {
        Ok(record) => {
            info!(id = record.id, "contact_form_submitted");
            (StatusCode::OK, ContactView { submitted: true, ..Default::default() })
        }
        Err(ServiceError::Validation(ModelError::Validation(errors))) => {
            (StatusCode::UNPROCESSABLE_ENTITY, ContactView { submitted: false, errors, form: echo })
        }
        Err(e) => return render_failed(e),
    };
    let contact = state.content.contact_info().await.ok().flatten();
    match state.pages.contact(contact.as_ref(), &view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => render_failed(e),
    }
}

#[utoipa::path(get, path = "/api/public/landing", tag = "public", responses((status = 200, description = "Hero, statistics, services and testimonials")))]
pub async fn landing_json(State(state): State<AppState>) -> Result<Json<LandingContent>, JsonApiError> {
    Ok(Json(state.content.landing().await?))
}

#[utoipa::path(get, path = "/api/public/contact", tag = "public", responses((status = 200, description = "{data}: contact record or null")))]
pub async fn contact_json(State(state): State<AppState>) -> Result<Json<DataBody<Option<Contact>>>, JsonApiError> {
    let data = state.content.contact_info().await?;
    Ok(Json(DataBody { data }))
}

#[utoipa::path(
    post, path = "/api/public/contact-submissions", tag = "public",
    request_body = crate::openapi::ContactSubmissionDoc,
    responses((status = 201, description = "{data}: stored submission"), (status = 422, description = "Validation Error"))
)]
pub async fn submit_contact_json(
    State(state): State<AppState>,
    body: Result<Json<ContactSubmissionInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = body?;
    let data = state.content.submit_contact(input).await?;
    Ok((StatusCode::CREATED, Json(DataBody { data })).into_response())
}
