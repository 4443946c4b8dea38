use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
};

use storefront_infra::product_form::FormOutcome;
use storefront_products::ProductFilter;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Where successful submissions are sent.
pub const LISTING_PATH: &str = "/products";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/create", get(create_form).post(create_product))
        .route("/:id/edit", get(edit_form).post(edit_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(filter): Query<ProductFilter>,
) -> axum::response::Response {
    let view = services.workflow.list(&filter);
    (StatusCode::OK, Json(view)).into_response()
}

pub async fn create_form(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.workflow.create_form())).into_response()
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Multipart,
) -> axum::response::Response {
    let submission = match dto::read_submission(multipart).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match services.workflow.create(submission.form, submission.image).await {
        Ok(outcome) => outcome_to_response(outcome),
        Err(e) => errors::workflow_error_to_response(e),
    }
}

pub async fn edit_form(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_path_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.workflow.edit_form(id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}

pub async fn edit_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> axum::response::Response {
    let id = match dto::parse_path_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let submission = match dto::read_submission(multipart).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    match services.workflow.edit(id, submission.form, submission.image).await {
        Ok(outcome) => outcome_to_response(outcome),
        Err(e) => errors::workflow_error_to_response(e),
    }
}

fn outcome_to_response(outcome: FormOutcome) -> axum::response::Response {
    match outcome {
        FormOutcome::Saved(_) => Redirect::to(LISTING_PATH).into_response(),
        FormOutcome::Rejected(view) => (StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response(),
    }
}
