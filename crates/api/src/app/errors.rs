use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use storefront_infra::product_form::WorkflowError;

pub fn workflow_error_to_response(err: WorkflowError) -> axum::response::Response {
    match err {
        WorkflowError::NotFound(id) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("product {id} not found"))
        }
        WorkflowError::BadRequest(msg) => json_error(StatusCode::BAD_REQUEST, "bad_request", msg),
        WorkflowError::Storage(e) => {
            tracing::error!(error = %e, "image storage failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", e.to_string())
        }
        WorkflowError::Repository(e) => {
            tracing::error!(error = %e, "repository write failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "repository_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
