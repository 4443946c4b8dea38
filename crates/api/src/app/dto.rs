use std::str::FromStr;

use axum::extract::Multipart;
use axum::http::StatusCode;
use rust_decimal::Decimal;

use storefront_core::{CategoryId, ProductId};
use storefront_infra::image_store::ImageUpload;
use storefront_products::ProductForm;

use crate::app::errors;

// -------------------------
// Multipart field names
// -------------------------

pub const FIELD_PRODUCT_ID: &str = "product_id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_CATEGORY_ID: &str = "category_id";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_IMAGE: &str = "image_file";

/// Decoded create/edit form submission.
#[derive(Debug, Default)]
pub struct ProductSubmission {
    pub form: ProductForm,
    /// `None` when no file part was sent or the file input was left blank.
    pub image: Option<ImageUpload>,
}

/// Decode a `multipart/form-data` product submission.
///
/// Unknown fields are ignored. A price or category that does not parse
/// shows up as a field error instead of failing the request; a malformed
/// `product_id` is a bad request.
pub async fn read_submission(
    mut multipart: Multipart,
) -> Result<ProductSubmission, axum::response::Response> {
    let mut submission = ProductSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_IMAGE => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();
                let upload = ImageUpload::new(file_name, bytes);
                if !upload.is_blank() {
                    submission.image = Some(upload);
                }
            }
            FIELD_PRODUCT_ID => {
                let raw = field.text().await.map_err(multipart_error)?;
                submission.form.product_id = parse_product_id(&raw)?;
            }
            FIELD_NAME => {
                submission.form.name = field.text().await.map_err(multipart_error)?;
            }
            FIELD_CATEGORY_ID => {
                let raw = field.text().await.map_err(multipart_error)?;
                match parse_category_id(&raw) {
                    Some(id) => submission.form.category_id = id,
                    None => {
                        submission.form.category_id = CategoryId::NONE;
                        submission.form.invalid_category = Some(raw);
                    }
                }
            }
            FIELD_PRICE => {
                let raw = field.text().await.map_err(multipart_error)?;
                submission.form.price = parse_price(&raw);
            }
            _ => tracing::debug!(field = %name, "ignoring unknown form field"),
        }
    }

    Ok(submission)
}

fn parse_product_id(raw: &str) -> Result<Option<ProductId>, axum::response::Response> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    ProductId::from_str(raw).map(Some).map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "bad_request", e.to_string())
    })
}

/// Blank means "no category"; `None` when the text is not a valid id.
fn parse_category_id(raw: &str) -> Option<CategoryId> {
    if raw.trim().is_empty() {
        return Some(CategoryId::NONE);
    }
    CategoryId::from_str(raw).ok()
}

fn parse_price(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}

pub(crate) fn parse_path_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    ProductId::from_str(raw).map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> axum::response::Response {
    let status = e.status();
    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "payload_too_large"
    } else {
        "invalid_multipart"
    };
    errors::json_error(status, code, e.body_text())
}
