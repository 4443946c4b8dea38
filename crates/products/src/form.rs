//! Submitted product forms and field-level validation.

use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use storefront_core::{CategoryId, Entity, ProductId};

use crate::product::{Category, Product, ProductDraft};

/// A recoverable, field-level problem with a submitted form.
///
/// These never abort a request: they are collected into [`FormErrors`] and
/// returned alongside the submitted values so the form can be shown again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Create was submitted without any image file.
    #[error("image required")]
    ImageRequired,

    /// The uploaded file name has no `.jpg`, `.jpeg` or `.png` extension.
    #[error("invalid image")]
    InvalidImage,

    #[error("name required")]
    NameRequired,

    #[error("price required")]
    PriceRequired,

    #[error("price must not be negative")]
    NegativePrice,

    /// The submitted category was not a non-negative integer.
    #[error("invalid category")]
    InvalidCategory,

    #[error("unknown category {0}")]
    UnknownCategory(CategoryId),
}

impl ValidationError {
    /// Form field the message belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::ImageRequired | ValidationError::InvalidImage => "image_file",
            ValidationError::NameRequired => "name",
            ValidationError::PriceRequired | ValidationError::NegativePrice => "price",
            ValidationError::InvalidCategory | ValidationError::UnknownCategory(_) => {
                "category_id"
            }
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ValidationError", 2)?;
        s.serialize_field("field", self.field())?;
        s.serialize_field("message", &self.to_string())?;
        s.end()
    }
}

/// Accumulated validation errors, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(Vec<ValidationError>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl Extend<ValidationError> for FormErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Product payload as submitted by the create/edit forms.
///
/// A price that was missing or failed to parse arrives as `None`. A blank
/// category is the "no category" sentinel; one that failed to parse keeps
/// its raw text in `invalid_category`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    /// Only meaningful on edit, where it must match the path identifier.
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category_id: CategoryId,
    /// Submitted category text that is not a valid identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_category: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Current image of the edited product. Display only; never read back
    /// from a submission.
    #[serde(default)]
    pub image: String,
}

impl ProductForm {
    /// Pre-filled form for editing an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: Some(product.id()),
            name: product.name().to_string(),
            category_id: product.category_id(),
            invalid_category: None,
            price: Some(product.price()),
            image: product.image().to_string(),
        }
    }

    /// Check the non-image fields against the known categories.
    pub fn validate_fields(&self, categories: &[Category]) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::NameRequired);
        }

        match self.price {
            None => errors.push(ValidationError::PriceRequired),
            Some(price) if price.is_sign_negative() && !price.is_zero() => {
                errors.push(ValidationError::NegativePrice)
            }
            Some(_) => {}
        }

        if self.invalid_category.is_some() {
            errors.push(ValidationError::InvalidCategory);
        } else if !self.category_id.is_none()
            && !categories.iter().any(|c| c.id() == self.category_id)
        {
            errors.push(ValidationError::UnknownCategory(self.category_id));
        }

        errors
    }

    /// Convert a validated form into a draft ready for appending.
    ///
    /// Only call after [`ProductForm::validate_fields`] came back empty; a
    /// missing price falls back to zero.
    pub fn into_draft(self, image: String) -> ProductDraft {
        ProductDraft {
            name: self.name,
            category_id: self.category_id,
            price: self.price.unwrap_or_default(),
            image,
        }
    }
}
