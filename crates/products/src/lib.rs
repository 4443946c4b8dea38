//! Products catalog domain module.
//!
//! This crate contains business rules for the product catalog, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage):
//! records, submitted forms and their validation, listing view models, and
//! the filter engine.

pub mod filter;
pub mod form;
pub mod product;
pub mod view;

pub use filter::{ProductFilter, contains_ignore_case, filter_products};
pub use form::{FormErrors, ProductForm, ValidationError};
pub use product::{Category, Product, ProductDraft};
pub use view::{CategoryOption, ProductFormView, ProductListView, category_options};
