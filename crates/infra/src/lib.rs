//! Infrastructure layer: catalog storage, image files, form orchestration,
//! configuration.

pub mod config;
pub mod image_store;
pub mod product_form;
pub mod repository;
