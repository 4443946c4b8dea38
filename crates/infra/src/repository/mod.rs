//! Catalog repository: the store behind the listing and the form workflow.

mod in_memory;
mod r#trait;

pub use in_memory::InMemoryCatalogRepository;
pub use r#trait::{CatalogRepository, RepositoryError};
