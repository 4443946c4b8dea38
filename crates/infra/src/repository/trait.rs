use std::sync::Arc;

use thiserror::Error;

use storefront_core::ProductId;
use storefront_products::{Category, Product, ProductDraft};

/// Repository failures.
///
/// Validation never reaches the repository, so these are all
/// infrastructure-level problems.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// `update` was called for a record that does not exist.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// A writer panicked while holding the lock.
    #[error("repository lock poisoned")]
    Poisoned,
}

/// Product/category store injected into the workflow.
///
/// ## Identifier allocation
///
/// `append` owns identifier allocation: the caller hands over a
/// [`ProductDraft`] and gets back the stored [`Product`] with its new id.
/// Allocation and insertion happen under one critical section, so two
/// appends can never be given the same identifier.
pub trait CatalogRepository: Send + Sync {
    /// All products in insertion order.
    fn list_products(&self) -> Vec<Product>;

    /// All categories in insertion order.
    fn list_categories(&self) -> Vec<Category>;

    fn find_product(&self, id: ProductId) -> Option<Product>;

    /// Allocate an identifier for `draft` and store it.
    fn append(&self, draft: ProductDraft) -> Result<Product, RepositoryError>;

    /// Replace the stored record that has the same identifier.
    fn update(&self, product: Product) -> Result<(), RepositoryError>;
}

impl<S> CatalogRepository for Arc<S>
where
    S: CatalogRepository + ?Sized,
{
    fn list_products(&self) -> Vec<Product> {
        (**self).list_products()
    }

    fn list_categories(&self) -> Vec<Category> {
        (**self).list_categories()
    }

    fn find_product(&self, id: ProductId) -> Option<Product> {
        (**self).find_product(id)
    }

    fn append(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        (**self).append(draft)
    }

    fn update(&self, product: Product) -> Result<(), RepositoryError> {
        (**self).update(product)
    }
}
