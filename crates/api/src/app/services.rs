use std::sync::Arc;

use storefront_infra::{
    config::Settings,
    image_store::ImageStore,
    product_form::ProductFormWorkflow,
    repository::InMemoryCatalogRepository,
};

/// Workflow over the process-local catalog.
pub type CatalogWorkflow = ProductFormWorkflow<Arc<InMemoryCatalogRepository>>;

/// Everything the handlers need, shared via `Extension<Arc<AppServices>>`.
#[derive(Debug)]
pub struct AppServices {
    pub workflow: CatalogWorkflow,
}

impl AppServices {
    pub fn new(repository: Arc<InMemoryCatalogRepository>, images: ImageStore) -> Self {
        Self {
            workflow: ProductFormWorkflow::new(repository, images),
        }
    }
}

/// Seeded in-memory catalog with images under the configured static root.
pub fn build_services(settings: &Settings) -> AppServices {
    let repository = Arc::new(InMemoryCatalogRepository::seeded());
    let images = ImageStore::new(settings.image_dir());
    AppServices::new(repository, images)
}
