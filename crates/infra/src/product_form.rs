//! Product form workflow (application-level orchestration).
//!
//! Drives the create and edit forms through
//! `AwaitingInput → Validating → {Persisting, Rejected}`:
//!
//! ```text
//! submission (form fields + optional image)
//!   ↓
//! 1. Structural checks (edit only: id mismatch → BadRequest, unknown id → NotFound)
//!   ↓
//! 2. Validate image name and fields, accumulating every error   (no IO)
//!   ↓
//! 3a. Errors → Rejected: form view with input, errors and category options
//! 3b. No errors → Persisting:
//!       stage image bytes → mutate repository → commit image → delete old image
//! ```
//!
//! Nothing touches the repository or the image directory until every
//! validation has passed. If the repository mutation or the final rename
//! fails after the image was staged, the staged file is removed again.

use thiserror::Error;

use storefront_core::{Entity, ProductId};
use storefront_products::{
    FormErrors, Product, ProductFilter, ProductForm, ProductFormView, ProductListView,
    ValidationError,
};

use crate::image_store::{ImageStore, ImageStoreError, ImageUpload, StagedImage, ValidatedImage};
use crate::repository::{CatalogRepository, RepositoryError};

/// Request-level and infrastructure failures.
///
/// Field-level problems are not errors here; they come back as
/// [`FormOutcome::Rejected`].
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Storage(#[from] ImageStoreError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result of a create/edit submission that made it past request-level checks.
#[derive(Debug)]
pub enum FormOutcome {
    /// The record was written; callers redirect to the listing.
    Saved(Product),
    /// Validation failed; nothing was written.
    Rejected(ProductFormView),
}

impl FormOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, FormOutcome::Saved(_))
    }
}

#[derive(Debug)]
pub struct ProductFormWorkflow<R> {
    repository: R,
    images: ImageStore,
}

impl<R> ProductFormWorkflow<R> {
    pub fn new(repository: R, images: ImageStore) -> Self {
        Self { repository, images }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }
}

impl<R> ProductFormWorkflow<R>
where
    R: CatalogRepository,
{
    /// Listing: filtered products plus the category picker data.
    pub fn list(&self, filter: &ProductFilter) -> ProductListView {
        let products = self.repository.list_products();
        ProductListView {
            products: filter.apply(&products),
            categories: self.repository.list_categories(),
            selected_category: filter.category.clone().unwrap_or_default(),
        }
    }

    /// Blank create form.
    pub fn create_form(&self) -> ProductFormView {
        ProductFormView::empty(&self.repository.list_categories())
    }

    /// Create a product. An image is mandatory.
    ///
    /// The identifier in `form` is ignored; the repository allocates one.
    pub async fn create(
        &self,
        form: ProductForm,
        image: Option<ImageUpload>,
    ) -> Result<FormOutcome, WorkflowError> {
        let categories = self.repository.list_categories();
        let mut errors = FormErrors::new();

        let image = match image {
            None => {
                errors.push(ValidationError::ImageRequired);
                None
            }
            Some(upload) => self.validate_image(upload, &mut errors),
        };
        errors.extend(form.validate_fields(&categories).iter().cloned());

        if !errors.is_empty() {
            tracing::info!(errors = errors.len(), "create rejected");
            let selected = form.category_id;
            return Ok(FormOutcome::Rejected(ProductFormView::rejected(
                form,
                errors,
                &categories,
                selected,
            )));
        }

        let staged = self.stage(image).await?;
        let image_name = staged
            .as_ref()
            .map(|s| s.file_name().to_string())
            .unwrap_or_default();

        let product = match self.repository.append(form.into_draft(image_name)) {
            Ok(product) => product,
            Err(e) => {
                self.discard(staged).await;
                return Err(e.into());
            }
        };

        if let Some(staged) = staged {
            self.commit(product.id(), staged).await?;
        }

        tracing::info!(product_id = %product.id(), image = %product.image(), "product created");
        Ok(FormOutcome::Saved(product))
    }

    /// Pre-filled edit form for an existing product.
    pub fn edit_form(&self, id: ProductId) -> Result<ProductFormView, WorkflowError> {
        let product = self
            .repository
            .find_product(id)
            .ok_or(WorkflowError::NotFound(id))?;
        Ok(ProductFormView::for_product(
            &product,
            &self.repository.list_categories(),
        ))
    }

    /// Edit a product in place. The image is optional; a new one replaces
    /// (and deletes) the previous file.
    pub async fn edit(
        &self,
        id: ProductId,
        mut form: ProductForm,
        image: Option<ImageUpload>,
    ) -> Result<FormOutcome, WorkflowError> {
        if let Some(payload_id) = form.product_id {
            if payload_id != id {
                return Err(WorkflowError::BadRequest(format!(
                    "path id {id} does not match payload id {payload_id}"
                )));
            }
        }

        let mut product = self
            .repository
            .find_product(id)
            .ok_or(WorkflowError::NotFound(id))?;

        let categories = self.repository.list_categories();
        let mut errors = FormErrors::new();

        let image = image.and_then(|upload| self.validate_image(upload, &mut errors));
        errors.extend(form.validate_fields(&categories).iter().cloned());

        if !errors.is_empty() {
            tracing::info!(product_id = %id, errors = errors.len(), "edit rejected");
            form.product_id = Some(id);
            form.image = product.image().to_string();
            return Ok(FormOutcome::Rejected(ProductFormView::rejected(
                form,
                errors,
                &categories,
                product.category_id(),
            )));
        }

        let staged = self.stage(image).await?;
        let previous_image = product.image().to_string();
        let new_image = staged.as_ref().map(|s| s.file_name().to_string());

        product.apply_edit(
            form.name,
            form.category_id,
            form.price.unwrap_or_default(),
            new_image,
        );

        if let Err(e) = self.repository.update(product.clone()) {
            self.discard(staged).await;
            return Err(e.into());
        }

        if let Some(staged) = staged {
            self.commit(id, staged).await?;
            self.images.delete_stored(&previous_image).await?;
        }

        tracing::info!(product_id = %id, image = %product.image(), "product updated");
        Ok(FormOutcome::Saved(product))
    }

    fn validate_image(
        &self,
        upload: ImageUpload,
        errors: &mut FormErrors,
    ) -> Option<(ValidatedImage, Vec<u8>)> {
        match self.images.validate(&upload.file_name) {
            Ok(validated) => Some((validated, upload.bytes)),
            Err(e) => {
                tracing::debug!(file = %upload.file_name, "upload rejected");
                errors.push(e);
                None
            }
        }
    }

    async fn stage(
        &self,
        image: Option<(ValidatedImage, Vec<u8>)>,
    ) -> Result<Option<StagedImage>, WorkflowError> {
        match image {
            Some((validated, bytes)) => Ok(Some(self.images.stage(validated, &bytes).await?)),
            None => Ok(None),
        }
    }

    /// Finalize the image of an already written record.
    async fn commit(&self, id: ProductId, staged: StagedImage) -> Result<(), WorkflowError> {
        let file_name = staged.file_name().to_string();
        if let Err(e) = self.images.commit(staged).await {
            tracing::error!(
                product_id = %id,
                image = %file_name,
                error = %e,
                "image commit failed, product image is missing"
            );
            return Err(e.into());
        }
        Ok(())
    }

    async fn discard(&self, staged: Option<StagedImage>) {
        if let Some(staged) = staged {
            self.images.discard(staged).await;
        }
    }
}
