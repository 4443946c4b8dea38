use rust_decimal::Decimal;
use serde::Serialize;

use storefront_core::{CategoryId, Entity, ProductId};

/// Catalog category. Read-only for this crate; owned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    #[serde(rename = "category_id")]
    id: CategoryId,
    name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Product fields that are known before an identifier has been allocated.
///
/// The repository turns a draft into a [`Product`] when it appends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    /// Stored image file name, or empty when the product has no image.
    pub image: String,
}

/// Catalog product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    #[serde(rename = "product_id")]
    id: ProductId,
    name: String,
    category_id: CategoryId,
    price: Decimal,
    image: String,
}

impl Product {
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category_id: draft.category_id,
            price: draft.price,
            image: draft.image,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Stored image file name (not a path). Empty when no image is set.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// Overwrite the editable fields in place.
    ///
    /// The identifier never changes. `image` is only replaced when a new file
    /// was accepted; `None` keeps the current one.
    pub fn apply_edit(
        &mut self,
        name: String,
        category_id: CategoryId,
        price: Decimal,
        image: Option<String>,
    ) {
        self.name = name;
        self.category_id = category_id;
        self.price = price;
        if let Some(image) = image {
            self.image = image;
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
