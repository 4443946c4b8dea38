//! Request-scoped view models.
//!
//! Rendering is not this crate's job; these are the shapes handed to whatever
//! renders them (the API serializes them as JSON).

use serde::Serialize;

use storefront_core::{CategoryId, Entity};

use crate::form::{FormErrors, ProductForm};
use crate::product::{Category, Product};

/// Listing page: filtered products plus the data for the category picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductListView {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Raw category query value, echoed back even when it did not parse.
    pub selected_category: String,
}

/// One entry of a category select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub value: CategoryId,
    pub text: String,
    pub selected: bool,
}

/// Build select-list options for `categories`, marking `selected` if present.
pub fn category_options(categories: &[Category], selected: CategoryId) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|c| CategoryOption {
            value: c.id(),
            text: c.name().to_string(),
            selected: c.id() == selected,
        })
        .collect()
}

/// Create/edit form as shown to the user, possibly with errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFormView {
    pub form: ProductForm,
    pub errors: FormErrors,
    pub categories: Vec<CategoryOption>,
}

impl ProductFormView {
    /// Blank create form.
    pub fn empty(categories: &[Category]) -> Self {
        Self {
            form: ProductForm::default(),
            errors: FormErrors::new(),
            categories: category_options(categories, CategoryId::NONE),
        }
    }

    /// Edit form pre-filled from `product`, its category pre-selected.
    pub fn for_product(product: &Product, categories: &[Category]) -> Self {
        Self {
            form: ProductForm::from_product(product),
            errors: FormErrors::new(),
            categories: category_options(categories, product.category_id()),
        }
    }

    /// Submitted form sent back with its errors.
    pub fn rejected(
        form: ProductForm,
        errors: FormErrors,
        categories: &[Category],
        selected: CategoryId,
    ) -> Self {
        Self {
            form,
            errors,
            categories: category_options(categories, selected),
        }
    }

    pub fn selected_category(&self) -> Option<CategoryId> {
        self.categories.iter().find(|o| o.selected).map(|o| o.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ValidationError;
    use crate::product::ProductDraft;
    use rust_decimal::Decimal;
    use storefront_core::ProductId;

    fn categories() -> Vec<Category> {
        vec![
            Category::new(CategoryId::new(1).unwrap(), "Phone"),
            Category::new(CategoryId::new(2).unwrap(), "Computer"),
        ]
    }

    #[test]
    fn empty_form_selects_nothing() {
        let view = ProductFormView::empty(&categories());

        assert_eq!(view.categories.len(), 2);
        assert_eq!(view.selected_category(), None);
        assert!(view.errors.is_empty());
        assert_eq!(view.form, ProductForm::default());
    }

    #[test]
    fn edit_form_preselects_product_category() {
        let product = Product::from_draft(
            ProductId::new(1).unwrap(),
            ProductDraft {
                name: "MacBook Air".to_string(),
                category_id: CategoryId::new(2).unwrap(),
                price: Decimal::new(1200, 0),
                image: "m.png".to_string(),
            },
        );

        let view = ProductFormView::for_product(&product, &categories());

        assert_eq!(view.selected_category(), Some(CategoryId::new(2).unwrap()));
        assert_eq!(view.form.name, "MacBook Air");
    }

    #[test]
    fn rejected_form_keeps_input_and_errors() {
        let form = ProductForm {
            name: "Draft".to_string(),
            ..ProductForm::default()
        };
        let mut errors = FormErrors::new();
        errors.push(ValidationError::ImageRequired);

        let view =
            ProductFormView::rejected(form.clone(), errors.clone(), &categories(), CategoryId::new(1).unwrap());

        assert_eq!(view.form, form);
        assert_eq!(view.errors, errors);
        assert_eq!(view.selected_category(), Some(CategoryId::new(1).unwrap()));
    }

    #[test]
    fn options_serialize_as_value_text_selected() {
        let options = category_options(&categories(), CategoryId::new(1).unwrap());
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json[0], serde_json::json!({ "value": 1, "text": "Phone", "selected": true }));
        assert_eq!(json[1]["selected"], false);
    }
}
