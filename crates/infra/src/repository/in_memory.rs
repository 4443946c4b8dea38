use std::sync::RwLock;

use rust_decimal::Decimal;

use storefront_core::{CategoryId, Entity, ProductId};
use storefront_products::{Category, Product, ProductDraft};

use super::r#trait::{CatalogRepository, RepositoryError};

#[derive(Debug)]
struct CatalogState {
    products: Vec<Product>,
    categories: Vec<Category>,
    next_id: ProductId,
}

/// In-memory catalog for tests/dev.
///
/// Nothing is persisted; state lives as long as the process. Products keep
/// their insertion order, which is the order the listing shows them in.
#[derive(Debug)]
pub struct InMemoryCatalogRepository {
    inner: RwLock<CatalogState>,
}

impl InMemoryCatalogRepository {
    /// Build a repository around existing records.
    ///
    /// The id counter starts right after the highest existing product id, so
    /// with ids `1..=n` the next product gets `n + 1`.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let next_id = products
            .iter()
            .map(|p| p.id())
            .max()
            .map(ProductId::next)
            .unwrap_or(ProductId::from_u32(1));

        Self {
            inner: RwLock::new(CatalogState {
                products,
                categories,
                next_id,
            }),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Demo catalog: two categories and a handful of products.
    pub fn seeded() -> Self {
        let phone = CategoryId::from_u16(1);
        let computer = CategoryId::from_u16(2);

        let categories = vec![
            Category::new(phone, "Phone"),
            Category::new(computer, "Computer"),
        ];

        let rows: [(&str, CategoryId, i64, &str); 5] = [
            ("iPhone 14", phone, 40000, "1.jpg"),
            ("iPhone 15", phone, 50000, "2.jpg"),
            ("Galaxy S23", phone, 30000, "3.jpg"),
            ("MacBook Air", computer, 45000, "4.jpg"),
            ("ThinkPad X1", computer, 38000, "5.jpg"),
        ];

        let products = rows
            .into_iter()
            .zip(1u32..)
            .map(|((name, category_id, price, image), id)| {
                Product::from_draft(
                    ProductId::from_u32(id),
                    ProductDraft {
                        name: name.to_string(),
                        category_id,
                        price: Decimal::new(price, 0),
                        image: image.to_string(),
                    },
                )
            })
            .collect();

        Self::new(categories, products)
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::empty()
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn list_products(&self) -> Vec<Product> {
        match self.inner.read() {
            Ok(state) => state.products.clone(),
            Err(_) => vec![],
        }
    }

    fn list_categories(&self) -> Vec<Category> {
        match self.inner.read() {
            Ok(state) => state.categories.clone(),
            Err(_) => vec![],
        }
    }

    fn find_product(&self, id: ProductId) -> Option<Product> {
        let state = self.inner.read().ok()?;
        state.products.iter().find(|p| p.id() == id).cloned()
    }

    fn append(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let mut state = self.inner.write().map_err(|_| RepositoryError::Poisoned)?;

        let id = state.next_id;
        state.next_id = id.next();

        let product = Product::from_draft(id, draft);
        state.products.push(product.clone());
        Ok(product)
    }

    fn update(&self, product: Product) -> Result<(), RepositoryError> {
        let mut state = self.inner.write().map_err(|_| RepositoryError::Poisoned)?;

        let slot = state
            .products
            .iter_mut()
            .find(|p| p.id() == product.id())
            .ok_or(RepositoryError::NotFound(product.id()))?;
        *slot = product;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category_id: CategoryId::from_u16(1),
            price: Decimal::new(10, 0),
            image: String::new(),
        }
    }

    #[test]
    fn seeded_catalog_has_sequential_ids() {
        let repo = InMemoryCatalogRepository::seeded();
        let ids: Vec<i64> = repo.list_products().iter().map(|p| p.id().get()).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(repo.list_categories().len(), 2);
    }

    #[test]
    fn append_assigns_count_plus_one() {
        let repo = InMemoryCatalogRepository::seeded();
        let before = repo.list_products().len() as i64;

        let product = repo.append(draft("Pixel 8")).unwrap();

        assert_eq!(product.id().get(), before + 1);
        assert_eq!(repo.list_products().last(), Some(&product));
    }

    #[test]
    fn empty_repository_starts_at_one() {
        let repo = InMemoryCatalogRepository::empty();
        assert_eq!(repo.append(draft("a")).unwrap().id().get(), 1);
        assert_eq!(repo.append(draft("b")).unwrap().id().get(), 2);
    }

    #[test]
    fn concurrent_appends_never_share_an_id() {
        let repo = Arc::new(InMemoryCatalogRepository::empty());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|i| repo.append(draft(&format!("{t}-{i}"))).unwrap().id())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<ProductId> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn update_replaces_record_in_place() {
        let repo = InMemoryCatalogRepository::seeded();
        let mut product = repo.find_product(ProductId::from_u32(2)).unwrap();

        product.apply_edit(
            "iPhone 15 Pro".to_string(),
            CategoryId::from_u16(1),
            Decimal::new(60000, 0),
            None,
        );
        repo.update(product.clone()).unwrap();

        let products = repo.list_products();
        assert_eq!(products.len(), 5);
        assert_eq!(products[1], product);
    }

    #[test]
    fn update_of_unknown_product_fails() {
        let repo = InMemoryCatalogRepository::empty();
        let ghost = Product::from_draft(ProductId::from_u32(9), draft("ghost"));

        let err = repo.update(ghost).unwrap_err();
        assert_eq!(err, RepositoryError::NotFound(ProductId::from_u32(9)));
    }

    #[test]
    fn find_missing_product_returns_none() {
        let repo = InMemoryCatalogRepository::seeded();
        assert!(repo.find_product(ProductId::from_u32(99)).is_none());
    }
}
