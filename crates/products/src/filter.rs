//! Filter engine for the product listing.
//!
//! Pure functions over a product slice: no IO, no allocation beyond the
//! result. The relative order of the input is always preserved.

use serde::Deserialize;

use crate::product::Product;

/// Listing query as received from the request (`?searchString=&category=`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    #[serde(default, rename = "searchString")]
    pub search_string: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn new(search_string: Option<&str>, category: Option<&str>) -> Self {
        Self {
            search_string: search_string.map(str::to_string),
            category: category.map(str::to_string),
        }
    }

    /// Category the listing is restricted to, if any.
    ///
    /// Empty, non-numeric and `0` values all mean "no restriction".
    pub fn category_id(&self) -> Option<i32> {
        let raw = self.category.as_deref()?.trim();
        match raw.parse::<i32>() {
            Ok(0) | Err(_) => None,
            Ok(id) => Some(id),
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search_string.as_deref().filter(|s| !s.is_empty())
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = self.search() {
            if product.name().is_empty() || !contains_ignore_case(product.name(), needle) {
                return false;
            }
        }
        if let Some(category) = self.category_id() {
            if product.category_id().get() != category {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Filter `products` by search string and category (both optional, ANDed).
pub fn filter_products(
    products: &[Product],
    search_string: Option<&str>,
    category: Option<&str>,
) -> Vec<Product> {
    ProductFilter::new(search_string, category).apply(products)
}

/// Ordinal case-insensitive substring test.
///
/// Each character is folded through its simple (single character) uppercase
/// mapping; characters whose uppercase form expands to several characters
/// are compared as-is. No locale rules apply, so `'i'` never matches `'İ'`.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack: Vec<char> = haystack.chars().map(fold).collect();
    let needle: Vec<char> = needle.chars().map(fold).collect();
    haystack.windows(needle.len()).any(|w| w == needle.as_slice())
}

fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductDraft;
    use rust_decimal::Decimal;
    use storefront_core::{CategoryId, Entity, ProductId};

    fn product(id: i64, name: &str, category: i32) -> Product {
        Product::from_draft(
            ProductId::new(id).unwrap(),
            ProductDraft {
                name: name.to_string(),
                category_id: CategoryId::new(category).unwrap(),
                price: Decimal::new(100, 0),
                image: String::new(),
            },
        )
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "iPhone 14", 1),
            product(2, "iPhone 15", 1),
            product(3, "Galaxy S23", 1),
            product(4, "MacBook Air", 2),
            product(5, "", 2),
            product(6, "ThinkPad X1", 2),
        ]
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id().get()).collect()
    }

    #[test]
    fn no_filters_return_everything_in_order() {
        let all = catalog();
        assert_eq!(filter_products(&all, None, None), all);
        assert_eq!(filter_products(&all, Some(""), Some("")), all);
    }

    #[test]
    fn search_is_case_insensitive() {
        let result = filter_products(&catalog(), Some("IPHONE"), None);
        assert_eq!(ids(&result), vec![1, 2]);

        let result = filter_products(&catalog(), Some("book"), None);
        assert_eq!(ids(&result), vec![4]);
    }

    #[test]
    fn empty_names_never_match_a_search() {
        let result = filter_products(&catalog(), Some(" "), None);
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 6]);
    }

    #[test]
    fn category_filter_keeps_matching_category() {
        let result = filter_products(&catalog(), None, Some("2"));
        assert_eq!(ids(&result), vec![4, 5, 6]);
    }

    #[test]
    fn zero_or_non_numeric_category_is_a_no_op() {
        let all = catalog();
        assert_eq!(filter_products(&all, None, Some("0")), all);
        assert_eq!(filter_products(&all, None, Some("phones")), all);
        assert_eq!(filter_products(&all, None, Some("1.5")), all);
    }

    #[test]
    fn category_with_surrounding_whitespace_still_parses() {
        let result = filter_products(&catalog(), None, Some(" 1 "));
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn unknown_category_yields_nothing() {
        assert!(filter_products(&catalog(), None, Some("42")).is_empty());
        assert!(filter_products(&catalog(), None, Some("-1")).is_empty());
    }

    #[test]
    fn filters_compose_conjunctively() {
        let result = filter_products(&catalog(), Some("a"), Some("2"));
        assert_eq!(ids(&result), vec![4, 6]);

        let result = filter_products(&catalog(), Some("iphone"), Some("2"));
        assert!(result.is_empty());
    }

    #[test]
    fn ordinal_matching_ignores_locale_casing() {
        assert!(contains_ignore_case("ISTANBUL", "istanbul"));
        assert!(!contains_ignore_case("İstanbul", "istanbul"));
        assert!(contains_ignore_case("Straße", "STRAßE"));
        assert!(!contains_ignore_case("Strasse", "straße"));
        assert!(contains_ignore_case("ÇAY", "çay"));
    }

    #[test]
    fn needle_longer_than_haystack_does_not_match() {
        assert!(!contains_ignore_case("abc", "abcd"));
        assert!(contains_ignore_case("abc", ""));
    }

    #[test]
    fn deserializes_query_parameter_names() {
        let filter: ProductFilter =
            serde_json::from_value(serde_json::json!({ "searchString": "mac", "category": "2" }))
                .unwrap();
        assert_eq!(filter.search(), Some("mac"));
        assert_eq!(filter.category_id(), Some(2));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
            prop::collection::vec(("[A-Za-z ]{0,12}", 0i32..4), 0..24).prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (name, category))| product(i as i64 + 1, &name, category))
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: an empty search string returns the input unchanged.
            #[test]
            fn empty_search_is_identity(all in arb_catalog()) {
                prop_assert_eq!(filter_products(&all, Some(""), None), all);
            }

            /// Property: a product survives a search exactly when its
            /// non-empty name contains the needle ignoring case.
            #[test]
            fn search_keeps_exactly_the_matches(all in arb_catalog(), needle in "[A-Za-z]{1,3}") {
                let result = filter_products(&all, Some(&needle), None);
                let lowered = needle.to_lowercase();
                let expected: Vec<Product> = all
                    .iter()
                    .filter(|p| !p.name().is_empty() && p.name().to_lowercase().contains(&lowered))
                    .cloned()
                    .collect();
                prop_assert_eq!(result, expected);
            }

            /// Property: a numeric non-zero category keeps only that
            /// category, anything else is a no-op.
            #[test]
            fn category_filter_semantics(all in arb_catalog(), raw in prop_oneof![
                Just(String::new()),
                Just("0".to_string()),
                "[a-z]{1,4}",
                (1i32..4).prop_map(|c| c.to_string()),
            ]) {
                let result = filter_products(&all, None, Some(&raw));
                match raw.parse::<i32>() {
                    Ok(c) if c != 0 => {
                        prop_assert!(result.iter().all(|p| p.category_id().get() == c));
                        let expected = all.iter().filter(|p| p.category_id().get() == c).count();
                        prop_assert_eq!(result.len(), expected);
                    }
                    _ => prop_assert_eq!(result, all),
                }
            }

            /// Property: filtering never reorders products.
            #[test]
            fn filter_is_stable(all in arb_catalog(), needle in "[a-z]{0,2}", category in 0i32..4) {
                let result = filter_products(&all, Some(&needle), Some(&category.to_string()));
                let result_ids = ids(&result);
                let mut sorted = result_ids.clone();
                sorted.sort();
                prop_assert_eq!(result_ids, sorted);
            }
        }
    }
}
