//! Static product catalog with query helpers.
//!
//! The catalog is a fixed document loaded once at startup, either from the
//! embedded seed or from a JSON file on disk. Products are immutable after
//! load; every accessor is a pure function over the loaded data and results
//! preserve catalog insertion order unless a sort is requested.

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ownit_core::{Price, ProductId};

/// Embedded catalog seed document.
const BUILTIN_CATALOG: &str = include_str!("../content/catalog.json");

/// Physical attributes of a piece, as shown on the product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Specifications {
    #[serde(default)]
    pub metal: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub stone: Option<String>,
    #[serde(default)]
    pub purity: Option<String>,
    #[serde(default)]
    pub carat: Option<String>,
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Pre-discount price; presence marks the product as on sale.
    #[serde(default)]
    pub original_price: Option<Price>,
    /// Primary image asset path, e.g. `collections/rings.jpg`.
    pub image: String,
    /// Additional gallery image asset paths.
    #[serde(default)]
    pub images: Option<Vec<String>>,
    pub category: String,
    pub subcategory: String,
    pub rating: f32,
    pub reviews: u32,
    pub in_stock: bool,
    #[serde(default)]
    pub specifications: Option<Specifications>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl Product {
    /// Whether the product carries a pre-discount price.
    #[must_use]
    pub const fn on_sale(&self) -> bool {
        self.original_price.is_some()
    }

    /// Case-insensitive tag membership test.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_deref()
            .is_some_and(|tags| tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    }
}

/// A browsable subcategory with its advertised product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub count: u32,
}

/// A top-level category with its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: String,
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

/// On-disk catalog document shape.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
    #[serde(default)]
    categories: Vec<CategoryGroup>,
}

/// Sort orders offered by the product listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog insertion order.
    #[default]
    Featured,
    /// Highest product id first.
    Newest,
    #[serde(rename = "price-low")]
    PriceLowToHigh,
    #[serde(rename = "price-high")]
    PriceHighToLow,
    #[serde(rename = "rating")]
    TopRated,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "newest" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceLowToHigh),
            "price-high" => Ok(Self::PriceHighToLow),
            "rating" => Ok(Self::TopRated),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Listing-page query: free-text search or category browse, then an
/// inclusive price window, then a sort.
///
/// A set `search` takes precedence over category/subcategory selection,
/// matching the listing page behavior.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: SortOrder,
}

/// The static product catalog.
///
/// Cheaply cloneable; the product list is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
    categories: Arc<Vec<CategoryGroup>>,
}

impl Catalog {
    /// Load the embedded seed catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let doc: CatalogDocument =
            serde_json::from_str(BUILTIN_CATALOG).expect("embedded catalog is valid JSON");
        Self::from_document(doc).expect("embedded catalog has unique product ids")
    }

    /// Load a catalog document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// contains duplicate product ids.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let doc: CatalogDocument =
            serde_json::from_str(&content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let catalog = Self::from_document(doc)?;
        tracing::info!(
            products = catalog.len(),
            path = %path.display(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for product in &doc.products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        Ok(Self {
            products: Arc::new(doc.products),
            categories: Arc::new(doc.categories),
        })
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products in catalog insertion order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products in a category, optionally narrowed to a subcategory.
    ///
    /// Catalog insertion order is preserved.
    #[must_use]
    pub fn products_by_category(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| {
                p.category == category
                    && subcategory.is_none_or(|sub| p.subcategory == sub)
            })
            .collect()
    }

    /// Case-insensitive substring search over name, description, category,
    /// subcategory, and tags.
    ///
    /// An empty query matches every product.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.subcategory.to_lowercase().contains(&needle)
                    || p.tags.as_deref().is_some_and(|tags| {
                        tags.iter().any(|t| t.to_lowercase().contains(&needle))
                    })
            })
            .collect()
    }

    /// Other products in the same subcategory, for the detail page rail.
    #[must_use]
    pub fn related_products(&self, id: ProductId, limit: usize) -> Vec<&Product> {
        let Some(product) = self.product_by_id(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.subcategory == product.subcategory && p.id != id)
            .take(limit)
            .collect()
    }

    /// Run a listing-page query: select by search or category, apply the
    /// price window, then sort.
    #[must_use]
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut result = match &query.search {
            Some(term) => self.search(term),
            None => match &query.category {
                Some(category) => {
                    self.products_by_category(category, query.subcategory.as_deref())
                }
                None => self.products.iter().collect(),
            },
        };

        if query.min_price.is_some() || query.max_price.is_some() {
            result.retain(|p| {
                query.min_price.is_none_or(|min| p.price.amount >= min)
                    && query.max_price.is_none_or(|max| p.price.amount <= max)
            });
        }

        match query.sort {
            SortOrder::Featured => {}
            SortOrder::Newest => result.sort_by(|a, b| b.id.cmp(&a.id)),
            SortOrder::PriceLowToHigh => {
                result.sort_by(|a, b| a.price.amount.cmp(&b.price.amount));
            }
            SortOrder::PriceHighToLow => {
                result.sort_by(|a, b| b.price.amount.cmp(&a.price.amount));
            }
            SortOrder::TopRated => result.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }

        result
    }

    /// All category groups.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.categories.iter()
    }

    /// Look up a category group by id.
    #[must_use]
    pub fn category_group(&self, id: &str) -> Option<&CategoryGroup> {
        self.categories.iter().find(|c| c.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Catalog loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.categories().count(), 2);
    }

    #[test]
    fn test_product_by_id_finds_every_product() {
        let catalog = catalog();
        for product in catalog.products() {
            let found = catalog.product_by_id(product.id).unwrap();
            assert_eq!(found, product);
        }
    }

    #[test]
    fn test_product_by_id_absent() {
        assert!(catalog().product_by_id(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_products_by_category_preserves_order() {
        let catalog = catalog();
        let jewelry = catalog.products_by_category("jewelry", None);
        let ids: Vec<i32> = jewelry.iter().map(|p| p.id.as_i32()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted, "catalog order is insertion order");
    }

    #[test]
    fn test_subcategory_narrows_category() {
        let catalog = catalog();
        let all = catalog.products_by_category("jewelry", None);
        for group in catalog.categories() {
            for sub in &group.subcategories {
                let narrowed = catalog.products_by_category(&group.id, Some(&sub.id));
                for product in narrowed {
                    assert!(
                        catalog
                            .products_by_category(&group.id, None)
                            .contains(&product)
                    );
                }
            }
        }
        assert!(!all.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = catalog();
        let lower = catalog.search("diamond");
        let upper = catalog.search("DIAMOND");
        assert_eq!(lower, upper);
        assert!(!lower.is_empty());
    }

    #[test]
    fn test_search_covers_tags() {
        let catalog = catalog();
        let results = catalog.search("bestseller");
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.has_tag("bestseller")));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let catalog = catalog();
        assert_eq!(catalog.search("").len(), catalog.len());
    }

    #[test]
    fn test_related_products_share_subcategory() {
        let catalog = catalog();
        let related = catalog.related_products(ProductId::new(1), 4);
        assert!(!related.is_empty());
        assert!(related.len() <= 4);
        for product in &related {
            assert_eq!(product.subcategory, "rings");
            assert_ne!(product.id, ProductId::new(1));
        }
    }

    #[test]
    fn test_related_products_unknown_id() {
        assert!(catalog().related_products(ProductId::new(999), 4).is_empty());
    }

    #[test]
    fn test_query_price_window_is_inclusive() {
        let catalog = catalog();
        let query = ProductQuery {
            min_price: Some(Decimal::from(4500)),
            max_price: Some(Decimal::from(4500)),
            ..ProductQuery::default()
        };
        let results = catalog.query(&query);
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.price.amount == Decimal::from(4500)));
    }

    #[test]
    fn test_query_sort_price_low_to_high() {
        let catalog = catalog();
        let query = ProductQuery {
            sort: SortOrder::PriceLowToHigh,
            ..ProductQuery::default()
        };
        let results = catalog.query(&query);
        for pair in results.windows(2) {
            assert!(pair[0].price.amount <= pair[1].price.amount);
        }
    }

    #[test]
    fn test_query_sort_newest_is_id_descending() {
        let catalog = catalog();
        let query = ProductQuery {
            sort: SortOrder::Newest,
            ..ProductQuery::default()
        };
        let results = catalog.query(&query);
        for pair in results.windows(2) {
            assert!(pair[0].id > pair[1].id);
        }
    }

    #[test]
    fn test_query_search_wins_over_category() {
        let catalog = catalog();
        let query = ProductQuery {
            category: Some("jewelry".to_string()),
            search: Some("engagement".to_string()),
            ..ProductQuery::default()
        };
        let results = catalog.query(&query);
        // "engagement" only tags diamond products, so the category is ignored
        assert!(results.iter().any(|p| p.category == "diamonds"));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(
            "price-low".parse::<SortOrder>().unwrap(),
            SortOrder::PriceLowToHigh
        );
        assert_eq!("rating".parse::<SortOrder>().unwrap(), SortOrder::TopRated);
        assert!("cheapest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let doc = r#"{
            "products": [
                {"id": 1, "name": "A", "description": "", "price": {"amount": "1", "currency_code": "USD"},
                 "image": "a.jpg", "category": "jewelry", "subcategory": "rings",
                 "rating": 5.0, "reviews": 1, "in_stock": true},
                {"id": 1, "name": "B", "description": "", "price": {"amount": "2", "currency_code": "USD"},
                 "image": "b.jpg", "category": "jewelry", "subcategory": "rings",
                 "rating": 4.0, "reviews": 2, "in_stock": true}
            ],
            "categories": []
        }"#;
        let parsed: CatalogDocument = serde_json::from_str(doc).unwrap();
        let result = Catalog::from_document(parsed);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == ProductId::new(1)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
