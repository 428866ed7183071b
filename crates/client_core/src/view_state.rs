//! Client-held view state for the catalog and the pure list derivation that
//! turns it into what the product list renders.

use std::cmp::Ordering;

use shared::{
    domain::{Category, CategoryId, Product},
    FetchError,
};
use thiserror::Error;
use tracing::{debug, error};

pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400/png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Ascending, SortOrder::Descending];

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "Sort by Price: Low to High",
            SortOrder::Descending => "Sort by Price: High to Low",
        }
    }
}

/// A product fetch to dispatch. `generation` identifies it against later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductsRequest {
    pub generation: u64,
    pub category: Option<CategoryId>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("category selection {0:?} is not an integer id")]
    NotAnId(String),
}

/// Maps the raw value reported by the category control to a filter.
/// The empty string means "all categories". Anything else must be a whole
/// integer once surrounding whitespace is trimmed, so a blank value or
/// `"3.0"` is rejected rather than coerced.
pub fn parse_category_selection(raw: &str) -> Result<Option<CategoryId>, SelectionError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.trim()
        .parse::<i64>()
        .map(|id| Some(CategoryId(id)))
        .map_err(|_| SelectionError::NotAnId(raw.to_string()))
}

/// Products whose name contains `search_term` (case-insensitive), stably
/// sorted by price.
pub fn visible_products<'a>(
    products: &'a [Product],
    search_term: &str,
    sort_order: SortOrder,
) -> Vec<&'a Product> {
    let needle = search_term.to_lowercase();
    let mut visible: Vec<&Product> = products
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .collect();

    // `sort_by` is stable, so equal prices keep their filtered order.
    match sort_order {
        SortOrder::Ascending => visible.sort_by(|a, b| compare_price(a.price, b.price)),
        SortOrder::Descending => visible.sort_by(|a, b| compare_price(b.price, a.price)),
    }
    visible
}

fn compare_price(left: f64, right: f64) -> Ordering {
    left.partial_cmp(&right).unwrap_or(Ordering::Equal)
}

pub fn image_source<'a>(product: &'a Product, placeholder: &'a str) -> &'a str {
    if product.image_url.is_empty() {
        placeholder
    } else {
        &product.image_url
    }
}

pub fn format_price(price: f64) -> String {
    format!("${price}")
}

#[derive(Debug, Default)]
pub struct CatalogViewState {
    categories: Vec<Category>,
    products: Vec<Product>,
    selected_category: Option<CategoryId>,
    search_term: String,
    sort_order: SortOrder,
    products_generation: u64,
}

impl CatalogViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selected_category(&self) -> Option<CategoryId> {
        self.selected_category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Direct binding for a text input; edits apply on every keystroke.
    pub fn search_term_mut(&mut self) -> &mut String {
        &mut self.search_term
    }

    #[cfg(test)]
    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        self.search_term = search_term.into();
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.sort_order = sort_order;
    }

    #[cfg(test)]
    pub fn products_generation(&self) -> u64 {
        self.products_generation
    }

    /// Issues a fetch for the current category, superseding any in flight.
    pub fn request_products(&mut self) -> ProductsRequest {
        self.products_generation += 1;
        ProductsRequest {
            generation: self.products_generation,
            category: self.selected_category,
        }
    }

    /// Applies a raw category control value. Returns the fetch to dispatch
    /// when the selection actually changed.
    pub fn select_category(
        &mut self,
        raw: &str,
    ) -> Result<Option<ProductsRequest>, SelectionError> {
        let next = parse_category_selection(raw)?;
        if next == self.selected_category {
            return Ok(None);
        }
        self.selected_category = next;
        Ok(Some(self.request_products()))
    }

    /// Takes back `request` when it never reached the worker. The selection
    /// returns to `previous`, so the fetch issued before it applies again and
    /// picking the same category later issues a new fetch.
    pub fn withdraw_products_request(
        &mut self,
        request: ProductsRequest,
        previous: Option<CategoryId>,
    ) {
        if request.generation != self.products_generation {
            return;
        }
        self.products_generation -= 1;
        self.selected_category = previous;
    }

    pub fn apply_categories(&mut self, result: Result<Vec<Category>, FetchError>) {
        self.categories = match result {
            Ok(categories) => categories,
            Err(err) => {
                error!(url = err.url(), "categories fetch failed: {err}");
                Vec::new()
            }
        };
    }

    /// Returns false when the response belongs to a superseded fetch and was dropped.
    pub fn apply_products(
        &mut self,
        generation: u64,
        result: Result<Vec<Product>, FetchError>,
    ) -> bool {
        if generation != self.products_generation {
            debug!(
                generation,
                current = self.products_generation,
                "dropping stale products response"
            );
            return false;
        }

        self.products = match result {
            Ok(products) => products,
            Err(err) => {
                error!(url = err.url(), "products fetch failed: {err}");
                Vec::new()
            }
        };
        true
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        visible_products(&self.products, &self.search_term, self.sort_order)
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
