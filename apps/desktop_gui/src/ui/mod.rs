//! UI layer for the catalog window: app shell, category filter, and product cards.

pub mod app;
pub mod category_filter;
pub mod product_list;

pub use app::CatalogApp;
