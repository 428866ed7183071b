//! Backend commands queued from UI to backend worker.

use client_core::ProductsRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchCategories,
    FetchProducts(ProductsRequest),
    FetchImage { url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchCategories => "fetch_categories",
            BackendCommand::FetchProducts(_) => "fetch_products",
            BackendCommand::FetchImage { .. } => "fetch_image",
        }
    }
}
