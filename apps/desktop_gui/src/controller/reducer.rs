//! State transitions for the catalog view. Each function mutates the view
//! state and returns the backend commands the caller must dispatch.

use client_core::CatalogViewState;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::media::ImageCache;

/// Fetches issued when the catalog view first appears.
pub fn mount(state: &mut CatalogViewState) -> Vec<BackendCommand> {
    vec![
        BackendCommand::FetchCategories,
        BackendCommand::FetchProducts(state.request_products()),
    ]
}

pub fn select_category(state: &mut CatalogViewState, raw: &str) -> Option<BackendCommand> {
    match state.select_category(raw) {
        Ok(request) => request.map(BackendCommand::FetchProducts),
        Err(err) => {
            tracing::warn!("ignoring category selection: {err}");
            None
        }
    }
}

pub fn apply_event(state: &mut CatalogViewState, images: &mut ImageCache, event: UiEvent) {
    match event {
        UiEvent::CategoriesLoaded(result) => state.apply_categories(result),
        UiEvent::ProductsLoaded { generation, result } => {
            state.apply_products(generation, result);
        }
        UiEvent::ProductImageLoaded { url, image } => images.finish(url, image),
        UiEvent::ProductImageFailed { url, reason } => {
            tracing::warn!(%url, "product image unavailable: {reason}");
            images.fail(url);
        }
    }
}
