//! Events reported by the backend worker to the UI thread.

use shared::{
    domain::{Category, Product},
    FetchError,
};

use crate::media::PreviewImage;

#[derive(Debug)]
pub enum UiEvent {
    CategoriesLoaded(Result<Vec<Category>, FetchError>),
    ProductsLoaded {
        generation: u64,
        result: Result<Vec<Product>, FetchError>,
    },
    ProductImageLoaded {
        url: String,
        image: PreviewImage,
    },
    ProductImageFailed {
        url: String,
        reason: String,
    },
}
