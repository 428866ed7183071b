//! Product image decoding and the per-URL texture cache.

use std::collections::HashMap;

use egui::TextureHandle;

const MAX_IMAGE_WIDTH: u32 = 600;
const MAX_IMAGE_HEIGHT: u32 = 400;

#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

pub fn decode_product_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    // `thumbnail` also scales up, so small images keep their own size.
    let resized = if dynamic.width() > MAX_IMAGE_WIDTH || dynamic.height() > MAX_IMAGE_HEIGHT {
        dynamic.thumbnail(MAX_IMAGE_WIDTH, MAX_IMAGE_HEIGHT).to_rgba8()
    } else {
        dynamic.to_rgba8()
    };
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

pub enum ProductImageState {
    Loading,
    Ready {
        image: PreviewImage,
        texture: Option<TextureHandle>,
    },
    Failed,
}

/// Images keyed by source URL. An entry exists from the moment a fetch is
/// issued, so each URL is requested at most once.
#[derive(Default)]
pub struct ImageCache {
    entries: HashMap<String, ProductImageState>,
}

impl ImageCache {
    pub fn get_mut(&mut self, url: &str) -> Option<&mut ProductImageState> {
        self.entries.get_mut(url)
    }

    /// Marks `url` as loading. Returns false if it was already known.
    pub fn begin_loading(&mut self, url: &str) -> bool {
        if self.entries.contains_key(url) {
            return false;
        }
        self.entries
            .insert(url.to_string(), ProductImageState::Loading);
        true
    }

    /// Drops a `Loading` entry whose fetch was never queued, so the URL is
    /// reported as missing again on the next frame.
    pub fn forget(&mut self, url: &str) {
        if matches!(self.entries.get(url), Some(ProductImageState::Loading)) {
            self.entries.remove(url);
        }
    }

    pub fn finish(&mut self, url: String, image: PreviewImage) {
        self.entries.insert(
            url,
            ProductImageState::Ready {
                image,
                texture: None,
            },
        );
    }

    pub fn fail(&mut self, url: String) {
        self.entries.insert(url, ProductImageState::Failed);
    }

    #[cfg(test)]
    pub fn is_ready(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(ProductImageState::Ready { .. }))
    }

    #[cfg(test)]
    pub fn is_loading(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(ProductImageState::Loading))
    }

    #[cfg(test)]
    pub fn is_failed(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(ProductImageState::Failed))
    }
}

#[cfg(test)]
pub(crate) fn encode_test_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([200, 40, 40, 255]),
    ))
    .write_to(&mut bytes, image::ImageFormat::Png)
    .expect("encode png");
    bytes.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_into_rgba_pixels() {
        let image = decode_product_image(&encode_test_png(4, 3)).expect("decode");
        assert_eq!((image.width, image.height), (4, 3));
        assert_eq!(image.rgba.len(), 4 * 3 * 4);
        assert_eq!(&image.rgba[..4], &[200, 40, 40, 255]);
    }

    #[test]
    fn shrinks_large_images_to_card_bounds() {
        let image = decode_product_image(&encode_test_png(1200, 400)).expect("decode");
        assert!(image.width <= MAX_IMAGE_WIDTH as usize);
        assert!(image.height <= MAX_IMAGE_HEIGHT as usize);
        assert_eq!(image.width, 600);
    }

    #[test]
    fn keeps_small_images_at_their_own_size() {
        let image = decode_product_image(&encode_test_png(3, 2)).expect("decode");
        assert_eq!((image.width, image.height), (3, 2));

        let tall = decode_product_image(&encode_test_png(100, 800)).expect("decode");
        assert_eq!((tall.width, tall.height), (50, 400));
    }

    #[test]
    fn rejects_bytes_that_are_not_an_image() {
        assert!(decode_product_image(b"<html>not found</html>").is_err());
    }

    #[test]
    fn each_url_is_requested_once() {
        let mut cache = ImageCache::default();
        assert!(cache.begin_loading("https://img.test/a.png"));
        assert!(!cache.begin_loading("https://img.test/a.png"));

        cache.fail("https://img.test/a.png".to_string());
        assert!(!cache.begin_loading("https://img.test/a.png"));
        assert!(cache.is_failed("https://img.test/a.png"));
    }

    #[test]
    fn forgetting_only_clears_loading_entries() {
        let mut cache = ImageCache::default();
        cache.begin_loading("https://img.test/a.png");
        cache.forget("https://img.test/a.png");
        assert!(!cache.is_loading("https://img.test/a.png"));
        assert!(cache.begin_loading("https://img.test/a.png"));

        cache.fail("https://img.test/b.png".to_string());
        cache.forget("https://img.test/b.png");
        assert!(cache.is_failed("https://img.test/b.png"));
    }
}
