//! Product cards. Renders products in the order given; never filters or sorts.

use client_core::{format_price, image_source};
use eframe::egui;
use shared::domain::Product;

use crate::media::{ImageCache, ProductImageState};

pub const IMAGE_ALT_TEXT: &str = "Image of the products";

const CARD_IMAGE_MAX_WIDTH: f32 = 300.0;
const CARD_IMAGE_SLOT_HEIGHT: f32 = 120.0;

/// Draws one card per product and returns the image URLs that have not been
/// requested yet.
pub fn show(
    ui: &mut egui::Ui,
    products: &[&Product],
    images: &mut ImageCache,
    placeholder_image_url: &str,
) -> Vec<String> {
    let mut missing_images = Vec::new();
    for product in products {
        ui.push_id(product.id.0, |ui| {
            egui::Frame::group(ui.style())
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let url = image_source(product, placeholder_image_url);
                    show_card_image(ui, url, images, &mut missing_images);
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(&product.name).heading());
                    ui.label(product.description.as_str());
                    ui.label(egui::RichText::new(format_price(product.price)).strong());
                });
        });
        ui.add_space(8.0);
    }
    missing_images
}

fn show_card_image(
    ui: &mut egui::Ui,
    url: &str,
    images: &mut ImageCache,
    missing_images: &mut Vec<String>,
) {
    match images.get_mut(url) {
        None => {
            missing_images.push(url.to_string());
            image_loading_slot(ui);
        }
        Some(ProductImageState::Loading) => image_loading_slot(ui),
        Some(ProductImageState::Failed) => {
            ui.weak(IMAGE_ALT_TEXT);
        }
        Some(ProductImageState::Ready { image, texture }) => {
            let texture = texture.get_or_insert_with(|| {
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
                ui.ctx().load_texture(
                    format!("product_image_{url}"),
                    color_image,
                    egui::TextureOptions::LINEAR,
                )
            });

            let mut size = texture.size_vec2();
            let max_width = ui.available_width().min(CARD_IMAGE_MAX_WIDTH);
            if size.x > max_width {
                size *= max_width / size.x;
            }
            ui.add(egui::Image::new(&*texture).fit_to_exact_size(size))
                .on_hover_text(IMAGE_ALT_TEXT);
        }
    }
}

fn image_loading_slot(ui: &mut egui::Ui) {
    ui.allocate_ui(egui::vec2(CARD_IMAGE_MAX_WIDTH, CARD_IMAGE_SLOT_HEIGHT), |ui| {
        ui.centered_and_justified(|ui| {
            ui.spinner();
        });
    });
}
