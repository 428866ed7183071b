use std::time::Duration;

use client_core::{CatalogViewState, SortOrder};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::{events::UiEvent, orchestration, reducer};
use crate::media::ImageCache;
use crate::ui::{category_filter, product_list};

pub const WINDOW_TITLE: &str = "Product Catalog";
const SEARCH_PLACEHOLDER: &str = "Search for products...";
const NO_PRODUCTS_MESSAGE: &str = "No products found";

pub struct CatalogApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    state: CatalogViewState,
    images: ImageCache,
    placeholder_image_url: String,
}

impl CatalogApp {
    /// Builds the root view and issues the fetches a fresh mount needs.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: CatalogViewState::new(),
            images: ImageCache::default(),
            placeholder_image_url: settings.placeholder_image_url.clone(),
        };
        let commands = reducer::mount(&mut app.state);
        app.dispatch_all(commands);
        app
    }

    fn dispatch_all(&self, commands: impl IntoIterator<Item = BackendCommand>) {
        for cmd in commands {
            orchestration::dispatch_backend_command(&self.cmd_tx, cmd);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reducer::apply_event(&mut self.state, &mut self.images, event);
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let picked = category_filter::show(
                ui,
                self.state.categories(),
                self.state.selected_category(),
            );
            if let Some(raw) = picked {
                orchestration::select_category(&mut self.state, &self.cmd_tx, &raw);
            }

            ui.add(
                egui::TextEdit::singleline(self.state.search_term_mut())
                    .hint_text(SEARCH_PLACEHOLDER)
                    .desired_width(320.0),
            );

            let mut sort_order = self.state.sort_order();
            egui::ComboBox::from_id_salt("sort_order")
                .selected_text(sort_order.label())
                .width(220.0)
                .show_ui(ui, |ui| {
                    for order in SortOrder::ALL {
                        ui.selectable_value(&mut sort_order, order, order.label());
                    }
                });
            if sort_order != self.state.sort_order() {
                self.state.set_sort_order(sort_order);
            }
        });
    }

    fn show_products(&mut self, ui: &mut egui::Ui) {
        let visible = self.state.visible_products();
        if visible.is_empty() {
            ui.heading(NO_PRODUCTS_MESSAGE);
            return;
        }

        let images = &mut self.images;
        let placeholder_image_url = self.placeholder_image_url.as_str();
        let missing_images = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                product_list::show(ui, &visible, images, placeholder_image_url)
            })
            .inner;

        orchestration::request_images(&mut self.images, &self.cmd_tx, missing_images);
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(WINDOW_TITLE);
            ui.add_space(12.0);
            self.show_controls(ui);
            ui.add_space(12.0);
            self.show_products(ui);
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
