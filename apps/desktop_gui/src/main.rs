use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod config;
mod controller;
mod media;
mod ui;

use anyhow::Context;
use backend_bridge::commands::BackendCommand;
use clap::Parser;
use client_core::CatalogClient;
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

/// Desktop viewer for the product catalog API.
#[derive(Parser, Debug)]
#[command(name = "catalog_desktop")]
struct Args {
    /// Base URL of the catalog API, e.g. http://localhost:8080/api
    #[arg(long)]
    api_url: Option<String>,
    /// Image shown for products without one.
    #[arg(long)]
    placeholder_image_url: Option<String>,
    /// TOML settings file; defaults to ./catalog.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = config::load_settings(&config::SettingsOverrides {
        config_path: args.config,
        api_base_url: args.api_url,
        placeholder_image_url: args.placeholder_image_url,
    })
    .context("failed to resolve catalog settings")?;
    tracing::info!(api_base_url = %settings.api_base_url, "starting catalog viewer");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let source = Arc::new(CatalogClient::new(settings.api_base_url.clone()));
    backend_bridge::runtime::launch(source, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui::app::WINDOW_TITLE)
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        ui::app::WINDOW_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ui::CatalogApp::bootstrap(
                cmd_tx, ui_rx, &settings,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("catalog window failed: {err}"))
}
