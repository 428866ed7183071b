//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::CatalogSource;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::media::decode_product_image;

/// Starts the worker thread. It runs until the command queue disconnects.
pub fn launch(
    source: Arc<dyn CatalogSource>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                // Fetches overlap freely; the UI decides which results still apply.
                tokio::spawn(handle_command(Arc::clone(&source), cmd, ui_tx.clone()));
            }
            tracing::info!("backend worker stopping: command queue closed");
        });
    })
}

async fn handle_command(
    source: Arc<dyn CatalogSource>,
    cmd: BackendCommand,
    ui_tx: Sender<UiEvent>,
) {
    let event = match cmd {
        BackendCommand::FetchCategories => {
            UiEvent::CategoriesLoaded(source.list_categories().await)
        }
        BackendCommand::FetchProducts(request) => UiEvent::ProductsLoaded {
            generation: request.generation,
            result: source.list_products(request.category).await,
        },
        BackendCommand::FetchImage { url } => match source.fetch_image(&url).await {
            Ok(bytes) => match decode_product_image(&bytes) {
                Ok(image) => UiEvent::ProductImageLoaded { url, image },
                Err(reason) => UiEvent::ProductImageFailed { url, reason },
            },
            Err(err) => UiEvent::ProductImageFailed {
                url,
                reason: err.to_string(),
            },
        },
    };

    // Results wait for room in the queue; only a closed UI drops them.
    if tokio::task::block_in_place(|| ui_tx.send(event)).is_err() {
        tracing::debug!("ui event queue closed; dropping backend result");
    }
}
