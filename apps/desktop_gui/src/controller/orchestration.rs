//! Command orchestration helpers from UI actions to backend command queue.

use client_core::CatalogViewState;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer;
use crate::media::ImageCache;

/// Queues `cmd` for the worker. Returns false when it could not be queued.
pub fn dispatch_backend_command(cmd_tx: &Sender<BackendCommand>, cmd: BackendCommand) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            false
        }
    }
}

/// Applies a category control value and queues the products fetch it needs.
/// A fetch that cannot be queued is withdrawn, leaving the previous selection
/// in place.
pub fn select_category(
    state: &mut CatalogViewState,
    cmd_tx: &Sender<BackendCommand>,
    raw: &str,
) {
    let previous = state.selected_category();
    let Some(cmd) = reducer::select_category(state, raw) else {
        return;
    };
    let BackendCommand::FetchProducts(request) = &cmd else {
        return;
    };
    let request = *request;
    if !dispatch_backend_command(cmd_tx, cmd) {
        state.withdraw_products_request(request, previous);
    }
}

/// Queues fetches for image URLs the product list could not draw yet. URLs
/// that do not fit in the queue stay unregistered and are offered again on
/// the next frame.
pub fn request_images(
    images: &mut ImageCache,
    cmd_tx: &Sender<BackendCommand>,
    urls: Vec<String>,
) {
    for url in urls {
        if !images.begin_loading(&url) {
            continue;
        }
        let cmd = BackendCommand::FetchImage { url: url.clone() };
        if !dispatch_backend_command(cmd_tx, cmd) {
            images.forget(&url);
            break;
        }
    }
}
