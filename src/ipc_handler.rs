//! Bridge message handler for Chromini.
//!
//! Pages talk to the shell by posting JSON through `window.ipc.postMessage`.
//! `handle_message` parses one such message, checks that the sending surface
//! may issue it and routes it to the managers via the `App` struct. Replies
//! travel back as [`BridgePush`] messages on the same surface.

use crate::app::App;
use crate::host::WindowHost;
use crate::managers::history_manager::HistoryManagerTrait;
use crate::managers::tab_manager::TabManagerTrait;
use crate::services::url_input::resolve_input;
use crate::types::bridge::{context_params, BridgeMessage, BridgePush};
use crate::types::errors::BridgeError;
use crate::types::surface::SurfaceId;

/// Handles one raw message posted by `surface`.
pub fn handle_message(
    app: &mut App,
    host: &mut dyn WindowHost,
    surface: SurfaceId,
    body: &str,
) -> Result<(), BridgeError> {
    let message: BridgeMessage = serde_json::from_str(body)?;

    let sender = app
        .tab_manager
        .surface(surface)
        .ok_or(BridgeError::UnknownSurface(surface))?;
    if message.is_privileged() && !sender.is_welcome() {
        return Err(BridgeError::Forbidden(message.name()));
    }
    let window = sender.window;

    match message {
        BridgeMessage::NavigateToUrl { url } => match resolve_input(&url) {
            Ok(url) => {
                app.tab_manager.open_tab(window, &url)?;
            }
            Err(e) => {
                log::debug!("Rejected address {:?}: {}", url, e);
                let reply = BridgePush::InputError {
                    message: e.to_string(),
                };
                app.tab_manager.push_to_surface(surface, &reply)?;
            }
        },
        BridgeMessage::GetHistory { request_id } => {
            let reply = BridgePush::History {
                request_id,
                entries: app.history_manager.list(),
            };
            app.tab_manager.push_to_surface(surface, &reply)?;
        }
        BridgeMessage::RemoveHistoryItem { url } => {
            app.history_manager.remove(&url)?;
        }
        BridgeMessage::ContextMenu { x, y, link_url } => {
            let params = context_params(x, y, &link_url);
            let items = app.tab_manager.context_menu(surface, &params)?;
            app.tab_manager
                .push_to_surface(surface, &BridgePush::ContextMenu { x, y, items })?;
        }
        BridgeMessage::ContextMenuAction {
            action,
            x,
            y,
            link_url,
        } => {
            let params = context_params(x, y, &link_url);
            app.context_menu_action(host, surface, action, &params)?;
        }
    }
    Ok(())
}
