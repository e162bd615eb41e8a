use serde::{Deserialize, Serialize};

use super::history::HistoryEntry;
use crate::services::context_menu::{ContextMenuItem, ContextParams, MenuAction};

/// A message posted by a page through `window.ipc.postMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum BridgeMessage {
    /// Open the typed address as a new tab. Welcome page only.
    NavigateToUrl { url: String },
    /// Ask for the history list; answered with [`BridgePush::History`].
    #[serde(rename_all = "camelCase")]
    GetHistory { request_id: u64 },
    /// Forget one history entry. Welcome page only.
    RemoveHistoryItem { url: String },
    /// Right click; answered with [`BridgePush::ContextMenu`].
    #[serde(rename_all = "camelCase")]
    ContextMenu {
        x: i32,
        y: i32,
        #[serde(default)]
        link_url: Option<String>,
    },
    /// An item picked from the rendered menu.
    #[serde(rename_all = "camelCase")]
    ContextMenuAction {
        action: MenuAction,
        x: i32,
        y: i32,
        #[serde(default)]
        link_url: Option<String>,
    },
}

impl BridgeMessage {
    pub fn name(&self) -> &'static str {
        match self {
            BridgeMessage::NavigateToUrl { .. } => "navigateToUrl",
            BridgeMessage::GetHistory { .. } => "getHistory",
            BridgeMessage::RemoveHistoryItem { .. } => "removeHistoryItem",
            BridgeMessage::ContextMenu { .. } => "contextMenu",
            BridgeMessage::ContextMenuAction { .. } => "contextMenuAction",
        }
    }

    /// History commands are only honoured from the welcome page.
    pub fn is_privileged(&self) -> bool {
        matches!(
            self,
            BridgeMessage::NavigateToUrl { .. }
                | BridgeMessage::GetHistory { .. }
                | BridgeMessage::RemoveHistoryItem { .. }
        )
    }
}

/// Builds the pointer parameters carried by both context menu messages.
pub fn context_params(x: i32, y: i32, link_url: &Option<String>) -> ContextParams {
    ContextParams {
        x,
        y,
        link_url: link_url.clone(),
    }
}

/// A message delivered to a page's bridge script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BridgePush {
    #[serde(rename_all = "camelCase")]
    History {
        request_id: u64,
        entries: Vec<HistoryEntry>,
    },
    /// The welcome page became visible again and should reload its list.
    RefreshHistory,
    /// The typed address was rejected.
    InputError { message: String },
    ContextMenu {
        x: i32,
        y: i32,
        items: Vec<ContextMenuItem>,
    },
}

impl BridgePush {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("Failed to serialize bridge push: {}", e);
            String::new()
        })
    }
}
