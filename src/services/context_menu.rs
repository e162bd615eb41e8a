//! Right-click menu offered by every content surface.
//!
//! The page's injected script asks for the menu through the bridge, renders
//! it as an overlay and posts the chosen action back.

use serde::{Deserialize, Serialize};

/// An action picked from the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuAction {
    Back,
    Forward,
    Reload,
    OpenLinkInNewTab,
    OpenLinkInNewWindow,
    Cut,
    Copy,
    Paste,
    InspectElement,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Back => "Back",
            MenuAction::Forward => "Forward",
            MenuAction::Reload => "Reload",
            MenuAction::OpenLinkInNewTab => "Open Link in New Tab",
            MenuAction::OpenLinkInNewWindow => "Open Link in New Window",
            MenuAction::Cut => "Cut",
            MenuAction::Copy => "Copy",
            MenuAction::Paste => "Paste",
            MenuAction::InspectElement => "Inspect Element",
        }
    }

    /// Whether the action needs a link under the cursor.
    pub fn needs_link(&self) -> bool {
        matches!(self, MenuAction::OpenLinkInNewTab | MenuAction::OpenLinkInNewWindow)
    }
}

/// One row of the rendered menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContextMenuItem {
    Action {
        action: MenuAction,
        label: String,
        enabled: bool,
    },
    Separator,
}

impl ContextMenuItem {
    fn action(action: MenuAction, enabled: bool) -> Self {
        ContextMenuItem::Action {
            action,
            label: action.label().to_string(),
            enabled,
        }
    }
}

/// Where the menu was requested and what was under the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextParams {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub link_url: Option<String>,
}

impl ContextParams {
    /// The link under the cursor, ignoring empty strings from the page.
    pub fn link(&self) -> Option<&str> {
        self.link_url.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// Builds the menu for a click at `params`.
pub fn build_menu(params: &ContextParams, can_go_back: bool, can_go_forward: bool) -> Vec<ContextMenuItem> {
    let mut items = vec![
        ContextMenuItem::action(MenuAction::Back, can_go_back),
        ContextMenuItem::action(MenuAction::Forward, can_go_forward),
        ContextMenuItem::action(MenuAction::Reload, true),
        ContextMenuItem::Separator,
    ];

    if params.link().is_some() {
        items.push(ContextMenuItem::action(MenuAction::OpenLinkInNewTab, true));
        items.push(ContextMenuItem::action(MenuAction::OpenLinkInNewWindow, true));
        items.push(ContextMenuItem::Separator);
    }

    items.extend([
        ContextMenuItem::action(MenuAction::Cut, true),
        ContextMenuItem::action(MenuAction::Copy, true),
        ContextMenuItem::action(MenuAction::Paste, true),
        ContextMenuItem::Separator,
        ContextMenuItem::action(MenuAction::InspectElement, true),
    ]);
    items
}
