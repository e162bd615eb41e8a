use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::window::WindowId;

/// Identifies one content surface (a tab's page, or a window's welcome page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// What a surface is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// The local URL-entry page shown when no tab is active.
    Welcome,
    /// A regular tab showing a remote page.
    Page,
}

/// Load state of the page currently shown by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    Loading,
    Loaded,
}

/// Bookkeeping for a single navigable page instance.
///
/// The owning window is stored as an id, so a surface never keeps its
/// window alive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSurface {
    pub id: SurfaceId,
    pub window: WindowId,
    pub kind: SurfaceKind,
    pub url: String,
    pub title: String,
    pub status: LoadStatus,
    /// Set once the current navigation has been written to history.
    pub history_recorded: bool,
}

impl ContentSurface {
    pub fn new(window: WindowId, kind: SurfaceKind, url: &str) -> Self {
        Self {
            id: SurfaceId::new(),
            window,
            kind,
            url: url.to_string(),
            title: String::new(),
            status: LoadStatus::Loading,
            history_recorded: false,
        }
    }

    pub fn is_welcome(&self) -> bool {
        self.kind == SurfaceKind::Welcome
    }
}
