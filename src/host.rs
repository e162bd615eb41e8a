//! Contracts the shell expects from the windowing and rendering host.
//!
//! The tab manager and window manager only talk to these traits. The `gui`
//! feature provides the `tao` + `wry` implementation in
//! [`crate::ui::webview_app`]; tests use a recording mock.

use crate::types::config::WebPreferences;
use crate::types::errors::{HostError, ShortcutError};
use crate::types::surface::{SurfaceId, SurfaceKind};
use crate::types::window::{Bounds, WindowBounds, WindowId};

/// Clipboard commands forwarded to the focused page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Cut,
    Copy,
    Paste,
}

/// Parameters for a new host window.
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    pub size: WindowBounds,
    pub preferences: WebPreferences,
}

/// Parameters for a new content surface inside a window.
#[derive(Debug, Clone)]
pub struct SurfaceRequest {
    pub id: SurfaceId,
    pub kind: SurfaceKind,
    pub bounds: Bounds,
    pub preferences: WebPreferences,
}

/// Creates host windows and hands URLs to the operating system.
pub trait WindowHost {
    fn create_window(
        &mut self,
        id: WindowId,
        options: &WindowOptions,
    ) -> Result<Box<dyn WindowBackend>, HostError>;

    /// Opens `url` with the OS default handler.
    fn open_external(&mut self, url: &str) -> Result<(), HostError>;
}

/// One host window. At most one of its surfaces is visible at a time.
pub trait WindowBackend {
    fn set_title(&mut self, title: &str);

    /// The area surfaces are laid out in.
    fn content_bounds(&self) -> Bounds;

    /// Outer size, persisted on close.
    fn size(&self) -> WindowBounds;

    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Allocates a hidden, blank surface inside this window.
    fn create_surface(
        &mut self,
        request: &SurfaceRequest,
    ) -> Result<Box<dyn SurfaceBackend>, HostError>;
}

/// The rendering primitive behind a content surface.
///
/// Every call is fire-and-forget: navigation results arrive later as
/// events, never as return values.
pub trait SurfaceBackend {
    fn navigate(&mut self, url: &str);
    fn reload(&mut self, ignore_cache: bool);
    fn go_back(&mut self);
    fn go_forward(&mut self);

    fn can_go_back(&self) -> bool {
        true
    }

    fn can_go_forward(&self) -> bool {
        true
    }

    fn set_bounds(&mut self, bounds: Bounds);
    fn set_visible(&mut self, visible: bool);
    fn toggle_devtools(&mut self);
    fn inspect_element(&mut self, x: i32, y: i32);
    fn edit(&mut self, command: EditCommand);

    /// Delivers a JSON message to the page's bridge script.
    fn push(&mut self, message: &str);

    /// Best-effort teardown. Must not block, even on a hung page.
    fn destroy(self: Box<Self>);
}

/// Registers global key chords with the operating system.
pub trait ShortcutRegistrar {
    fn unregister_all(&mut self);
    fn register(&mut self, keys: &str) -> Result<(), ShortcutError>;
}
