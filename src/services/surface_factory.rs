//! Content surface factory.
//!
//! Allocates the rendering primitive for a tab or a welcome page, attaches
//! the link-open policy that decides where `window.open` and
//! `target="_blank"` clicks go, and starts navigation.

use crate::host::{SurfaceBackend, SurfaceRequest, WindowBackend};
use crate::managers::history_manager::normalize_url;
use crate::services::url_input::ensure_scheme;
use crate::types::config::WebPreferences;
use crate::types::errors::HostError;
use crate::types::surface::{ContentSurface, SurfaceKind};
use crate::types::window::WindowId;

/// Fixed local URL of the welcome page.
pub const WELCOME_URL: &str = "chromini://localhost/welcome";

/// The project's own homepage, always handed to the OS browser.
pub const PROJECT_HOMEPAGE: &str = "https://github.com/chromini";

/// Where a new-window request from inside a surface should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDisposition {
    /// Hand the URL to the OS default handler.
    OpenExternal,
    /// Open the URL as a new tab in the same window.
    OpenTab,
}

/// Per-surface rule for new-window requests.
///
/// Requests never produce a host window by themselves; they either leave
/// the app or become a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Regular pages: only the escape list and non-web schemes leave the app.
    Page { external: Vec<String> },
    /// The welcome page opens tabs through the bridge, so every link leaves.
    Welcome,
}

impl LinkPolicy {
    pub fn resolve(&self, url: &str) -> LinkDisposition {
        match self {
            LinkPolicy::Welcome => LinkDisposition::OpenExternal,
            LinkPolicy::Page { external } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return LinkDisposition::OpenExternal;
                }
                let normalized = normalize_url(url);
                if external.iter().any(|prefix| under_prefix(&normalized, prefix)) {
                    LinkDisposition::OpenExternal
                } else {
                    LinkDisposition::OpenTab
                }
            }
        }
    }
}

/// `url` is `prefix` itself or lies below it on a path or query boundary.
fn under_prefix(url: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match url.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

/// A freshly created surface: bookkeeping, backend and link policy.
pub struct SurfaceHandle {
    pub surface: ContentSurface,
    pub backend: Box<dyn SurfaceBackend>,
    pub link_policy: LinkPolicy,
}

/// Builds content surfaces with the shell's preferences.
#[derive(Debug, Clone)]
pub struct SurfaceFactory {
    preferences: WebPreferences,
    external: Vec<String>,
}

impl SurfaceFactory {
    pub fn new(preferences: WebPreferences) -> Self {
        Self {
            preferences,
            external: vec![normalize_url(PROJECT_HOMEPAGE)],
        }
    }

    pub fn preferences(&self) -> &WebPreferences {
        &self.preferences
    }

    /// Creates a page surface and starts loading `url`.
    ///
    /// Returns as soon as navigation has been requested; completion is
    /// reported later through the load-finished event.
    pub fn create(
        &self,
        window_id: WindowId,
        window: &mut dyn WindowBackend,
        url: &str,
    ) -> Result<SurfaceHandle, HostError> {
        let url = ensure_scheme(url);
        let policy = LinkPolicy::Page {
            external: self.external.clone(),
        };
        self.build(window_id, window, SurfaceKind::Page, &url, policy)
    }

    /// Creates the welcome surface for a window. Its visits are never
    /// recorded to history.
    pub fn create_welcome(
        &self,
        window_id: WindowId,
        window: &mut dyn WindowBackend,
    ) -> Result<SurfaceHandle, HostError> {
        self.build(window_id, window, SurfaceKind::Welcome, WELCOME_URL, LinkPolicy::Welcome)
    }

    fn build(
        &self,
        window_id: WindowId,
        window: &mut dyn WindowBackend,
        kind: SurfaceKind,
        url: &str,
        link_policy: LinkPolicy,
    ) -> Result<SurfaceHandle, HostError> {
        let surface = ContentSurface::new(window_id, kind, url);
        let request = SurfaceRequest {
            id: surface.id,
            kind,
            bounds: window.content_bounds(),
            preferences: self.preferences.clone(),
        };

        let mut backend = window.create_surface(&request)?;
        backend.set_visible(false);
        backend.navigate(url);
        log::debug!("Created {:?} surface {} for {}", kind, surface.id, url);

        Ok(SurfaceHandle {
            surface,
            backend,
            link_policy,
        })
    }
}
