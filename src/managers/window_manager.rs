//! Window Manager for Chromini.
//!
//! Creates and closes host windows, registers each one with the tab
//! registry, remembers which window has input focus and persists the window
//! geometry when a window closes.

use crate::host::{WindowBackend, WindowHost, WindowOptions};
use crate::managers::tab_manager::{TabManager, TabManagerTrait, DEFAULT_TITLE};
use crate::services::config_store::{ConfigStore, ConfigStoreTrait};
use crate::types::config::WebPreferences;
use crate::types::errors::TabError;
use crate::types::window::WindowId;

/// Trait defining window lifecycle operations.
pub trait WindowManagerTrait {
    fn open_window(
        &mut self,
        host: &mut dyn WindowHost,
        tabs: &mut TabManager,
        initial_url: Option<&str>,
    ) -> Result<WindowId, TabError>;
    fn close_window(
        &mut self,
        tabs: &mut TabManager,
        window: WindowId,
    ) -> Result<Box<dyn WindowBackend>, TabError>;
    fn window_count(&self) -> usize;
    fn focus_changed(&mut self, window: WindowId, focused: bool);
    fn focused_window(&self) -> Option<WindowId>;
}

pub struct WindowManager {
    store: ConfigStore,
    preferences: WebPreferences,
    /// Open windows, oldest first.
    windows: Vec<WindowId>,
    focused: Option<WindowId>,
}

impl WindowManager {
    pub fn new(store: ConfigStore, preferences: WebPreferences) -> Self {
        Self {
            store,
            preferences,
            windows: Vec::new(),
            focused: None,
        }
    }

    pub fn windows(&self) -> &[WindowId] {
        &self.windows
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.windows.contains(&window)
    }
}

impl WindowManagerTrait for WindowManager {
    /// Opens a window at the last persisted size. It starts on the welcome
    /// surface, or with `initial_url` as its first tab.
    ///
    /// The new window is treated as focused until the host says otherwise.
    fn open_window(
        &mut self,
        host: &mut dyn WindowHost,
        tabs: &mut TabManager,
        initial_url: Option<&str>,
    ) -> Result<WindowId, TabError> {
        let config = self.store.load_or_default();
        let options = WindowOptions {
            title: DEFAULT_TITLE.to_string(),
            size: config.window_bounds,
            preferences: self.preferences.clone(),
        };

        let id = WindowId::new();
        let backend = host.create_window(id, &options)?;
        tabs.register_window(id, backend)?;
        self.windows.push(id);
        self.focused = Some(id);
        log::info!(
            "Opened {} at {}x{}",
            id,
            options.size.width,
            options.size.height
        );

        if let Some(url) = initial_url {
            tabs.open_tab(id, url)?;
        }
        Ok(id)
    }

    /// Persists the window's size, then tears down its tabs.
    ///
    /// A failed write is logged and does not keep the window open.
    fn close_window(
        &mut self,
        tabs: &mut TabManager,
        window: WindowId,
    ) -> Result<Box<dyn WindowBackend>, TabError> {
        if let Some(size) = tabs.window_size(window) {
            if let Err(e) = self.store.update(&mut |config| config.window_bounds = size) {
                log::error!("Failed to save window bounds: {}", e);
            }
        }

        let backend = tabs.remove_window(window)?;
        self.windows.retain(|w| *w != window);
        if self.focused == Some(window) {
            self.focused = None;
        }
        log::info!("Closed {}, {} window(s) left", window, self.windows.len());
        Ok(backend)
    }

    fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn focus_changed(&mut self, window: WindowId, focused: bool) {
        if focused {
            if self.contains(window) {
                self.focused = Some(window);
            }
        } else if self.focused == Some(window) {
            self.focused = None;
        }
    }

    fn focused_window(&self) -> Option<WindowId> {
        self.focused
    }
}
