//! App Core for Chromini.
//!
//! Central struct holding all managers. Every host event the UI layer
//! receives maps to exactly one method here.

use std::path::PathBuf;

use crate::host::{ShortcutRegistrar, WindowBackend, WindowHost};
use crate::managers::history_manager::HistoryManager;
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::managers::tab_manager::{MenuOutcome, TabManager, TabManagerTrait};
use crate::managers::window_manager::{WindowManager, WindowManagerTrait};
use crate::services::config_store::ConfigStore;
use crate::services::context_menu::{ContextParams, MenuAction};
use crate::services::surface_factory::SurfaceFactory;
use crate::types::config::WebPreferences;
use crate::types::errors::TabError;
use crate::types::shortcut::Command;
use crate::types::surface::SurfaceId;
use crate::types::window::WindowId;

/// Central application struct holding all managers.
pub struct App {
    pub config_store: ConfigStore,
    pub history_manager: HistoryManager,
    pub tab_manager: TabManager,
    pub window_manager: WindowManager,
    pub shortcut_manager: ShortcutManager,
}

impl App {
    /// Creates a new App. `config_path` overrides the platform config file.
    pub fn new(config_path: Option<PathBuf>, preferences: WebPreferences) -> Self {
        let config_store = ConfigStore::new(config_path);
        let history_manager = HistoryManager::new(config_store.clone());
        let tab_manager = TabManager::new(SurfaceFactory::new(preferences.clone()));
        let window_manager = WindowManager::new(config_store.clone(), preferences);
        let shortcut_manager = ShortcutManager::new();

        Self {
            config_store,
            history_manager,
            tab_manager,
            window_manager,
            shortcut_manager,
        }
    }

    // ─── Windows ───

    pub fn open_window(
        &mut self,
        host: &mut dyn WindowHost,
        initial_url: Option<&str>,
    ) -> Result<WindowId, TabError> {
        self.window_manager
            .open_window(host, &mut self.tab_manager, initial_url)
    }

    pub fn close_window(&mut self, window: WindowId) -> Result<Box<dyn WindowBackend>, TabError> {
        self.window_manager.close_window(&mut self.tab_manager, window)
    }

    pub fn window_count(&self) -> usize {
        self.window_manager.window_count()
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.window_manager.focused_window()
    }

    pub fn focus_changed(&mut self, window: WindowId, focused: bool) {
        self.window_manager.focus_changed(window, focused);
    }

    pub fn window_resized(&mut self, window: WindowId) {
        if let Err(e) = self.tab_manager.resize(window) {
            log::debug!("Resize ignored: {}", e);
        }
    }

    // ─── Shortcuts ───

    pub fn register_shortcuts(&self, registrar: &mut dyn ShortcutRegistrar) -> usize {
        self.shortcut_manager.register_all(registrar)
    }

    /// Runs the command bound to `keys`. Returns `false` for unbound chords.
    pub fn dispatch_chord(&mut self, host: &mut dyn WindowHost, keys: &str) -> Result<bool, TabError> {
        match self.shortcut_manager.command_for(keys) {
            Some(command) => {
                self.dispatch(host, command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs `command` against the focused window. Without one, nothing
    /// happens.
    pub fn dispatch(&mut self, host: &mut dyn WindowHost, command: Command) -> Result<(), TabError> {
        let Some(window) = self.focused_window() else {
            log::debug!("No focused window, dropping {}", command);
            return Ok(());
        };
        log::debug!("Dispatching {} to {}", command, window);

        let tabs = &mut self.tab_manager;
        match command {
            Command::NewWindow => {
                self.open_window(host, None)?;
            }
            Command::ShowWelcome => tabs.activate_welcome(window)?,
            Command::PreviousTab => {
                tabs.previous_tab(window)?;
            }
            Command::NextTab => {
                tabs.next_tab(window)?;
            }
            Command::CloseTab => {
                tabs.close_active_tab(window)?;
            }
            Command::Reload => {
                tabs.reload_active(window)?;
            }
            Command::ToggleFullscreen => {
                tabs.toggle_fullscreen(window)?;
            }
            Command::ToggleDevTools => {
                tabs.toggle_devtools(window)?;
            }
            Command::Back => {
                tabs.go_back(window)?;
            }
            Command::Forward => {
                tabs.go_forward(window)?;
            }
        }
        Ok(())
    }

    // ─── Surface events ───

    pub fn navigation_started(&mut self, surface: SurfaceId, url: &str) {
        self.tab_manager.on_navigation_started(surface, url);
    }

    pub fn title_changed(&mut self, surface: SurfaceId, title: &str) {
        self.tab_manager.on_title_changed(surface, title);
    }

    pub fn load_finished(&mut self, surface: SurfaceId, url: &str) {
        self.tab_manager
            .on_load_finished(surface, url, &mut self.history_manager);
    }

    pub fn new_window_requested(
        &mut self,
        host: &mut dyn WindowHost,
        surface: SurfaceId,
        url: &str,
    ) -> Result<Option<SurfaceId>, TabError> {
        self.tab_manager.on_new_window_request(surface, url, host)
    }

    pub fn context_menu_action(
        &mut self,
        host: &mut dyn WindowHost,
        surface: SurfaceId,
        action: MenuAction,
        params: &ContextParams,
    ) -> Result<(), TabError> {
        match self.tab_manager.on_context_menu_action(surface, action, params)? {
            MenuOutcome::Handled => Ok(()),
            MenuOutcome::OpenWindow(url) => self.open_window(host, Some(&url)).map(|_| ()),
        }
    }
}
