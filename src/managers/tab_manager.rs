//! Tab Manager for Chromini.
//!
//! The per-window tab registry: for each host window it owns the ordered
//! content surfaces, the active pointer and the welcome surface, and keeps
//! the window showing exactly the surface the state calls for.
//!
//! Every lifecycle callback of a surface maps to one `on_*` method here.
//! Callbacks naming a surface that has already been destroyed are dropped.

use std::collections::HashMap;
use std::iter;

use crate::host::{EditCommand, SurfaceBackend, WindowBackend, WindowHost};
use crate::managers::history_manager::HistoryManagerTrait;
use crate::services::context_menu::{build_menu, ContextMenuItem, ContextParams, MenuAction};
use crate::services::surface_factory::{LinkDisposition, SurfaceFactory, SurfaceHandle};
use crate::types::bridge::BridgePush;
use crate::types::errors::TabError;
use crate::types::history::HistoryEntry;
use crate::types::surface::{ContentSurface, LoadStatus, SurfaceId};
use crate::types::tab::{TabState, ViewState};
use crate::types::window::{WindowBounds, WindowId};

/// Window title shown while the welcome surface is up.
pub const DEFAULT_TITLE: &str = "Chromini";

/// Trait defining the tab registry's state transitions.
pub trait TabManagerTrait {
    fn open_tab(&mut self, window: WindowId, url: &str) -> Result<SurfaceId, TabError>;
    fn open_tab_from(
        &mut self,
        window: WindowId,
        url: &str,
        opener: Option<SurfaceId>,
    ) -> Result<SurfaceId, TabError>;
    fn close_active_tab(&mut self, window: WindowId) -> Result<bool, TabError>;
    fn next_tab(&mut self, window: WindowId) -> Result<bool, TabError>;
    fn previous_tab(&mut self, window: WindowId) -> Result<bool, TabError>;
    fn activate_tab(&mut self, window: WindowId, index: usize) -> Result<bool, TabError>;
    fn activate_welcome(&mut self, window: WindowId) -> Result<(), TabError>;
    fn show_active_surface(&mut self, window: WindowId) -> Result<(), TabError>;
    fn view_state(&self, window: WindowId) -> Option<ViewState>;
    fn tab_count(&self, window: WindowId) -> usize;
}

/// What the caller still has to do after a context menu action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Handled,
    /// Open the link in a brand-new host window.
    OpenWindow(String),
}

/// A host window and the tabs it shows.
struct WindowRecord {
    backend: Box<dyn WindowBackend>,
    tabs: TabState,
    welcome: SurfaceId,
}

impl WindowRecord {
    fn visible_surface(&self) -> SurfaceId {
        self.tabs.active_surface().unwrap_or(self.welcome)
    }

    fn owned_surfaces(&self) -> impl Iterator<Item = &SurfaceId> {
        self.tabs.surfaces().iter().chain(iter::once(&self.welcome))
    }
}

/// Tab registry for every open window.
pub struct TabManager {
    factory: SurfaceFactory,
    windows: HashMap<WindowId, WindowRecord>,
    surfaces: HashMap<SurfaceId, SurfaceHandle>,
}

impl TabManager {
    pub fn new(factory: SurfaceFactory) -> Self {
        Self {
            factory,
            windows: HashMap::new(),
            surfaces: HashMap::new(),
        }
    }

    pub fn factory(&self) -> &SurfaceFactory {
        &self.factory
    }

    /// Takes ownership of a freshly created host window and gives it its
    /// welcome surface. The window starts in `Welcome`.
    pub fn register_window(
        &mut self,
        window: WindowId,
        mut backend: Box<dyn WindowBackend>,
    ) -> Result<(), TabError> {
        if self.windows.contains_key(&window) {
            return Err(TabError::WindowAlreadyRegistered(window));
        }

        let welcome = self.factory.create_welcome(window, backend.as_mut())?;
        let welcome_id = welcome.surface.id;
        self.surfaces.insert(welcome_id, welcome);
        self.windows.insert(
            window,
            WindowRecord {
                backend,
                tabs: TabState::new(),
                welcome: welcome_id,
            },
        );

        log::debug!("Registered {}", window);
        self.show_active_surface(window)
    }

    /// Forgets a window and destroys every surface it owned.
    ///
    /// Bookkeeping is updated before any teardown call is made, so a slow or
    /// hung page cannot hold up the registry. The host window itself is
    /// handed back to the caller.
    pub fn remove_window(&mut self, window: WindowId) -> Result<Box<dyn WindowBackend>, TabError> {
        let mut record = self
            .windows
            .remove(&window)
            .ok_or(TabError::WindowNotFound(window))?;

        let mut doomed = record.tabs.drain();
        doomed.push(record.welcome);
        for id in doomed {
            self.destroy_surface(id);
        }

        log::debug!("Removed {}", window);
        Ok(record.backend)
    }

    pub fn contains_window(&self, window: WindowId) -> bool {
        self.windows.contains_key(&window)
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn tab_state(&self, window: WindowId) -> Option<&TabState> {
        self.windows.get(&window).map(|r| &r.tabs)
    }

    pub fn welcome_surface(&self, window: WindowId) -> Option<SurfaceId> {
        self.windows.get(&window).map(|r| r.welcome)
    }

    /// The surface currently attached to the window.
    pub fn visible_surface(&self, window: WindowId) -> Option<SurfaceId> {
        self.windows.get(&window).map(WindowRecord::visible_surface)
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&ContentSurface> {
        self.surfaces.get(&id).map(|h| &h.surface)
    }

    /// Number of live surfaces across all windows, welcome pages included.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn window_of(&self, surface: SurfaceId) -> Option<WindowId> {
        self.surfaces.get(&surface).map(|h| h.surface.window)
    }

    pub fn window_size(&self, window: WindowId) -> Option<WindowBounds> {
        self.windows.get(&window).map(|r| r.backend.size())
    }

    /// Delivers a bridge message to one surface.
    pub fn push_to_surface(&mut self, surface: SurfaceId, push: &BridgePush) -> Result<(), TabError> {
        let handle = self
            .surfaces
            .get_mut(&surface)
            .ok_or(TabError::SurfaceNotFound(surface))?;
        let json = push.to_json();
        if !json.is_empty() {
            handle.backend.push(&json);
        }
        Ok(())
    }

    /// Re-applies the content area to every surface of the window.
    pub fn resize(&mut self, window: WindowId) -> Result<(), TabError> {
        let record = self
            .windows
            .get(&window)
            .ok_or(TabError::WindowNotFound(window))?;
        let bounds = record.backend.content_bounds();
        for id in record.owned_surfaces() {
            if let Some(handle) = self.surfaces.get_mut(id) {
                handle.backend.set_bounds(bounds);
            }
        }
        Ok(())
    }

    /// Reloads the active tab, bypassing the cache. Does nothing in
    /// `Welcome`.
    pub fn reload_active(&mut self, window: WindowId) -> Result<bool, TabError> {
        self.with_active_tab(window, |backend| backend.reload(true))
    }

    pub fn go_back(&mut self, window: WindowId) -> Result<bool, TabError> {
        self.with_active_tab(window, |backend| backend.go_back())
    }

    pub fn go_forward(&mut self, window: WindowId) -> Result<bool, TabError> {
        self.with_active_tab(window, |backend| backend.go_forward())
    }

    /// Toggles the inspector of the visible surface. The welcome page only
    /// gets one when devtools are enabled in the preferences.
    pub fn toggle_devtools(&mut self, window: WindowId) -> Result<bool, TabError> {
        let visible = self.require_visible(window)?;
        let allow_welcome = self.factory.preferences().devtools;
        match self.surfaces.get_mut(&visible) {
            Some(handle) if !handle.surface.is_welcome() || allow_welcome => {
                handle.backend.toggle_devtools();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn toggle_fullscreen(&mut self, window: WindowId) -> Result<bool, TabError> {
        let record = self
            .windows
            .get_mut(&window)
            .ok_or(TabError::WindowNotFound(window))?;
        let fullscreen = !record.backend.is_fullscreen();
        record.backend.set_fullscreen(fullscreen);
        Ok(fullscreen)
    }

    // ─── Surface events ───

    /// A surface started loading `url`. Re-arms the history record.
    pub fn on_navigation_started(&mut self, surface: SurfaceId, url: &str) {
        let Some(handle) = self.surfaces.get_mut(&surface) else {
            log::debug!("Ignoring navigation start of destroyed {}", surface);
            return;
        };
        handle.surface.url = url.to_string();
        handle.surface.status = LoadStatus::Loading;
        handle.surface.history_recorded = false;
    }

    /// A surface's page title changed. Only the active surface drives the
    /// window title.
    pub fn on_title_changed(&mut self, surface: SurfaceId, title: &str) {
        let Some(handle) = self.surfaces.get_mut(&surface) else {
            log::debug!("Ignoring title change of destroyed {}", surface);
            return;
        };
        handle.surface.title = title.to_string();

        let window = handle.surface.window;
        if let Some(record) = self.windows.get_mut(&window) {
            if record.tabs.active_surface() == Some(surface) {
                record.backend.set_title(window_title(title));
            }
        }
    }

    /// A surface finished loading. The first completion of each navigation
    /// of a page surface is written to history; redirects and repeated
    /// completions are not.
    pub fn on_load_finished(
        &mut self,
        surface: SurfaceId,
        url: &str,
        history: &mut dyn HistoryManagerTrait,
    ) {
        let Some(handle) = self.surfaces.get_mut(&surface) else {
            log::debug!("Ignoring load completion of destroyed {}", surface);
            return;
        };
        handle.surface.url = url.to_string();
        handle.surface.status = LoadStatus::Loaded;

        if handle.surface.is_welcome() || handle.surface.history_recorded {
            return;
        }
        handle.surface.history_recorded = true;

        let title = if handle.surface.title.is_empty() {
            url
        } else {
            handle.surface.title.as_str()
        };
        if let Err(e) = history.record(HistoryEntry::new(url, title)) {
            log::error!("Failed to record {} in history: {}", url, e);
        }
    }

    /// A page asked for a new window (`window.open`, `target="_blank"`).
    ///
    /// Never creates a host window: the surface's link policy either sends
    /// the URL to the OS or opens it as a tab right after the requester.
    /// Returns the new tab, if one was opened.
    pub fn on_new_window_request(
        &mut self,
        surface: SurfaceId,
        url: &str,
        host: &mut dyn WindowHost,
    ) -> Result<Option<SurfaceId>, TabError> {
        let Some(handle) = self.surfaces.get(&surface) else {
            log::debug!("Ignoring new-window request of destroyed {}", surface);
            return Ok(None);
        };
        let window = handle.surface.window;

        match handle.link_policy.resolve(url) {
            LinkDisposition::OpenExternal => {
                log::info!("Opening {} externally", url);
                host.open_external(url)?;
                Ok(None)
            }
            LinkDisposition::OpenTab => self.open_tab_from(window, url, Some(surface)).map(Some),
        }
    }

    /// Menu items for a right click on `surface`.
    pub fn context_menu(
        &self,
        surface: SurfaceId,
        params: &ContextParams,
    ) -> Result<Vec<ContextMenuItem>, TabError> {
        let handle = self
            .surfaces
            .get(&surface)
            .ok_or(TabError::SurfaceNotFound(surface))?;
        Ok(build_menu(
            params,
            handle.backend.can_go_back(),
            handle.backend.can_go_forward(),
        ))
    }

    /// Runs a context menu action against the surface it was opened on.
    pub fn on_context_menu_action(
        &mut self,
        surface: SurfaceId,
        action: MenuAction,
        params: &ContextParams,
    ) -> Result<MenuOutcome, TabError> {
        let handle = self
            .surfaces
            .get_mut(&surface)
            .ok_or(TabError::SurfaceNotFound(surface))?;
        let window = handle.surface.window;

        match action {
            MenuAction::Back => handle.backend.go_back(),
            MenuAction::Forward => handle.backend.go_forward(),
            MenuAction::Reload => handle.backend.reload(false),
            MenuAction::Cut => handle.backend.edit(EditCommand::Cut),
            MenuAction::Copy => handle.backend.edit(EditCommand::Copy),
            MenuAction::Paste => handle.backend.edit(EditCommand::Paste),
            MenuAction::InspectElement => handle.backend.inspect_element(params.x, params.y),
            MenuAction::OpenLinkInNewTab => {
                if let Some(link) = params.link() {
                    self.open_tab_from(window, link, Some(surface))?;
                }
            }
            MenuAction::OpenLinkInNewWindow => {
                if let Some(link) = params.link() {
                    return Ok(MenuOutcome::OpenWindow(link.to_string()));
                }
            }
        }
        Ok(MenuOutcome::Handled)
    }

    fn require_visible(&self, window: WindowId) -> Result<SurfaceId, TabError> {
        self.visible_surface(window)
            .ok_or(TabError::WindowNotFound(window))
    }

    /// Runs `f` on the active tab's backend; `false` when in `Welcome`.
    fn with_active_tab(
        &mut self,
        window: WindowId,
        f: impl FnOnce(&mut dyn SurfaceBackend),
    ) -> Result<bool, TabError> {
        let record = self
            .windows
            .get(&window)
            .ok_or(TabError::WindowNotFound(window))?;
        let Some(active) = record.tabs.active_surface() else {
            return Ok(false);
        };
        match self.surfaces.get_mut(&active) {
            Some(handle) => {
                f(handle.backend.as_mut());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops a surface from the registry and asks the host to tear it down.
    fn destroy_surface(&mut self, id: SurfaceId) {
        if let Some(handle) = self.surfaces.remove(&id) {
            handle.backend.destroy();
            log::debug!("Destroyed {}", id);
        }
    }

    fn record_mut(&mut self, window: WindowId) -> Result<&mut WindowRecord, TabError> {
        self.windows
            .get_mut(&window)
            .ok_or(TabError::WindowNotFound(window))
    }
}

impl TabManagerTrait for TabManager {
    /// Opens `url` as a new tab right after the active one and shows it.
    fn open_tab(&mut self, window: WindowId, url: &str) -> Result<SurfaceId, TabError> {
        self.open_tab_from(window, url, None)
    }

    /// Opens `url` as a new tab right after `opener` (falling back to the
    /// active tab) and shows it.
    fn open_tab_from(
        &mut self,
        window: WindowId,
        url: &str,
        opener: Option<SurfaceId>,
    ) -> Result<SurfaceId, TabError> {
        let record = self
            .windows
            .get_mut(&window)
            .ok_or(TabError::WindowNotFound(window))?;

        let handle = self.factory.create(window, record.backend.as_mut(), url)?;
        let id = handle.surface.id;
        let index = record.tabs.insert(id, opener);
        self.surfaces.insert(id, handle);

        log::debug!("{}: opened {} at {} for {}", window, id, index, url);
        self.show_active_surface(window)?;
        Ok(id)
    }

    /// Closes the active tab. With nothing active this is a no-op and
    /// returns `false`.
    fn close_active_tab(&mut self, window: WindowId) -> Result<bool, TabError> {
        let Some(removed) = self.record_mut(window)?.tabs.remove_active() else {
            return Ok(false);
        };
        self.destroy_surface(removed);

        log::debug!("{}: closed {}", window, removed);
        self.show_active_surface(window)?;
        Ok(true)
    }

    fn next_tab(&mut self, window: WindowId) -> Result<bool, TabError> {
        let changed = self.record_mut(window)?.tabs.select_next();
        if changed {
            self.show_active_surface(window)?;
        }
        Ok(changed)
    }

    fn previous_tab(&mut self, window: WindowId) -> Result<bool, TabError> {
        let changed = self.record_mut(window)?.tabs.select_previous();
        if changed {
            self.show_active_surface(window)?;
        }
        Ok(changed)
    }

    fn activate_tab(&mut self, window: WindowId, index: usize) -> Result<bool, TabError> {
        let changed = self.record_mut(window)?.tabs.select(index);
        if changed {
            self.show_active_surface(window)?;
        }
        Ok(changed)
    }

    /// Shows the welcome surface and tells it to reload its history list.
    fn activate_welcome(&mut self, window: WindowId) -> Result<(), TabError> {
        let record = self.record_mut(window)?;
        record.tabs.select_welcome();
        let welcome = record.welcome;

        self.show_active_surface(window)?;
        self.push_to_surface(welcome, &BridgePush::RefreshHistory)
    }

    /// Attaches the surface the window's state calls for and hides the
    /// rest. Safe to call any number of times.
    fn show_active_surface(&mut self, window: WindowId) -> Result<(), TabError> {
        let record = self
            .windows
            .get_mut(&window)
            .ok_or(TabError::WindowNotFound(window))?;

        let bounds = record.backend.content_bounds();
        let visible = record.visible_surface();
        let mut title = DEFAULT_TITLE.to_string();

        for id in record.owned_surfaces() {
            let Some(handle) = self.surfaces.get_mut(id) else {
                continue;
            };
            if *id == visible {
                handle.backend.set_bounds(bounds);
                handle.backend.set_visible(true);
                if !handle.surface.is_welcome() {
                    title = window_title(&handle.surface.title).to_string();
                }
            } else {
                handle.backend.set_visible(false);
            }
        }
        record.backend.set_title(&title);

        log::debug!("{}: showing {:?}", window, record.tabs.view_state());
        Ok(())
    }

    fn view_state(&self, window: WindowId) -> Option<ViewState> {
        self.windows.get(&window).map(|r| r.tabs.view_state())
    }

    fn tab_count(&self, window: WindowId) -> usize {
        self.windows.get(&window).map_or(0, |r| r.tabs.len())
    }
}

fn window_title(page_title: &str) -> &str {
    if page_title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        page_title
    }
}
