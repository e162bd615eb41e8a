use serde::{Deserialize, Serialize};

use super::surface::SurfaceId;

/// What a window is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    /// No tab is active; the welcome surface is visible.
    Welcome,
    /// The tab at this position in the window's tab order is visible.
    Tab(usize),
}

/// Where focus goes when a freshly opened tab is closed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReturnTarget {
    Welcome,
    Surface(SurfaceId),
}

/// Ordered tabs of one window plus the active pointer.
///
/// Invariant: `active` is `None` or a valid index into `surfaces`, and it is
/// always `None` when `surfaces` is empty. Only the tab manager mutates this.
#[derive(Debug, Clone, Default)]
pub struct TabState {
    surfaces: Vec<SurfaceId>,
    active: Option<usize>,
    /// The tab opened last, and what was active before it was opened.
    opened_from: Option<(SurfaceId, ReturnTarget)>,
}

impl TabState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tabs in display order.
    pub fn surfaces(&self) -> &[SurfaceId] {
        &self.surfaces
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn view_state(&self) -> ViewState {
        match self.active {
            Some(index) => ViewState::Tab(index),
            None => ViewState::Welcome,
        }
    }

    /// Active position, with `-1` standing for the welcome surface.
    pub fn active_index(&self) -> isize {
        self.active.map_or(-1, |index| index as isize)
    }

    pub fn active_surface(&self) -> Option<SurfaceId> {
        self.active.and_then(|index| self.surfaces.get(index).copied())
    }

    pub fn position(&self, id: SurfaceId) -> Option<usize> {
        self.surfaces.iter().position(|s| *s == id)
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.position(id).is_some()
    }

    /// Inserts `id` right after `opener` (or after the active tab, or at the
    /// front when nothing is active) and makes it active.
    pub(crate) fn insert(&mut self, id: SurfaceId, opener: Option<SurfaceId>) -> usize {
        let anchor = opener.and_then(|o| self.position(o)).or(self.active);
        let index = anchor.map_or(0, |i| i + 1);
        let previous = match self.active_surface() {
            Some(surface) => ReturnTarget::Surface(surface),
            None => ReturnTarget::Welcome,
        };

        self.surfaces.insert(index, id);
        self.active = Some(index);
        self.opened_from = Some((id, previous));
        index
    }

    /// Removes the active tab and picks the next active position.
    ///
    /// A tab closed right after being opened hands focus back to whatever
    /// was active before it. Otherwise the index is clamped to the last tab.
    pub(crate) fn remove_active(&mut self) -> Option<SurfaceId> {
        let index = self.active?;
        let removed = self.surfaces.remove(index);
        let opened_from = self.opened_from.take();

        if self.surfaces.is_empty() {
            self.active = None;
            return Some(removed);
        }

        let clamped = index.min(self.surfaces.len() - 1);
        self.active = match opened_from {
            Some((opened, ReturnTarget::Welcome)) if opened == removed => None,
            Some((opened, ReturnTarget::Surface(previous))) if opened == removed => {
                Some(self.position(previous).unwrap_or(clamped))
            }
            _ => Some(clamped),
        };
        Some(removed)
    }

    /// Rotates forward. With fewer than two tabs nothing changes, even in
    /// `Welcome`. Returns `false` when nothing changed.
    pub(crate) fn select_next(&mut self) -> bool {
        let len = self.surfaces.len();
        if len <= 1 {
            return false;
        }
        let next = match self.active {
            Some(index) => (index + 1) % len,
            None => 0,
        };
        self.set_active(Some(next))
    }

    /// Rotates backward. Same rules as [`TabState::select_next`].
    pub(crate) fn select_previous(&mut self) -> bool {
        let len = self.surfaces.len();
        if len <= 1 {
            return false;
        }
        let previous = match self.active {
            Some(index) => (index + len - 1) % len,
            None => len - 1,
        };
        self.set_active(Some(previous))
    }

    /// Activates the tab at `index`. Out-of-range indices are ignored.
    pub(crate) fn select(&mut self, index: usize) -> bool {
        if index >= self.surfaces.len() {
            return false;
        }
        self.set_active(Some(index))
    }

    pub(crate) fn select_welcome(&mut self) -> bool {
        self.set_active(None)
    }

    /// Empties the tab list, returning every surface it held.
    pub(crate) fn drain(&mut self) -> Vec<SurfaceId> {
        self.active = None;
        self.opened_from = None;
        std::mem::take(&mut self.surfaces)
    }

    fn set_active(&mut self, active: Option<usize>) -> bool {
        self.opened_from = None;
        if self.active == active {
            return false;
        }
        self.active = active;
        true
    }
}
