//! Shortcut Manager for Chromini.
//!
//! The fixed chord → command table, adapted to the platform's modifiers and
//! pushed to the OS through a [`ShortcutRegistrar`].

use std::collections::HashMap;

use crate::host::ShortcutRegistrar;
use crate::types::errors::ShortcutError;
use crate::types::shortcut::Command;

/// Trait defining shortcut lookup and registration.
pub trait ShortcutManagerTrait {
    fn command_for(&self, keys: &str) -> Option<Command>;
    fn bindings(&self) -> Vec<(&str, Command)>;
    fn register_all(&self, registrar: &mut dyn ShortcutRegistrar) -> usize;
}

/// The built-in chord table.
pub fn default_bindings() -> Vec<(&'static str, Command)> {
    vec![
        ("F1", Command::NewWindow),
        ("CmdOrCtrl+N", Command::NewWindow),
        ("Alt+Home", Command::ShowWelcome),
        ("F2", Command::PreviousTab),
        ("F3", Command::NextTab),
        ("F4", Command::CloseTab),
        ("F5", Command::Reload),
        ("CmdOrCtrl+R", Command::Reload),
        ("F11", Command::ToggleFullscreen),
        ("F12", Command::ToggleDevTools),
        ("CmdOrCtrl+Shift+I", Command::ToggleDevTools),
        ("CmdOrCtrl+[", Command::Back),
        ("Alt+Left", Command::Back),
        ("CmdOrCtrl+]", Command::Forward),
        ("Alt+Right", Command::Forward),
    ]
}

/// The chord table, adapted to the platform's modifiers.
pub struct ShortcutManager {
    shortcuts: HashMap<String, Command>,
}

impl ShortcutManager {
    /// Builds the table from [`default_bindings`].
    pub fn new() -> Self {
        Self::from_bindings(default_bindings()).unwrap_or_else(|e| {
            log::error!("Built-in shortcut table is inconsistent: {}", e);
            Self {
                shortcuts: HashMap::new(),
            }
        })
    }

    /// Builds a table, rejecting malformed chords and chords bound twice.
    pub fn from_bindings<'a>(
        bindings: impl IntoIterator<Item = (&'a str, Command)>,
    ) -> Result<Self, ShortcutError> {
        let mut manager = Self {
            shortcuts: HashMap::new(),
        };
        for (keys, command) in bindings {
            manager.bind(keys, command)?;
        }
        Ok(manager)
    }

    /// Resolves `CmdOrCtrl` to the platform's primary modifier.
    pub fn adapt_for_platform(keys: &str) -> String {
        let primary = if cfg!(target_os = "macos") { "Cmd+" } else { "Ctrl+" };
        keys.trim().replace("CmdOrCtrl+", primary)
    }

    fn bind(&mut self, keys: &str, command: Command) -> Result<(), ShortcutError> {
        if keys.trim().is_empty() || keys.trim().ends_with('+') {
            return Err(ShortcutError::InvalidKeys(format!("'{}' is not a key chord", keys)));
        }
        if let Some(existing) = self.command_for(keys) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys, existing
            )));
        }

        self.shortcuts.insert(Self::adapt_for_platform(keys), command);
        Ok(())
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    /// Case-insensitive lookup; `CmdOrCtrl` chords match their adapted form.
    fn command_for(&self, keys: &str) -> Option<Command> {
        let wanted = Self::adapt_for_platform(keys).to_ascii_lowercase();
        self.shortcuts
            .iter()
            .find(|(bound, _)| bound.to_ascii_lowercase() == wanted)
            .map(|(_, command)| *command)
    }

    /// All bindings, sorted by chord.
    fn bindings(&self) -> Vec<(&str, Command)> {
        let mut all: Vec<(&str, Command)> = self
            .shortcuts
            .iter()
            .map(|(keys, command)| (keys.as_str(), *command))
            .collect();
        all.sort_unstable_by(|a, b| a.0.cmp(b.0));
        all
    }

    /// Replaces whatever the registrar currently holds with this table.
    ///
    /// Previous registrations are cleared first so no chord fires twice.
    /// A chord the OS refuses is logged and skipped. Returns how many chords
    /// were registered.
    fn register_all(&self, registrar: &mut dyn ShortcutRegistrar) -> usize {
        registrar.unregister_all();

        let mut registered = 0;
        for (keys, command) in self.bindings() {
            match registrar.register(keys) {
                Ok(()) => registered += 1,
                Err(e) => log::warn!("Skipping shortcut {} for {}: {}", keys, command, e),
            }
        }
        log::info!("Registered {} global shortcuts", registered);
        registered
    }
}
