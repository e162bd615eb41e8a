//! Global key chords through `global-hotkey`.

use std::collections::HashMap;
use std::thread;

use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tao::event_loop::EventLoopProxy;

use super::webview_app::UserEvent;
use crate::host::ShortcutRegistrar;
use crate::types::errors::ShortcutError;

/// OS-level registrar. Presses are forwarded to the event loop as
/// `UserEvent::Hotkey` carrying the hotkey id.
pub struct GlobalHotkeys {
    manager: GlobalHotKeyManager,
    registered: HashMap<u32, (HotKey, String)>,
    _listener_thread: thread::JoinHandle<()>,
}

impl GlobalHotkeys {
    pub fn new(proxy: EventLoopProxy<UserEvent>) -> Result<Self, ShortcutError> {
        let manager = GlobalHotKeyManager::new().map_err(|e| ShortcutError::Registration {
            keys: String::new(),
            reason: format!("failed to create hotkey manager: {e}"),
        })?;

        let listener_thread = thread::spawn(move || {
            let receiver = GlobalHotKeyEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if event.state != HotKeyState::Pressed {
                    continue;
                }
                if proxy.send_event(UserEvent::Hotkey(event.id)).is_err() {
                    break; // Event loop closed
                }
            }
        });

        Ok(Self {
            manager,
            registered: HashMap::new(),
            _listener_thread: listener_thread,
        })
    }

    /// The chord string a hotkey id was registered from.
    pub fn chord_for(&self, id: u32) -> Option<&str> {
        self.registered.get(&id).map(|(_, keys)| keys.as_str())
    }
}

/// Parses a chord the way `global-hotkey` does, without registering it.
pub fn parse_chord(keys: &str) -> Result<HotKey, ShortcutError> {
    keys.parse()
        .map_err(|e: global_hotkey::hotkey::HotKeyParseError| {
            ShortcutError::InvalidKeys(format!("'{keys}': {e}"))
        })
}

impl ShortcutRegistrar for GlobalHotkeys {
    fn unregister_all(&mut self) {
        let hotkeys: Vec<HotKey> = self.registered.drain().map(|(_, (hotkey, _))| hotkey).collect();
        if hotkeys.is_empty() {
            return;
        }
        if let Err(e) = self.manager.unregister_all(&hotkeys) {
            log::warn!("Failed to unregister global shortcuts: {e}");
        }
    }

    fn register(&mut self, keys: &str) -> Result<(), ShortcutError> {
        let hotkey = parse_chord(keys)?;
        let id = hotkey.id();
        self.manager
            .register(hotkey.clone())
            .map_err(|e| ShortcutError::Registration {
                keys: keys.to_string(),
                reason: e.to_string(),
            })?;
        self.registered.insert(id, (hotkey, keys.to_string()));
        Ok(())
    }
}
