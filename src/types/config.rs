use serde::{Deserialize, Serialize};

use super::history::HistoryEntry;
use super::window::WindowBounds;

/// The document persisted to `config.json`.
///
/// Missing fields fall back to their defaults so older files still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedConfig {
    pub window_bounds: WindowBounds,
    pub history: Vec<HistoryEntry>,
}

/// Options applied to every content surface a window creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPreferences {
    /// Keep page scripts apart from the host bridge.
    pub context_isolation: bool,
    /// Same-origin enforcement. Turning it off lets some third-party sites
    /// work at the cost of weaker isolation between origins.
    pub web_security: bool,
    /// Named storage partition kept across restarts; `None` means an
    /// ephemeral, in-memory session.
    pub persistent_partition: Option<String>,
    /// Inspector on the welcome page. Regular pages always have one.
    pub devtools: bool,
}

impl Default for WebPreferences {
    fn default() -> Self {
        Self {
            context_isolation: true,
            web_security: true,
            persistent_partition: Some("persist:main".to_string()),
            devtools: cfg!(debug_assertions),
        }
    }
}

impl WebPreferences {
    /// Directory-safe name of the persistent partition, if any.
    pub fn partition_dir_name(&self) -> Option<String> {
        self.persistent_partition.as_deref().map(|name| {
            name.trim_start_matches("persist:")
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                .collect()
        })
    }
}
