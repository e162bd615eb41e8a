use serde::{Deserialize, Serialize};

/// A recently visited page, as shown on the welcome page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub favicon: String,
}

impl HistoryEntry {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            favicon: String::new(),
        }
    }
}
