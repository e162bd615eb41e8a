// Chromini Config Store
// Reads and writes the persisted document (window geometry + history) as a whole.
// The document is stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::types::config::PersistedConfig;
use crate::types::errors::ConfigError;

/// Trait defining the config store interface.
pub trait ConfigStoreTrait {
    fn load(&self) -> Result<PersistedConfig, ConfigError>;
    fn load_or_default(&self) -> PersistedConfig;
    fn save(&self, config: &PersistedConfig) -> Result<(), ConfigError>;
    fn update(&self, change: &mut dyn FnMut(&mut PersistedConfig)) -> Result<PersistedConfig, ConfigError>;
    fn get_config_path(&self) -> &Path;
}

/// Config store that persists the whole document as JSON on disk.
///
/// Holds no cached state: every operation goes to the file, so clones
/// handed to different managers always agree.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Creates a new ConfigStore.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `config.json`.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path = path_override.unwrap_or_else(platform::get_config_file);
        Self { config_path }
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl ConfigStoreTrait for ConfigStore {
    /// Loads the document from disk.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    fn load(&self) -> Result<PersistedConfig, ConfigError> {
        let path = self.config_path.as_path();
        if !path.exists() {
            return Ok(PersistedConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| self.io_error(path, e))?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads the document, falling back to defaults when it cannot be read.
    fn load_or_default(&self) -> PersistedConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to read or parse config file, using defaults: {}", e);
                PersistedConfig::default()
            }
        }
    }

    /// Writes the whole document, replacing the previous file.
    ///
    /// The JSON goes to a sibling temp file first and is then renamed over
    /// the config file, so readers never see a half-written document.
    fn save(&self, config: &PersistedConfig) -> Result<(), ConfigError> {
        let path = self.config_path.as_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }

        let json = serde_json::to_string_pretty(config)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| self.io_error(path, e))?;
        Ok(())
    }

    /// Read-modify-write of the whole document. Returns what was written.
    fn update(&self, change: &mut dyn FnMut(&mut PersistedConfig)) -> Result<PersistedConfig, ConfigError> {
        let mut config = self.load_or_default();
        change(&mut config);
        self.save(&config)?;
        Ok(config)
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
