// Chromini platform paths for macOS
// Config: ~/Library/Application Support/Chromini
// Cache:  ~/Library/Caches/Chromini

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Application Support/Chromini`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("Chromini")
}

/// `~/Library/Caches/Chromini`
pub fn get_cache_dir() -> PathBuf {
    home_dir().join("Library").join("Caches").join("Chromini")
}
