// Chromini platform paths for Windows
// Config: %APPDATA%/Chromini
// Cache:  %LOCALAPPDATA%/Chromini/cache

use std::env;
use std::path::PathBuf;

/// `%APPDATA%/Chromini`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("Chromini")
}

/// `%LOCALAPPDATA%/Chromini/cache`
pub fn get_cache_dir() -> PathBuf {
    let local_appdata = env::var("LOCALAPPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local"));
    PathBuf::from(local_appdata).join("Chromini").join("cache")
}
