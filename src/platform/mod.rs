// Chromini platform paths
// Exactly one of the per-OS files is compiled in as `os`.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
#[path = "linux.rs"]
mod os;

#[cfg(target_os = "macos")]
#[path = "macos.rs"]
mod os;

#[cfg(target_os = "windows")]
#[path = "windows.rs"]
mod os;

/// File name of the persisted config document.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Where Chromini keeps `config.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/chromini`, else `~/.config/chromini`
/// - **macOS**: `~/Library/Application Support/Chromini`
/// - **Windows**: `%APPDATA%/Chromini`
pub fn get_config_dir() -> PathBuf {
    os::get_config_dir()
}

/// Where storage partitions of the content surfaces live.
///
/// - **Linux**: `$XDG_CACHE_HOME/chromini`, else `~/.cache/chromini`
/// - **macOS**: `~/Library/Caches/Chromini`
/// - **Windows**: `%LOCALAPPDATA%/Chromini/cache`
pub fn get_cache_dir() -> PathBuf {
    os::get_cache_dir()
}

/// Full path of the persisted config document.
pub fn get_config_file() -> PathBuf {
    get_config_dir().join(CONFIG_FILE_NAME)
}

/// Directory holding the named storage partition.
pub fn get_partition_dir(name: &str) -> PathBuf {
    get_cache_dir().join("partitions").join(name)
}
