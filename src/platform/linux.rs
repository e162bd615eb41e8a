// Chromini platform paths for Linux
// Config: ~/.config/chromini
// Cache:  ~/.cache/chromini

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "chromini";

fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
        _ => {
            let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
            fallback
                .iter()
                .fold(PathBuf::from(home), |path, part| path.join(part))
                .join(APP_DIR)
        }
    }
}

/// Uses `$XDG_CONFIG_HOME/chromini` if set, otherwise `~/.config/chromini`.
pub fn get_config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

/// Uses `$XDG_CACHE_HOME/chromini` if set, otherwise `~/.cache/chromini`.
pub fn get_cache_dir() -> PathBuf {
    xdg_dir("XDG_CACHE_HOME", &[".cache"])
}
