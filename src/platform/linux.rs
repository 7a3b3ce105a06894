// Markstash platform paths for Linux
// Config: ~/.config/markstash
// Data:   ~/.local/share/markstash

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for Markstash on Linux.
/// Uses `$XDG_CONFIG_HOME/markstash` if set, otherwise `~/.config/markstash`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("markstash")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("markstash")
    }
}

/// Returns the data directory for Markstash on Linux.
/// Uses `$XDG_DATA_HOME/markstash` if set, otherwise `~/.local/share/markstash`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("markstash")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("markstash")
    }
}
