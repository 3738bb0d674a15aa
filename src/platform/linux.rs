// linkboard platform paths for Linux
// Config: ~/.config/linkboard
// Data:   ~/.local/share/linkboard

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for linkboard on Linux.
/// Uses `$XDG_CONFIG_HOME/linkboard` if set, otherwise `~/.config/linkboard`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("linkboard")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("linkboard")
    }
}

/// Returns the data directory for linkboard on Linux.
/// Uses `$XDG_DATA_HOME/linkboard` if set, otherwise `~/.local/share/linkboard`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("linkboard")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("linkboard")
    }
}
