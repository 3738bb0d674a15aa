// linkboard platform paths for Windows
// Config: %APPDATA%/Linkboard
// Data:   %APPDATA%/Linkboard

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for linkboard on Windows.
/// `%APPDATA%/Linkboard`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("Linkboard")
}

/// Returns the data directory for linkboard on Windows.
/// `%APPDATA%/Linkboard`
pub fn get_data_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("Linkboard")
}
