//! Platform-specific paths and tool names
//!
//! - Application data (preferences database)
//! - Default save directory
//! - Managed yt-dlp install location and release asset names

use std::path::PathBuf;
use tracing::warn;

/// Returns the application data directory
/// - macOS: ~/Library/Application Support/Quickrip
/// - Windows: %APPDATA%\Quickrip
/// - Linux: ~/.local/share/quickrip
pub fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."));

    if cfg!(target_os = "linux") {
        base.join("quickrip")
    } else {
        base.join("Quickrip")
    }
}

/// Returns the default save directory: the platform Downloads folder
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using the current directory");
            PathBuf::from(".")
        })
}

/// Directory that holds the managed yt-dlp binary.
///
/// The installer drops yt-dlp next to the running executable, so that is the
/// default. Falls back to the data directory when the executable path is unknown.
pub fn default_tools_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| app_data_dir().join("bin"))
}

/// File name of the yt-dlp executable on this platform
pub fn ytdlp_binary_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

/// Release asset to fetch for an operating system name (as in `std::env::consts::OS`)
pub fn ytdlp_release_asset(os: &str) -> Option<&'static str> {
    match os {
        "windows" => Some("yt-dlp.exe"),
        "macos" => Some("yt-dlp_macos"),
        "linux" => Some("yt-dlp"),
        _ => None,
    }
}
