//! Error handling for Quickrip

use thiserror::Error;

/// Main error type for Quickrip
#[derive(Debug, Error)]
pub enum QuickripError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to install yt-dlp: {0}")]
    InstallFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, QuickripError>;
