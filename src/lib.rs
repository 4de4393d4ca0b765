//! Quickrip library: a yt-dlp front end with a first-run wizard and a download queue

pub mod app;
pub mod arguments;
pub mod backend;
pub mod database;
pub mod gui;
pub mod onboarding;
pub mod preferences;
pub mod queue;
pub mod utils;

// Re-export main types for easier use
pub use arguments::{ArgumentField, ArgumentUpdate, DownloadArguments, DownloadArgumentsModel};
pub use backend::{Backend, DownloadRequest, YtDlpBackend};
pub use gui::{AppFlags, Message, QuickripApp, View};
pub use onboarding::{InstallOutcome, NextAction, Onboarding, Slide};
pub use preferences::{PreferenceKey, PreferenceStore, DOWNLOAD_ARGUMENTS, ONBOARDING_DONE};
pub use queue::{DownloadItem, DownloadQueue, DownloadStatus, QueueUpdate};
pub use utils::{AppConfig, Notice, QuickripError};
