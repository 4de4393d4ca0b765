//! Utility modules for errors, configuration and platform integration

pub mod config;
pub mod error;
pub mod notice;
pub mod picker;
pub mod platform;

// Re-export for convenience
pub use config::AppConfig;
pub use error::{QuickripError, Result};
pub use notice::{Notice, NoticeLevel};
pub use picker::{NativePicker, PathPicker, PickRequest};
