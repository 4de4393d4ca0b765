//! Application configuration

use crate::utils::platform;
use std::path::PathBuf;

/// Where Quickrip keeps its files
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the preferences database
    pub data_dir: PathBuf,

    /// Directory the yt-dlp installer writes into
    pub tools_dir: PathBuf,

    /// Save directory used when no `savePath` preference is set
    pub default_save_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: platform::app_data_dir(),
            tools_dir: platform::default_tools_dir(),
            default_save_dir: platform::default_download_dir(),
        }
    }
}

impl AppConfig {
    /// Build a config from defaults, replacing any directory given explicitly
    pub fn resolve(data_dir: Option<PathBuf>, tools_dir: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: data_dir.unwrap_or(defaults.data_dir),
            tools_dir: tools_dir.unwrap_or(defaults.tools_dir),
            default_save_dir: defaults.default_save_dir,
        }
    }

    /// Path of the preferences database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("quickrip.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_overrides() {
        let config = AppConfig::resolve(Some(PathBuf::from("/tmp/qr-data")), None);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/qr-data"));
        assert_eq!(config.tools_dir, AppConfig::default().tools_dir);
    }

    #[test]
    fn test_resolve_without_overrides_is_default() {
        assert_eq!(AppConfig::resolve(None, None), AppConfig::default());
    }

    #[test]
    fn test_database_path_lives_in_data_dir() {
        let config = AppConfig::resolve(Some(PathBuf::from("/tmp/qr-data")), None);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/qr-data/quickrip.db"));
    }
}
