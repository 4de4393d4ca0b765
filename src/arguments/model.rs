//! Download arguments: the typed preference bundle forwarded to yt-dlp

use crate::preferences::{PreferenceStore, DOWNLOAD_ARGUMENTS};
use crate::utils::{QuickripError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Options for a download. Every field is optional; absent means "backend default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadArguments {
    // App-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmpeg_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yt_dlp_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,

    // Audio extraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convert_to_audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<String>,
    /// 0 (best) to 9 (worst); not enforced here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_quality: Option<String>,
}

impl DownloadArguments {
    /// Copy with blank strings treated as absent
    pub fn normalized(&self) -> Self {
        fn keep(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            ffmpeg_location: keep(&self.ffmpeg_location),
            yt_dlp_location: keep(&self.yt_dlp_location),
            cookies: keep(&self.cookies),
            save_path: keep(&self.save_path),
            convert_to_audio: self.convert_to_audio,
            audio_format: keep(&self.audio_format),
            audio_quality: keep(&self.audio_quality),
        }
    }

    pub fn apply(&mut self, update: ArgumentUpdate) {
        match update {
            ArgumentUpdate::FfmpegLocation(v) => self.ffmpeg_location = v,
            ArgumentUpdate::YtDlpLocation(v) => self.yt_dlp_location = v,
            ArgumentUpdate::Cookies(v) => self.cookies = v,
            ArgumentUpdate::SavePath(v) => self.save_path = v,
            ArgumentUpdate::ConvertToAudio(v) => self.convert_to_audio = v,
            ArgumentUpdate::AudioFormat(v) => self.audio_format = v,
            ArgumentUpdate::AudioQuality(v) => self.audio_quality = v,
        }
    }
}

/// Names of the `DownloadArguments` fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentField {
    FfmpegLocation,
    YtDlpLocation,
    Cookies,
    SavePath,
    ConvertToAudio,
    AudioFormat,
    AudioQuality,
}

impl ArgumentField {
    pub const ALL: [ArgumentField; 7] = [
        ArgumentField::FfmpegLocation,
        ArgumentField::YtDlpLocation,
        ArgumentField::Cookies,
        ArgumentField::SavePath,
        ArgumentField::ConvertToAudio,
        ArgumentField::AudioFormat,
        ArgumentField::AudioQuality,
    ];

    /// Stored (camelCase) name
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentField::FfmpegLocation => "ffmpegLocation",
            ArgumentField::YtDlpLocation => "ytDlpLocation",
            ArgumentField::Cookies => "cookies",
            ArgumentField::SavePath => "savePath",
            ArgumentField::ConvertToAudio => "convertToAudio",
            ArgumentField::AudioFormat => "audioFormat",
            ArgumentField::AudioQuality => "audioQuality",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ArgumentField::FfmpegLocation => "FFmpeg Location",
            ArgumentField::YtDlpLocation => "YT-DLP Location",
            ArgumentField::Cookies => "Cookies File",
            ArgumentField::SavePath => "Save Path",
            ArgumentField::ConvertToAudio => "Convert to Audio",
            ArgumentField::AudioFormat => "Audio Format",
            ArgumentField::AudioQuality => "Audio Quality",
        }
    }

    /// Fields that hold a filesystem path and can be filled from a picker
    pub fn is_path(&self) -> bool {
        matches!(
            self,
            ArgumentField::FfmpegLocation
                | ArgumentField::YtDlpLocation
                | ArgumentField::Cookies
                | ArgumentField::SavePath
        )
    }

    /// Build an update from text, e.g. a CLI argument
    pub fn update_from_str(&self, raw: &str) -> Result<ArgumentUpdate> {
        let text = Some(raw.to_string());
        let update = match self {
            ArgumentField::FfmpegLocation => ArgumentUpdate::FfmpegLocation(text),
            ArgumentField::YtDlpLocation => ArgumentUpdate::YtDlpLocation(text),
            ArgumentField::Cookies => ArgumentUpdate::Cookies(text),
            ArgumentField::SavePath => ArgumentUpdate::SavePath(text),
            ArgumentField::AudioFormat => ArgumentUpdate::AudioFormat(text),
            ArgumentField::AudioQuality => ArgumentUpdate::AudioQuality(text),
            ArgumentField::ConvertToAudio => {
                let flag = match raw.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "1" | "on" => true,
                    "false" | "no" | "0" | "off" => false,
                    other => {
                        return Err(QuickripError::InvalidArgument(format!(
                            "convertToAudio expects true or false, got '{}'",
                            other
                        )))
                    }
                };
                ArgumentUpdate::ConvertToAudio(Some(flag))
            }
        };
        Ok(update)
    }

    /// Update that removes this field
    pub fn cleared(&self) -> ArgumentUpdate {
        match self {
            ArgumentField::FfmpegLocation => ArgumentUpdate::FfmpegLocation(None),
            ArgumentField::YtDlpLocation => ArgumentUpdate::YtDlpLocation(None),
            ArgumentField::Cookies => ArgumentUpdate::Cookies(None),
            ArgumentField::SavePath => ArgumentUpdate::SavePath(None),
            ArgumentField::ConvertToAudio => ArgumentUpdate::ConvertToAudio(None),
            ArgumentField::AudioFormat => ArgumentUpdate::AudioFormat(None),
            ArgumentField::AudioQuality => ArgumentUpdate::AudioQuality(None),
        }
    }
}

impl fmt::Display for ArgumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArgumentField {
    type Err = QuickripError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        ArgumentField::ALL
            .into_iter()
            .find(|field| field.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| QuickripError::InvalidArgument(format!("unknown field '{}'", s)))
    }
}

/// A single-field change to `DownloadArguments`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentUpdate {
    FfmpegLocation(Option<String>),
    YtDlpLocation(Option<String>),
    Cookies(Option<String>),
    SavePath(Option<String>),
    ConvertToAudio(Option<bool>),
    AudioFormat(Option<String>),
    AudioQuality(Option<String>),
}

impl ArgumentUpdate {
    pub fn field(&self) -> ArgumentField {
        match self {
            ArgumentUpdate::FfmpegLocation(_) => ArgumentField::FfmpegLocation,
            ArgumentUpdate::YtDlpLocation(_) => ArgumentField::YtDlpLocation,
            ArgumentUpdate::Cookies(_) => ArgumentField::Cookies,
            ArgumentUpdate::SavePath(_) => ArgumentField::SavePath,
            ArgumentUpdate::ConvertToAudio(_) => ArgumentField::ConvertToAudio,
            ArgumentUpdate::AudioFormat(_) => ArgumentField::AudioFormat,
            ArgumentUpdate::AudioQuality(_) => ArgumentField::AudioQuality,
        }
    }
}

/// Reactive view over the `download-arguments` preference
#[derive(Clone)]
pub struct DownloadArgumentsModel {
    store: PreferenceStore,
    current: Option<DownloadArguments>,
}

impl DownloadArgumentsModel {
    pub fn new(store: PreferenceStore) -> Self {
        let current = store.read(&DOWNLOAD_ARGUMENTS);
        Self { store, current }
    }

    /// `None` until the first field has ever been set
    pub fn current(&self) -> Option<&DownloadArguments> {
        self.current.as_ref()
    }

    /// Current arguments, or all-default when nothing was stored yet
    pub fn snapshot(&self) -> DownloadArguments {
        self.current.clone().unwrap_or_default()
    }

    /// Read-modify-write of one field
    pub fn set(&mut self, update: ArgumentUpdate) -> Result<()> {
        debug!("Setting download argument {}", update.field());

        let mut arguments = self.store.read(&DOWNLOAD_ARGUMENTS).unwrap_or_default();
        arguments.apply(update);
        self.store.write(&DOWNLOAD_ARGUMENTS, &Some(arguments.clone()))?;
        self.current = Some(arguments);
        Ok(())
    }

    /// Apply a picker result to a path field. A cancelled picker changes nothing.
    pub fn set_from_picker(&mut self, field: ArgumentField, picked: Option<PathBuf>) -> Result<bool> {
        let Some(path) = picked else {
            return Ok(false);
        };
        if !field.is_path() {
            return Err(QuickripError::InvalidArgument(format!(
                "{} is not a path field",
                field
            )));
        }

        let update = field.update_from_str(&path.to_string_lossy())?;
        self.set(update)?;
        Ok(true)
    }

    /// Re-read from the store (another clone may have written)
    pub fn reload(&mut self) {
        self.current = self.store.read(&DOWNLOAD_ARGUMENTS);
    }
}
