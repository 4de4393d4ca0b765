use crate::arguments::DownloadArguments;
use crate::utils::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Everything the backend needs to fetch one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub arguments: DownloadArguments,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, arguments: DownloadArguments) -> Self {
        Self {
            url: url.into(),
            arguments,
        }
    }
}

/// The native side of the application: tool installation and downloads.
///
/// The UI layers only ever talk to this trait, so they can be driven by the
/// real yt-dlp backend or by a scripted one in tests.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Location of a usable yt-dlp, if any
    async fn get_ytdlp_path(&self) -> Result<Option<PathBuf>>;

    /// Fetch the latest yt-dlp release and return where it was installed
    async fn download_ytdlp(&self) -> Result<PathBuf>;

    /// Download one URL.
    ///
    /// Progress percentages (0-100, non-decreasing) are sent on `progress` while
    /// the download runs; the channel closes when the call returns. The result is
    /// the path of the produced file, or a status message when no path is known.
    async fn download_video(
        &self,
        request: DownloadRequest,
        progress: mpsc::Sender<f32>,
    ) -> Result<String>;
}
