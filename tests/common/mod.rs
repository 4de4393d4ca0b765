//! Scripted backend shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use quickrip::backend::{Backend, DownloadRequest};
use quickrip::utils::{QuickripError, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

/// Backend whose behaviour is fixed up front.
///
/// Downloads of URLs containing `fail` return an error after reporting 25%;
/// every other URL reports 10/50/100 and returns `/downloads/<last segment>.mp4`.
#[derive(Default)]
pub struct ScriptedBackend {
    pub installed: Mutex<Option<PathBuf>>,
    pub install_error: Option<String>,
    pub check_fails: bool,
    pub delay: Option<Duration>,
    pub install_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed_at(path: &str) -> Self {
        Self {
            installed: Mutex::new(Some(PathBuf::from(path))),
            ..Self::default()
        }
    }

    pub fn install_calls(&self) -> usize {
        self.install_calls.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn get_ytdlp_path(&self) -> Result<Option<PathBuf>> {
        if self.check_fails {
            return Err(QuickripError::YtDlpNotFound);
        }
        Ok(self.installed.lock().unwrap().clone())
    }

    async fn download_ytdlp(&self) -> Result<PathBuf> {
        self.install_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        if let Some(message) = &self.install_error {
            return Err(QuickripError::InstallFailed(message.clone()));
        }
        let path = PathBuf::from("/tools/yt-dlp");
        *self.installed.lock().unwrap() = Some(path.clone());
        Ok(path)
    }

    async fn download_video(
        &self,
        request: DownloadRequest,
        progress: mpsc::Sender<f32>,
    ) -> Result<String> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);

        if request.url.contains("fail") {
            let _ = progress.send(25.0).await;
            self.pause().await;
            return Err(QuickripError::DownloadFailed("HTTP Error 404".to_string()));
        }

        for percent in [10.0, 50.0, 100.0] {
            let _ = progress.send(percent).await;
            self.pause().await;
        }

        let name = request.url.rsplit('/').next().unwrap_or("video");
        Ok(format!("/downloads/{}.mp4", name))
    }
}
