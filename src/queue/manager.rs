//! Download queue: the user's list of requested downloads and their status

use crate::arguments::DownloadArguments;
use crate::backend::{Backend, DownloadRequest};
use crate::utils::Notice;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Title shown while the backend is working
pub const PENDING_TITLE: &str = "Loading...";

/// Title shown once the backend reports success
pub const COMPLETED_TITLE: &str = "Download complete";

const SUCCESS_MESSAGE: &str = "Video downloaded successfully!";
const FAILURE_MESSAGE: &str = "Failed to download video. Please try again.";

/// Client-side status of a download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Downloading,
    Completed,
    Error,
}

impl DownloadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadStatus::Downloading => "downloading",
            DownloadStatus::Completed => "completed",
            DownloadStatus::Error => "error",
        }
    }
}

/// One user-initiated download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadItem {
    pub id: String,
    pub url: String,
    pub title: String,
    /// 0 to 100
    pub progress: f32,
    pub status: DownloadStatus,
    pub file_path: Option<PathBuf>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DownloadItem {
    fn new(url: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.to_string(),
            title: PENDING_TITLE.to_string(),
            progress: 0.0,
            status: DownloadStatus::Downloading,
            file_path: None,
            error: None,
            created_at: Utc::now(),
        }
    }
}

/// A submission that still needs its backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDownload {
    pub id: String,
    pub url: String,
}

impl PendingDownload {
    pub fn into_request(self, arguments: DownloadArguments) -> (String, DownloadRequest) {
        (self.id, DownloadRequest::new(self.url, arguments))
    }
}

/// Changes reported for a queued item
#[derive(Debug, Clone, PartialEq)]
pub enum QueueUpdate {
    Progress {
        id: String,
        percent: f32,
    },
    Finished {
        id: String,
        result: Result<String, String>,
    },
}

/// In-memory download list, newest first, plus the URL input field
#[derive(Debug, Default, Clone)]
pub struct DownloadQueue {
    items: Vec<DownloadItem>,
    input: String,
}

impl DownloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[DownloadItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&DownloadItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Whether the Download action should be enabled
    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Add a `downloading` item for `url` and clear the input.
    ///
    /// Blank URLs are ignored: no item is created and `None` is returned, so
    /// the caller has nothing to send to the backend.
    pub fn submit(&mut self, url: &str) -> Option<PendingDownload> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        let item = DownloadItem::new(url);
        let pending = PendingDownload {
            id: item.id.clone(),
            url: item.url.clone(),
        };

        info!("Queued download {} for {}", item.id, item.url);
        self.items.insert(0, item);
        self.input.clear();

        Some(pending)
    }

    /// Submit whatever is in the input field
    pub fn submit_input(&mut self) -> Option<PendingDownload> {
        let url = std::mem::take(&mut self.input);
        let pending = self.submit(&url);
        if pending.is_none() {
            self.input = url;
        }
        pending
    }

    /// Apply a backend report. Returns a notice for the user when one is due.
    pub fn apply(&mut self, update: QueueUpdate) -> Option<Notice> {
        match update {
            QueueUpdate::Progress { id, percent } => {
                if let Some(item) = self.find_mut(&id) {
                    if item.status == DownloadStatus::Downloading {
                        item.progress = percent.clamp(0.0, 100.0);
                    }
                }
                None
            }
            QueueUpdate::Finished { id, result } => {
                let Some(item) = self.find_mut(&id) else {
                    debug!("Finished report for unknown download {}", id);
                    return None;
                };

                match result {
                    Ok(output) => {
                        item.status = DownloadStatus::Completed;
                        item.progress = 100.0;
                        item.title = COMPLETED_TITLE.to_string();
                        item.error = None;
                        let output = output.trim();
                        if Path::new(output).is_absolute() {
                            item.file_path = Some(PathBuf::from(output));
                        }
                        info!("Download {} completed", id);
                        Some(Notice::success(SUCCESS_MESSAGE))
                    }
                    Err(e) => {
                        error!("Download error for {}: {}", id, e);
                        item.status = DownloadStatus::Error;
                        item.error = Some(e);
                        Some(Notice::error(FAILURE_MESSAGE))
                    }
                }
            }
        }
    }

    /// Folder to reveal for a completed item, `None` for anything else
    pub fn location_to_open(&self, id: &str, fallback: Option<&Path>) -> Option<PathBuf> {
        let item = self.get(id)?;
        if item.status != DownloadStatus::Completed {
            return None;
        }

        item.file_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(|| fallback.map(Path::to_path_buf))
    }

    /// Submit, run and settle one download on the current task
    pub async fn download(
        &mut self,
        backend: Arc<dyn Backend>,
        url: &str,
        arguments: DownloadArguments,
    ) -> Option<(String, Option<Notice>)> {
        let (id, request) = self.submit(url)?.into_request(arguments);
        let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();

        let run = execute(backend, id.clone(), request, updates_tx);
        let drain = async {
            while let Some(update) = updates_rx.recv().await {
                self.apply(update);
            }
        };
        let (finished, ()) = tokio::join!(run, drain);

        let notice = self.apply(finished);
        Some((id, notice))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut DownloadItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

/// Run one backend download, forwarding progress as `QueueUpdate::Progress`.
///
/// The returned `Finished` update is not sent on `updates`; the caller applies it.
pub async fn execute(
    backend: Arc<dyn Backend>,
    id: String,
    request: DownloadRequest,
    updates: mpsc::UnboundedSender<QueueUpdate>,
) -> QueueUpdate {
    let (progress_tx, mut progress_rx) = mpsc::channel::<f32>(32);

    let download = backend.download_video(request, progress_tx);
    let forward = async {
        while let Some(percent) = progress_rx.recv().await {
            let _ = updates.send(QueueUpdate::Progress {
                id: id.clone(),
                percent,
            });
        }
    };
    let (result, ()) = tokio::join!(download, forward);

    QueueUpdate::Finished {
        id,
        result: result.map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_submissions_are_ignored() {
        let mut queue = DownloadQueue::new();
        assert!(queue.submit("").is_none());
        assert!(queue.submit("   \t").is_none());
        assert!(queue.items().is_empty());
    }

    #[test]
    fn test_submit_prepends_downloading_item() {
        let mut queue = DownloadQueue::new();
        queue.set_input("https://example.com/first");
        let first = queue.submit_input().unwrap();
        let second = queue.submit("https://example.com/second").unwrap();

        assert_eq!(queue.input(), "");
        assert_eq!(queue.items().len(), 2);
        assert_eq!(queue.items()[0].id, second.id);
        assert_eq!(queue.items()[1].id, first.id);

        let item = queue.get(&first.id).unwrap();
        assert_eq!(item.status, DownloadStatus::Downloading);
        assert_eq!(item.progress, 0.0);
        assert_eq!(item.title, PENDING_TITLE);
    }

    #[test]
    fn test_blank_input_is_kept() {
        let mut queue = DownloadQueue::new();
        queue.set_input("  ");
        assert!(!queue.can_submit());
        assert!(queue.submit_input().is_none());
        assert_eq!(queue.input(), "  ");
    }

    #[test]
    fn test_success_completes_item() {
        let mut queue = DownloadQueue::new();
        let pending = queue.submit("https://example.com/watch").unwrap();

        let notice = queue.apply(QueueUpdate::Finished {
            id: pending.id.clone(),
            result: Ok("/tmp/out/video.mp4".to_string()),
        });

        let item = queue.get(&pending.id).unwrap();
        assert_eq!(item.status, DownloadStatus::Completed);
        assert_eq!(item.progress, 100.0);
        assert_eq!(item.title, COMPLETED_TITLE);
        assert!(!notice.unwrap().is_error());
    }

    #[test]
    fn test_failure_keeps_progress() {
        let mut queue = DownloadQueue::new();
        let pending = queue.submit("https://example.com/watch").unwrap();
        queue.apply(QueueUpdate::Progress {
            id: pending.id.clone(),
            percent: 37.5,
        });

        let notice = queue.apply(QueueUpdate::Finished {
            id: pending.id.clone(),
            result: Err("HTTP Error 403".to_string()),
        });

        let item = queue.get(&pending.id).unwrap();
        assert_eq!(item.status, DownloadStatus::Error);
        assert_eq!(item.progress, 37.5);
        assert_eq!(item.error.as_deref(), Some("HTTP Error 403"));
        assert!(notice.unwrap().is_error());
    }

    #[test]
    fn test_progress_ignored_after_completion() {
        let mut queue = DownloadQueue::new();
        let pending = queue.submit("https://example.com/watch").unwrap();
        queue.apply(QueueUpdate::Finished {
            id: pending.id.clone(),
            result: Ok("done".to_string()),
        });
        queue.apply(QueueUpdate::Progress {
            id: pending.id.clone(),
            percent: 12.0,
        });
        assert_eq!(queue.get(&pending.id).unwrap().progress, 100.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut queue = DownloadQueue::new();
        let pending = queue.submit("https://example.com/watch").unwrap();
        queue.apply(QueueUpdate::Progress {
            id: pending.id.clone(),
            percent: 140.0,
        });
        assert_eq!(queue.get(&pending.id).unwrap().progress, 100.0);
    }

    #[test]
    fn test_location_only_for_completed_items() {
        let mut queue = DownloadQueue::new();
        let done = queue.submit("https://example.com/a").unwrap();
        let running = queue.submit("https://example.com/b").unwrap();
        let fallback = PathBuf::from("/downloads");

        queue.apply(QueueUpdate::Finished {
            id: done.id.clone(),
            result: Ok("Download completed successfully".to_string()),
        });

        assert_eq!(
            queue.location_to_open(&done.id, Some(&fallback)),
            Some(fallback.clone())
        );
        assert_eq!(queue.location_to_open(&running.id, Some(&fallback)), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_location_is_parent_of_file() {
        let mut queue = DownloadQueue::new();
        let done = queue.submit("https://example.com/a").unwrap();
        queue.apply(QueueUpdate::Finished {
            id: done.id.clone(),
            result: Ok("/music/song.mp3".to_string()),
        });
        assert_eq!(
            queue.location_to_open(&done.id, None),
            Some(PathBuf::from("/music"))
        );
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut queue = DownloadQueue::new();
        let notice = queue.apply(QueueUpdate::Finished {
            id: "missing".to_string(),
            result: Ok(String::new()),
        });
        assert!(notice.is_none());
    }
}
