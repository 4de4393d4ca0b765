pub mod manager;

pub use manager::{
    execute, DownloadItem, DownloadQueue, DownloadStatus, PendingDownload, QueueUpdate,
    COMPLETED_TITLE, PENDING_TITLE,
};
