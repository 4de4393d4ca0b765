//! Backend call boundary and the yt-dlp implementation

pub mod progress;
pub mod traits;
pub mod ytdlp;

pub use progress::parse_progress_line;
pub use traits::{Backend, DownloadRequest};
pub use ytdlp::YtDlpBackend;
