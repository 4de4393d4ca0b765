//! yt-dlp backend
//!
//! Installs yt-dlp next to the application, locates it (managed copy first,
//! then `PATH`), and runs downloads with the user's `DownloadArguments`.

use crate::backend::progress::{parse_progress_line, MonotonicProgress};
use crate::backend::traits::{Backend, DownloadRequest};
use crate::utils::platform;
use crate::utils::{QuickripError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const RELEASE_BASE_URL: &str = "https://github.com/yt-dlp/yt-dlp/releases/latest/download";

/// Backend that shells out to yt-dlp
#[derive(Debug, Clone)]
pub struct YtDlpBackend {
    tools_dir: PathBuf,
    http: reqwest::Client,
}

impl YtDlpBackend {
    /// `tools_dir` is where `download_ytdlp` installs the binary
    pub fn new(tools_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools_dir: tools_dir.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Path the installer writes to
    pub fn managed_path(&self) -> PathBuf {
        self.tools_dir.join(platform::ytdlp_binary_name())
    }

    async fn resolve_executable(&self, request: &DownloadRequest) -> Result<PathBuf> {
        if let Some(location) = request.arguments.normalized().yt_dlp_location {
            return Ok(PathBuf::from(location));
        }

        match self.get_ytdlp_path().await? {
            Some(path) => Ok(path),
            None => Err(QuickripError::YtDlpNotFound),
        }
    }
}

#[async_trait]
impl Backend for YtDlpBackend {
    async fn get_ytdlp_path(&self) -> Result<Option<PathBuf>> {
        let managed = self.managed_path();
        if tokio::fs::try_exists(&managed).await.unwrap_or(false) {
            debug!("Using managed yt-dlp: {:?}", managed);
            return Ok(Some(managed));
        }

        match which::which("yt-dlp") {
            Ok(path) => {
                debug!("Using system yt-dlp: {:?}", path);
                Ok(Some(path))
            }
            Err(_) => Ok(None),
        }
    }

    async fn download_ytdlp(&self) -> Result<PathBuf> {
        let os = std::env::consts::OS;
        let asset = platform::ytdlp_release_asset(os)
            .ok_or_else(|| QuickripError::UnsupportedPlatform(os.to_string()))?;
        let url = format!("{}/{}", RELEASE_BASE_URL, asset);
        let target = self.managed_path();

        info!("Downloading yt-dlp from {} to {:?}", url, target);
        tokio::fs::create_dir_all(&self.tools_dir).await?;

        let response = self.http.get(&url).send().await?.error_for_status()?;

        // The managed path only ever holds a complete binary
        let partial = target.with_extension("part");
        let written = write_partial(response.bytes_stream(), &partial).await?;

        if written == 0 {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(QuickripError::InstallFailed(
                "release asset was empty".to_string(),
            ));
        }

        make_executable(&partial).await?;
        tokio::fs::rename(&partial, &target).await?;

        info!("Successfully installed yt-dlp ({} bytes) at {:?}", written, target);
        Ok(target)
    }

    async fn download_video(
        &self,
        request: DownloadRequest,
        progress: mpsc::Sender<f32>,
    ) -> Result<String> {
        validate_url(&request.url)?;
        let executable = self.resolve_executable(&request).await?;
        let args = build_download_args(&request);

        info!("{} is downloading...", request.url);
        debug!("Running {:?} {:?}", executable, args);

        let mut child = AsyncCommand::new(&executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // stderr must be drained concurrently, a full pipe stalls yt-dlp
        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf).await;
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        let mut output_path = None;
        if let Some(stdout) = child.stdout.take() {
            // yt-dlp prints in the locale encoding, lines are not guaranteed UTF-8
            let mut lines = BufReader::new(stdout).split(b'\n');
            let mut tracker = MonotonicProgress::default();

            while let Some(raw) = lines.next_segment().await? {
                let line = String::from_utf8_lossy(&raw);
                let line = line.trim_end_matches('\r');
                if let Some(percent) = parse_progress_line(&line) {
                    if let Some(percent) = tracker.advance(percent) {
                        // Receiver gone means nobody is watching; keep downloading
                        let _ = progress.send(percent).await;
                    }
                } else if let Some(path) = printed_file_path(&line) {
                    output_path = Some(path.to_string());
                }
            }
        }

        let status = child.wait().await?;
        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        if !status.success() {
            let message = stderr.trim();
            error!("yt-dlp failed for {}: {}", request.url, message);
            return Err(QuickripError::DownloadFailed(if message.is_empty() {
                format!("yt-dlp exited with {}", status)
            } else {
                message.to_string()
            }));
        }

        if !stderr.trim().is_empty() {
            warn!("yt-dlp reported: {}", stderr.trim());
        }

        info!("Finished downloading {}", request.url);
        Ok(output_path.unwrap_or_else(|| "Download completed successfully".to_string()))
    }
}

/// Reject empty input and anything that isn't an absolute URL
pub fn validate_url(url: &str) -> Result<()> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(QuickripError::InvalidUrl("URL is empty".to_string()));
    }

    reqwest::Url::parse(trimmed)
        .map(|_| ())
        .map_err(|e| QuickripError::InvalidUrl(format!("{}: {}", trimmed, e)))
}

/// yt-dlp command line for a request
pub fn build_download_args(request: &DownloadRequest) -> Vec<String> {
    let arguments = request.arguments.normalized();

    let mut args = vec![
        "--newline".to_string(),
        "--progress".to_string(),
        "--no-playlist".to_string(),
        "--print".to_string(),
        "after_move:filepath".to_string(),
    ];

    if let Some(ffmpeg) = arguments.ffmpeg_location {
        args.push("--ffmpeg-location".to_string());
        args.push(ffmpeg);
    }

    if let Some(cookies) = arguments.cookies {
        args.push("--cookies".to_string());
        args.push(cookies);
    }

    if let Some(save_path) = arguments.save_path {
        args.push("-P".to_string());
        args.push(save_path);
    }

    if arguments.convert_to_audio.unwrap_or(false) {
        args.push("-x".to_string());
        if let Some(format) = arguments.audio_format {
            args.push("--audio-format".to_string());
            args.push(format);
        }
        if let Some(quality) = arguments.audio_quality {
            args.push("--audio-quality".to_string());
            args.push(quality);
        }
    }

    args.push(request.url.trim().to_string());
    args
}

/// Lines printed by `--print after_move:filepath` are bare absolute paths
fn printed_file_path(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('[') {
        return None;
    }
    if Path::new(line).is_absolute() {
        Some(line)
    } else {
        None
    }
}

/// Stream `chunks` into `partial`, removing the file again if the stream breaks
async fn write_partial<S, B, E>(chunks: S, partial: &Path) -> Result<u64>
where
    S: futures::Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<QuickripError>,
{
    futures::pin_mut!(chunks);
    let mut file = tokio::fs::File::create(partial).await?;
    let mut written: u64 = 0;

    let streamed: Result<()> = async {
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|e| -> QuickripError { e.into() })?;
            written += chunk.as_ref().len() as u64;
            file.write_all(chunk.as_ref()).await?;
        }
        file.flush().await?;
        Ok(())
    }
    .await;
    drop(file);

    if let Err(e) = streamed {
        error!("yt-dlp download interrupted after {} bytes: {}", written, e);
        let _ = tokio::fs::remove_file(partial).await;
        return Err(e);
    }
    Ok(written)
}

async fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = tokio::fs::metadata(path).await?.permissions();
        perms.set_mode(0o755);
        tokio::fs::set_permissions(path, perms).await?;
    }

    #[cfg(not(unix))]
    {
        let _ = path;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::DownloadArguments;

    fn request(arguments: DownloadArguments) -> DownloadRequest {
        DownloadRequest::new("https://example.com/watch?v=abc", arguments)
    }

    #[test]
    fn test_default_args_end_with_url() {
        let args = build_download_args(&request(DownloadArguments::default()));
        assert_eq!(args.last().unwrap(), "https://example.com/watch?v=abc");
        assert!(args.contains(&"--newline".to_string()));
        assert!(!args.contains(&"-x".to_string()));
    }

    #[test]
    fn test_audio_conversion_args() {
        let args = build_download_args(&request(DownloadArguments {
            convert_to_audio: Some(true),
            audio_format: Some("mp3".to_string()),
            audio_quality: Some("0".to_string()),
            ..Default::default()
        }));

        let joined = args.join(" ");
        assert!(joined.contains("-x --audio-format mp3 --audio-quality 0"));
    }

    #[test]
    fn test_audio_options_ignored_without_conversion() {
        let args = build_download_args(&request(DownloadArguments {
            convert_to_audio: Some(false),
            audio_format: Some("mp3".to_string()),
            ..Default::default()
        }));
        assert!(!args.contains(&"--audio-format".to_string()));
    }

    #[test]
    fn test_paths_are_forwarded() {
        let args = build_download_args(&request(DownloadArguments {
            ffmpeg_location: Some("/opt/ffmpeg".to_string()),
            cookies: Some("/home/me/cookies.txt".to_string()),
            save_path: Some("/home/me/Music".to_string()),
            ..Default::default()
        }));

        let joined = args.join(" ");
        assert!(joined.contains("--ffmpeg-location /opt/ffmpeg"));
        assert!(joined.contains("--cookies /home/me/cookies.txt"));
        assert!(joined.contains("-P /home/me/Music"));
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let args = build_download_args(&request(DownloadArguments {
            save_path: Some(String::new()),
            ..Default::default()
        }));
        assert!(!args.contains(&"-P".to_string()));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/watch").is_ok());
        assert!(matches!(validate_url(""), Err(QuickripError::InvalidUrl(_))));
        assert!(matches!(validate_url("   "), Err(QuickripError::InvalidUrl(_))));
        assert!(matches!(
            validate_url("not a url"),
            Err(QuickripError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_printed_file_path() {
        #[cfg(unix)]
        assert_eq!(
            printed_file_path("/home/me/Music/song.mp3"),
            Some("/home/me/Music/song.mp3")
        );
        assert_eq!(printed_file_path("[download] Destination: x.webm"), None);
        assert_eq!(printed_file_path("relative.mp4"), None);
    }

    #[tokio::test]
    async fn test_missing_executable_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let backend = YtDlpBackend::new(dir.path());
        let request = DownloadRequest::new(
            "https://example.com/watch",
            DownloadArguments {
                yt_dlp_location: Some(dir.path().join("nope").to_string_lossy().to_string()),
                ..Default::default()
            },
        );
        let (tx, _rx) = mpsc::channel(4);

        let result = backend.download_video(request, tx).await;
        assert!(matches!(result, Err(QuickripError::Io(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let backend = YtDlpBackend::new(dir.path());
        let (tx, _rx) = mpsc::channel(4);

        let result = backend
            .download_video(DownloadRequest::new("", DownloadArguments::default()), tx)
            .await;
        assert!(matches!(result, Err(QuickripError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_broken_stream_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join("yt-dlp.part");
        let chunks = futures::stream::iter(vec![
            Ok(b"#!/bin/sh\n".to_vec()),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ]);

        let result = write_partial(chunks, &partial).await;

        assert!(matches!(result, Err(QuickripError::Io(_))));
        assert!(!partial.exists());
    }

    #[tokio::test]
    async fn test_complete_stream_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join("yt-dlp.part");
        let chunks = futures::stream::iter(vec![
            Ok::<_, std::io::Error>(b"#!/bin/sh\n".to_vec()),
            Ok(b"echo ok\n".to_vec()),
        ]);

        let written = write_partial(chunks, &partial).await.unwrap();

        assert_eq!(written, 18);
        assert_eq!(std::fs::read(&partial).unwrap(), b"#!/bin/sh\necho ok\n");
    }

    #[tokio::test]
    async fn test_managed_binary_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let backend = YtDlpBackend::new(dir.path());
        tokio::fs::write(backend.managed_path(), b"#!/bin/sh\n").await.unwrap();

        let found = backend.get_ytdlp_path().await.unwrap();
        assert_eq!(found, Some(backend.managed_path()));
    }
}
