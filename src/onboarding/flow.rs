//! First-run wizard: welcome, yt-dlp setup, save location

use crate::arguments::{ArgumentUpdate, DownloadArgumentsModel};
use crate::backend::Backend;
use crate::preferences::{PreferenceStore, ONBOARDING_DONE};
use crate::utils::{Notice, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slide {
    #[default]
    Welcome,
    ToolSetup,
    SaveLocation,
}

impl Slide {
    pub const ALL: [Slide; 3] = [Slide::Welcome, Slide::ToolSetup, Slide::SaveLocation];

    pub fn index(&self) -> usize {
        match self {
            Slide::Welcome => 0,
            Slide::ToolSetup => 1,
            Slide::SaveLocation => 2,
        }
    }

    /// Slide at `index`, clamped into range
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Self {
        Self::from_index(self.index().saturating_sub(1))
    }

    pub fn is_last(&self) -> bool {
        *self == Slide::SaveLocation
    }
}

/// Result of the async half of an install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// yt-dlp was already available, nothing was downloaded
    AlreadyInstalled(PathBuf),
    /// Download finished; carries the path found by the follow-up check
    Installed(Option<PathBuf>),
    Failed(String),
}

/// What the caller should do after `next`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Next is disabled on this slide
    Stay,
    Advanced,
    /// Onboarding is complete; show the main screen
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct Onboarding {
    slide: Slide,
    ytdlp_install_path: Option<PathBuf>,
    installing: bool,
    selected_directory: Option<PathBuf>,
}

impl Onboarding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slide(&self) -> Slide {
        self.slide
    }

    pub fn ytdlp_install_path(&self) -> Option<&PathBuf> {
        self.ytdlp_install_path.as_ref()
    }

    pub fn selected_directory(&self) -> Option<&PathBuf> {
        self.selected_directory.as_ref()
    }

    pub fn is_installing(&self) -> bool {
        self.installing
    }

    pub fn advance(&mut self) {
        self.slide = self.slide.next();
    }

    pub fn retreat(&mut self) {
        self.slide = self.slide.previous();
    }

    pub fn is_previous_disabled(&self) -> bool {
        self.slide == Slide::Welcome
    }

    pub fn is_next_disabled(&self) -> bool {
        match self.slide {
            Slide::Welcome => false,
            Slide::ToolSetup => self.ytdlp_install_path.is_none(),
            Slide::SaveLocation => self.selected_directory.is_none(),
        }
    }

    pub fn next_label(&self) -> &'static str {
        if self.slide.is_last() {
            "Get Started"
        } else {
            "Next"
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.slide {
            Slide::Welcome => "Welcome to Quickrip!",
            Slide::ToolSetup => "Let's Get Set Up",
            Slide::SaveLocation => "Choose Your Download Location",
        }
    }

    pub fn body(&self) -> &'static str {
        match self.slide {
            Slide::Welcome => {
                "It's a very simple app for downloading audio/video files from YouTube, \
                 built on a very useful CLI called yt-dlp."
            }
            Slide::ToolSetup => {
                "To get started, let's make sure you have yt-dlp. Press this button to install it."
            }
            Slide::SaveLocation => {
                "Finally, pick a place on your system where we'll save all the downloaded files. \
                 You can change it later."
            }
        }
    }

    /// Installation status for the tool setup slide. A failed check counts as not installed.
    pub async fn check_installation(backend: &dyn Backend) -> Option<PathBuf> {
        match backend.get_ytdlp_path().await {
            Ok(path) => path,
            Err(e) => {
                warn!("Failed to check yt-dlp installation: {}", e);
                None
            }
        }
    }

    pub fn apply_installation_check(&mut self, path: Option<PathBuf>) {
        self.ytdlp_install_path = path;
    }

    /// Mark an install as in flight. `false` means one already is and the
    /// request must be dropped.
    pub fn begin_install(&mut self) -> bool {
        if self.installing {
            return false;
        }
        self.installing = true;
        true
    }

    pub async fn run_install(backend: &dyn Backend) -> InstallOutcome {
        if let Some(path) = Self::check_installation(backend).await {
            info!("yt-dlp already installed at {:?}", path);
            return InstallOutcome::AlreadyInstalled(path);
        }

        match backend.download_ytdlp().await {
            Ok(installed) => {
                info!("Installed yt-dlp at {:?}", installed);
                let found = Self::check_installation(backend).await.or(Some(installed));
                InstallOutcome::Installed(found)
            }
            Err(e) => InstallOutcome::Failed(e.to_string()),
        }
    }

    pub fn finish_install(&mut self, outcome: InstallOutcome) -> Option<Notice> {
        self.installing = false;

        match outcome {
            InstallOutcome::AlreadyInstalled(path) => {
                let notice = Notice::success(format!("Already installed in {}", path.display()));
                self.ytdlp_install_path = Some(path);
                self.slide = Slide::SaveLocation;
                Some(notice)
            }
            InstallOutcome::Installed(path) => {
                let shown = path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.ytdlp_install_path = path;
                self.slide = Slide::SaveLocation;
                Some(Notice::success(format!(
                    "Successfully installed yt-dlp in {}",
                    shown
                )))
            }
            InstallOutcome::Failed(message) => {
                error!("Failed to install yt-dlp: {}", message);
                None
            }
        }
    }

    /// `begin_install`, `run_install` and `finish_install` in one call
    pub async fn install(&mut self, backend: &dyn Backend) -> Option<Notice> {
        if !self.begin_install() {
            return None;
        }
        let outcome = Self::run_install(backend).await;
        self.finish_install(outcome)
    }

    /// Record a picker result. `None` (cancelled) keeps the previous choice.
    pub fn choose_directory(&mut self, picked: Option<PathBuf>) {
        if let Some(dir) = picked {
            self.selected_directory = Some(dir);
        }
    }

    pub fn next(&mut self, store: &PreferenceStore) -> Result<NextAction> {
        if self.is_next_disabled() {
            return Ok(NextAction::Stay);
        }

        if !self.slide.is_last() {
            self.advance();
            return Ok(NextAction::Advanced);
        }

        if let Some(dir) = &self.selected_directory {
            let mut arguments = DownloadArgumentsModel::new(store.clone());
            arguments.set(ArgumentUpdate::SavePath(Some(
                dir.to_string_lossy().into_owned(),
            )))?;
        }
        store.write(&ONBOARDING_DONE, &true)?;
        info!("Onboarding finished");

        Ok(NextAction::Finished)
    }
}
