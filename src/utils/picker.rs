//! Native file/directory picker

use std::path::PathBuf;
use tracing::debug;

/// A single-selection picker request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickRequest {
    pub title: Option<String>,
    pub directory: bool,
}

impl PickRequest {
    pub fn file(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            directory: false,
        }
    }

    pub fn directory(title: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            directory: true,
        }
    }
}

/// Anything that can ask the user for a path. `None` means the user cancelled.
pub trait PathPicker {
    fn pick(&self, request: &PickRequest) -> Option<PathBuf>;
}

/// Blocking OS dialog via `rfd`
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePicker;

impl PathPicker for NativePicker {
    fn pick(&self, request: &PickRequest) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new();
        if let Some(title) = &request.title {
            dialog = dialog.set_title(title);
        }

        let picked = if request.directory {
            dialog.pick_folder()
        } else {
            dialog.pick_file()
        };

        debug!("Picker {:?} returned {:?}", request, picked);
        picked
    }
}
