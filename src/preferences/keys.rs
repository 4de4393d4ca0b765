//! Typed preference keys

use crate::arguments::DownloadArguments;
use std::marker::PhantomData;

/// A named preference slot with a declared default.
///
/// The type parameter fixes the shape stored under `name`, so a key can only
/// ever be read and written as one type.
#[derive(Debug)]
pub struct PreferenceKey<T> {
    pub name: &'static str,
    default: T,
    _shape: PhantomData<fn() -> T>,
}

impl<T> PreferenceKey<T> {
    pub const fn new(name: &'static str, default: T) -> Self {
        Self {
            name,
            default,
            _shape: PhantomData,
        }
    }
}

impl<T: Clone> PreferenceKey<T> {
    pub fn default_value(&self) -> T {
        self.default.clone()
    }
}

/// Set once the first-run wizard has been completed
pub const ONBOARDING_DONE: PreferenceKey<bool> = PreferenceKey::new("onboarding-done", false);

/// Tool paths, save directory and audio options forwarded to yt-dlp
pub const DOWNLOAD_ARGUMENTS: PreferenceKey<Option<DownloadArguments>> =
    PreferenceKey::new("download-arguments", None);
