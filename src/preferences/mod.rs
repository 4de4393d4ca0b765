//! Durable key-value preferences

pub mod keys;
pub mod store;

pub use keys::{PreferenceKey, DOWNLOAD_ARGUMENTS, ONBOARDING_DONE};
pub use store::{MemoryBackend, PreferenceBackend, PreferenceStore};
