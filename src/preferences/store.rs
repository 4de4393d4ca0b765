//! Preference store: synchronous reads from an in-memory cache, durable
//! writes through a single background writer task.

use crate::database::{initialize_database, DatabaseManager};
use crate::preferences::keys::PreferenceKey;
use crate::utils::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

/// Durable medium behind the store. Values are raw JSON text.
#[async_trait]
pub trait PreferenceBackend: Send + Sync {
    async fn load_all(&self) -> Result<Vec<(String, String)>>;

    async fn store(&self, key: &str, value: &str) -> Result<()>;
}

#[async_trait]
impl PreferenceBackend for DatabaseManager {
    async fn load_all(&self) -> Result<Vec<(String, String)>> {
        let records = self.get_all_settings().await?;
        Ok(records.into_iter().map(|r| (r.key, r.value)).collect())
    }

    async fn store(&self, key: &str, value: &str) -> Result<()> {
        self.save_setting(key, value).await
    }
}

/// Process-local backend, used when the database cannot be opened and in tests
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing serialization
    pub fn with_raw(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl PreferenceBackend for MemoryBackend {
    async fn load_all(&self) -> Result<Vec<(String, String)>> {
        let entries = match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Ok(entries.into_iter().collect())
    }

    async fn store(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

enum WriterCommand {
    Put { key: String, value: String },
    Flush(oneshot::Sender<()>),
}

/// Process-wide preferences service. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct PreferenceStore {
    cache: Arc<RwLock<HashMap<String, String>>>,
    writer: mpsc::UnboundedSender<WriterCommand>,
}

impl PreferenceStore {
    /// Load every entry from `backend` and start the writer task.
    ///
    /// Must be called inside a tokio runtime. A backend that fails to load
    /// yields an empty cache, so every key reads as its default.
    pub async fn open(backend: Arc<dyn PreferenceBackend>) -> Self {
        let cache = match backend.load_all().await {
            Ok(entries) => {
                debug!("Loaded {} preference entries", entries.len());
                entries.into_iter().collect()
            }
            Err(e) => {
                warn!("Failed to load preferences, using defaults: {}", e);
                HashMap::new()
            }
        };

        let (writer, receiver) = mpsc::unbounded_channel();
        tokio::spawn(Self::writer_loop(backend, receiver));

        Self {
            cache: Arc::new(RwLock::new(cache)),
            writer,
        }
    }

    /// Open the SQLite store at `db_path`, falling back to memory if it is unusable
    pub async fn open_at(db_path: &Path) -> Self {
        let backend: Arc<dyn PreferenceBackend> = match initialize_database(db_path).await {
            Ok(pool) => {
                info!("Preferences stored in {:?}", db_path);
                Arc::new(DatabaseManager::new(pool))
            }
            Err(e) => {
                warn!(
                    "Preferences database {:?} unavailable ({}), changes will not survive a restart",
                    db_path, e
                );
                Arc::new(MemoryBackend::new())
            }
        };

        Self::open(backend).await
    }

    /// Current value for `key`, or its default. Never fails.
    pub fn read<T>(&self, key: &PreferenceKey<T>) -> T
    where
        T: DeserializeOwned + Clone,
    {
        let raw = match self.cache.read() {
            Ok(cache) => cache.get(key.name).cloned(),
            Err(poisoned) => poisoned.into_inner().get(key.name).cloned(),
        };

        let Some(raw) = raw else {
            return key.default_value();
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored preference {} is malformed ({}), using default", key.name, e);
                key.default_value()
            }
        }
    }

    /// Replace the value for `key`.
    ///
    /// Visible to `read` as soon as this returns; persisted in call order.
    pub fn write<T>(&self, key: &PreferenceKey<T>, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(value)?;

        {
            let mut cache = match self.cache.write() {
                Ok(cache) => cache,
                Err(poisoned) => poisoned.into_inner(),
            };
            cache.insert(key.name.to_string(), raw.clone());
        }

        if self
            .writer
            .send(WriterCommand::Put {
                key: key.name.to_string(),
                value: raw,
            })
            .is_err()
        {
            error!("Preference writer stopped, {} kept in memory only", key.name);
        }

        Ok(())
    }

    /// Wait until every earlier `write` has reached the backend
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.writer.send(WriterCommand::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    async fn writer_loop(
        backend: Arc<dyn PreferenceBackend>,
        mut receiver: mpsc::UnboundedReceiver<WriterCommand>,
    ) {
        while let Some(command) = receiver.recv().await {
            match command {
                WriterCommand::Put { key, value } => {
                    if let Err(e) = backend.store(&key, &value).await {
                        error!("Failed to persist preference {}: {}", key, e);
                    }
                }
                WriterCommand::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        debug!("Preference writer finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::keys::{DOWNLOAD_ARGUMENTS, ONBOARDING_DONE};

    const COUNTER: PreferenceKey<u32> = PreferenceKey::new("counter", 7);

    #[tokio::test]
    async fn test_unwritten_keys_read_default() {
        let store = PreferenceStore::open(Arc::new(MemoryBackend::new())).await;
        assert!(!store.read(&ONBOARDING_DONE));
        assert_eq!(store.read(&DOWNLOAD_ARGUMENTS), None);
        assert_eq!(store.read(&COUNTER), 7);
    }

    #[tokio::test]
    async fn test_write_is_visible_immediately() {
        let store = PreferenceStore::open(Arc::new(MemoryBackend::new())).await;
        store.write(&COUNTER, &42).unwrap();
        assert_eq!(store.read(&COUNTER), 42);
        // keys don't bleed into each other
        assert!(!store.read(&ONBOARDING_DONE));
    }

    #[tokio::test]
    async fn test_flush_reaches_backend_in_order() {
        let backend = MemoryBackend::new();
        let store = PreferenceStore::open(Arc::new(backend.clone())).await;

        for n in 0..20u32 {
            store.write(&COUNTER, &n).unwrap();
        }
        store.flush().await;

        assert_eq!(backend.raw("counter").as_deref(), Some("19"));
    }

    #[tokio::test]
    async fn test_malformed_value_reads_default() {
        let backend = MemoryBackend::new().with_raw("onboarding-done", "{not json");
        let store = PreferenceStore::open(Arc::new(backend)).await;
        assert!(!store.read(&ONBOARDING_DONE));
    }

    #[tokio::test]
    async fn test_wrong_shape_reads_default() {
        let backend = MemoryBackend::new().with_raw("counter", "\"seven\"");
        let store = PreferenceStore::open(Arc::new(backend)).await;
        assert_eq!(store.read(&COUNTER), 7);
    }

    struct BrokenBackend;

    #[async_trait]
    impl PreferenceBackend for BrokenBackend {
        async fn load_all(&self) -> Result<Vec<(String, String)>> {
            Err(crate::utils::QuickripError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "locked",
            )))
        }

        async fn store(&self, _key: &str, _value: &str) -> Result<()> {
            Err(crate::utils::QuickripError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "locked",
            )))
        }
    }

    #[tokio::test]
    async fn test_unavailable_backend_degrades_to_defaults() {
        let store = PreferenceStore::open(Arc::new(BrokenBackend)).await;
        assert!(!store.read(&ONBOARDING_DONE));

        store.write(&ONBOARDING_DONE, &true).unwrap();
        store.flush().await;
        assert!(store.read(&ONBOARDING_DONE));
    }
}
