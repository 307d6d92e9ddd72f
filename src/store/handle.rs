//! # Store Handle
//!
//! Process-wide, lazily-initialized store connection.
//!
//! The first request connects; concurrent first requests wait on that single
//! in-flight attempt. A failed attempt leaves the handle empty so a later
//! request connects again.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use super::memory::MemoryWordStore;
use super::repository::{StoreResult, WordRepository};

/// Opens a connection to the word store
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> StoreResult<Arc<dyn WordRepository>>;
}

/// Connects to a [`MemoryWordStore`], snapshotted to `data_file` when set
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    pub data_file: Option<PathBuf>,
}

impl MemoryConnector {
    pub fn new(data_file: Option<PathBuf>) -> Self {
        Self { data_file }
    }
}

#[async_trait]
impl StoreConnector for MemoryConnector {
    async fn connect(&self) -> StoreResult<Arc<dyn WordRepository>> {
        let store = match &self.data_file {
            Some(path) => MemoryWordStore::open(path).await?,
            None => MemoryWordStore::new(),
        };
        Ok(Arc::new(store))
    }
}

/// Hands out an already-open repository
struct Connected(Arc<dyn WordRepository>);

#[async_trait]
impl StoreConnector for Connected {
    async fn connect(&self) -> StoreResult<Arc<dyn WordRepository>> {
        Ok(Arc::clone(&self.0))
    }
}

/// Cached store connection shared by all requests
pub struct StoreHandle {
    repository: OnceCell<Arc<dyn WordRepository>>,
    connector: Arc<dyn StoreConnector>,
}

impl StoreHandle {
    /// Create a handle that connects on first use
    pub fn new(connector: impl StoreConnector + 'static) -> Self {
        Self {
            repository: OnceCell::new(),
            connector: Arc::new(connector),
        }
    }

    /// Create a handle around an open repository
    pub fn connected(repository: Arc<dyn WordRepository>) -> Self {
        Self {
            repository: OnceCell::new_with(Some(Arc::clone(&repository))),
            connector: Arc::new(Connected(repository)),
        }
    }

    /// Get the repository, connecting if this is the first use
    pub async fn get(&self) -> StoreResult<Arc<dyn WordRepository>> {
        let repository = self
            .repository
            .get_or_try_init(|| async {
                tracing::info!("connecting to word store");
                self.connector.connect().await.map_err(|e| {
                    tracing::warn!(error = %e, "word store connection failed");
                    e
                })
            })
            .await?;

        Ok(Arc::clone(repository))
    }

    /// Whether a connection has been established
    pub fn is_connected(&self) -> bool {
        self.repository.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::repository::StoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fails the first `failures` attempts, then connects
    struct CountingConnector {
        attempts: Arc<AtomicUsize>,
        failures: usize,
        delay: Duration,
    }

    #[async_trait]
    impl StoreConnector for CountingConnector {
        async fn connect(&self) -> StoreResult<Arc<dyn WordRepository>> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if attempt < self.failures {
                return Err(StoreError::Unavailable("connection refused".to_string()));
            }
            Ok(Arc::new(MemoryWordStore::new()))
        }
    }

    #[tokio::test]
    async fn test_failed_connect_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let handle = StoreHandle::new(CountingConnector {
            attempts: attempts.clone(),
            failures: 1,
            delay: Duration::ZERO,
        });

        assert!(matches!(handle.get().await, Err(StoreError::Unavailable(_))));
        assert!(!handle.is_connected());

        assert!(handle.get().await.is_ok());
        assert!(handle.is_connected());
        assert!(handle.get().await.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_use_connects_once() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let handle = Arc::new(StoreHandle::new(CountingConnector {
            attempts: attempts.clone(),
            failures: 0,
            delay: Duration::from_millis(20),
        }));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let handle = handle.clone();
                tokio::spawn(async move { handle.get().await.is_ok() })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap());
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connected_handle_reuses_repository() {
        let repository: Arc<dyn WordRepository> = Arc::new(MemoryWordStore::new());
        let handle = StoreHandle::connected(repository.clone());

        assert!(handle.is_connected());
        let got = handle.get().await.unwrap();
        assert!(Arc::ptr_eq(&got, &repository));
    }
}
