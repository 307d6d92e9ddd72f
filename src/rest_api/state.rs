//! Shared state for the word routes.

use std::sync::Arc;

use super::errors::ApiResult;
use super::service::WordService;
use crate::store::StoreHandle;

/// Process-wide feature flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Allow POST, PUT and DELETE on words
    pub destructive_endpoints_enabled: bool,
}

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreHandle>,
    pub flags: FeatureFlags,
}

impl AppState {
    pub fn new(store: StoreHandle, flags: FeatureFlags) -> Self {
        Self {
            store: Arc::new(store),
            flags,
        }
    }

    /// Word service over the shared connection, connecting on first use
    pub async fn words(&self) -> ApiResult<WordService> {
        Ok(WordService::new(self.store.get().await?))
    }
}
