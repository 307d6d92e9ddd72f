//! # Word Repository
//!
//! The contract the API layer consumes from the document store.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::document::{fields, NewWord, Word, WordPatch};
use super::filter::FilterSet;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store failures. None of these are retried by the API layer.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached or opened
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The predicate, sort or field name was rejected
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    /// A write was accepted but could not be made durable
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

/// Sort clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }
}

/// Sorting and skip/limit for `find`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: OrderBy,
    pub skip: usize,
    /// `None` returns every match after `skip`
    pub limit: Option<usize>,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            sort: OrderBy::asc(fields::WORD),
            skip: 0,
            limit: None,
        }
    }
}

impl FindOptions {
    pub fn page(skip: usize, limit: usize) -> Self {
        Self {
            skip,
            limit: Some(limit),
            ..Default::default()
        }
    }
}

/// Operations the API layer needs from the `word` collection.
///
/// Every method is a single store-level operation; there are no
/// multi-step transactions.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Matching words, sorted and paginated
    async fn find(&self, filter: &FilterSet, options: FindOptions) -> StoreResult<Vec<Word>>;

    /// Number of matching words
    async fn count(&self, filter: &FilterSet) -> StoreResult<u64>;

    /// Up to `size` matching words chosen uniformly at random
    async fn sample(&self, filter: &FilterSet, size: usize) -> StoreResult<Vec<Word>>;

    /// Distinct values of `field` across the collection, sorted
    async fn distinct(&self, field: &str) -> StoreResult<Vec<Value>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Word>>;

    /// Insert and return the stored document with its id and timestamps
    async fn insert(&self, word: NewWord) -> StoreResult<Word>;

    /// Apply a patch, returning the post-update document, or `None` for an unknown id
    async fn update_by_id(&self, id: &str, patch: WordPatch) -> StoreResult<Option<Word>>;

    /// Returns true if a document was removed
    async fn delete_by_id(&self, id: &str) -> StoreResult<bool>;
}
