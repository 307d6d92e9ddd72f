//! # Word Service
//!
//! Version-agnostic word operations. The v1 and v2 routes differ only in
//! how they shape what this returns.

use std::sync::Arc;

use serde_json::{json, Value};

use super::errors::{ApiError, ApiResult};
use super::parser::Pagination;
use super::response::WordPage;
use super::validation::{validate_and_transform_word_data, validate_new_word};
use crate::store::{fields, FilterExpr, FilterSet, FindOptions, Word, WordRepository};

/// Word operations over a repository
pub struct WordService {
    repository: Arc<dyn WordRepository>,
}

impl WordService {
    pub fn new(repository: Arc<dyn WordRepository>) -> Self {
        Self { repository }
    }

    /// Matching words, sorted by spelling. `None` returns every match.
    pub async fn list(&self, filter: &FilterSet, page: Option<Pagination>) -> ApiResult<Vec<Word>> {
        let options = match page {
            Some(page) => FindOptions::page(page.offset, page.limit),
            None => FindOptions::default(),
        };
        Ok(self.repository.find(filter, options).await?)
    }

    /// One page of matching words plus the total match count
    pub async fn page(&self, filter: &FilterSet, page: Pagination) -> ApiResult<WordPage> {
        let words = self
            .repository
            .find(filter, FindOptions::page(page.offset, page.limit))
            .await?;
        let total = self.repository.count(filter).await?;

        Ok(WordPage { words, total, page })
    }

    pub async fn get(&self, id: &str) -> ApiResult<Word> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(ApiError::word_not_found)
    }

    /// Validate, reject duplicates, insert.
    ///
    /// The duplicate check and the insert are separate store calls; two
    /// concurrent creates of the same word can both succeed.
    pub async fn create(&self, body: &Value) -> ApiResult<Word> {
        let new_word = validate_new_word(body)?;

        if self.exists(&new_word.word).await? {
            return Err(ApiError::Conflict(new_word.word));
        }

        let word = self.repository.insert(new_word).await?;
        tracing::info!(id = %word.id, word = %word.word, "created word");
        Ok(word)
    }

    /// Apply the supplied fields to an existing word
    pub async fn update(&self, id: &str, body: &Value) -> ApiResult<Word> {
        let patch = validate_and_transform_word_data(body)?;
        if patch.is_empty() {
            return Err(ApiError::EmptyUpdate);
        }

        let word = self
            .repository
            .update_by_id(id, patch)
            .await?
            .ok_or_else(ApiError::word_not_found)?;
        tracing::info!(id = %word.id, "updated word");
        Ok(word)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        if !self.repository.delete_by_id(id).await? {
            return Err(ApiError::word_not_found());
        }
        tracing::info!(id = %id, "deleted word");
        Ok(())
    }

    /// One word chosen uniformly among the matches
    pub async fn random(&self, filter: &FilterSet) -> ApiResult<Word> {
        self.repository
            .sample(filter, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound("No words match the given filters".to_string()))
    }

    /// Distinct categories, sorted
    pub async fn categories(&self) -> ApiResult<Vec<String>> {
        let values = self.repository.distinct(fields::CATEGORY).await?;
        Ok(values
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect())
    }

    async fn exists(&self, word: &str) -> ApiResult<bool> {
        let filter = FilterSet::new().and(FilterExpr::eq(fields::WORD, json!(word)));
        let found = self
            .repository
            .find(&filter, FindOptions::page(0, 1))
            .await?;
        Ok(!found.is_empty())
    }
}
