//! # In-Process Document Store
//!
//! `WordRepository` backed by an in-memory collection, optionally
//! snapshotted to a JSON file after every write.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::document::{fields, NewWord, Word, WordPatch};
use super::filter::{compare_json_values, FilterSet};
use super::repository::{FindOptions, OrderBy, StoreError, StoreResult, WordRepository};

type Collection = HashMap<String, Word>;

/// In-memory `word` collection
pub struct MemoryWordStore {
    /// Documents by id
    documents: RwLock<Collection>,

    /// Snapshot file rewritten after each write
    data_file: Option<PathBuf>,
}

impl MemoryWordStore {
    /// Create an empty, non-persistent store
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            data_file: None,
        }
    }

    /// Open a store backed by `data_file`.
    ///
    /// A missing file starts an empty collection; an unreadable or corrupt
    /// one makes the store unavailable.
    pub async fn open(data_file: impl AsRef<Path>) -> StoreResult<Self> {
        let path = data_file.as_ref().to_path_buf();

        let documents = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let words: Vec<Word> = serde_json::from_str(&content).map_err(|e| {
                    StoreError::Unavailable(format!("corrupt data file {}: {}", path.display(), e))
                })?;
                words.into_iter().map(|w| (w.id.clone(), w)).collect()
            }
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "cannot read data file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::info!(
            path = %path.display(),
            documents = documents.len(),
            "opened word store"
        );

        Ok(Self {
            documents: RwLock::new(documents),
            data_file: Some(path),
        })
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Write `documents` to the data file, if any. Goes through a temp file
    /// so a failed write never truncates the previous snapshot.
    async fn persist(&self, documents: &Collection) -> StoreResult<()> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };

        let mut words: Vec<&Word> = documents.values().collect();
        words.sort_by(|a, b| a.word.cmp(&b.word).then_with(|| a.id.cmp(&b.id)));

        let content = serde_json::to_vec_pretty(&words)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| StoreError::Persistence(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| StoreError::Persistence(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }
}

impl Default for MemoryWordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn to_document(word: &Word) -> StoreResult<Value> {
    serde_json::to_value(word).map_err(|e| StoreError::MalformedQuery(e.to_string()))
}

/// Documents matching `filter`, unordered
fn matching<'a>(documents: &'a Collection, filter: &FilterSet) -> StoreResult<Vec<&'a Word>> {
    let compiled = filter.compile()?;
    let mut matched = Vec::new();

    for word in documents.values() {
        if compiled.matches(&to_document(word)?) {
            matched.push(word);
        }
    }

    Ok(matched)
}

fn sort_words(words: &mut [&Word], order: &OrderBy) -> StoreResult<()> {
    if !fields::is_known(&order.field) {
        return Err(StoreError::MalformedQuery(format!(
            "unknown sort field: {}",
            order.field
        )));
    }

    let mut keyed = Vec::with_capacity(words.len());
    for word in words.iter() {
        let doc = to_document(word)?;
        keyed.push((doc.get(&order.field).cloned().unwrap_or(Value::Null), *word));
    }

    keyed.sort_by(|(a_key, a), (b_key, b)| {
        let cmp = compare_json_values(a_key, b_key).unwrap_or(Ordering::Equal);
        let cmp = if order.ascending { cmp } else { cmp.reverse() };
        cmp.then_with(|| a.id.cmp(&b.id))
    });

    for (slot, (_, word)) in words.iter_mut().zip(keyed) {
        *slot = word;
    }
    Ok(())
}

fn choose(words: &[&Word], size: usize) -> Vec<Word> {
    let mut rng = rand::thread_rng();
    words
        .choose_multiple(&mut rng, size)
        .map(|w| (*w).clone())
        .collect()
}

#[async_trait]
impl WordRepository for MemoryWordStore {
    async fn find(&self, filter: &FilterSet, options: FindOptions) -> StoreResult<Vec<Word>> {
        let documents = self.documents.read().await;
        let mut matched = matching(&documents, filter)?;
        sort_words(&mut matched, &options.sort)?;

        Ok(matched
            .into_iter()
            .skip(options.skip)
            .take(options.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &FilterSet) -> StoreResult<u64> {
        let documents = self.documents.read().await;
        Ok(matching(&documents, filter)?.len() as u64)
    }

    async fn sample(&self, filter: &FilterSet, size: usize) -> StoreResult<Vec<Word>> {
        let documents = self.documents.read().await;
        let matched = matching(&documents, filter)?;
        Ok(choose(&matched, size))
    }

    async fn distinct(&self, field: &str) -> StoreResult<Vec<Value>> {
        if !fields::is_known(field) {
            return Err(StoreError::MalformedQuery(format!(
                "unknown field: {}",
                field
            )));
        }

        let documents = self.documents.read().await;
        let mut values = Vec::new();
        for word in documents.values() {
            if let Some(value) = to_document(word)?.get(field) {
                values.push(value.clone());
            }
        }

        values.sort_by(|a, b| compare_json_values(a, b).unwrap_or(Ordering::Equal));
        values.dedup();
        Ok(values)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Word>> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn insert(&self, word: NewWord) -> StoreResult<Word> {
        let now = Utc::now();
        let stored = Word {
            id: Uuid::new_v4().to_string(),
            word: word.word,
            category: word.category,
            num_letters: word.num_letters,
            num_syllables: word.num_syllables,
            hint: word.hint,
            created_at: now,
            updated_at: now,
        };

        let mut documents = self.documents.write().await;
        let mut next = documents.clone();
        next.insert(stored.id.clone(), stored.clone());
        self.persist(&next).await?;
        *documents = next;

        Ok(stored)
    }

    async fn update_by_id(&self, id: &str, patch: WordPatch) -> StoreResult<Option<Word>> {
        let mut documents = self.documents.write().await;
        if !documents.contains_key(id) {
            return Ok(None);
        }

        let mut next = documents.clone();
        let updated = match next.get_mut(id) {
            Some(word) => {
                patch.apply(word, Utc::now());
                word.clone()
            }
            None => return Ok(None),
        };
        self.persist(&next).await?;
        *documents = next;

        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let mut documents = self.documents.write().await;
        if !documents.contains_key(id) {
            return Ok(false);
        }

        let mut next = documents.clone();
        next.remove(id);
        self.persist(&next).await?;
        *documents = next;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::filter::FilterExpr;
    use serde_json::json;

    fn new_word(word: &str, category: &str, letters: u32) -> NewWord {
        NewWord {
            word: word.to_string(),
            category: category.to_string(),
            num_letters: letters,
            num_syllables: 1,
            hint: format!("hint for {}", word),
        }
    }

    async fn seeded() -> MemoryWordStore {
        let store = MemoryWordStore::new();
        store.insert(new_word("apple", "fruit", 5)).await.unwrap();
        store.insert(new_word("map", "object", 3)).await.unwrap();
        store.insert(new_word("orange", "fruit", 6)).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = MemoryWordStore::new();
        let word = store.insert(new_word("kiwi", "fruit", 4)).await.unwrap();

        assert!(!word.id.is_empty());
        assert_eq!(word.created_at, word.updated_at);
        assert_eq!(store.find_by_id(&word.id).await.unwrap(), Some(word));
    }

    #[tokio::test]
    async fn test_find_sorts_by_word_and_paginates() {
        let store = seeded().await;

        let all = store.find(&FilterSet::new(), FindOptions::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(names, vec!["apple", "map", "orange"]);

        let page = store.find(&FilterSet::new(), FindOptions::page(1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].word, "map");
    }

    #[tokio::test]
    async fn test_find_descending() {
        let store = seeded().await;
        let options = FindOptions {
            sort: OrderBy {
                field: fields::NUM_LETTERS.to_string(),
                ascending: false,
            },
            ..Default::default()
        };

        let words = store.find(&FilterSet::new(), options).await.unwrap();
        assert_eq!(words[0].word, "orange");
        assert_eq!(words[2].word, "map");
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_malformed() {
        let store = seeded().await;
        let options = FindOptions {
            sort: OrderBy::asc("colour"),
            ..Default::default()
        };

        let result = store.find(&FilterSet::new(), options).await;
        assert!(matches!(result, Err(StoreError::MalformedQuery(_))));
    }

    #[tokio::test]
    async fn test_count_and_filter() {
        let store = seeded().await;
        let fruit = FilterSet::new().and(FilterExpr::eq("category", json!("fruit")));

        assert_eq!(store.count(&fruit).await.unwrap(), 2);
        assert_eq!(store.count(&FilterSet::new()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_sample_respects_filter_and_size() {
        let store = seeded().await;
        let fruit = FilterSet::new().and(FilterExpr::eq("category", json!("fruit")));

        for _ in 0..20 {
            let picked = store.sample(&fruit, 1).await.unwrap();
            assert_eq!(picked.len(), 1);
            assert_eq!(picked[0].category, "fruit");
        }

        let none = FilterSet::new().and(FilterExpr::eq("category", json!("color")));
        assert!(store.sample(&none, 1).await.unwrap().is_empty());
        assert_eq!(store.sample(&FilterSet::new(), 10).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_distinct_categories() {
        let store = seeded().await;

        let categories = store.distinct("category").await.unwrap();
        assert_eq!(categories, vec![json!("fruit"), json!("object")]);

        assert!(matches!(
            store.distinct("colour").await,
            Err(StoreError::MalformedQuery(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let store = seeded().await;

        let patch = WordPatch {
            hint: Some("x".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update_by_id("missing", patch).await.unwrap(), None);
        assert!(!store.delete_by_id("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = seeded().await;
        let word = store.insert(new_word("plum", "fruit", 4)).await.unwrap();

        assert!(store.delete_by_id(&word.id).await.unwrap());
        assert!(!store.delete_by_id(&word.id).await.unwrap());
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");

        let id = {
            let store = MemoryWordStore::open(&path).await.unwrap();
            assert!(store.is_empty().await);
            let word = store.insert(new_word("grape", "fruit", 5)).await.unwrap();
            store
                .update_by_id(
                    &word.id,
                    WordPatch {
                        num_syllables: Some(1),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            word.id
        };

        let reopened = MemoryWordStore::open(&path).await.unwrap();
        let word = reopened.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(word.word, "grape");
        assert_eq!(word.num_syllables, 1);
    }

    #[tokio::test]
    async fn test_corrupt_data_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, "not json").unwrap();

        let result = MemoryWordStore::open(&path).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
