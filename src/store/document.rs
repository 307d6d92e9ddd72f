//! # Word Documents
//!
//! The persisted `Word` entity and the write-side shapes the store accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON field names of a word document, as seen by predicates.
pub mod fields {
    pub const ID: &str = "id";
    pub const WORD: &str = "word";
    pub const CATEGORY: &str = "category";
    pub const NUM_LETTERS: &str = "numLetters";
    pub const NUM_SYLLABLES: &str = "numSyllables";
    pub const HINT: &str = "hint";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";

    /// Every field a predicate, sort or distinct may name
    pub const ALL: [&str; 8] = [
        ID,
        WORD,
        CATEGORY,
        NUM_LETTERS,
        NUM_SYLLABLES,
        HINT,
        CREATED_AT,
        UPDATED_AT,
    ];

    pub fn is_known(field: &str) -> bool {
        ALL.contains(&field)
    }
}

/// A stored word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Store-assigned identifier
    pub id: String,

    pub word: String,

    pub category: String,

    pub num_letters: u32,

    pub num_syllables: u32,

    pub hint: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// A word about to be inserted. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWord {
    pub word: String,
    pub category: String,
    pub num_letters: u32,
    pub num_syllables: u32,
    pub hint: String,
}

/// Field-level update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPatch {
    pub word: Option<String>,
    pub category: Option<String>,
    pub num_letters: Option<u32>,
    pub num_syllables: Option<u32>,
    pub hint: Option<String>,
}

impl WordPatch {
    /// True when the patch would not change any field
    pub fn is_empty(&self) -> bool {
        self.word.is_none()
            && self.category.is_none()
            && self.num_letters.is_none()
            && self.num_syllables.is_none()
            && self.hint.is_none()
    }

    /// Merge the supplied fields into `word` and bump `updated_at`
    pub fn apply(&self, word: &mut Word, now: DateTime<Utc>) {
        if let Some(value) = &self.word {
            word.word = value.clone();
        }
        if let Some(value) = &self.category {
            word.category = value.clone();
        }
        if let Some(value) = self.num_letters {
            word.num_letters = value;
        }
        if let Some(value) = self.num_syllables {
            word.num_syllables = value;
        }
        if let Some(value) = &self.hint {
            word.hint = value.clone();
        }
        word.updated_at = now;
    }
}
