//! # Response Formatting
//!
//! Response bodies shared by the v1 and v2 routes, and their cache hints.

use serde::Serialize;

use super::parser::Pagination;
use crate::store::Word;

/// Cache hint for word lists
pub const CACHE_LIST: &str = "public, s-maxage=300, stale-while-revalidate=600";

/// Cache hint for a single word
pub const CACHE_WORD: &str = "public, s-maxage=600, stale-while-revalidate=1200";

/// Cache hint for the category list
pub const CACHE_CATEGORIES: &str = "public, s-maxage=900, stale-while-revalidate=1800";

/// Random picks must never be served from a cache
pub const CACHE_NONE: &str = "no-store";

/// Pagination envelope metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: u64, page: Pagination) -> Self {
        Self {
            total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.has_more(total),
        }
    }
}

/// One page of words with its total
#[derive(Debug, Clone)]
pub struct WordPage {
    pub words: Vec<Word>,
    pub total: u64,
    pub page: Pagination,
}

/// v2 list response
#[derive(Debug, Clone, Serialize)]
pub struct WordListResponse {
    pub words: Vec<Word>,
    pub pagination: PaginationMeta,
}

impl From<WordPage> for WordListResponse {
    fn from(page: WordPage) -> Self {
        Self {
            pagination: PaginationMeta::new(page.total, page.page),
            words: page.words,
        }
    }
}

/// Search response, both versions
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub words: Vec<Word>,
    pub pagination: PaginationMeta,
    pub query: String,
}

impl SearchResponse {
    pub fn new(query: String, page: WordPage) -> Self {
        Self {
            pagination: PaginationMeta::new(page.total, page.page),
            words: page.words,
            query,
        }
    }
}

/// Delete confirmation
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub id: String,
}

impl MessageResponse {
    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            message: "Word deleted successfully".to_string(),
            id: id.into(),
        }
    }
}

/// Feature-flag introspection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub destructive_endpoints_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_serialization() {
        let meta = PaginationMeta::new(25, Pagination { limit: 10, offset: 10 });

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["total"], 25);
        assert_eq!(json["limit"], 10);
        assert_eq!(json["offset"], 10);
        assert_eq!(json["hasMore"], true);
    }

    #[test]
    fn test_last_page_has_no_more() {
        let meta = PaginationMeta::new(25, Pagination { limit: 10, offset: 20 });
        assert!(!meta.has_more);
    }

    #[test]
    fn test_config_response_serialization() {
        let json = serde_json::to_value(ConfigResponse {
            destructive_endpoints_enabled: false,
        })
        .unwrap();
        assert_eq!(json["destructiveEndpointsEnabled"], false);
    }
}
