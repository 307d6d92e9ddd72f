//! # Query Parameter Parser
//!
//! Turns list/search/random query parameters into store predicates and
//! pagination bounds. Read paths are permissive: a malformed numeric
//! parameter is ignored rather than rejected.

use std::collections::HashMap;

use serde_json::json;

use super::errors::{ApiError, ApiResult};
use crate::store::{fields, FilterExpr, FilterSet};

/// Maximum number of records that can be returned
pub const MAX_LIMIT: usize = 100;

/// Default limit if not specified
pub const DEFAULT_LIMIT: usize = 10;

/// Minimum length of a search query, after trimming
pub const MIN_SEARCH_LENGTH: usize = 2;

/// Build the predicate for list and random requests.
///
/// Constraints are emitted in a fixed order so equal inputs give equal
/// predicates.
pub fn build_filter(params: &HashMap<String, String>) -> FilterSet {
    let mut filter = FilterSet::new();

    if let Some(category) = params.get("category") {
        let category = category.trim().to_lowercase();
        if !category.is_empty() {
            filter.push(FilterExpr::eq(fields::CATEGORY, json!(category)));
        }
    }

    push_range(&mut filter, params, fields::NUM_LETTERS, "minLetters", "maxLetters");
    push_range(
        &mut filter,
        params,
        fields::NUM_SYLLABLES,
        "minSyllables",
        "maxSyllables",
    );

    filter
}

/// [`build_filter`] plus a case-insensitive substring match of `query` on `word`
pub fn build_search_filter(params: &HashMap<String, String>, query: &str) -> FilterSet {
    build_filter(params).and(FilterExpr::contains(fields::WORD, query))
}

fn push_range(
    filter: &mut FilterSet,
    params: &HashMap<String, String>,
    field: &str,
    min_key: &str,
    max_key: &str,
) {
    if let Some(min) = params.get(min_key).and_then(|v| parse_number(v)) {
        filter.push(FilterExpr::gte(field, json!(min)));
    }
    if let Some(max) = params.get(max_key).and_then(|v| parse_number(v)) {
        filter.push(FilterExpr::lte(field, json!(max)));
    }
}

/// Parse an integer parameter. Anything unparseable counts as absent.
fn parse_number(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Extract and validate the search term `q`
pub fn search_term(params: &HashMap<String, String>) -> ApiResult<String> {
    let query = params.get("q").map(|q| q.trim()).unwrap_or_default();

    if query.is_empty() {
        return Err(ApiError::InvalidQuery(
            "Query parameter 'q' is required".to_string(),
        ));
    }
    if query.chars().count() < MIN_SEARCH_LENGTH {
        return Err(ApiError::InvalidQuery(format!(
            "Query must be at least {} characters",
            MIN_SEARCH_LENGTH
        )));
    }

    Ok(query.to_string())
}

/// Page bounds for list and search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Parse `limit` and `offset`, falling back to defaults when absent or
    /// invalid. `limit` is clamped to [`MAX_LIMIT`].
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let limit = params
            .get("limit")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .map(|limit| limit.min(MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT);

        let offset = params
            .get("offset")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        Self { limit, offset }
    }

    /// Like [`Pagination::from_params`], but `None` when the caller sent
    /// neither `limit` nor `offset`
    pub fn explicit(params: &HashMap<String, String>) -> Option<Self> {
        if params.contains_key("limit") || params.contains_key("offset") {
            Some(Self::from_params(params))
        } else {
            None
        }
    }

    /// Whether more records exist beyond this page
    pub fn has_more(&self, total: u64) -> bool {
        (self.offset as u64).saturating_add(self.limit as u64) < total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FilterOperator;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_params_build_empty_filter() {
        assert!(build_filter(&HashMap::new()).is_empty());
    }

    #[test]
    fn test_category_is_normalized() {
        let filter = build_filter(&params(&[("category", "  Fruit ")]));
        assert_eq!(filter.filters.len(), 1);
        assert_eq!(filter.filters[0].field, "category");
        assert_eq!(filter.filters[0].value, json!("fruit"));
    }

    #[test]
    fn test_letter_range_bounds_matches() {
        let filter = build_filter(&params(&[("minLetters", "3"), ("maxLetters", "6")]));

        assert_eq!(filter.filters.len(), 2);
        assert_eq!(filter.filters[0].operator, FilterOperator::Gte);
        assert_eq!(filter.filters[1].operator, FilterOperator::Lte);

        assert!(filter.matches(&json!({"numLetters": 3})));
        assert!(filter.matches(&json!({"numLetters": 6})));
        assert!(!filter.matches(&json!({"numLetters": 2})));
        assert!(!filter.matches(&json!({"numLetters": 7})));
    }

    #[test]
    fn test_malformed_numbers_are_ignored() {
        let filter = build_filter(&params(&[
            ("minLetters", "abc"),
            ("maxSyllables", "2"),
        ]));

        assert_eq!(filter.filters.len(), 1);
        assert_eq!(filter.filters[0].field, "numSyllables");
    }

    #[test]
    fn test_filter_is_deterministic() {
        let p = params(&[
            ("maxSyllables", "3"),
            ("category", "animal"),
            ("minLetters", "4"),
        ]);
        assert_eq!(build_filter(&p), build_filter(&p.clone()));

        let fields: Vec<_> = build_filter(&p)
            .filters
            .into_iter()
            .map(|f| f.field)
            .collect();
        assert_eq!(fields, vec!["category", "numLetters", "numSyllables"]);
    }

    #[test]
    fn test_search_filter_adds_word_match() {
        let filter = build_search_filter(&params(&[("category", "fruit")]), "ap");
        assert_eq!(filter.filters.len(), 2);
        assert_eq!(filter.filters[1].operator, FilterOperator::Matches);

        assert!(filter.matches(&json!({"word": "apple", "category": "fruit"})));
        assert!(!filter.matches(&json!({"word": "map", "category": "object"})));
    }

    #[test]
    fn test_search_term_validation() {
        assert_eq!(search_term(&params(&[("q", " ap ")])).unwrap(), "ap");
        assert!(matches!(
            search_term(&params(&[("q", "a")])),
            Err(ApiError::InvalidQuery(_))
        ));
        assert!(matches!(
            search_term(&params(&[("q", "   ")])),
            Err(ApiError::InvalidQuery(_))
        ));
        assert!(matches!(
            search_term(&HashMap::new()),
            Err(ApiError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_pagination_parsing() {
        assert_eq!(
            Pagination::from_params(&params(&[("limit", "5"), ("offset", "10")])),
            Pagination { limit: 5, offset: 10 }
        );
        assert_eq!(
            Pagination::from_params(&HashMap::new()),
            Pagination { limit: 10, offset: 0 }
        );
        assert_eq!(Pagination::from_params(&params(&[("limit", "abc")])).limit, 10);
        assert_eq!(Pagination::from_params(&params(&[("limit", "0")])).limit, 10);
        assert_eq!(Pagination::from_params(&params(&[("offset", "-4")])).offset, 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let page = Pagination::from_params(&params(&[("limit", "5000")]));
        assert_eq!(page.limit, MAX_LIMIT);
    }

    #[test]
    fn test_explicit_pagination() {
        assert_eq!(Pagination::explicit(&HashMap::new()), None);
        assert_eq!(
            Pagination::explicit(&params(&[("offset", "2")])),
            Some(Pagination { limit: 10, offset: 2 })
        );
    }

    #[test]
    fn test_has_more() {
        let last = Pagination { limit: 10, offset: 20 };
        assert!(!last.has_more(25));

        let middle = Pagination { limit: 10, offset: 10 };
        assert!(middle.has_more(25));

        let exact = Pagination { limit: 10, offset: 10 };
        assert!(!exact.has_more(20));
    }
}
