//! # Predicate AST
//!
//! Store-level filter expressions evaluated against word documents.

use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use super::repository::{StoreError, StoreResult};

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equals
    Eq,

    /// Greater than or equal
    Gte,

    /// Less than or equal
    Lte,

    /// Case-insensitive regular expression match on a string field
    Matches,
}

/// A filter expression
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    /// Field to filter on
    pub field: String,

    /// Comparison operator
    pub operator: FilterOperator,

    /// Value to compare against
    pub value: Value,
}

impl FilterExpr {
    /// Create a new filter expression
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    /// Create a greater than or equal filter
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Gte, value)
    }

    /// Create a less than or equal filter
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Lte, value)
    }

    /// Case-insensitive substring match. `text` is matched literally.
    pub fn contains(field: impl Into<String>, text: &str) -> Self {
        Self::new(
            field,
            FilterOperator::Matches,
            Value::String(regex::escape(text)),
        )
    }

    /// Check if a document matches this filter.
    ///
    /// `Matches` compiles its pattern on every call; use [`FilterSet::compile`]
    /// when evaluating many documents.
    pub fn matches(&self, doc: &Value) -> bool {
        if self.operator == FilterOperator::Matches {
            return match self.value.as_str().map(compile_pattern) {
                Some(Ok(regex)) => matches_pattern(doc, &self.field, &regex),
                _ => false,
            };
        }

        let field_value = match doc.get(&self.field) {
            Some(v) => v,
            None => return false,
        };

        match self.operator {
            FilterOperator::Eq => field_value == &self.value,
            FilterOperator::Gte => matches!(
                compare_json_values(field_value, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOperator::Lte => matches!(
                compare_json_values(field_value, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOperator::Matches => false,
        }
    }
}

/// Order two JSON scalars. Mixed or non-scalar types are unordered.
pub fn compare_json_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64()?;
            let b = b.as_f64()?;
            a.partial_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

fn matches_pattern(doc: &Value, field: &str, regex: &Regex) -> bool {
    doc.get(field)
        .and_then(Value::as_str)
        .map(|s| regex.is_match(s))
        .unwrap_or(false)
}

/// A set of filters combined with AND logic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub filters: Vec<FilterExpr>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, filter: FilterExpr) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn push(&mut self, filter: FilterExpr) {
        self.filters.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Check if a document matches all filters
    pub fn matches(&self, doc: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }

    /// Validate the predicate and precompile its patterns.
    pub fn compile(&self) -> StoreResult<CompiledFilter<'_>> {
        let mut checks = Vec::with_capacity(self.filters.len());

        for filter in &self.filters {
            if filter.operator != FilterOperator::Matches {
                checks.push(Check::Value(filter));
                continue;
            }

            let pattern = filter.value.as_str().ok_or_else(|| {
                StoreError::MalformedQuery(format!(
                    "pattern for '{}' must be a string",
                    filter.field
                ))
            })?;
            let regex = compile_pattern(pattern).map_err(|e| {
                StoreError::MalformedQuery(format!("invalid pattern for '{}': {}", filter.field, e))
            })?;

            checks.push(Check::Pattern {
                field: &filter.field,
                regex,
            });
        }

        Ok(CompiledFilter { checks })
    }
}

enum Check<'a> {
    Value(&'a FilterExpr),
    Pattern { field: &'a str, regex: Regex },
}

/// A [`FilterSet`] ready to be evaluated against many documents
pub struct CompiledFilter<'a> {
    checks: Vec<Check<'a>>,
}

impl CompiledFilter<'_> {
    pub fn matches(&self, doc: &Value) -> bool {
        self.checks.iter().all(|check| match check {
            Check::Value(expr) => expr.matches(doc),
            Check::Pattern { field, regex } => matches_pattern(doc, field, regex),
        })
    }
}
