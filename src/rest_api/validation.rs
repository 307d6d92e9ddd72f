//! # Word Payload Validation
//!
//! Required-field checks and normalization of create/update bodies.

use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use crate::store::{fields, NewWord, WordPatch};

/// Fields every new word must carry
pub const REQUIRED_WORD_FIELDS: [&str; 5] = [
    fields::WORD,
    fields::CATEGORY,
    fields::NUM_LETTERS,
    fields::NUM_SYLLABLES,
    fields::HINT,
];

/// Fail with the first required key that is absent, null, or blank
pub fn validate_required_fields(body: &Value, required: &[&str]) -> ApiResult<()> {
    for key in required {
        let missing = match body.get(*key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        };
        if missing {
            return Err(ApiError::MissingField(key.to_string()));
        }
    }
    Ok(())
}

/// Normalize whichever word fields are present. Absent fields stay `None`.
///
/// `word` and `category` are trimmed and lowercased, `hint` is trimmed,
/// counts are coerced to positive integers.
pub fn validate_and_transform_word_data(body: &Value) -> ApiResult<WordPatch> {
    let object = as_object(body)?;

    Ok(WordPatch {
        word: lowercase_field(object, fields::WORD)?,
        category: lowercase_field(object, fields::CATEGORY)?,
        num_letters: count_field(object, fields::NUM_LETTERS)?,
        num_syllables: count_field(object, fields::NUM_SYLLABLES)?,
        hint: text_field(object, fields::HINT)?,
    })
}

/// Validate a create body into a complete word
pub fn validate_new_word(body: &Value) -> ApiResult<NewWord> {
    as_object(body)?;
    validate_required_fields(body, &REQUIRED_WORD_FIELDS)?;
    let patch = validate_and_transform_word_data(body)?;

    match patch {
        WordPatch {
            word: Some(word),
            category: Some(category),
            num_letters: Some(num_letters),
            num_syllables: Some(num_syllables),
            hint: Some(hint),
        } => Ok(NewWord {
            word,
            category,
            num_letters,
            num_syllables,
            hint,
        }),
        _ => Err(ApiError::InvalidBody("incomplete word".to_string())),
    }
}

fn as_object(body: &Value) -> ApiResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ApiError::invalid("body", "expected a JSON object"))
}

/// Present and not null
fn supplied<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|v| !v.is_null())
}

fn text_field(object: &Map<String, Value>, field: &str) -> ApiResult<Option<String>> {
    let Some(value) = supplied(object, field) else {
        return Ok(None);
    };

    let text = value
        .as_str()
        .ok_or_else(|| ApiError::invalid(field, "must be a string"))?
        .trim();
    if text.is_empty() {
        return Err(ApiError::invalid(field, "must not be empty"));
    }

    Ok(Some(text.to_string()))
}

fn lowercase_field(object: &Map<String, Value>, field: &str) -> ApiResult<Option<String>> {
    Ok(text_field(object, field)?.map(|text| text.to_lowercase()))
}

fn count_field(object: &Map<String, Value>, field: &str) -> ApiResult<Option<u32>> {
    let Some(value) = supplied(object, field) else {
        return Ok(None);
    };

    let number = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n > 0 && n <= u32::MAX as i64 => Ok(Some(n as u32)),
        Some(_) => Err(ApiError::invalid(field, "must be a positive integer")),
        None => Err(ApiError::invalid(field, "must be a number")),
    }
}
