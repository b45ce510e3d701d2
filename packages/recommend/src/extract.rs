//! Locates, parses and filters the JSON array in a raw completion.
//!
//! Models wrap their answer in prose or Markdown fences often enough that
//! the whole completion can't be parsed directly. Instead the text is
//! scanned for balanced top-level `[...]` spans (brackets inside JSON
//! strings don't count) and the first span that parses wins.

use serde_json::Value;
use smarthood_neighborhood_models::{NeighborhoodRecord, lenient};
use thiserror::Error;

/// Reasons a completion can't be turned into recommendations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The text contains no balanced `[...]` span.
    #[error("No JSON array found in model response")]
    NoArrayFound,

    /// No candidate span is valid JSON.
    #[error("Malformed JSON in model response: {message}")]
    MalformedJson {
        /// Parser error for the first candidate.
        message: String,
    },

    /// The parsed array is empty.
    #[error("Model returned no neighborhoods")]
    NotAListOrEmpty,

    /// Every element had a falsy name, city or match score.
    #[error("No valid neighborhoods after filtering {discarded} entries")]
    EmptyAfterFiltering {
        /// Number of elements dropped.
        discarded: usize,
    },
}

/// Extracts the recommended neighborhoods from a raw completion.
///
/// # Errors
///
/// Returns an [`ExtractError`] describing the first stage that failed.
pub fn extract(raw: &str) -> Result<Vec<NeighborhoodRecord>, ExtractError> {
    let spans = array_spans(raw);
    if spans.is_empty() {
        return Err(ExtractError::NoArrayFound);
    }

    let mut first_error = None;
    let mut parsed = None;
    for span in spans {
        match serde_json::from_str::<Value>(span) {
            Ok(value) => {
                parsed = Some(value);
                break;
            }
            Err(e) => {
                first_error.get_or_insert_with(|| e.to_string());
            }
        }
    }

    let Some(value) = parsed else {
        return Err(ExtractError::MalformedJson {
            message: first_error.unwrap_or_default(),
        });
    };

    let elements = match value {
        Value::Array(elements) if !elements.is_empty() => elements,
        _ => return Err(ExtractError::NotAListOrEmpty),
    };

    let total = elements.len();
    let records: Vec<NeighborhoodRecord> = elements.into_iter().filter_map(accept).collect();

    if records.is_empty() {
        return Err(ExtractError::EmptyAfterFiltering { discarded: total });
    }

    if records.len() < total {
        log::debug!(
            "Discarded {} of {total} model entries missing required fields",
            total - records.len()
        );
    }

    Ok(records)
}

/// Keeps elements whose `name`, `city` and `matchScore` are truthy. Every
/// other field is optional and read leniently, so the element is
/// returned as the model wrote it.
fn accept(element: Value) -> Option<NeighborhoodRecord> {
    let required_present = ["name", "city", "matchScore"]
        .iter()
        .all(|key| element.get(key).is_some_and(lenient::is_truthy));
    if !required_present {
        return None;
    }

    match serde_json::from_value::<NeighborhoodRecord>(element) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("Dropping undecodable model entry: {e}");
            None
        }
    }
}

/// Returns every balanced top-level `[...]` span, in order of appearance.
///
/// An opening bracket that is never closed is skipped and scanning resumes
/// just after it.
#[must_use]
pub fn array_spans(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = bytes[cursor..].iter().position(|&b| b == b'[') {
        let start = cursor + offset;
        match matching_close(bytes, start) {
            Some(end) => {
                spans.push(&text[start..=end]);
                cursor = end + 1;
            }
            None => cursor = start + 1,
        }
    }

    spans
}

/// Index of the `]` closing the `[` at `start`.
fn matching_close(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
