// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Action extraction from free-form completion text.

use serde::Deserialize;
use serde_json::Value;

use crate::command::ParsedAction;
use crate::error::FallbackError;

/// Extracts actions from a completion that may wrap JSON in prose.
///
/// The whole trimmed text is tried first. Otherwise a leading array is
/// taken from the first `[` to the last `]`, and an object from the first
/// `{` to the last `}`. If that span does not parse (e.g. prose after the
/// object contains braces), the first complete JSON value starting at the
/// first `{` is used.
///
/// An object with an `actions` array yields those actions. Any other object
/// is taken as a single action, and a bare array as the action list itself.
/// Elements that are not action-shaped become an empty action carrying the
/// element as `raw`, so validation rejects each of them individually.
///
/// # Errors
///
/// Returns [`FallbackError::MalformedResponse`] if no JSON can be found or
/// the JSON is neither an object nor an array.
pub fn actions_from_completion(completion: &str) -> Result<Vec<ParsedAction>, FallbackError> {
    let value = locate_json(completion)
        .ok_or_else(|| FallbackError::MalformedResponse("no JSON object found".to_string()))?;

    let items = match value {
        Value::Object(mut object) => match object.remove("actions") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                object.insert("actions".to_string(), other);
                vec![Value::Object(object)]
            }
            None => vec![Value::Object(object)],
        },
        Value::Array(items) => items,
        other => {
            return Err(FallbackError::MalformedResponse(format!(
                "expected an object, got {other}"
            )));
        }
    };

    Ok(items.iter().map(action_from_value).collect())
}

fn action_from_value(value: &Value) -> ParsedAction {
    ParsedAction::deserialize(value).unwrap_or_else(|e| {
        tracing::debug!("Ill-typed action {value}: {e}");
        ParsedAction {
            raw: Some(value.to_string()),
            ..ParsedAction::default()
        }
    })
}

fn locate_json(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Some(value);
    }

    if let Some(value) = span(text, '[', ']') {
        return Some(value);
    }

    let start = text.find('{')?;
    span(text, '{', '}').or_else(|| {
        serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<Value>()
            .next()
            .and_then(Result::ok)
    })
}

/// Parses `text` between the first `open` and the last `close`, but only
/// when `open` is the first bracket of either kind.
fn span(text: &str, open: char, close: char) -> Option<Value> {
    let start = text.find(['{', '['])?;
    let end = text.rfind(close)?;
    if !text[start..].starts_with(open) || end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
