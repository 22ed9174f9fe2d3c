// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured device actions.
//!
//! A [`ParsedAction`] is the unit the [`CommandParser`](crate::parser::CommandParser)
//! emits and the [`DeviceStateStore`](crate::store::DeviceStateStore) consumes.
//! Fields are optional on purpose: actions coming back from the remote
//! fallback may omit any of them, and the store turns such actions into
//! failed history entries instead of rejecting the whole batch.
//!
//! # Examples
//!
//! ```
//! use homecmd::command::ParsedAction;
//!
//! let action = ParsedAction::new("bedroom", "ac", "set_temp").with_param("temp", 22);
//! assert_eq!(action.params["temp"], 22);
//! assert!(action.required_fields().is_ok());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Open parameter map carried by an action.
pub type Params = Map<String, Value>;

/// A single structured instruction for one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedAction {
    /// Room name, normalized by the store before use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Device identifier within the room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Verb, e.g. `turn_on` or `set_channel`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Verb parameters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Params,
    /// The text fragment this action came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ParsedAction {
    /// Creates an action with all required fields set and no parameters.
    #[must_use]
    pub fn new(
        room: impl Into<String>,
        device: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            room: Some(room.into()),
            device: Some(device.into()),
            action: Some(action.into()),
            params: Params::new(),
            raw: None,
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets the source text fragment.
    #[must_use]
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Returns `(room, device, action)` if all three are present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] otherwise.
    pub fn required_fields(&self) -> Result<(&str, &str, &str), ValidationError> {
        fn present(field: Option<&str>) -> Option<&str> {
            field.filter(|s| !s.is_empty())
        }

        match (
            present(self.room.as_deref()),
            present(self.device.as_deref()),
            present(self.action.as_deref()),
        ) {
            (Some(room), Some(device), Some(action)) => Ok((room, device, action)),
            _ => Err(ValidationError::MissingFields),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
