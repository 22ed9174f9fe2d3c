// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized room identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// A room identifier in its normalized form.
///
/// Every run of whitespace becomes a single `_` and the result is
/// lowercased, so `"Living Room"` and `"living   room"` both map to
/// `living_room`. Surrounding whitespace is not trimmed.
///
/// # Examples
///
/// ```
/// use homecmd::types::RoomKey;
///
/// assert_eq!(RoomKey::normalize("Living Room").as_str(), "living_room");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(String);

impl RoomKey {
    /// Normalizes a free-form room name into a key.
    #[must_use]
    pub fn normalize(room: &str) -> Self {
        Self(WHITESPACE_RUN.replace_all(room, "_").to_lowercase())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RoomKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RoomKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_joins() {
        assert_eq!(RoomKey::normalize("Living Room").as_str(), "living_room");
        assert_eq!(RoomKey::normalize("BEDROOM").as_str(), "bedroom");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(RoomKey::normalize("guest \t bath").as_str(), "guest_bath");
        assert_eq!(RoomKey::normalize(" hall").as_str(), "_hall");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = RoomKey::normalize("Living Room");
        assert_eq!(RoomKey::normalize(once.as_str()), once);
    }
}
