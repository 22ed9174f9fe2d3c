// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Action verbs.

use std::fmt;

/// The verb of a parsed action.
///
/// Matching is case-sensitive: `"TURN_ON"` is a [`Verb::Other`] verb and
/// gets the generic parameter merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `turn_on`
    TurnOn,
    /// `turn_off`
    TurnOff,
    /// `set_temp`
    SetTemp,
    /// `set_brightness`
    SetBrightness,
    /// `set_channel`
    SetChannel,
    /// Any other verb.
    Other(String),
}

impl Verb {
    /// Parses a verb from its wire name.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "turn_on" => Self::TurnOn,
            "turn_off" => Self::TurnOff,
            "set_temp" => Self::SetTemp,
            "set_brightness" => Self::SetBrightness,
            "set_channel" => Self::SetChannel,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire name of the verb.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
            Self::SetTemp => "set_temp",
            Self::SetBrightness => "set_brightness",
            Self::SetChannel => "set_channel",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_verbs_round_trip() {
        for name in ["turn_on", "turn_off", "set_temp", "set_brightness", "set_channel"] {
            let verb = Verb::parse(name);
            assert!(!matches!(verb, Verb::Other(_)));
            assert_eq!(verb.as_str(), name);
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(Verb::parse("Turn_On"), Verb::Other("Turn_On".to_string()));
    }
}
