// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power status of a device.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents the power status stored in a device record.
///
/// # Examples
///
/// ```
/// use homecmd::types::PowerStatus;
///
/// assert_eq!(PowerStatus::On.as_str(), "on");
/// assert_eq!("OFF".parse::<PowerStatus>(), Ok(PowerStatus::Off));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerStatus {
    /// Device is off. New devices start here.
    #[default]
    Off,
    /// Device is on.
    On,
}

impl PowerStatus {
    /// Returns the string stored in the persisted document.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }
}

impl fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "0" | "false" => Ok(Self::Off),
            "on" | "1" | "true" => Ok(Self::On),
            _ => Err(format!("invalid power status: {s}")),
        }
    }
}

impl From<bool> for PowerStatus {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<PowerStatus> for serde_json::Value {
    fn from(status: PowerStatus) -> Self {
        Self::String(status.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serde() {
        assert_eq!(
            serde_json::to_value(PowerStatus::On).unwrap(),
            serde_json::json!("on")
        );
        assert_eq!(
            serde_json::to_value(PowerStatus::Off).unwrap(),
            serde_json::json!("off")
        );
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("On".parse::<PowerStatus>(), Ok(PowerStatus::On));
        assert_eq!("false".parse::<PowerStatus>(), Ok(PowerStatus::Off));
        assert!("dim".parse::<PowerStatus>().is_err());
    }

    #[test]
    fn default_is_off() {
        assert_eq!(PowerStatus::default(), PowerStatus::Off);
        assert_eq!(PowerStatus::from(true), PowerStatus::On);
    }
}
