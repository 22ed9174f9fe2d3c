// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Open attribute bag for a single device.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::PowerStatus;

/// Current state of one device.
///
/// There is no fixed schema: `status` is the only attribute every touched
/// record is guaranteed to carry. Well-known attributes (`temp`,
/// `brightness`, `channel`) have typed accessors, anything else is reached
/// through [`get`](Self::get).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceRecord(Map<String, Value>);

impl DeviceRecord {
    /// Attribute holding the power status.
    pub const STATUS: &'static str = "status";
    /// Attribute holding the target temperature.
    pub const TEMP: &'static str = "temp";
    /// Attribute holding the brightness percentage.
    pub const BRIGHTNESS: &'static str = "brightness";
    /// Attribute holding the TV channel.
    pub const CHANNEL: &'static str = "channel";

    /// Creates the record given to a device seen for the first time.
    #[must_use]
    pub fn new() -> Self {
        let mut attributes = Map::new();
        attributes.insert(Self::STATUS.to_string(), PowerStatus::Off.into());
        Self(attributes)
    }

    /// Wraps an existing attribute map as-is.
    #[must_use]
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }

    /// Returns the power status, if the record holds a valid one.
    #[must_use]
    pub fn status(&self) -> Option<PowerStatus> {
        self.0
            .get(Self::STATUS)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// Sets the power status.
    pub fn set_status(&mut self, status: PowerStatus) {
        self.0.insert(Self::STATUS.to_string(), status.into());
    }

    /// Adds `status: "off"` if the record has no status attribute.
    ///
    /// Returns `true` if the record was repaired.
    pub fn ensure_status(&mut self) -> bool {
        if self.0.contains_key(Self::STATUS) {
            return false;
        }
        self.set_status(PowerStatus::Off);
        true
    }

    /// Gets the target temperature.
    #[must_use]
    pub fn temp(&self) -> Option<i64> {
        self.get(Self::TEMP).and_then(Value::as_i64)
    }

    /// Gets the brightness.
    #[must_use]
    pub fn brightness(&self) -> Option<i64> {
        self.get(Self::BRIGHTNESS).and_then(Value::as_i64)
    }

    /// Gets the channel.
    #[must_use]
    pub fn channel(&self) -> Option<i64> {
        self.get(Self::CHANNEL).and_then(Value::as_i64)
    }

    /// Gets any attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Creates or overwrites an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns all attributes.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl Default for DeviceRecord {
    fn default() -> Self {
        Self::new()
    }
}
