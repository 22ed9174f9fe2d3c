// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-action state transitions.
//!
//! A [`DeviceChange`] is what a raw action means for a single device
//! record. Known verbs map to dedicated variants. Anything else becomes a
//! [`DeviceChange::Merge`] of its parameters.
//!
//! # Parameter policy
//!
//! Setter verbs only take a parameter that counts as *provided*. Under the
//! default [`ParamPolicy::Truthy`] the values `0`, `""`, `false` and `null`
//! count as absent, so `set_temp` with `temp: 0` leaves the previous
//! temperature in place. [`ParamPolicy::Presence`] accepts any non-null
//! value instead.
//!
//! ```
//! use homecmd::state::{DeviceChange, DeviceRecord, ParamPolicy};
//! use serde_json::json;
//!
//! let mut record = DeviceRecord::new();
//! record.set("temp", json!(24));
//!
//! let change = DeviceChange::Temperature(Some(json!(0)));
//! change.apply(&mut record, ParamPolicy::Truthy);
//! assert_eq!(record.temp(), Some(24));
//!
//! change.apply(&mut record, ParamPolicy::Presence);
//! assert_eq!(record.temp(), Some(0));
//! ```

use serde_json::Value;

use crate::command::Params;
use crate::types::{PowerStatus, Verb};

use super::DeviceRecord;

/// Brightness given to a light that has never had one.
const DEFAULT_BRIGHTNESS: i64 = 100;

/// Decides whether a parameter value counts as provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamPolicy {
    /// Falsy values (`0`, `""`, `false`, `null`) count as absent.
    #[default]
    Truthy,
    /// Any non-null value counts as provided.
    Presence,
}

impl ParamPolicy {
    /// Returns `true` if `value` should be used.
    #[must_use]
    pub fn provides(self, value: Option<&Value>) -> bool {
        match (self, value) {
            (_, None | Some(Value::Null)) => false,
            (Self::Presence, Some(_)) => true,
            (Self::Truthy, Some(value)) => is_truthy(value),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A concrete mutation of one device record.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceChange {
    /// Switch the device on or off.
    Power(PowerStatus),
    /// Turn on and set `temp` if a value is provided.
    Temperature(Option<Value>),
    /// Turn on and set `brightness`, keeping a prior value or defaulting to 100.
    Brightness(Option<Value>),
    /// Turn on and set `channel` if a value is provided.
    Channel(Option<Value>),
    /// Copy every parameter onto the record; status is untouched.
    Merge(Params),
}

impl DeviceChange {
    /// Normalizes a verb and its parameters into a change.
    #[must_use]
    pub fn from_action(verb: &Verb, params: &Params) -> Self {
        let param = |key: &str| params.get(key).cloned();

        match verb {
            Verb::TurnOn => Self::Power(PowerStatus::On),
            Verb::TurnOff => Self::Power(PowerStatus::Off),
            Verb::SetTemp => Self::Temperature(param(DeviceRecord::TEMP)),
            Verb::SetBrightness => Self::Brightness(param(DeviceRecord::BRIGHTNESS)),
            Verb::SetChannel => Self::Channel(param(DeviceRecord::CHANNEL)),
            Verb::Other(_) => Self::Merge(params.clone()),
        }
    }

    /// Applies the change to a record.
    pub fn apply(&self, record: &mut DeviceRecord, policy: ParamPolicy) {
        match self {
            Self::Power(status) => record.set_status(*status),
            Self::Temperature(value) => {
                record.set_status(PowerStatus::On);
                set_if_provided(record, DeviceRecord::TEMP, value.as_ref(), policy);
            }
            Self::Brightness(value) => {
                record.set_status(PowerStatus::On);
                if !set_if_provided(record, DeviceRecord::BRIGHTNESS, value.as_ref(), policy)
                    && !policy.provides(record.get(DeviceRecord::BRIGHTNESS))
                {
                    record.set(DeviceRecord::BRIGHTNESS, Value::from(DEFAULT_BRIGHTNESS));
                }
            }
            Self::Channel(value) => {
                record.set_status(PowerStatus::On);
                set_if_provided(record, DeviceRecord::CHANNEL, value.as_ref(), policy);
            }
            Self::Merge(params) => {
                for (key, value) in params {
                    record.set(key.clone(), value.clone());
                }
            }
        }
    }
}

fn set_if_provided(
    record: &mut DeviceRecord,
    key: &str,
    value: Option<&Value>,
    policy: ParamPolicy,
) -> bool {
    match value {
        Some(value) if policy.provides(Some(value)) => {
            record.set(key, value.clone());
            true
        }
        _ => false,
    }
}
