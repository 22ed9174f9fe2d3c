// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Action history records.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::RoomKey;

use super::DeviceRecord;

/// Immutable log record of one apply attempt.
///
/// Successful entries carry the normalized room, the device, the verb and a
/// snapshot of the device record after the change. Rejected entries carry
/// only the validation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    new_state: Option<DeviceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
    #[serde(default)]
    timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl HistoryEntry {
    /// Records a successfully applied action.
    #[must_use]
    pub fn applied(
        room: &RoomKey,
        device: &str,
        action: &str,
        new_state: DeviceRecord,
        raw: Option<String>,
    ) -> Self {
        Self {
            ok: true,
            room: Some(room.as_str().to_string()),
            device: Some(device.to_string()),
            action: Some(action.to_string()),
            new_state: Some(new_state),
            raw,
            timestamp: now(),
            message: None,
        }
    }

    /// Records an action rejected by validation.
    #[must_use]
    pub fn rejected(error: &ValidationError, raw: Option<String>) -> Self {
        Self {
            ok: false,
            room: None,
            device: None,
            action: None,
            new_state: None,
            raw,
            timestamp: now(),
            message: Some(error.to_string()),
        }
    }

    /// Returns `true` if the action was applied.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Normalized room key of an applied action.
    #[must_use]
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Device of an applied action.
    #[must_use]
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    /// Verb of an applied action.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Device record right after the change.
    #[must_use]
    pub fn new_state(&self) -> Option<&DeviceRecord> {
        self.new_state.as_ref()
    }

    /// Source text fragment, if known.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// ISO-8601 UTC time the entry was created.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Rejection reason.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
