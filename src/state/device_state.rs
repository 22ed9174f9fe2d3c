// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room to device mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::RoomKey;

use super::DeviceRecord;

/// Devices of a single room, keyed by device identifier.
pub type RoomDevices = BTreeMap<String, DeviceRecord>;

/// State of every known device, grouped by room.
///
/// Rooms and devices are created lazily the first time an action targets
/// them. Room keys are always normalized (see [`RoomKey`]).
///
/// # Examples
///
/// ```
/// use homecmd::state::DeviceState;
/// use homecmd::types::{PowerStatus, RoomKey};
///
/// let mut state = DeviceState::new();
/// let fan = state.device_entry(RoomKey::normalize("Guest Room"), "fan");
/// assert_eq!(fan.status(), Some(PowerStatus::Off));
/// assert!(state.device("guest_room", "fan").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceState {
    rooms: BTreeMap<RoomKey, RoomDevices>,
}

impl DeviceState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the default state written when no document exists yet.
    ///
    /// Two rooms: `bedroom` with an `ac` and a `light`, and `living_room`
    /// with a `tv` and a `light`. Everything is off.
    #[must_use]
    pub fn seeded() -> Self {
        let record = |value: Value| {
            DeviceRecord::from_attributes(value.as_object().cloned().unwrap_or_default())
        };

        let mut bedroom = RoomDevices::new();
        bedroom.insert("ac".to_string(), record(json!({ "status": "off", "temp": null })));
        bedroom.insert(
            "light".to_string(),
            record(json!({ "status": "off", "brightness": 100 })),
        );

        let mut living_room = RoomDevices::new();
        living_room.insert(
            "tv".to_string(),
            record(json!({ "status": "off", "channel": null })),
        );
        living_room.insert(
            "light".to_string(),
            record(json!({ "status": "off", "brightness": 100 })),
        );

        let mut rooms = BTreeMap::new();
        rooms.insert(RoomKey::normalize("bedroom"), bedroom);
        rooms.insert(RoomKey::normalize("living_room"), living_room);
        Self { rooms }
    }

    /// Gets the devices of a room.
    #[must_use]
    pub fn room(&self, room: &str) -> Option<&RoomDevices> {
        self.rooms.get(room)
    }

    /// Gets a single device record.
    #[must_use]
    pub fn device(&self, room: &str, device: &str) -> Option<&DeviceRecord> {
        self.room(room).and_then(|devices| devices.get(device))
    }

    /// Returns the record for `device` in `room`, creating either if absent.
    ///
    /// A fresh record is `{status: "off"}`. An existing record without a
    /// status is repaired the same way.
    pub fn device_entry(&mut self, room: RoomKey, device: &str) -> &mut DeviceRecord {
        let record = self
            .rooms
            .entry(room)
            .or_default()
            .entry(device.to_string())
            .or_default();
        record.ensure_status();
        record
    }

    /// Iterates over rooms in key order.
    pub fn rooms(&self) -> impl Iterator<Item = (&RoomKey, &RoomDevices)> {
        self.rooms.iter()
    }

    /// Returns `true` if no room is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
