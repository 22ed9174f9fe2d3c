// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state types.
//!
//! [`DeviceState`] maps room keys to devices, each device being an open
//! [`DeviceRecord`]. A [`DeviceChange`] is the normalized mutation derived
//! from a parsed action, and every apply attempt leaves a [`HistoryEntry`].
//!
//! # Examples
//!
//! ```
//! use homecmd::state::{DeviceChange, DeviceRecord, ParamPolicy};
//! use homecmd::types::{PowerStatus, Verb};
//!
//! let mut record = DeviceRecord::new();
//! let params = serde_json::Map::new();
//!
//! DeviceChange::from_action(&Verb::SetBrightness, &params)
//!     .apply(&mut record, ParamPolicy::Truthy);
//!
//! assert_eq!(record.status(), Some(PowerStatus::On));
//! assert_eq!(record.brightness(), Some(100));
//! ```

mod device_record;
mod device_state;
mod history;
mod state_change;

pub use device_record::DeviceRecord;
pub use device_state::{DeviceState, RoomDevices};
pub use history::HistoryEntry;
pub use state_change::{DeviceChange, ParamPolicy};
