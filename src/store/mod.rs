// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted device state and action history.
//!
//! The store owns a single JSON document: every top-level key is a room,
//! except the reserved `__history` key which holds the append-only list of
//! [`HistoryEntry`](crate::state::HistoryEntry) records. The document is
//! loaded once, mutated in memory, and rewritten after every applied action.
//!
//! # Examples
//!
//! ```no_run
//! use homecmd::command::ParsedAction;
//! use homecmd::store::DeviceStateStore;
//!
//! # fn main() -> Result<(), homecmd::error::StorageError> {
//! let mut store = DeviceStateStore::initialize("./data/state.json")?;
//!
//! let entry = store.apply_action(&ParsedAction::new("Living Room", "tv", "turn_on"))?;
//! assert!(entry.is_ok());
//! assert_eq!(entry.room(), Some("living_room"));
//! # Ok(())
//! # }
//! ```

mod device_store;
mod document;

pub use device_store::DeviceStateStore;
pub use document::HISTORY_KEY;
