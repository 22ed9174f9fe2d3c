// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `homecmd` - smart-home command intake.
//!
//! Turns free-text instructions such as *"turn on the bedroom light and set
//! channel 5 in living room"* into structured device actions, applies them
//! to a persisted room/device state document, and keeps an append-only
//! history of every attempt.
//!
//! # Pipeline
//!
//! 1. [`CommandParser`] splits the text into fragments and matches keyword
//!    rules. Only if no fragment matches is the optional remote
//!    [`Fallback`](fallback::Fallback) consulted.
//! 2. Each [`ParsedAction`] is applied by the [`DeviceStateStore`]: the room
//!    key is normalized, unknown devices are created as `{status: "off"}`,
//!    the verb is turned into a [`DeviceChange`](state::DeviceChange), and a
//!    [`HistoryEntry`](state::HistoryEntry) is appended.
//! 3. The whole document is written back after every action.
//!
//! # Quick Start
//!
//! ```no_run
//! use homecmd::config::ServiceConfig;
//!
//! #[tokio::main]
//! async fn main() -> homecmd::Result<()> {
//!     // Reads STATE_FILE, OPENAI_API_KEY, ... from the environment
//!     let service = ServiceConfig::from_env().into_service()?;
//!
//!     let outcome = service
//!         .process("set the bedroom to 22 degrees; dim the living room lights", None)
//!         .await?;
//!
//!     for result in &outcome.results {
//!         println!("{:?} -> ok={}", result.action(), result.is_ok());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Applying actions directly
//!
//! ```no_run
//! use homecmd::command::ParsedAction;
//! use homecmd::store::DeviceStateStore;
//!
//! # fn main() -> Result<(), homecmd::error::StorageError> {
//! let mut store = DeviceStateStore::initialize("./data/state.json")?;
//! let action = ParsedAction::new("bedroom", "ac", "set_temp").with_param("temp", 21);
//!
//! let entry = store.apply_action(&action)?;
//! assert_eq!(entry.new_state().and_then(|d| d.temp()), Some(21));
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod fallback;
pub mod parser;
pub mod service;
pub mod state;
pub mod store;
pub mod types;

pub use command::{ParsedAction, Params};
pub use config::ServiceConfig;
pub use error::{Error, FallbackError, Result, StorageError, ValidationError};
pub use parser::{CommandParser, ParseResult, ParseSource};
pub use service::{CommandService, ProcessOutcome};
pub use state::{DeviceRecord, DeviceState, HistoryEntry, ParamPolicy};
pub use store::DeviceStateStore;
pub use types::{PowerStatus, RoomKey, Verb};
