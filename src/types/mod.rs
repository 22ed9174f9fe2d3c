// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core vocabulary types.
//!
//! - [`PowerStatus`]: the `"on"`/`"off"` value every device record carries
//! - [`RoomKey`]: a normalized room identifier
//! - [`Verb`]: the action a [`ParsedAction`](crate::command::ParsedAction) requests

mod power;
mod room;
mod verb;

pub use power::PowerStatus;
pub use room::RoomKey;
pub use verb::Verb;
