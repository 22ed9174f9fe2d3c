// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic keyword rules.
//!
//! Text is lowercased and split on `;` and the standalone word `and`. Each
//! fragment is matched on its own; the first rule that fires decides the
//! action, and fragments no rule recognizes are dropped.
//!
//! Rule order per fragment:
//!
//! 1. `turn on` / `turn off` (also `switch on`, `switch the ... on`)
//! 2. two-digit number with `set` or `to` -> `set_temp` on `ac`
//! 3. `dim`, `brightness` or `NN%` -> `set_brightness` on `light`
//! 4. `channel N` -> `set_channel` on `tv`
//! 5. bare `on` / `off` substring

use std::sync::LazyLock;

use regex::Regex;

use crate::command::ParsedAction;
use crate::state::DeviceRecord;
use crate::types::{RoomKey, Verb};

/// Rooms recognized by substring, in priority order.
const ROOMS: [&str; 5] = ["bedroom", "living room", "living_room", "kitchen", "hall"];

const DEFAULT_ROOM: &str = "living_room";
const DEFAULT_BRIGHTNESS: u64 = 50;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect("static pattern"));
    };
}

pattern!(SEPARATOR, r";|\band\b");
pattern!(TURN, r"turn (on|off)");
pattern!(TURN_ON, r"turn on|switch on|switch the .*on");
pattern!(TEMPERATURE, r"([0-9]{2})\s?(?:°c|c|degrees|degree)?");
pattern!(PERCENT, r"([0-9]{1,3})\s?%");
pattern!(CHANNEL, r"channel\s?([0-9]{1,3})");

/// Parses every fragment of `text`, keeping the ones that yield an action.
#[must_use]
pub fn parse(text: &str) -> Vec<ParsedAction> {
    let lowered = text.to_lowercase();
    SEPARATOR
        .split(&lowered)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .filter_map(parse_fragment)
        .collect()
}

/// Parses a single lowercased fragment.
#[must_use]
pub fn parse_fragment(fragment: &str) -> Option<ParsedAction> {
    let room = detect_room(fragment);
    let device = detect_device(fragment);
    let action = |device: &str, verb: Verb| {
        ParsedAction::new(room.as_str(), device, verb.as_str()).with_raw(fragment)
    };

    if TURN.is_match(fragment) {
        let verb = if TURN_ON.is_match(fragment) {
            Verb::TurnOn
        } else {
            Verb::TurnOff
        };
        return Some(action(device, verb));
    }

    if let Some(temp) = capture_number(&TEMPERATURE, fragment)
        && (fragment.contains("set") || fragment.contains("to"))
    {
        return Some(action("ac", Verb::SetTemp).with_param(DeviceRecord::TEMP, temp));
    }

    let percent = capture_number(&PERCENT, fragment);
    if fragment.contains("dim") || fragment.contains("brightness") || percent.is_some() {
        let brightness = percent.unwrap_or(DEFAULT_BRIGHTNESS);
        return Some(
            action("light", Verb::SetBrightness).with_param(DeviceRecord::BRIGHTNESS, brightness),
        );
    }

    if let Some(channel) = capture_number(&CHANNEL, fragment) {
        return Some(action("tv", Verb::SetChannel).with_param(DeviceRecord::CHANNEL, channel));
    }

    if fragment.contains("on") {
        Some(action(device, Verb::TurnOn))
    } else if fragment.contains("off") {
        Some(action(device, Verb::TurnOff))
    } else {
        None
    }
}

fn detect_room(fragment: &str) -> RoomKey {
    let room = ROOMS
        .iter()
        .find(|room| fragment.contains(*room))
        .copied()
        .unwrap_or(DEFAULT_ROOM);
    RoomKey::normalize(room)
}

fn detect_device(fragment: &str) -> &'static str {
    if fragment.contains("ac") || fragment.contains("air conditioner") {
        "ac"
    } else if fragment.contains("light") || fragment.contains("lamp") {
        "light"
    } else if fragment.contains("tv") {
        "tv"
    } else if fragment.contains("fan") {
        "fan"
    } else {
        "light"
    }
}

fn capture_number(pattern: &Regex, fragment: &str) -> Option<u64> {
    pattern.captures(fragment)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn single(fragment: &str) -> ParsedAction {
        parse_fragment(fragment).unwrap()
    }

    fn summary(action: &ParsedAction) -> (&str, &str, &str) {
        action.required_fields().unwrap()
    }

    #[test]
    fn splits_on_and_and_semicolon() {
        let actions = parse("turn on the bedroom light and set channel 5 in living room");
        assert_eq!(actions.len(), 2);
        assert_eq!(summary(&actions[0]), ("bedroom", "light", "turn_on"));
        assert!(actions[0].params.is_empty());
        assert_eq!(summary(&actions[1]), ("living_room", "tv", "set_channel"));
        assert_eq!(actions[1].params["channel"], json!(5));

        let actions = parse("turn off the fan; turn on the kitchen lamp");
        assert_eq!(actions.len(), 2);
        assert_eq!(summary(&actions[1]), ("kitchen", "light", "turn_on"));
    }

    #[test]
    fn and_inside_a_word_does_not_split() {
        let actions = parse("turn on the brand new lamp");
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn raw_is_the_lowercased_fragment() {
        let actions = parse("Turn ON the Hall light");
        assert_eq!(actions[0].raw.as_deref(), Some("turn on the hall light"));
        assert_eq!(summary(&actions[0]), ("hall", "light", "turn_on"));
    }

    #[test]
    fn room_defaults_to_living_room() {
        assert_eq!(single("turn on the fan").room.as_deref(), Some("living_room"));
        assert_eq!(single("living area lamp off").room.as_deref(), Some("living_room"));
    }

    #[test]
    fn device_detection_order() {
        assert_eq!(single("turn on the air conditioner").device.as_deref(), Some("ac"));
        assert_eq!(single("turn on the tv").device.as_deref(), Some("tv"));
        assert_eq!(single("turn off everything").device.as_deref(), Some("light"));
    }

    #[test]
    fn switch_on_variants() {
        assert_eq!(single("turn off the lamp").action.as_deref(), Some("turn_off"));
        assert_eq!(
            single("turn off the tv, no, switch on").action.as_deref(),
            Some("turn_on")
        );
        assert_eq!(single("switch on the tv").action.as_deref(), Some("turn_on"));
        assert_eq!(
            single("switch the bedroom fan on").action.as_deref(),
            Some("turn_on")
        );
    }

    #[test]
    fn temperature_overrides_device() {
        let action = single("set bedroom to 24 degrees");
        assert_eq!(summary(&action), ("bedroom", "ac", "set_temp"));
        assert_eq!(action.params["temp"], json!(24));
    }

    #[test]
    fn only_ascii_digits_are_numbers() {
        let action = single("set \u{661}\u{662} to 22 degrees");
        assert_eq!(summary(&action), ("living_room", "ac", "set_temp"));
        assert_eq!(action.params["temp"], json!(22));

        let action = single("channel \u{665} then channel 7");
        assert_eq!(action.params["channel"], json!(7));
    }

    #[test]
    fn two_digits_without_set_or_to_is_not_temperature() {
        let action = single("dim the lamp 40%");
        assert_eq!(summary(&action), ("living_room", "light", "set_brightness"));
        assert_eq!(action.params["brightness"], json!(40));
    }

    #[test]
    fn dim_without_percentage_defaults_to_fifty() {
        let action = single("dim the bedroom lights");
        assert_eq!(action.params["brightness"], json!(50));
    }

    #[test]
    fn channel_overrides_device() {
        let action = single("put channel 7 on");
        assert_eq!(summary(&action), ("living_room", "tv", "set_channel"));
        assert_eq!(action.params["channel"], json!(7));
    }

    #[test]
    fn bare_on_off_substrings() {
        assert_eq!(single("kitchen fan on").action.as_deref(), Some("turn_on"));
        assert_eq!(single("hall light off").action.as_deref(), Some("turn_off"));
    }

    #[test]
    fn unrecognized_fragments_are_dropped() {
        assert!(parse_fragment("what's the weather like").is_none());
        assert!(parse("hello there; good night").is_empty());
        assert!(parse("").is_empty());
        assert!(parse(" ; and ;").is_empty());
    }
}
