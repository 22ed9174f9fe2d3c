// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device state store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::command::ParsedAction;
use crate::error::StorageError;
use crate::state::{DeviceChange, DeviceState, HistoryEntry, ParamPolicy};
use crate::types::{RoomKey, Verb};

use super::document;

/// Persisted device state plus its append-only history.
///
/// The store assumes it is the only writer of its file. Share one instance
/// per process (see [`CommandService`](crate::service::CommandService)).
#[derive(Debug)]
pub struct DeviceStateStore {
    path: PathBuf,
    state: DeviceState,
    history: Vec<HistoryEntry>,
    policy: ParamPolicy,
}

impl DeviceStateStore {
    /// Opens the document at `path`, seeding and writing a default one if
    /// the file does not exist. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be read, parsed or created.
    pub fn initialize(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let exists = path.try_exists().map_err(|e| StorageError::io(&path, e))?;
        let (state, history) = if exists {
            let (state, history) = document::load(&path)?;
            tracing::info!(
                path = %path.display(),
                history = history.len(),
                "Loaded device state"
            );
            (state, history)
        } else {
            let state = DeviceState::seeded();
            document::save(&path, &state, &[])?;
            tracing::info!(path = %path.display(), "Seeded default device state");
            (state, Vec::new())
        };

        Ok(Self {
            path,
            state,
            history,
            policy: ParamPolicy::default(),
        })
    }

    /// Sets how setter verbs decide whether a parameter was provided.
    #[must_use]
    pub fn with_param_policy(mut self, policy: ParamPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the parameter policy.
    #[must_use]
    pub fn param_policy(&self) -> ParamPolicy {
        self.policy
    }

    /// Returns the path of the persisted document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Returns every history entry, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Applies one action, records it and persists the document.
    ///
    /// An action missing `room`, `device` or `action` does not touch the
    /// state but still produces a failed entry. Either way exactly one entry
    /// is appended and one write happens.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written. The entry
    /// stays in the in-memory history.
    pub fn apply_action(&mut self, action: &ParsedAction) -> Result<HistoryEntry, StorageError> {
        let entry = match action.required_fields() {
            Ok((room, device, verb)) => {
                let room = RoomKey::normalize(room);
                let change = DeviceChange::from_action(&Verb::parse(verb), &action.params);

                let record = self.state.device_entry(room.clone(), device);
                change.apply(record, self.policy);

                tracing::debug!(room = %room, device, action = verb, "Applied action");
                HistoryEntry::applied(&room, device, verb, record.clone(), action.raw.clone())
            }
            Err(e) => {
                tracing::warn!(raw = ?action.raw, "Rejected action: {e}");
                HistoryEntry::rejected(&e, action.raw.clone())
            }
        };

        self.history.push(entry.clone());
        document::save(&self.path, &self.state, &self.history)?;
        Ok(entry)
    }

    /// Applies actions in order, one entry per action.
    ///
    /// A rejected action does not stop the ones after it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on the first failed write.
    pub fn apply_all(&mut self, actions: &[ParsedAction]) -> Result<Vec<HistoryEntry>, StorageError> {
        actions
            .iter()
            .map(|action| self.apply_action(action))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PowerStatus;
    use serde_json::json;

    fn store() -> (tempfile::TempDir, DeviceStateStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DeviceStateStore::initialize(dir.path().join("state.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn initialize_seeds_and_persists() {
        let (_dir, store) = store();
        assert!(store.path().exists());
        assert!(store.history().is_empty());
        assert!(store.state().device("living_room", "tv").is_some());
    }

    #[test]
    fn initialize_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("nested").join("state.json");
        let store = DeviceStateStore::initialize(&path).unwrap();
        assert_eq!(store.path(), path);
        assert!(path.exists());
    }

    #[test]
    fn room_key_is_normalized() {
        let (_dir, mut store) = store();
        let entry = store
            .apply_action(&ParsedAction::new("Living Room", "tv", "set_channel").with_param("channel", 7))
            .unwrap();

        assert!(entry.is_ok());
        assert_eq!(entry.room(), Some("living_room"));
        let tv = store.state().device("living_room", "tv").unwrap();
        assert_eq!(tv.status(), Some(PowerStatus::On));
        assert_eq!(tv.channel(), Some(7));
    }

    #[test]
    fn invalid_action_records_failure_without_mutation() {
        let (_dir, mut store) = store();
        let before = store.state().clone();
        let action = ParsedAction {
            device: Some("light".to_string()),
            action: Some("turn_on".to_string()),
            ..ParsedAction::default()
        };

        let entry = store.apply_action(&action).unwrap();

        assert!(!entry.is_ok());
        assert_eq!(entry.message(), Some("Invalid action: missing room/device/action"));
        assert_eq!(store.state(), &before);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn turn_on_twice_matches_once() {
        let (_dir, mut once) = store();
        let (_dir2, mut twice) = store();
        let action = ParsedAction::new("garage", "heater", "turn_on");

        once.apply_action(&action).unwrap();
        twice.apply_action(&action).unwrap();
        twice.apply_action(&action).unwrap();

        assert_eq!(once.state(), twice.state());
        assert_eq!(
            once.state().device("garage", "heater").unwrap().attributes(),
            json!({ "status": "on" }).as_object().unwrap()
        );
    }

    #[test]
    fn set_temp_zero_keeps_prior_temp() {
        let (_dir, mut store) = store();
        store
            .apply_action(&ParsedAction::new("bedroom", "ac", "set_temp").with_param("temp", 22))
            .unwrap();
        store
            .apply_action(&ParsedAction::new("bedroom", "ac", "set_temp").with_param("temp", 0))
            .unwrap();
        assert_eq!(store.state().device("bedroom", "ac").unwrap().temp(), Some(22));
    }

    #[test]
    fn presence_policy_accepts_zero() {
        let (_dir, store) = store();
        let mut store = store.with_param_policy(ParamPolicy::Presence);
        store
            .apply_action(&ParsedAction::new("bedroom", "ac", "set_temp").with_param("temp", 0))
            .unwrap();
        assert_eq!(store.state().device("bedroom", "ac").unwrap().temp(), Some(0));
    }

    #[test]
    fn unknown_verb_merges_params() {
        let (_dir, mut store) = store();
        let entry = store
            .apply_action(&ParsedAction::new("kitchen", "fan", "set_speed").with_param("speed", 2))
            .unwrap();
        let record = entry.new_state().unwrap();
        assert_eq!(record.status(), Some(PowerStatus::Off));
        assert_eq!(record.get("speed"), Some(&json!(2)));
    }

    #[test]
    fn apply_all_keeps_going_after_rejection() {
        let (_dir, mut store) = store();
        let results = store
            .apply_all(&[
                ParsedAction::new("bedroom", "light", "turn_on"),
                ParsedAction::default(),
                ParsedAction::new("hall", "light", "turn_on"),
            ])
            .unwrap();

        let outcomes: Vec<_> = results.iter().map(HistoryEntry::is_ok).collect();
        assert_eq!(outcomes, vec![true, false, true]);
        assert_eq!(store.history().len(), 3);
    }
}
