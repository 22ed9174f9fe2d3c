// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command processing entry point.
//!
//! [`CommandService`] is what a transport layer talks to: one instance is
//! built at startup and shared by every request handler.

use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::fallback::{Fallback, NoFallback};
use crate::parser::{CommandParser, ParseResult};
use crate::state::{DeviceState, HistoryEntry};
use crate::store::DeviceStateStore;

/// Result of processing one command text.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    /// Caller-supplied or generated identifier of the command.
    pub note_id: String,
    /// What the parser made of the text.
    pub parsed: ParseResult,
    /// One entry per parsed action, in order.
    pub results: Vec<HistoryEntry>,
    /// Full state after all actions were applied.
    pub state: DeviceState,
}

/// Parses commands and applies them to a shared store.
///
/// The store is the single writer of its document. Each batch is applied
/// under one lock, so batches from concurrent requests never interleave;
/// parsing (including the remote fallback) happens outside the lock.
///
/// # Examples
///
/// ```no_run
/// use homecmd::parser::CommandParser;
/// use homecmd::service::CommandService;
/// use homecmd::store::DeviceStateStore;
///
/// # #[tokio::main]
/// # async fn main() -> homecmd::Result<()> {
/// let store = DeviceStateStore::initialize("./data/state.json")?;
/// let service = CommandService::new(CommandParser::rules_only(), store);
///
/// let outcome = service.process("turn on the bedroom light", None).await?;
/// assert_eq!(outcome.results.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CommandService<F = NoFallback> {
    parser: CommandParser<F>,
    store: Mutex<DeviceStateStore>,
}

impl<F: Fallback> CommandService<F> {
    /// Creates a service from a parser and an initialized store.
    #[must_use]
    pub fn new(parser: CommandParser<F>, store: DeviceStateStore) -> Self {
        Self {
            parser,
            store: Mutex::new(store),
        }
    }

    /// Parses `text` and applies every resulting action in order.
    ///
    /// A missing `note_id` is replaced by a random UUID. Text that is empty
    /// or only whitespace is rejected before parsing, so it never reaches the
    /// fallback and never adds history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPrompt`] for empty or whitespace-only text and
    /// [`Error::Storage`] if the document cannot be written.
    pub async fn process(&self, text: &str, note_id: Option<String>) -> Result<ProcessOutcome> {
        if text.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }

        let note_id = note_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        tracing::info!(note_id = %note_id, "Processing command: {text}");

        let parsed = self.parser.parse(text).await;

        let mut store = self.store.lock();
        let results = store.apply_all(parsed.actions())?;
        let state = store.state().clone();
        drop(store);

        tracing::debug!(
            note_id = %note_id,
            applied = results.iter().filter(|r| r.is_ok()).count(),
            rejected = results.iter().filter(|r| !r.is_ok()).count(),
            "Command processed"
        );

        Ok(ProcessOutcome {
            note_id,
            parsed,
            results,
            state,
        })
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.store.lock().state().clone()
    }

    /// Returns a snapshot of the history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.store.lock().history().to_vec()
    }

    /// Returns the parser.
    #[must_use]
    pub fn parser(&self) -> &CommandParser<F> {
        &self.parser
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PowerStatus;

    fn service() -> (tempfile::TempDir, CommandService) {
        let dir = tempfile::tempdir().unwrap();
        let store = DeviceStateStore::initialize(dir.path().join("state.json")).unwrap();
        (dir, CommandService::new(CommandParser::rules_only(), store))
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected() {
        let (_dir, service) = service();
        for blank in ["", "   ", "\n\t"] {
            assert!(matches!(
                service.process(blank, None).await,
                Err(Error::EmptyPrompt)
            ));
        }
        assert!(service.history().is_empty());
    }

    #[tokio::test]
    async fn note_id_is_kept_or_generated() {
        let (_dir, service) = service();
        let outcome = service
            .process("turn on the tv", Some("note-1".to_string()))
            .await
            .unwrap();
        assert_eq!(outcome.note_id, "note-1");

        let outcome = service.process("turn off the tv", None).await.unwrap();
        assert!(Uuid::parse_str(&outcome.note_id).is_ok());
    }

    #[tokio::test]
    async fn outcome_reflects_applied_batch() {
        let (_dir, service) = service();
        let outcome = service
            .process("turn on the bedroom light and set channel 5 in living room", None)
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.results.iter().all(HistoryEntry::is_ok));
        assert_eq!(
            outcome.state.device("bedroom", "light").unwrap().status(),
            Some(PowerStatus::On)
        );
        assert_eq!(outcome.state.device("living_room", "tv").unwrap().channel(), Some(5));
        assert_eq!(service.history().len(), 2);
        assert_eq!(service.state(), outcome.state);
    }

    #[tokio::test]
    async fn unrecognized_text_applies_nothing() {
        let (_dir, service) = service();
        let outcome = service.process("what time is it", None).await.unwrap();
        assert!(outcome.parsed.actions().is_empty());
        assert!(outcome.results.is_empty());
        assert!(service.history().is_empty());
    }
}
