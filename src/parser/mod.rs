// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Free text to structured actions.
//!
//! Parsing is layered: the deterministic [`rules`] run first, and only when
//! they produce nothing is the configured [`Fallback`] asked. Fallback
//! failures never escape [`CommandParser::parse`]; they show up as an empty
//! [`ParseResult`] whose [`ParseSource`] says what happened.
//!
//! # Examples
//!
//! ```
//! use homecmd::parser::{CommandParser, ParseSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let parser = CommandParser::rules_only();
//!
//! let result = parser.parse("turn on the bedroom light and set channel 5 in living room").await;
//! assert_eq!(result.source(), ParseSource::Rules);
//! assert_eq!(result.actions().len(), 2);
//!
//! let result = parser.parse("what a lovely day").await;
//! assert!(result.actions().is_empty());
//! assert_eq!(result.source(), ParseSource::Unmatched);
//! # }
//! ```

mod extract;
pub mod rules;

pub use extract::actions_from_completion;

use serde::Serialize;

use crate::command::ParsedAction;
use crate::fallback::{Fallback, NoFallback, extraction_prompt};

/// Where the actions of a [`ParseResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseSource {
    /// At least one rule matched.
    Rules,
    /// The fallback answered with parsable JSON (possibly with no actions).
    Fallback,
    /// No rule matched and no fallback is configured.
    Unmatched,
    /// The fallback failed or its answer could not be parsed.
    FallbackFailed,
}

/// Outcome of parsing one command text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    actions: Vec<ParsedAction>,
    raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ai_raw: Option<String>,
    #[serde(skip)]
    source: ParseSource,
}

impl ParseResult {
    fn new(actions: Vec<ParsedAction>, raw: &str, source: ParseSource) -> Self {
        Self {
            actions,
            raw: raw.to_string(),
            ai_raw: None,
            source,
        }
    }

    fn empty(raw: &str, source: ParseSource) -> Self {
        Self::new(Vec::new(), raw, source)
    }

    /// Returns the actions in text order.
    #[must_use]
    pub fn actions(&self) -> &[ParsedAction] {
        &self.actions
    }

    /// Returns the original text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the completion text when it could not be parsed.
    #[must_use]
    pub fn ai_raw(&self) -> Option<&str> {
        self.ai_raw.as_deref()
    }

    /// Returns where the actions came from.
    #[must_use]
    pub fn source(&self) -> ParseSource {
        self.source
    }

    /// Consumes the result, returning the actions.
    #[must_use]
    pub fn into_actions(self) -> Vec<ParsedAction> {
        self.actions
    }
}

/// Layered command parser.
#[derive(Debug, Clone, Default)]
pub struct CommandParser<F = NoFallback> {
    fallback: F,
}

impl CommandParser<NoFallback> {
    /// Creates a parser that never calls a remote backend.
    #[must_use]
    pub fn rules_only() -> Self {
        Self::default()
    }
}

impl<F: Fallback> CommandParser<F> {
    /// Creates a parser that consults `fallback` when no rule matches.
    #[must_use]
    pub fn with_fallback(fallback: F) -> Self {
        Self { fallback }
    }

    /// Returns the fallback backend.
    #[must_use]
    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Parses `text` into actions.
    ///
    /// Never fails: unrecognized text and fallback errors both produce an
    /// empty result.
    pub async fn parse(&self, text: &str) -> ParseResult {
        let actions = rules::parse(text);
        if !actions.is_empty() {
            return ParseResult::new(actions, text, ParseSource::Rules);
        }

        if !self.fallback.is_configured() {
            return ParseResult::empty(text, ParseSource::Unmatched);
        }

        let completion = match self.fallback.complete(&extraction_prompt(text)).await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::warn!("Fallback parse failed, returning no actions: {e}");
                return ParseResult::empty(text, ParseSource::FallbackFailed);
            }
        };

        match actions_from_completion(&completion) {
            Ok(actions) => ParseResult::new(actions, text, ParseSource::Fallback),
            Err(e) => {
                tracing::warn!("Fallback answer not usable: {e}");
                ParseResult {
                    ai_raw: Some(completion),
                    ..ParseResult::empty(text, ParseSource::FallbackFailed)
                }
            }
        }
    }
}
