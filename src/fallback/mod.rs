// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote text-to-structure fallback.
//!
//! When the rule-based parser finds nothing, the
//! [`CommandParser`](crate::parser::CommandParser) asks a [`Fallback`]
//! backend to complete an extraction prompt. Backends only return the
//! completion text. Turning it into actions is the parser's job.
//!
//! # Backends
//!
//! - [`NoFallback`]: nothing configured; the parser skips the fallback step
//! - `Option<F>`: a backend chosen at runtime, `None` behaving like [`NoFallback`]
//! - [`OpenAiClient`]: chat-completions endpoint (feature `openai`)

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiClient, OpenAiConfig};

use crate::error::FallbackError;

/// A remote completion backend.
#[allow(async_fn_in_trait)]
pub trait Fallback {
    /// Sends `prompt` and returns the completion text verbatim.
    ///
    /// # Errors
    ///
    /// Returns `FallbackError` if the backend cannot be reached or answers
    /// with an error.
    async fn complete(&self, prompt: &str) -> Result<String, FallbackError>;

    /// Returns `false` if calling [`complete`](Self::complete) is pointless.
    fn is_configured(&self) -> bool {
        true
    }
}

/// The absent fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl Fallback for NoFallback {
    async fn complete(&self, _prompt: &str) -> Result<String, FallbackError> {
        Err(FallbackError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

impl<F: Fallback> Fallback for Option<F> {
    async fn complete(&self, prompt: &str) -> Result<String, FallbackError> {
        match self {
            Some(fallback) => fallback.complete(prompt).await,
            None => Err(FallbackError::NotConfigured),
        }
    }

    fn is_configured(&self) -> bool {
        self.as_ref().is_some_and(Fallback::is_configured)
    }
}

/// Builds the extraction prompt sent to the backend.
#[must_use]
pub fn extraction_prompt(text: &str) -> String {
    format!(
        "Extract smart-home commands from this text and output a JSON array named actions \
         where each action has room, device, action, params. Text: \"\"\"{text}\"\"\".\n\
         Example output:\n\
         {{\"actions\":[{{\"room\":\"bedroom\",\"device\":\"ac\",\"action\":\"set_temp\",\"params\":{{\"temp\":24}}}}]}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_text_and_example() {
        let prompt = extraction_prompt("make it cozy");
        assert!(prompt.contains("\"\"\"make it cozy\"\"\""));
        assert!(prompt.contains(r#"{"actions":[{"room":"bedroom""#));
    }

    #[tokio::test]
    async fn no_fallback_is_not_configured() {
        assert!(!NoFallback.is_configured());
        assert!(matches!(
            NoFallback.complete("x").await,
            Err(FallbackError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn none_behaves_like_no_fallback() {
        let fallback: Option<NoFallback> = None;
        assert!(!fallback.is_configured());
        assert!(fallback.complete("x").await.is_err());
    }
}
