// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Chat-completions fallback backend.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::FallbackError;

use super::Fallback;

// ============================================================================
// OpenAiConfig
// ============================================================================

/// Configuration for the chat-completions backend.
///
/// # Examples
///
/// ```
/// use homecmd::fallback::OpenAiConfig;
/// use std::time::Duration;
///
/// let config = OpenAiConfig::new("sk-test")
///     .with_model("gpt-4o")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.model(), "gpt-4o");
/// assert_eq!(config.endpoint(), "https://api.openai.com/v1/chat/completions");
/// ```
#[derive(Clone)]
pub struct OpenAiConfig {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiConfig {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";
    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    /// Default completion length limit.
    pub const DEFAULT_MAX_TOKENS: u32 = 250;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration with the given API key and defaults elsewhere.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the API base URL, e.g. for a compatible proxy.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the completion length limit.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the completion length limit.
    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the full chat-completions URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Creates an `OpenAiClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<OpenAiClient, FallbackError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(FallbackError::Http)?;

        Ok(OpenAiClient {
            client,
            config: self,
        })
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// OpenAiClient
// ============================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completions client used as a parsing fallback.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

impl Fallback for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, FallbackError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(model = %self.config.model, "Sending completion request");

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(FallbackError::Http)?;

        if !response.status().is_success() {
            return Err(FallbackError::Status(response.status().as_u16()));
        }

        let body: Value = response.json().await.map_err(FallbackError::Http)?;
        let text = completion_text(&body);

        tracing::debug!(completion = %text, "Received completion");

        Ok(text)
    }
}

/// Pulls the completion text out of a response body.
///
/// Chat responses carry it in `choices[0].message.content`, legacy
/// completions in `choices[0].text`. Anything else yields an empty string.
fn completion_text(body: &Value) -> String {
    let choice = &body["choices"][0];
    choice["message"]["content"]
        .as_str()
        .or_else(|| choice["text"].as_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_defaults() {
        let config = OpenAiConfig::new("key");
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.max_tokens(), 250);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.base_url(), "https://api.openai.com");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = OpenAiConfig::new("key").with_base_url("http://localhost:8080/");
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", OpenAiConfig::new("sk-secret"));
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn completion_text_prefers_message_content() {
        let body = json!({ "choices": [{ "message": { "content": "hi" }, "text": "legacy" }] });
        assert_eq!(completion_text(&body), "hi");
    }

    #[test]
    fn completion_text_falls_back_to_text_then_empty() {
        assert_eq!(completion_text(&json!({ "choices": [{ "text": "legacy" }] })), "legacy");
        assert_eq!(completion_text(&json!({ "error": "quota" })), "");
    }

    #[test]
    fn request_body_shape() {
        let request = ChatRequest {
            model: "m",
            messages: [ChatMessage {
                role: "user",
                content: "p",
            }],
            max_tokens: 10,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "model": "m", "messages": [{ "role": "user", "content": "p" }], "max_tokens": 10 })
        );
    }
}
