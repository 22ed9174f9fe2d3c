// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service configuration.

use std::path::{Path, PathBuf};

#[cfg(feature = "openai")]
use crate::fallback::{OpenAiClient, OpenAiConfig};
use crate::parser::CommandParser;
use crate::service::CommandService;
use crate::state::ParamPolicy;
use crate::store::DeviceStateStore;

/// Configuration for a [`CommandService`].
///
/// # Examples
///
/// ```
/// use homecmd::config::ServiceConfig;
/// use homecmd::state::ParamPolicy;
///
/// let config = ServiceConfig::new()
///     .with_state_path("/var/lib/homecmd/state.json")
///     .with_param_policy(ParamPolicy::Presence);
///
/// assert_eq!(config.param_policy(), ParamPolicy::Presence);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    state_path: PathBuf,
    #[cfg(feature = "openai")]
    openai: Option<OpenAiConfig>,
    param_policy: ParamPolicy,
}

impl ServiceConfig {
    /// Default location of the persisted document.
    pub const DEFAULT_STATE_PATH: &'static str = "./data/state.json";

    /// Creates a configuration with defaults and no fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state_path: PathBuf::from(Self::DEFAULT_STATE_PATH),
            #[cfg(feature = "openai")]
            openai: None,
            param_policy: ParamPolicy::default(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// | Variable | Effect |
    /// |----------|--------|
    /// | `STATE_FILE` | path of the persisted document |
    /// | `OPENAI_API_KEY` | enables the chat-completions fallback |
    /// | `OPENAI_MODEL` | overrides the fallback model |
    /// | `OPENAI_BASE_URL` | overrides the fallback endpoint host |
    /// | `PARAM_POLICY` | `presence` switches off the falsy-parameter quirk |
    ///
    /// Empty variables are treated as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let param_policy =
            if var("PARAM_POLICY").is_some_and(|v| v.eq_ignore_ascii_case("presence")) {
                ParamPolicy::Presence
            } else {
                ParamPolicy::Truthy
            };

        Self {
            state_path: var("STATE_FILE")
                .map_or_else(|| PathBuf::from(Self::DEFAULT_STATE_PATH), PathBuf::from),
            #[cfg(feature = "openai")]
            openai: openai_from(&var),
            param_policy,
        }
    }

    /// Sets the path of the persisted document.
    #[must_use]
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    /// Enables the chat-completions fallback.
    #[cfg(feature = "openai")]
    #[must_use]
    pub fn with_openai(mut self, openai: OpenAiConfig) -> Self {
        self.openai = Some(openai);
        self
    }

    /// Sets the parameter policy.
    #[must_use]
    pub fn with_param_policy(mut self, policy: ParamPolicy) -> Self {
        self.param_policy = policy;
        self
    }

    /// Returns the path of the persisted document.
    #[must_use]
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Returns the fallback configuration, if any.
    #[cfg(feature = "openai")]
    #[must_use]
    pub fn openai(&self) -> Option<&OpenAiConfig> {
        self.openai.as_ref()
    }

    /// Returns the parameter policy.
    #[must_use]
    pub fn param_policy(&self) -> ParamPolicy {
        self.param_policy
    }

    /// Opens the store described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be initialized.
    pub fn open_store(&self) -> crate::Result<DeviceStateStore> {
        Ok(DeviceStateStore::initialize(&self.state_path)?.with_param_policy(self.param_policy))
    }

    /// Builds the service: opens the store and creates the fallback client
    /// if one is configured.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be initialized or the HTTP client
    /// cannot be created.
    #[cfg(feature = "openai")]
    pub fn into_service(self) -> crate::Result<CommandService<Option<OpenAiClient>>> {
        let store = self.open_store()?;
        let fallback = self.openai.map(OpenAiConfig::into_client).transpose()?;
        Ok(CommandService::new(CommandParser::with_fallback(fallback), store))
    }

    /// Builds the service with rule-based parsing only.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be initialized.
    #[cfg(not(feature = "openai"))]
    pub fn into_service(self) -> crate::Result<CommandService> {
        let store = self.open_store()?;
        Ok(CommandService::new(CommandParser::rules_only(), store))
    }
}

#[cfg(feature = "openai")]
fn openai_from(var: &impl Fn(&str) -> Option<String>) -> Option<OpenAiConfig> {
    let mut openai = OpenAiConfig::new(var("OPENAI_API_KEY")?);
    if let Some(model) = var("OPENAI_MODEL") {
        openai = openai.with_model(model);
    }
    if let Some(base_url) = var("OPENAI_BASE_URL") {
        openai = openai.with_base_url(base_url);
    }
    Some(openai)
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}
