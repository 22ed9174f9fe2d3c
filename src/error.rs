// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `homecmd` library.
//!
//! Only [`StorageError`] ever reaches a caller of the command pipeline.
//! [`ValidationError`] is recorded as a failed history entry and
//! [`FallbackError`] is absorbed by the parser, which degrades to an empty
//! set of actions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing the persisted state document failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The remote fallback parser failed.
    #[error("fallback error: {0}")]
    Fallback(#[from] FallbackError),

    /// The command text was empty.
    #[error("no prompt provided")]
    EmptyPrompt,
}

/// Errors related to the persisted state document.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but does not have the expected shape.
    #[error("invalid state document: {0}")]
    InvalidDocument(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while validating a parsed action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One of `room`, `device` or `action` is absent or empty.
    #[error("Invalid action: missing room/device/action")]
    MissingFields,
}

/// Errors related to the remote text-to-structure fallback.
#[derive(Debug, Error)]
pub enum FallbackError {
    /// HTTP request failed.
    #[cfg(feature = "openai")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {0}")]
    Status(u16),

    /// The completion could not be turned into actions.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// No fallback backend is configured.
    #[error("no fallback configured")]
    NotConfigured,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
