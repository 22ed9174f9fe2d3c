// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On-disk document format.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;
use crate::state::{DeviceState, HistoryEntry};

/// Top-level key holding the history array in the persisted document.
pub const HISTORY_KEY: &str = "__history";

#[derive(Serialize)]
struct DocumentRef<'a> {
    #[serde(flatten)]
    state: &'a DeviceState,
    #[serde(rename = "__history")]
    history: &'a [HistoryEntry],
}

#[derive(Deserialize)]
struct Document {
    #[serde(flatten)]
    state: DeviceState,
    #[serde(rename = "__history", default)]
    history: Vec<HistoryEntry>,
}

/// Reads the document at `path` and splits it into state and history.
pub(crate) fn load(path: &Path) -> Result<(DeviceState, Vec<HistoryEntry>), StorageError> {
    let contents = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let value: Value = serde_json::from_str(&contents)?;

    if !value.is_object() {
        return Err(StorageError::InvalidDocument(format!(
            "{} does not hold a JSON object",
            path.display()
        )));
    }

    let document: Document = serde_json::from_value(value)?;
    Ok((document.state, document.history))
}

/// Writes state and history to `path`.
///
/// The document is written to a sibling `.tmp` file first and then renamed
/// over the target, so a reader sees either the old or the new document.
pub(crate) fn save(
    path: &Path,
    state: &DeviceState,
    history: &[HistoryEntry],
) -> Result<(), StorageError> {
    let contents = serde_json::to_string_pretty(&DocumentRef { state, history })?;

    let tmp = tmp_path(path);
    fs::write(&tmp, contents).map_err(|e| StorageError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
