//! # CharcuBot Response Store
//!
//! File: cli/src/responses/store.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Reads the responses file (`opciones` + `default_responses`) from disk.
//!
//! Two entry points are provided:
//! - **`try_load_responses`**: Strict. Returns a `StoreError` describing why the
//!   file could not be used (missing, unreadable, or malformed JSON).
//! - **`load_responses`**: Total. Logs the failure and falls back to
//!   `ResponseConfig::degraded()` so the chatbot keeps answering with the
//!   error-carrying default reply.
//!
//! A missing or empty `default_responses` list is replaced by the single
//! built-in `FALLBACK_RESPONSE`; a missing `opciones` key yields no options.
//!
use super::{BotOption, ResponseConfig, FALLBACK_RESPONSE};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, error, info};

/// Reasons the responses file could not be used.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Responses file '{}' not found.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read responses file '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Responses file '{}' is not valid: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// On-disk shape of the responses file. Unknown keys are ignored.
#[derive(Deserialize, Debug)]
struct ResponsesFile {
    #[serde(default, rename = "opciones")]
    options: Vec<BotOption>,
    #[serde(default)]
    default_responses: Option<Vec<String>>,
}

impl From<ResponsesFile> for ResponseConfig {
    fn from(file: ResponsesFile) -> Self {
        let default_responses = match file.default_responses {
            Some(list) if !list.is_empty() => list,
            _ => vec![FALLBACK_RESPONSE.to_string()],
        };
        Self {
            options: file.options,
            default_responses,
        }
    }
}

/// Loads the responses file, degrading to `ResponseConfig::degraded()` on any failure.
pub fn load_responses(path: &Path) -> ResponseConfig {
    match try_load_responses(path) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            ResponseConfig::degraded()
        }
    }
}

/// Loads the responses file, reporting why it could not be used.
pub fn try_load_responses(path: &Path) -> Result<ResponseConfig, StoreError> {
    debug!("Reading responses from {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let config = parse_responses(&content).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Loaded {} option(s) and {} default response(s) from {}",
        config.options.len(),
        config.default_responses.len(),
        path.display()
    );
    Ok(config)
}

/// Parses the JSON text of a responses file.
pub fn parse_responses(content: &str) -> Result<ResponseConfig, serde_json::Error> {
    let file: ResponsesFile = serde_json::from_str(content)?;
    Ok(file.into())
}
