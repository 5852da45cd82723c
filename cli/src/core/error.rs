//! # CharcuBot Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the application-level error type used by the command
//! handlers and the configuration system. Errors raised while reading the
//! responses file live next to the store (`responses::store::StoreError`),
//! because the store converts them into a degraded state instead of
//! propagating them.
//!
//! ## Architecture
//!
//! - `CharcuError`: A custom error enum using `thiserror` for specific failures
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! use anyhow::{anyhow, Context};
//! use charcubot::core::config::BotConfig;
//! use charcubot::core::error::{CharcuError, Result};
//! use std::{fs, path::Path};
//!
//! // Return a specific error type
//! fn check_exit_command(bot: &BotConfig) -> Result<()> {
//!     if bot.exit_command.trim().is_empty() {
//!         return Err(anyhow!(CharcuError::Config("exit_command cannot be blank".into())));
//!     }
//!     Ok(())
//! }
//!
//! // Add context to errors using anyhow
//! fn read_responses(path: &Path) -> Result<String> {
//!     let content = fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read file: {}", path.display()))?;
//!     Ok(content)
//! }
//!
//! let blank = BotConfig { exit_command: " ".into(), ..Default::default() };
//! assert!(check_exit_command(&blank).is_err());
//! assert!(read_responses(Path::new("no/such/responses.json")).is_err());
//! ```
//!
use crate::responses::store::StoreError;
use thiserror::Error;

/// Custom error type for the CharcuBot application.
#[derive(Error, Debug)]
pub enum CharcuError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Responses file unusable: {source}")]
    Responses {
        #[from]
        source: StoreError,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display() {
        let config_err = CharcuError::Config("max_menu_options must be at least 1".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: max_menu_options must be at least 1"
        );

        let store_err = CharcuError::from(StoreError::NotFound {
            path: PathBuf::from("data/missing.json"),
        });
        assert_eq!(
            store_err.to_string(),
            "Responses file unusable: Responses file 'data/missing.json' not found."
        );
    }
}
