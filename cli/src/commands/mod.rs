//! # CharcuBot Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the `charcubot` CLI and the
//! helpers they share for loading settings and building a random source.
//!
//! ## Commands
//!
//! - `chat`: Interactive conversation in the terminal
//! - `ask`: One-shot answer to free text
//! - `pick`: One-shot answer to a menu label
//! - `options`: Table of the configured options
//! - `check`: Strict validation of the responses file
//! - `srv`: JSON HTTP API over the same chatbot
//!
//! Each command defines its own arguments structure and handler function.
//!
use crate::core::config::{self, Config};
use crate::core::error::Result;
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use std::path::Path;
use tracing::{debug, info};

/// One-shot answer to free text typed on the command line.
pub mod ask;
/// Interactive terminal conversation with the menu and exit command.
pub mod chat;
/// Strict load plus content warnings for the responses file.
pub mod check;
/// Lists labels and keyword counts of every option.
pub mod options;
/// One-shot answer to a menu label.
pub mod pick;
/// JSON HTTP API for web front-ends.
pub mod srv;

/// Loads the merged settings and applies the global `--responses` override.
pub fn load_settings(responses_override: Option<&Path>) -> Result<Config> {
    let mut cfg = config::load_config().context("Failed to load CharcuBot configuration")?;
    if let Some(path) = responses_override {
        info!("Using responses file from command line: {}", path.display());
        cfg.bot.responses_file = path.to_string_lossy().into_owned();
    }
    Ok(cfg)
}

/// Random source for picking responses: reproducible when a seed is given.
pub fn response_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            debug!("Seeding response selection with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}
