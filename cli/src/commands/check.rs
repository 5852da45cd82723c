//! # CharcuBot Check Command
//!
//! File: cli/src/commands/check.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `charcubot check`. Unlike the other commands, which keep
//! answering with the error-carrying default response when the responses file
//! is unusable, `check` loads the file strictly and fails with the reason.
//! On success it prints a summary and any content warnings from
//! `responses::lint`.
//!
//! With `--strict`, content warnings also make the command fail, which is
//! useful in CI before deploying a new `responses.json`.
//!
use crate::core::error::{CharcuError, Result};
use crate::responses::{lint, resolver::KeywordMatcher, store};
use anyhow::anyhow;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// # Check Arguments (`CheckArgs`)
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Treat content warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Handles `charcubot check`.
pub fn handle_check(args: CheckArgs, responses_override: Option<&Path>) -> Result<()> {
    let cfg = super::load_settings(responses_override)?;
    let path = PathBuf::from(&cfg.bot.responses_file);
    info!("Checking responses file {}", path.display());

    let responses = store::try_load_responses(&path).map_err(CharcuError::from)?;
    let matcher = KeywordMatcher::new(&responses.options);
    let warnings = lint::lint(&responses);

    println!("Checked '{}':", path.display());
    println!("  {} option(s)", responses.options.len());
    println!("  {} keyword pattern(s)", matcher.len());
    println!("  {} default response(s)", responses.default_responses.len());

    for warning in &warnings {
        warn!("{}", warning);
        println!("warning: {}", warning);
    }

    if warnings.is_empty() {
        println!("No problems found.");
        Ok(())
    } else if args.strict {
        Err(anyhow!(
            "{} warning(s) found in '{}'",
            warnings.len(),
            path.display()
        ))
    } else {
        println!("{} warning(s) found.", warnings.len());
        Ok(())
    }
}
