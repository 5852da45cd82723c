//! # CharcuBot Pick Command
//!
//! File: cli/src/commands/pick.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `charcubot pick <LABEL>`: the terminal equivalent of pressing a
//! menu button. The label is compared case-insensitively but is not trimmed,
//! so `" Quesos "` does not select `Quesos` and gets a default reply instead.
//!
use crate::core::error::Result;
use crate::responses::chatbot::Chatbot;
use clap::Parser;
use std::path::Path;
use tracing::info;

/// # Pick Arguments (`PickArgs`)
#[derive(Parser, Debug)]
pub struct PickArgs {
    /// Label of the option, as listed by `charcubot options`.
    pub label: String,

    /// Seed for response selection, for reproducible answers.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Handles `charcubot pick`.
pub fn handle_pick(args: PickArgs, responses_override: Option<&Path>) -> Result<()> {
    info!("Answering menu selection: {:?}", args.label);

    let cfg = super::load_settings(responses_override)?;
    let bot = Chatbot::load(&cfg.bot);
    let mut rng = super::response_rng(args.seed);

    println!("{}", bot.select(&args.label, &mut rng).text);
    Ok(())
}
