//! # CharcuBot Ask Command
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `charcubot ask <TEXT...>`: resolves one piece of free text by
//! keyword and prints the reply. Words are joined with single spaces, so
//! quoting is optional.
//!
//! ```bash
//! charcubot ask ¿tienen jamón ibérico?
//! charcubot --responses ./tienda.json ask "horario del sábado" --seed 3
//! ```
//!
use crate::core::error::Result;
use crate::responses::chatbot::Chatbot;
use clap::Parser;
use std::path::Path;
use tracing::info;

/// # Ask Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The customer's message.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Seed for response selection, for reproducible answers.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Handles `charcubot ask`.
pub fn handle_ask(args: AskArgs, responses_override: Option<&Path>) -> Result<()> {
    let text = args.text.join(" ");
    info!("Answering free text: {:?}", text);

    let cfg = super::load_settings(responses_override)?;
    let bot = Chatbot::load(&cfg.bot);
    let mut rng = super::response_rng(args.seed);

    println!("{}", bot.resolve(&text, &mut rng));
    Ok(())
}
