//! # CharcuBot Interactive Chat
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `charcubot chat`, a REPL-style conversation in the terminal.
//!
//! ## Session Flow
//!
//! 1. Print the welcome message and the numbered menu of options.
//! 2. Read a line from the customer:
//!    - a line holding only a menu number selects that option by label,
//!    - blank lines are ignored,
//!    - the exit command (`salir`) prints the farewell and ends the session,
//!    - anything else is answered by keyword.
//! 3. End of input closes the session quietly.
//!
//! When the responses file could not be loaded the session prints the
//! error-carrying default response instead of the welcome and ends.
//!
//! ```text
//! CharcuBot: ¡Bienvenido a la Charcutería El Pavo Mio! ...
//! Selecciona una opción o pregunta por nuestros productos frescos:
//!   [1] Jamón Ibérico
//!   [2] Quesos
//! Cliente: ¿tienen manchego?
//! CharcuBot: Tenemos Manchego curado de 12 meses.
//! ```
//!
use crate::core::error::Result;
use crate::responses::chatbot::{Chatbot, Reply};
use anyhow::Context;
use clap::Parser;
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, info, warn};

const MENU_PROMPT: &str = "Selecciona una opción o pregunta por nuestros productos frescos:";
const UNREADABLE_INPUT_REPLY: &str = "No he podido leer eso, ¿puedes escribirlo de nuevo?";

/// # Chat Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Seed for response selection, for reproducible conversations.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Handles `charcubot chat`.
pub fn handle_chat(args: ChatArgs, responses_override: Option<&Path>) -> Result<()> {
    info!("Starting interactive chat session");
    let cfg = super::load_settings(responses_override)?;
    let bot = Chatbot::load(&cfg.bot);
    let mut rng = super::response_rng(args.seed);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&bot, &mut rng, stdin.lock(), stdout.lock())
}

/// Runs one conversation over arbitrary input/output streams.
pub fn run_session<R, I, O>(bot: &Chatbot, rng: &mut R, mut input: I, mut output: O) -> Result<()>
where
    R: Rng + ?Sized,
    I: BufRead,
    O: Write,
{
    if bot.is_degraded() {
        warn!("Responses unavailable, ending chat session");
        writeln!(output, "{}: {}", bot.name(), bot.unavailable_message())?;
        return Ok(());
    }

    writeln!(output, "{}: {}", bot.name(), bot.welcome())?;
    let menu: Vec<String> = bot.menu().iter().map(|option| option.label.clone()).collect();
    if !menu.is_empty() {
        writeln!(output, "{}", MENU_PROMPT)?;
        for (index, label) in menu.iter().enumerate() {
            writeln!(output, "  [{}] {}", index + 1, label)?;
        }
    }

    loop {
        write!(output, "{}: ", bot.customer_name())?;
        output.flush().context("Failed to flush chat output")?;

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                debug!("End of input, closing chat session");
                writeln!(output)?;
                break;
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Discarding unreadable input line: {}", e);
                writeln!(output, "{}: {}", bot.name(), UNREADABLE_INPUT_REPLY)?;
                continue;
            }
            Err(e) => return Err(e).context("Failed to read chat input"),
        }

        let text = line.trim();
        let reply: Option<Reply> = match menu_selection(text, &menu) {
            Some(label) => {
                debug!("Menu entry '{}' selected", label);
                Some(bot.select(label, rng))
            }
            None => bot.reply(text, rng),
        };

        if let Some(reply) = reply {
            writeln!(output, "{}: {}", bot.name(), reply.text)?;
            if reply.end {
                break;
            }
        }
    }

    Ok(())
}

/// Label of the menu entry chosen by a line holding only its number.
fn menu_selection<'a>(text: &str, menu: &'a [String]) -> Option<&'a str> {
    let number: usize = text.parse().ok()?;
    menu.get(number.checked_sub(1)?).map(String::as_str)
}
