//! # CharcuBot Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the CharcuBot CLI, the
//! storefront assistant of Charcutería El Pavo Mio. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! The binary is a thin shell over the `charcubot` library (`src/lib.rs`):
//! - Each top-level command is a variant in the `Commands` enum
//! - Commands are mapped to handler functions in `charcubot::commands`
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! ```bash
//! # Talk to the bot in the terminal
//! charcubot chat
//!
//! # One-shot answers with a fixed seed
//! charcubot ask ¿tienen jamón ibérico? --seed 7
//! charcubot pick "Quesos"
//!
//! # Validate a new responses file, then serve it over HTTP
//! charcubot -r ./nuevas.json check --strict
//! charcubot -v -r ./nuevas.json srv --port 9000
//! ```
//!
use charcubot::commands;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "charcubot",
    about = "🦃🧀 CharcuBot: asistente virtual de la Charcutería El Pavo Mio",
    long_about = "Keyword-driven storefront chatbot.\n\
                  Answers customer questions with canned responses loaded from a JSON file.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Responses JSON file (overrides `bot.responses_file` from the settings).
    #[arg(short, long, global = true, env = "CHARCUBOT_RESPONSES")]
    responses: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Chat with the bot in the terminal.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Answer one free-text message.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Answer one menu selection by its label.
    #[command(alias = "p")]
    Pick(commands::pick::PickArgs),
    /// List the configured options.
    #[command(alias = "o")]
    Options(commands::options::OptionsArgs),
    /// Validate the responses file.
    Check(commands::check::CheckArgs),
    /// Serve the chatbot as a JSON HTTP API.
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let responses = cli.responses.as_deref();
    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args, responses),
        Commands::Ask(args) => commands::ask::handle_ask(args, responses),
        Commands::Pick(args) => commands::pick::handle_pick(args, responses),
        Commands::Options(args) => commands::options::handle_options(args, responses),
        Commands::Check(args) => commands::check::handle_check(args, responses),
        Commands::Srv(args) => commands::srv::handle_srv(args, responses).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
