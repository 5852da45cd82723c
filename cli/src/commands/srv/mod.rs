//! # CharcuBot HTTP API
//!
//! File: cli/src/commands/srv/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Serves the chatbot as a small JSON API so a web storefront can render the
//! conversation (chat history, option buttons) and call the resolvers:
//!
//! | Method | Path      | Body                    | Response                                   |
//! |--------|-----------|-------------------------|--------------------------------------------|
//! | GET    | `/health` |                         | `{"status","options","degraded"}`          |
//! | GET    | `/options`|                         | `{"bot","welcome","degraded","options"}`   |
//! | POST   | `/chat`   | `{"message": "..."}`    | `{"reply": "..." or null, "end": bool}`    |
//! | POST   | `/select` | `{"label": "..."}`      | `{"reply": "...", "end": false}`           |
//!
//! ## Architecture
//!
//! - `config.rs`: Merges `[server]` settings with command-line flags
//! - `server_logic.rs`: Axum router, handlers, port selection, shutdown
//!
//! The responses are loaded once at startup and shared read-only between
//! requests; each request draws from its own thread-local random source.
//!
use crate::core::error::Result;
use crate::responses::chatbot::Chatbot;
use std::path::Path;
use tracing::info;

pub use config::SrvArgs;

/// Merges server settings with command-line flags.
pub mod config;

/// Axum-based HTTP server implementation.
pub mod server_logic;

/// Handles `charcubot srv`.
pub async fn handle_srv(args: SrvArgs, responses_override: Option<&Path>) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let cfg = super::load_settings(responses_override)?;
    let server_config = config::merge_config(&args, &cfg.server)?;
    let bot = Chatbot::load(&cfg.bot);

    server_logic::run_server(server_config, bot).await
}
