//! # CharcuBot Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the settings system for CharcuBot: where the
//! responses file lives, how the bot introduces itself, how many menu entries
//! are offered, and where the HTTP API binds. It supports a multi-level
//! approach that combines defaults, user settings, and project-specific
//! overrides.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.charcubot.toml` in current directory or ancestors
//! 2. User-specific `~/.config/charcubot/config.toml`
//! 3. Default values defined in the code
//!
//! Command-line flags (e.g. `--responses`) are applied on top by the command
//! handlers. Paths accept `~`, and the merged result is validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [bot]
//! name = "CharcuBot"
//! responses_file = "~/tienda/responses.json"
//! max_menu_options = 5
//!
//! [server]
//! port = 8080
//! ```
//!
//! ```rust,no_run
//! use charcubot::core::config;
//! use charcubot::responses::chatbot::Chatbot;
//!
//! let cfg = config::load_config()?;
//! let bot = Chatbot::load(&cfg.bot);
//! println!("{} knows {} option(s)", bot.name(), bot.responses().options.len());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
use crate::core::error::{CharcuError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Conversation settings (`[bot]`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Name the bot signs its messages with.
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Name shown next to the customer's messages.
    #[serde(default = "default_customer_name")]
    pub customer_name: String,
    /// Path to the responses JSON file (can use ~). Will be expanded.
    #[serde(default = "default_responses_file")]
    pub responses_file: String,
    /// Maximum number of options offered as menu entries.
    #[serde(default = "default_max_menu_options")]
    pub max_menu_options: usize,
    /// Typing this (case-insensitive) ends the conversation.
    #[serde(default = "default_exit_command")]
    pub exit_command: String,
    #[serde(default = "default_welcome")]
    pub welcome: String,
    #[serde(default = "default_farewell")]
    pub farewell: String,
}

/// HTTP API settings (`[server]`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSettings {
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            customer_name: default_customer_name(),
            responses_file: default_responses_file(),
            max_menu_options: default_max_menu_options(),
            exit_command: default_exit_command(),
            welcome: default_welcome(),
            farewell: default_farewell(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            host: default_server_host(),
            enable_cors: default_enable_cors(),
        }
    }
}

fn default_bot_name() -> String {
    "CharcuBot".to_string()
}
fn default_customer_name() -> String {
    "Cliente".to_string()
}
fn default_responses_file() -> String {
    "data/responses.json".to_string()
}
fn default_max_menu_options() -> usize {
    5
}
fn default_exit_command() -> String {
    "salir".to_string()
}
fn default_welcome() -> String {
    "¡Bienvenido a la Charcutería El Pavo Mio! 🦃🧀 Pregunta por nuestros productos frescos o selecciona una opción. Escribe 'salir' para terminar.".to_string()
}
fn default_farewell() -> String {
    "¡Gracias por visitarnos! Que disfrutes tus productos frescos. 🧀🥓".to_string()
}
fn default_server_port() -> u16 {
    8000
}
fn default_server_host() -> String {
    "127.0.0.1".to_string()
}
fn default_enable_cors() -> bool {
    true
}

const PROJECT_CONFIG_FILENAME: &str = ".charcubot.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ElPavoMio", "charcubot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.charcubot.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the root looking for `.charcubot.toml`,
/// stopping at the first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the built-in defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();

    fn pick<T: PartialEq>(project: T, user: T, default: &T) -> T {
        if project != *default {
            project
        } else {
            user
        }
    }

    Config {
        bot: BotConfig {
            name: pick(project_cfg.bot.name, user.bot.name, &defaults.bot.name),
            customer_name: pick(
                project_cfg.bot.customer_name,
                user.bot.customer_name,
                &defaults.bot.customer_name,
            ),
            responses_file: pick(
                project_cfg.bot.responses_file,
                user.bot.responses_file,
                &defaults.bot.responses_file,
            ),
            max_menu_options: pick(
                project_cfg.bot.max_menu_options,
                user.bot.max_menu_options,
                &defaults.bot.max_menu_options,
            ),
            exit_command: pick(
                project_cfg.bot.exit_command,
                user.bot.exit_command,
                &defaults.bot.exit_command,
            ),
            welcome: pick(project_cfg.bot.welcome, user.bot.welcome, &defaults.bot.welcome),
            farewell: pick(project_cfg.bot.farewell, user.bot.farewell, &defaults.bot.farewell),
        },
        server: ServerSettings {
            port: pick(project_cfg.server.port, user.server.port, &defaults.server.port),
            host: pick(project_cfg.server.host, user.server.host, &defaults.server.host),
            enable_cors: pick(
                project_cfg.server.enable_cors,
                user.server.enable_cors,
                &defaults.server.enable_cors,
            ),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    config.bot.responses_file = shellexpand::tilde(&config.bot.responses_file).into_owned();
    debug!("Expanded responses file path: {}", config.bot.responses_file);
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    let required = [
        ("bot.name", &config.bot.name),
        ("bot.customer_name", &config.bot.customer_name),
        ("bot.responses_file", &config.bot.responses_file),
        ("bot.exit_command", &config.bot.exit_command),
        ("server.host", &config.server.host),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(anyhow!(CharcuError::Config(format!(
                "'{}' cannot be blank.",
                key
            ))));
        }
    }
    if config.bot.max_menu_options == 0 {
        return Err(anyhow!(CharcuError::Config(
            "'bot.max_menu_options' must be at least 1.".to_string()
        )));
    }
    let responses_path = PathBuf::from(&config.bot.responses_file);
    if !responses_path.exists() {
        warn!(
            "Configured responses file '{}' does not exist.",
            responses_path.display()
        );
    }
    debug!("Configuration validation successful.");
    Ok(())
}
