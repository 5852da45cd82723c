//! # CharcuBot HTTP Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Combines the `[server]` section of the settings with the `srv` command-line
//! flags into the effective `ServerConfig`:
//! 1. Command-line arguments (highest priority)
//! 2. `[server]` in `.charcubot.toml` / user config
//! 3. Default values (lowest priority)
//!
//! ```bash
//! charcubot srv --port 9000 --host 0.0.0.0 --no-cors
//! ```
//!
use crate::core::config::ServerSettings;
use crate::core::error::{CharcuError, Result};
use anyhow::anyhow;
use clap::Parser;
use std::net::IpAddr;
use tracing::debug;

/// # Server Command Arguments (`SrvArgs`)
///
/// Every flag is optional; unset flags fall back to the `[server]` settings.
#[derive(Parser, Debug, Default)]
pub struct SrvArgs {
    /// Network port to listen on (falls forward to the next free port if taken).
    #[arg(long, short)]
    pub port: Option<u16>,

    /// IP address to bind to. Use `0.0.0.0` to listen on all interfaces.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// # Effective Server Configuration (`ServerConfig`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
}

/// Merges `args` over `settings`.
///
/// ## Errors
///
/// Returns `CharcuError::Config` if `settings.host` is not an IP address.
pub fn merge_config(args: &SrvArgs, settings: &ServerSettings) -> Result<ServerConfig> {
    let host = match args.host {
        Some(host) => host,
        None => settings.host.parse().map_err(|e| {
            anyhow!(CharcuError::Config(format!(
                "Invalid server.host '{}': {}",
                settings.host, e
            )))
        })?,
    };

    let config = ServerConfig {
        port: args.port.unwrap_or(settings.port),
        host,
        enable_cors: settings.enable_cors && !args.no_cors,
    };
    debug!("Effective server config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_settings_used_when_no_flags() {
        let settings = ServerSettings {
            port: 8100,
            host: "0.0.0.0".into(),
            enable_cors: true,
        };
        let config = merge_config(&SrvArgs::default(), &settings).unwrap();
        assert_eq!(
            config,
            ServerConfig {
                port: 8100,
                host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                enable_cors: true,
            }
        );
    }

    #[test]
    fn test_flags_override_settings() {
        let args = SrvArgs {
            port: Some(9000),
            host: Some(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            no_cors: true,
        };
        let settings = ServerSettings {
            host: "not-an-ip".into(),
            ..Default::default()
        };
        let config = merge_config(&args, &settings).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(!config.enable_cors);
    }

    #[test]
    fn test_cors_disabled_in_settings_stays_disabled() {
        let settings = ServerSettings {
            enable_cors: false,
            ..Default::default()
        };
        assert!(!merge_config(&SrvArgs::default(), &settings).unwrap().enable_cors);
    }

    #[test]
    fn test_invalid_host_setting() {
        let settings = ServerSettings {
            host: "localhost".into(),
            ..Default::default()
        };
        let err = merge_config(&SrvArgs::default(), &settings).unwrap_err();
        assert!(err.to_string().contains("Invalid server.host 'localhost'"));
    }
}
