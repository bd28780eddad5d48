//! # kbchat Answer Service Configuration
//!
//! File: cli/src/commands/serve/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module merges the settings for `kbchat serve` from:
//! 1. Command-line arguments (highest priority, when explicitly set)
//! 2. The `[server]` table of the loaded kbchat configuration
//! 3. Default values (lowest priority)
//!
//! ## Examples
//!
//! ```toml
//! [server]
//! port = 9000
//! host = "0.0.0.0"
//! enable_cors = false
//! ```
//!
//! `--port` and `--host` have no clap default so an explicitly passed flag
//! can be told apart from an untouched one; the built-in defaults are applied
//! last.
//!
use crate::commands::backend::RetrieverArgs;
use crate::core::config::ServerSettings;
use crate::core::error::{KbchatError, Result};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// Port used when neither `--port` nor `[server] port` is set.
pub const DEFAULT_PORT: u16 = 8000;

/// Host used when neither `--host` nor `[server] host` is set.
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// # Serve Command Arguments (`ServeArgs`)
///
/// Command-line arguments accepted by `kbchat serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Sets the network port the server will listen on.
    /// Defaults to `[server] port`, then `8000`.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Sets the network IP address the server will bind to.
    /// Use `0.0.0.0` to accept connections on all interfaces.
    /// Defaults to `[server] host`, then `127.0.0.1`.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    /// By default any origin may call the service.
    #[arg(long)]
    pub no_cors: bool,

    #[command(flatten)]
    pub retriever: RetrieverArgs,
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// The consolidated settings the server logic runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The network port the server will listen on.
    pub port: u16,

    /// The network IP address the server will bind to.
    pub host: IpAddr,

    /// Indicates whether CORS headers should be enabled.
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST,
            enable_cors: true,
        }
    }
}

/// # Merge Server Configuration (`merge_config`)
///
/// Each setting comes from the command line if given, else from the
/// `[server]` table, else from `ServerConfig::default()`.
///
/// ## Errors
///
/// Returns an error if the file's `host` is needed and is not a valid IP address.
pub fn merge_config(args: &ServeArgs, settings: &ServerSettings) -> Result<ServerConfig> {
    let defaults = ServerConfig::default();

    let port = args.port.or(settings.port).unwrap_or(defaults.port);

    let host = match (args.host, &settings.host) {
        (Some(host), _) => host,
        (None, Some(host)) => host.parse().map_err(|_| {
            KbchatError::Config(format!("Invalid server host '{}' in configuration", host))
        })?,
        (None, None) => defaults.host,
    };

    // CORS: --no-cors always wins; otherwise the file decides, defaulting to on.
    let enable_cors = if args.no_cors {
        false
    } else {
        settings.enable_cors.unwrap_or(defaults.enable_cors)
    };

    let effective_config = ServerConfig {
        port,
        host,
        enable_cors,
    };
    debug!("Merged server configuration: {:?}", effective_config);
    Ok(effective_config)
}
