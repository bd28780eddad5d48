//! # kbchat Answer Service
//!
//! File: cli/src/commands/serve/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module provides `kbchat serve`, an HTTP service that answers questions
//! from the local knowledge base. It is the counterpart of the remote answer
//! source: `kbchat ask --remote` and `kbchat chat --remote` talk to it.
//!
//! The module is organized into two components:
//! - `config.rs`: Command-line arguments and merging with the `[server]` config table
//! - `server_logic.rs`: The Axum router, port selection and graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Serve the built-in knowledge base on 127.0.0.1:8000
//! kbchat serve
//!
//! # Serve a custom knowledge base on all interfaces without CORS
//! kbchat serve --host 0.0.0.0 --port 9000 --no-cors --kb ./kb.txt
//! ```
//!
//! Server startup flow:
//! 1. Load the kbchat configuration and merge it with the command-line arguments
//! 2. Load the knowledge base and build the retriever
//! 3. Find an available port and start serving
//!
use crate::core::config as core_config;
use crate::core::error::Result;
use tracing::info;

pub use config::ServeArgs;

/// Handles command-line arguments and merging with the `[server]` config table.
pub mod config;

/// Contains the Axum-based answer service implementation.
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Entry point for `kbchat serve`: resolves configuration, loads the
/// knowledge base once, and runs the service until shutdown.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let cfg = core_config::load_config()?;
    let server_config = config::merge_config(&args, &cfg.server)?;
    info!("Effective server config: {:?}", server_config);

    let source = args.retriever.build_local_source(&cfg)?;
    server_logic::run_server(server_config, source).await
}
