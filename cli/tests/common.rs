//! # kbchat CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`ask.rs`, `main_tests.rs`, ...).
//!
//! Every command built here runs with an isolated configuration: the user
//! config is pointed at a file that does not exist and the environment
//! variables that change behaviour are removed, so a developer's own
//! `~/.config/kbchat/config.toml` or `KBCHAT_API_URL` cannot leak into tests.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get kbchat Command (`kbchat_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `kbchat` binary with an
/// isolated environment.
///
/// ## Panics
/// Panics if the `kbchat` binary cannot be found via `Command::cargo_bin`.
pub fn kbchat_cmd() -> Command {
    let mut cmd = Command::cargo_bin("kbchat").expect("Failed to find kbchat binary for testing");
    cmd.env("KBCHAT_CONFIG", "/nonexistent/kbchat/config.toml")
        .env_remove("KBCHAT_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Like `kbchat_cmd`, but running inside `dir` (for `.kbchat.toml` discovery).
pub fn kbchat_cmd_in(dir: &Path) -> Command {
    let mut cmd = kbchat_cmd();
    cmd.current_dir(dir);
    cmd
}

/// A loopback URL on which nothing is listening.
pub fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
