//! # kbchat Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the kbchat CLI and the
//! argument groups they share.
//!
//! ## Commands
//!
//! - `ask`: Answer one question and exit
//! - `chat`: Interactive question loop
//! - `serve`: HTTP answer service exposing `POST /ask`
//!
//! Each command defines its own arguments structure and an async handler
//! function; `main.rs` routes to them.
//!

/// One-shot question answering (`kbchat ask`).
pub mod ask;
/// Knowledge base, retriever and backend selection flags shared by the commands.
pub mod backend;
/// Interactive read-answer loop (`kbchat chat`).
pub mod chat;
/// HTTP answer service (`kbchat serve`).
pub mod serve;
