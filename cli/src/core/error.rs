//! # kbchat Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout kbchat. It follows the
//! same two-part approach as the rest of the crate:
//! - `KbchatError`: A custom error enum using `thiserror` for the failures the
//!   application distinguishes between
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible propagation
//!
//! The error types cover:
//! - Configuration errors (bad TOML values, invalid URLs or hosts)
//! - Knowledge base loading errors
//! - Blank questions rejected at the service boundary
//! - Remote answer source failures (transport and non-success statuses)
//!
//! A blank question typed by a user and a question with no matching sentence
//! are *not* errors; they are ordinary replies (see `crate::answer::ChatReply`).
//! `EmptyQuestion` only exists for the HTTP answer service, which must reject
//! such requests with a 400 status.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Add context to I/O failures using anyhow
//! let text = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read knowledge base: {}", path.display()))?;
//!
//! // Inspect a remote failure
//! if let Some(KbchatError::RemoteStatus { status, .. }) = err.downcast_ref::<KbchatError>() {
//!     tracing::warn!("answer service answered with {}", status);
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the kbchat application.
#[derive(Error, Debug)]
pub enum KbchatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("Question cannot be empty.")]
    EmptyQuestion,

    #[error("Remote request failed: {source}")]
    RemoteTransport {
        #[from]
        source: reqwest::Error,
    },

    #[error("Answer service at '{url}' responded with status {status}")]
    RemoteStatus { url: String, status: u16 },

    #[error("Could not connect to the backend. Please ensure it is running.")]
    BackendUnavailable,
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
