//! # kbchat Answer Sources
//!
//! File: cli/src/answer/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module connects a question to whichever backend answers it and turns
//! the outcome into a reply the front ends can display. It provides:
//! - `AnswerSource`: The backend seam (local retriever or remote HTTP service)
//! - `ChatReply`: The value returned for a single question
//! - `handle_question`: The single-request handler that validates input,
//!   calls the source and maps failures to the generic connectivity message
//! - `AskRequest` / `AskResponse`: The JSON payloads of `POST /ask`, shared by
//!   the remote client and the answer service
//!
//! ## Architecture
//!
//! Every front end (`kbchat ask`, `kbchat chat`) goes through `handle_question`,
//! so the empty-input and connectivity rules live in exactly one place:
//! 1. A blank (whitespace-only) question yields `ChatReply::Warning` and the
//!    source is never called.
//! 2. A successful source call yields `ChatReply::Answer`, including the
//!    retriever's "not found" fallback.
//! 3. A failed source call is logged with its cause and yields
//!    `ChatReply::Error` with a fixed message.
//!
use crate::core::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

pub mod local;
pub mod remote;

pub use local::LocalSource;
pub use remote::{RemoteSource, DEFAULT_BASE_URL};

/// Shown when the user submits a blank question.
pub const EMPTY_QUESTION_PROMPT: &str = "Please enter a question.";

/// Shown when the backend could not be reached or answered with an error.
pub const CONNECTIVITY_ERROR: &str =
    "Error: Could not connect to the backend. Please ensure it is running.";

/// Request body of `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Response body of `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// A backend that can answer a single question.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Answers `question`, which is never blank.
    async fn answer(&self, question: &str) -> Result<String>;

    /// Short human-readable description used in logs and banners.
    fn describe(&self) -> String;
}

/// Outcome of one submitted question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// The input was rejected before reaching the backend.
    Warning(String),
    /// The backend answered (possibly with the "not found" fallback).
    Answer(String),
    /// The backend failed; the cause has been logged.
    Error(String),
}

impl ChatReply {
    pub fn text(&self) -> &str {
        match self {
            ChatReply::Warning(text) | ChatReply::Answer(text) | ChatReply::Error(text) => text,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, ChatReply::Answer(_))
    }
}

/// Handles a single question end to end. Never fails; see the module docs.
pub async fn handle_question<S>(source: &S, question: &str) -> ChatReply
where
    S: AnswerSource + ?Sized,
{
    let question = question.trim();
    if question.is_empty() {
        debug!("Rejected blank question without calling {}", source.describe());
        return ChatReply::Warning(EMPTY_QUESTION_PROMPT.to_string());
    }

    match source.answer(question).await {
        Ok(answer) => ChatReply::Answer(answer),
        Err(e) => {
            error!("Answer source {} failed: {:?}", source.describe(), e);
            ChatReply::Error(CONNECTIVITY_ERROR.to_string())
        }
    }
}
