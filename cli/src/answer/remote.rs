//! # Remote Answer Source
//!
//! File: cli/src/answer/remote.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! HTTP client for an answer service that speaks the `/ask` protocol
//! (`kbchat serve` is one). Each question is one `POST {base_url}/ask` with a
//! JSON body `{"question": ...}`; the reply must be a 2xx response with a JSON
//! body containing `answer`.
//!
//! There is no retry and no client-side timeout. Any failure (transport,
//! non-success status, undecodable body) is returned to the caller as an error;
//! `crate::answer::handle_question` logs it and shows the generic message.
//!
use super::{AnswerSource, AskRequest, AskResponse};
use crate::core::config::validate_base_url;
use crate::core::error::{KbchatError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Used when neither `--api-url`, `KBCHAT_API_URL` nor `[remote] base_url` is set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: Client,
    base_url: String,
}

impl RemoteSource {
    /// Creates a client for the service at `base_url`. Trailing slashes are ignored.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;
        let client = Client::builder()
            .build()
            .map_err(|source| KbchatError::RemoteTransport { source })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ask_url(&self) -> String {
        format!("{}/ask", self.base_url)
    }
}

#[async_trait]
impl AnswerSource for RemoteSource {
    async fn answer(&self, question: &str) -> Result<String> {
        let url = self.ask_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&AskRequest {
                question: question.to_string(),
            })
            .send()
            .await
            .map_err(KbchatError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(KbchatError::RemoteStatus {
                url,
                status: status.as_u16(),
            }
            .into());
        }

        let body: AskResponse = response.json().await.map_err(KbchatError::from)?;
        Ok(body.answer)
    }

    fn describe(&self) -> String {
        format!("remote answer service at {}", self.base_url)
    }
}
