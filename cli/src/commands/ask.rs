//! # kbchat Ask Command
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `kbchat ask`, which answers one question and exits.
//!
//! Output conventions:
//! - answers (including the "not found" fallback) go to stdout, exit status 0
//! - the empty-question prompt goes to stderr, exit status 0
//! - a backend failure is reported by `main` as
//!   `Error: Could not connect to the backend. Please ensure it is running.`,
//!   exit status 1
//!
//! ## Examples
//!
//! ```bash
//! kbchat ask "Where is Anna University located?"
//! kbchat ask --policy first --min-keyword-len 2 where is the campus
//! KBCHAT_API_URL=http://10.0.0.7:8000 kbchat ask --remote "When was it established?"
//! ```
//!
use super::backend::BackendArgs;
use crate::answer::{handle_question, ChatReply};
use crate::core::config;
use crate::core::error::{KbchatError, Result};
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question. Multiple words are joined with spaces, so quoting is optional.
    #[arg(num_args = 0.., value_name = "QUESTION")]
    pub question: Vec<String>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let source = args.backend.build_source(&cfg)?;
    let question = args.question.join(" ");
    debug!("Asking {:?}", question);

    match handle_question(source.as_ref(), &question).await {
        ChatReply::Answer(answer) => println!("{}", answer),
        ChatReply::Warning(warning) => eprintln!("{}", warning),
        ChatReply::Error(_) => return Err(KbchatError::BackendUnavailable.into()),
    }
    Ok(())
}
