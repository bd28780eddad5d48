//! # kbchat Interactive Chat
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `kbchat chat`, a read-answer loop over stdin. Each line is one
//! question and is fully answered before the next line is read, so there is
//! never more than one request in flight. A failed remote call prints the
//! generic connectivity message and the session continues; the user simply
//! asks again.
//!
//! The session ends on `bye`, `quit`, `exit` (any case) or end of input.
//!
use super::backend::BackendArgs;
use crate::answer::{handle_question, AnswerSource, ChatReply};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

const PROMPT: &str = "Enter your question: ";
const QUIT_WORDS: [&str; 3] = ["bye", "quit", "exit"];

#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub backend: BackendArgs,
}

pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let source = args.backend.build_source(&cfg)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let answered = run_session(source.as_ref(), stdin, &mut stdout).await?;
    info!("Chat session finished after {} question(s)", answered);
    Ok(())
}

/// Runs the prompt loop until a quit word or end of input.
///
/// Returns how many questions received an answer.
pub async fn run_session<S, R, W>(source: &S, input: R, out: &mut W) -> Result<usize>
where
    S: AnswerSource + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Ask questions using the {}.", source.describe())?;
    writeln!(out, "Type 'bye' to quit.")?;

    let mut lines = input.lines();
    let mut answered = 0;
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush().context("Failed to flush output")?;

        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read question")?
        else {
            writeln!(out)?;
            break;
        };

        if QUIT_WORDS
            .iter()
            .any(|word| line.trim().eq_ignore_ascii_case(word))
        {
            writeln!(out, "Goodbye!")?;
            break;
        }

        match handle_question(source, &line).await {
            ChatReply::Answer(answer) => {
                answered += 1;
                writeln!(out, "Answer: {}", answer)?;
            }
            ChatReply::Warning(text) | ChatReply::Error(text) => writeln!(out, "{}", text)?,
        }
    }
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::{LocalSource, RemoteSource, CONNECTIVITY_ERROR, EMPTY_QUESTION_PROMPT};

    async fn transcript<S: AnswerSource + ?Sized>(source: &S, input: &str) -> (usize, String) {
        let mut out = Vec::new();
        let answered = run_session(source, input.as_bytes(), &mut out)
            .await
            .expect("session failed");
        (answered, String::from_utf8(out).expect("utf8 output"))
    }

    #[tokio::test]
    async fn answers_each_line_until_bye() {
        let source = LocalSource::builtin();
        let (answered, out) = transcript(
            &source,
            "When was it established?\n\nBYE\nWhere is the main campus?\n",
        )
        .await;

        assert_eq!(answered, 1);
        assert!(out.contains("Answer: It was established on 4 September 1978."));
        assert!(out.contains(EMPTY_QUESTION_PROMPT));
        assert!(out.contains("Goodbye!"));
        assert!(!out.contains("Guindy")); // Never asked: session ended at BYE
    }

    #[tokio::test]
    async fn ends_at_end_of_input() {
        let source = LocalSource::builtin();
        let (answered, out) = transcript(&source, "admission process").await;
        assert_eq!(answered, 1);
        assert!(out.contains("highly competitive"));
        assert!(!out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn remote_failure_keeps_session_alive() {
        // Bind and release a port so nothing is listening on it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let source = RemoteSource::new(format!("http://127.0.0.1:{}", port)).unwrap();
        let (answered, out) = transcript(&source, "first question\nsecond question\nquit\n").await;

        assert_eq!(answered, 0);
        assert_eq!(out.matches(CONNECTIVITY_ERROR).count(), 2);
        assert!(out.contains("Goodbye!"));
    }
}
