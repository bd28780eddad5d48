//! # Local Answer Source
//!
//! File: cli/src/answer/local.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Answers questions with the lexical retriever over a corpus held in memory.
//! The corpus is loaded once and never changes, so the same source can be
//! shared between the answer service's requests.
//!
use super::AnswerSource;
use crate::core::error::Result;
use crate::retrieval::{Corpus, Retriever, RetrieverConfig};
use async_trait::async_trait;

/// Answers from a corpus held in memory. Never fails.
#[derive(Debug, Clone, Default)]
pub struct LocalSource {
    corpus: Corpus,
    retriever: Retriever,
}

impl LocalSource {
    pub fn new(corpus: Corpus, config: RetrieverConfig) -> Self {
        Self {
            corpus,
            retriever: Retriever::new(config),
        }
    }

    /// Built-in knowledge base with the default retriever settings.
    pub fn builtin() -> Self {
        Self::new(Corpus::builtin(), RetrieverConfig::default())
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Synchronous form of `AnswerSource::answer`, used by the answer service.
    pub fn answer_now(&self, question: &str) -> String {
        self.retriever.retrieve(question, &self.corpus)
    }
}

#[async_trait]
impl AnswerSource for LocalSource {
    async fn answer(&self, question: &str) -> Result<String> {
        Ok(self.answer_now(question))
    }

    fn describe(&self) -> String {
        format!("local knowledge base ({} sentences)", self.corpus.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::{MatchPolicy, DEFAULT_FALLBACK};

    #[tokio::test]
    async fn answers_from_builtin_corpus() {
        let source = LocalSource::builtin();
        let answer = source.answer("When was it established?").await.unwrap();
        assert_eq!(answer, "It was established on 4 September 1978.");
    }

    #[tokio::test]
    async fn unknown_topics_get_fallback() {
        let source = LocalSource::builtin();
        let answer = source.answer("What is the weather today?").await.unwrap();
        assert_eq!(answer, DEFAULT_FALLBACK);
    }

    #[test]
    fn honours_retriever_config() {
        let source = LocalSource::new(
            Corpus::builtin(),
            RetrieverConfig {
                policy: MatchPolicy::First,
                ..Default::default()
            },
        );
        assert_eq!(
            source.answer_now("Where is the main campus?"),
            "The main campus is in Guindy, Chennai and the satellite campus is in Chromepet, Chennai."
        );
    }

    #[test]
    fn describe_mentions_sentence_count() {
        assert_eq!(
            LocalSource::builtin().describe(),
            "local knowledge base (7 sentences)"
        );
    }
}
