//! # Lexical Answer Retriever
//!
//! File: cli/src/retrieval/retriever.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Answers a question by returning the corpus sentences that share a keyword
//! with it. Matching is plain substring containment on lowercased text, so a
//! short keyword such as `ann` also matches inside `Anna`. There is no scoring
//! or ranking: matches come back in corpus order.
//!
//! The behaviour is controlled by `RetrieverConfig`:
//! - `min_keyword_len`: question tokens must be longer than this to count
//! - `policy`: return every matching sentence (`all`) or only the first (`first`)
//! - `fallback`: the answer when nothing matches
//!
//! Blank questions are the caller's responsibility; see
//! `crate::answer::handle_question`.
//!
use super::corpus::Corpus;
use super::keywords::extract_keywords;
use serde::Deserialize;
use tracing::debug;

/// The answer returned when no sentence matches.
pub const DEFAULT_FALLBACK: &str =
    "I'm sorry, I couldn't find an answer to your question in my knowledge base.";

/// Default keyword length threshold; keywords need at least 4 characters.
pub const DEFAULT_MIN_KEYWORD_LEN: usize = 3;

/// Which matching sentences make up the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Every matching sentence, joined with ". ".
    #[default]
    All,
    /// Only the first matching sentence.
    First,
}

/// Tunable parameters of the retriever.
///
/// The `[retriever]` config table is read into
/// `crate::core::config::RetrieverSettings` and resolved into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieverConfig {
    pub min_keyword_len: usize,
    pub policy: MatchPolicy,
    pub fallback: String,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            min_keyword_len: DEFAULT_MIN_KEYWORD_LEN,
            policy: MatchPolicy::All,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Retriever {
    config: RetrieverConfig,
}

impl Retriever {
    pub fn new(config: RetrieverConfig) -> Self {
        Self { config }
    }

    /// Sentences containing at least one keyword of `question`, in corpus order.
    ///
    /// Under `MatchPolicy::First` at most one sentence is returned.
    pub fn matching_sentences<'c>(&self, question: &str, corpus: &'c Corpus) -> Vec<&'c str> {
        let keywords = extract_keywords(question, self.config.min_keyword_len);
        debug!("Keywords for {:?}: {:?}", question, keywords);
        if keywords.is_empty() {
            return Vec::new();
        }

        let mut matches = corpus.sentences().iter().filter(|sentence| {
            let lowered = sentence.to_lowercase();
            keywords.iter().any(|keyword| lowered.contains(keyword.as_str()))
        });

        match self.config.policy {
            MatchPolicy::All => matches.map(String::as_str).collect(),
            MatchPolicy::First => matches.next().map(String::as_str).into_iter().collect(),
        }
    }

    /// Produces the answer text for `question`.
    pub fn retrieve(&self, question: &str, corpus: &Corpus) -> String {
        let matches = self.matching_sentences(question, corpus);
        if matches.is_empty() {
            debug!("No sentence matched {:?}", question);
            return self.config.fallback.clone();
        }
        format!("{}.", matches.join(". "))
    }
}

/// Retrieves from a raw paragraph using the default configuration.
pub fn retrieve(question: &str, corpus: &str) -> String {
    Retriever::default().retrieve(question, &Corpus::from_text(corpus))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHENNAI: &str = "Anna University is in Chennai. It was founded in 1978.";

    fn retriever_with(min_keyword_len: usize, policy: MatchPolicy) -> Retriever {
        Retriever::new(RetrieverConfig {
            min_keyword_len,
            policy,
            ..Default::default()
        })
    }

    #[test]
    fn returns_only_the_matching_sentence() {
        assert_eq!(
            retrieve("Where is Anna University located", CHENNAI),
            "Anna University is in Chennai."
        );
    }

    #[test]
    fn joins_all_matches_in_corpus_order() {
        let corpus = Corpus::from_text("Ripe apples. Green pears. Ripe cherries.");
        assert_eq!(
            Retriever::default().retrieve("Which fruit is ripe?", &corpus),
            "Ripe apples. Ripe cherries."
        );
    }

    #[test]
    fn first_policy_returns_single_sentence() {
        let corpus = Corpus::from_text("Ripe apples. Green pears. Ripe cherries.");
        assert_eq!(
            retriever_with(3, MatchPolicy::First).retrieve("Which fruit is ripe?", &corpus),
            "Ripe apples."
        );
    }

    #[test]
    fn substring_not_whole_word() {
        assert_eq!(
            retriever_with(2, MatchPolicy::All).retrieve("ann?", &Corpus::from_text(CHENNAI)),
            "Anna University is in Chennai."
        );
    }

    #[test]
    fn short_keywords_are_ignored_by_default() {
        // "ann" has only three characters, below the default threshold.
        assert_eq!(retrieve("ann?", CHENNAI), DEFAULT_FALLBACK);
    }

    #[test]
    fn fallback_when_nothing_matches() {
        assert_eq!(retrieve("What is the weather today?", CHENNAI), DEFAULT_FALLBACK);
    }

    #[test]
    fn custom_fallback_is_returned_verbatim() {
        let retriever = Retriever::new(RetrieverConfig {
            fallback: "No idea.".into(),
            ..Default::default()
        });
        assert_eq!(
            retriever.retrieve("weather", &Corpus::from_text(CHENNAI)),
            "No idea."
        );
    }

    #[test]
    fn empty_corpus_gives_fallback() {
        assert_eq!(retrieve("Where is Anna University", ""), DEFAULT_FALLBACK);
        assert_eq!(retrieve("Where is Anna University", " . . "), DEFAULT_FALLBACK);
    }

    #[test]
    fn keywordless_question_gives_fallback() {
        assert_eq!(retrieve("?!", CHENNAI), DEFAULT_FALLBACK);
        assert_eq!(retrieve("", CHENNAI), DEFAULT_FALLBACK);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(retrieve("CHENNAI", CHENNAI), "Anna University is in Chennai.");
    }

    #[derive(serde::Deserialize)]
    struct PolicyTable {
        policy: MatchPolicy,
    }

    #[test]
    fn policy_deserializes_lowercase() {
        let table: PolicyTable = toml::from_str("policy = \"first\"").unwrap();
        assert_eq!(table.policy, MatchPolicy::First);
        assert!(toml::from_str::<PolicyTable>("policy = \"First\"").is_err());
    }
}
