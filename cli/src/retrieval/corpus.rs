//! # Knowledge Base Corpus
//!
//! File: cli/src/retrieval/corpus.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `Corpus` is the ordered list of candidate sentences the retriever scans.
//! It is built once from a paragraph of prose, either the built-in Anna
//! University text or a UTF-8 file, and never changes afterwards.
//!
//! Sentences are produced by splitting on `.` and trimming each fragment, so
//! "a period followed by optional whitespace" ends a sentence. Fragments that
//! are empty after trimming are dropped. Abbreviations such as "C. N." are
//! split too; the retriever treats every fragment the same way.
//!
use crate::core::error::{KbchatError, Result};
use anyhow::Context;
use std::path::Path;
use tracing::{debug, warn};

/// The paragraph served when no knowledge base file is configured.
pub const BUILTIN_KNOWLEDGE_BASE: &str = "
Anna University is a public state university located in Tamil Nadu, India.
The main campus is in Guindy, Chennai and the satellite campus is in Chromepet, Chennai.
It was established on 4 September 1978.
It is ranked among the top universities in India.
The university's main campus houses the College of Engineering, Guindy; Alagappa College of Technology; School of Architecture and Planning; and three technical departments of the University of Madras.
It offers various undergraduate and postgraduate courses in engineering, technology, and applied sciences.
The admission process is highly competitive and is based on entrance examinations.
";

/// An immutable, ordered sequence of candidate sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    sentences: Vec<String>,
}

impl Corpus {
    /// Splits `text` into sentences.
    pub fn from_text(text: &str) -> Self {
        Self {
            sentences: split_sentences(text),
        }
    }

    /// The built-in Anna University knowledge base.
    pub fn builtin() -> Self {
        Self::from_text(BUILTIN_KNOWLEDGE_BASE)
    }

    /// Reads a UTF-8 text file and splits it into sentences.
    ///
    /// An empty file is accepted (every question then gets the fallback answer),
    /// but logged as a warning since it is almost certainly a mistake.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Err(KbchatError::KnowledgeBase(format!(
                "'{}' is a directory, expected a text file",
                path.display()
            ))
            .into());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| KbchatError::KnowledgeBase(e.to_string()))
            .with_context(|| format!("Failed to read knowledge base: {}", path.display()))?;
        let corpus = Self::from_text(&text);
        if corpus.is_empty() {
            warn!(
                "Knowledge base '{}' contains no sentences; every question will get the fallback answer.",
                path.display()
            );
        } else {
            debug!(
                "Loaded {} sentences from {}",
                corpus.len(),
                path.display()
            );
        }
        Ok(corpus)
    }

    /// Loads `path` when given, otherwise returns the built-in corpus.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No knowledge base configured, using the built-in corpus.");
                Ok(Self::builtin())
            }
        }
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Splits on `.`, trims every fragment and drops the blank ones.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn splits_on_period_and_optional_whitespace() {
        let sentences = split_sentences("Anna University is in Chennai. It was founded in 1978.");
        assert_eq!(
            sentences,
            vec!["Anna University is in Chennai", "It was founded in 1978"]
        );

        // No whitespace after the period still ends the sentence.
        assert_eq!(split_sentences("One.Two"), vec!["One", "Two"]);
    }

    #[test]
    fn drops_blank_fragments() {
        assert_eq!(split_sentences("  First. .  \n. Second...  "), vec!["First", "Second"]);
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(" . . \n ").is_empty());
    }

    #[test]
    fn builtin_corpus_has_seven_sentences() {
        let corpus = Corpus::builtin();
        assert_eq!(corpus.len(), 7);
        assert_eq!(
            corpus.sentences()[0],
            "Anna University is a public state university located in Tamil Nadu, India"
        );
        assert_eq!(
            corpus.sentences()[6],
            "The admission process is highly competitive and is based on entrance examinations"
        );
    }

    #[test]
    fn load_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kb.txt");
        fs::write(&path, "Rust is a language.\nCargo builds it.\n").unwrap();

        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.sentences(), ["Rust is a language", "Cargo builds it"]);
    }

    #[test]
    fn load_empty_file_gives_empty_corpus() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert!(Corpus::load(&path).unwrap().is_empty());
    }

    #[test]
    fn load_missing_file_is_knowledge_base_error() {
        let err = Corpus::load(Path::new("/definitely/not/here/kb.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read knowledge base"));
        assert!(matches!(
            err.downcast_ref::<KbchatError>(),
            Some(KbchatError::KnowledgeBase(_))
        ));
    }

    #[test]
    fn load_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = Corpus::load(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }

    #[test]
    fn load_or_builtin_without_path() {
        assert_eq!(Corpus::load_or_builtin(None).unwrap(), Corpus::builtin());
    }
}
