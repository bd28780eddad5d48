//! # Keyword Extraction
//!
//! File: cli/src/retrieval/keywords.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns a free-text question into the keywords the retriever looks for.
//! Short words ("is", "the", "who") are dropped by a length threshold rather
//! than a stop-word list.
//!
/// Derives the keyword set for a question.
///
/// The question is lowercased, every character that is neither alphanumeric
/// nor whitespace is removed, and the rest is split on whitespace. Only tokens
/// with more than `min_len` characters are kept, in question order.
pub fn extract_keywords(question: &str, min_len: usize) -> Vec<String> {
    let normalized: String = question
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    normalized
        .split_whitespace()
        .filter(|token| token.chars().count() > min_len)
        .map(str::to_owned)
        .collect()
}
