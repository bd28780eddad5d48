//! # kbchat Lexical Retrieval
//!
//! File: cli/src/retrieval/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Keyword-based sentence retrieval over a static knowledge base:
//! - `corpus`: Splits a paragraph into the immutable list of candidate sentences
//! - `keywords`: Turns a question into its keyword set
//! - `retriever`: Matches keywords against sentences and builds the answer
//!
//! ## Examples
//!
//! ```rust
//! use kbchat::retrieval::{retrieve, Corpus, MatchPolicy, Retriever, RetrieverConfig};
//!
//! let answer = retrieve(
//!     "Where is Anna University located",
//!     "Anna University is in Chennai. It was founded in 1978.",
//! );
//! assert_eq!(answer, "Anna University is in Chennai.");
//!
//! let retriever = Retriever::new(RetrieverConfig {
//!     policy: MatchPolicy::First,
//!     ..Default::default()
//! });
//! let first = retriever.retrieve("Where is the main campus?", &Corpus::builtin());
//! assert!(first.starts_with("The main campus is in Guindy"));
//! ```
//!
pub mod corpus;
pub mod keywords;
pub mod retriever;

pub use corpus::{Corpus, BUILTIN_KNOWLEDGE_BASE};
pub use keywords::extract_keywords;
pub use retriever::{
    retrieve, MatchPolicy, Retriever, RetrieverConfig, DEFAULT_FALLBACK, DEFAULT_MIN_KEYWORD_LEN,
};
