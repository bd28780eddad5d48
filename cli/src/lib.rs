//! # kbchat Library
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! kbchat answers questions about a small knowledge base by lexical sentence
//! retrieval, either locally or through a remote answer service.
//!
//! The library target exposes every layer so the `kbchat` binary and the
//! integration tests in `cli/tests/` share one implementation:
//! - `retrieval`: Corpus, keyword extraction and the lexical retriever
//! - `answer`: Answer sources (local, remote) and the single-question handler
//! - `commands`: Command-line arguments and handlers, including the answer service
//! - `core`: Configuration and error types
//!
pub mod answer;
pub mod commands;
pub mod core;
pub mod retrieval;
