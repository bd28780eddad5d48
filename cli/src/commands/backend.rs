//! # Backend Selection Arguments
//!
//! File: cli/src/commands/backend.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Arguments shared by the commands that need an answer source, and the
//! functions that turn them (plus the loaded `Config`) into a concrete source.
//!
//! - `RetrieverArgs`: knowledge base and retriever tuning (`ask`, `chat`, `serve`)
//! - `BackendArgs`: `RetrieverArgs` plus the remote switch and base URL (`ask`, `chat`)
//!
//! Command-line values always win over configuration file values.
//!
use crate::answer::{AnswerSource, LocalSource, RemoteSource, DEFAULT_BASE_URL};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::retrieval::{Corpus, MatchPolicy, RetrieverConfig};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Knowledge base and retriever options.
#[derive(Args, Debug, Clone, Default)]
pub struct RetrieverArgs {
    /// Text file to use as the knowledge base instead of the built-in one.
    #[arg(long, value_name = "PATH")]
    pub kb: Option<PathBuf>,

    /// Question words must be longer than this many characters to be used as keywords.
    #[arg(long, value_name = "N")]
    pub min_keyword_len: Option<usize>,

    /// Return every matching sentence or only the first one.
    #[arg(long, value_enum)]
    pub policy: Option<MatchPolicy>,
}

/// Answer source selection for interactive commands.
#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Ask a remote answer service instead of searching the local knowledge base.
    #[arg(long)]
    pub remote: bool,

    /// Base URL of the remote answer service (only used with --remote).
    #[arg(long, env = "KBCHAT_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    #[command(flatten)]
    pub retriever: RetrieverArgs,
}

impl RetrieverArgs {
    /// Applies command-line overrides on top of the configured retriever settings.
    pub fn retriever_config(&self, config: &Config) -> RetrieverConfig {
        let mut retriever = config.retriever.resolve();
        if let Some(min_len) = self.min_keyword_len {
            retriever.min_keyword_len = min_len;
        }
        if let Some(policy) = self.policy {
            retriever.policy = policy;
        }
        retriever
    }

    /// `--kb` if given, else `[knowledge_base] path`, else none (built-in corpus).
    pub fn knowledge_base_path(&self, config: &Config) -> Option<PathBuf> {
        self.kb
            .clone()
            .or_else(|| config.knowledge_base.path.as_ref().map(PathBuf::from))
    }

    pub fn build_local_source(&self, config: &Config) -> Result<LocalSource> {
        let corpus = Corpus::load_or_builtin(self.knowledge_base_path(config).as_deref())?;
        Ok(LocalSource::new(corpus, self.retriever_config(config)))
    }
}

impl BackendArgs {
    /// `--api-url` / `KBCHAT_API_URL`, else `[remote] base_url`, else the loopback default.
    ///
    /// A blank value counts as unset at every level.
    pub fn base_url(&self, config: &Config) -> String {
        let non_blank = |url: &&String| !url.trim().is_empty();
        self.api_url
            .as_ref()
            .filter(non_blank)
            .or_else(|| config.remote.base_url.as_ref().filter(non_blank))
            .cloned()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn build_source(&self, config: &Config) -> Result<Box<dyn AnswerSource>> {
        let source: Box<dyn AnswerSource> = if self.remote {
            Box::new(RemoteSource::new(self.base_url(config))?)
        } else {
            Box::new(self.retriever.build_local_source(config)?)
        };
        info!("Using {}", source.describe());
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{KnowledgeBaseConfig, RemoteConfig, RetrieverSettings};
    use tempfile::TempDir;

    #[test]
    fn cli_overrides_configured_retriever_settings() {
        let config = Config {
            retriever: RetrieverSettings {
                min_keyword_len: Some(5),
                policy: Some(MatchPolicy::All),
                fallback: Some("Nothing.".into()),
            },
            ..Default::default()
        };
        let args = RetrieverArgs {
            min_keyword_len: Some(2),
            policy: Some(MatchPolicy::First),
            ..Default::default()
        };

        let retriever = args.retriever_config(&config);
        assert_eq!(retriever.min_keyword_len, 2);
        assert_eq!(retriever.policy, MatchPolicy::First);
        assert_eq!(retriever.fallback, "Nothing."); // Not overridable from the CLI
    }

    #[test]
    fn base_url_precedence() {
        let config = Config {
            remote: RemoteConfig {
                base_url: Some("http://from-config:9000".into()),
            },
            ..Default::default()
        };

        let explicit = BackendArgs {
            api_url: Some("http://from-cli:8000".into()),
            ..Default::default()
        };
        assert_eq!(explicit.base_url(&config), "http://from-cli:8000");
        assert_eq!(
            BackendArgs::default().base_url(&config),
            "http://from-config:9000"
        );
        assert_eq!(
            BackendArgs::default().base_url(&Config::default()),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn blank_base_urls_count_as_unset() {
        let blank_cli = BackendArgs {
            api_url: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(blank_cli.base_url(&Config::default()), DEFAULT_BASE_URL);

        let config = Config {
            remote: RemoteConfig {
                base_url: Some("http://from-config:9000".into()),
            },
            ..Default::default()
        };
        assert_eq!(blank_cli.base_url(&config), "http://from-config:9000");

        let blank_config = Config {
            remote: RemoteConfig {
                base_url: Some(String::new()),
            },
            ..Default::default()
        };
        assert_eq!(
            BackendArgs::default().base_url(&blank_config),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn knowledge_base_from_config_when_no_flag() {
        let temp_dir = TempDir::new().unwrap();
        let kb = temp_dir.path().join("kb.txt");
        std::fs::write(&kb, "Ferris is a crab. Crabs live by the sea.").unwrap();
        let config = Config {
            knowledge_base: KnowledgeBaseConfig {
                path: Some(kb.to_string_lossy().to_string()),
            },
            ..Default::default()
        };

        let source = RetrieverArgs::default().build_local_source(&config).unwrap();
        assert_eq!(source.corpus().len(), 2);
        assert_eq!(source.answer_now("ferris"), "Ferris is a crab.");
    }

    #[test]
    fn build_source_picks_backend() {
        let local = BackendArgs::default().build_source(&Config::default()).unwrap();
        assert!(local.describe().starts_with("local knowledge base"));

        let remote = BackendArgs {
            remote: true,
            ..Default::default()
        }
        .build_source(&Config::default())
        .unwrap();
        assert_eq!(
            remote.describe(),
            "remote answer service at http://127.0.0.1:8000"
        );
    }

    #[test]
    fn missing_knowledge_base_is_an_error() {
        let args = BackendArgs {
            retriever: RetrieverArgs {
                kb: Some(PathBuf::from("/no/such/kb.txt")),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(args.build_source(&Config::default()).is_err());
    }
}
