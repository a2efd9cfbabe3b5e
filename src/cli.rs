//! CLI interface for commit-relay.
//!
//! Every flag doubles as a host-environment input via the `INPUT_*`
//! convention, so a CI runner can drive the binary without arguments.

use clap::Parser;

use crate::config::DEFAULT_MODEL;

/// commit-relay: summarize the latest commit and relay it to a collector.
#[derive(Parser, Debug)]
#[command(name = "commit-relay")]
#[command(about = "Summarize the latest git commit and relay it to a collector endpoint", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Pre-written summary; when set, commit extraction and summarization
    /// are skipped and this value is used verbatim
    #[arg(long, env = "INPUT_CHANGES")]
    pub changes: Option<String>,

    /// API key for the summarization backend (required)
    #[arg(long = "blackbox-api-key", env = "INPUT_BLACKBOX-API-KEY", hide_env_values = true)]
    pub blackbox_api_key: Option<String>,

    /// API key for the delivery endpoint; adds a bearer header when set
    #[arg(long = "api-key", env = "INPUT_API-KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the delivery endpoint; delivery is skipped when unset
    #[arg(long = "api-url", env = "INPUT_API-URL")]
    pub api_url: Option<String>,

    /// Summarization model identifier
    #[arg(long, env = "INPUT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,
}
