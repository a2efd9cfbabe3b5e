//! Run configuration assembled once at process start.
//!
//! [`RunConfig::from_cli`] is the only place ambient environment state is
//! read; everything downstream receives explicit values.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::error::ConfigError;

/// Default summarization model identifier.
pub const DEFAULT_MODEL: &str = "blackboxai";

/// Immutable configuration snapshot for a single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Caller-supplied summary; bypasses extraction and summarization.
    pub changes: Option<String>,
    /// Credential for the summarization backend. Never empty.
    pub summary_api_key: String,
    /// Credential for the delivery endpoint.
    pub delivery_api_key: Option<String>,
    /// Delivery endpoint base URL.
    pub delivery_url: Option<String>,
    /// Summarization model identifier.
    pub model: String,
    /// Host-supplied `owner/name` repository identifier.
    pub repository_ident: Option<String>,
    /// Host-supplied ref name, used as a branch fallback.
    pub ref_name: Option<String>,
    /// Path of the host output sink, if any.
    pub output_path: Option<PathBuf>,
}

impl RunConfig {
    /// Assemble the snapshot from CLI inputs and the process environment.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let summary_api_key = cli.blackbox_api_key.unwrap_or_default();
        if summary_api_key.is_empty() {
            return Err(ConfigError::MissingSummaryApiKey);
        }
        debug!(
            api_key = %redact(&summary_api_key),
            model = %cli.model,
            "Assembled run configuration"
        );

        Ok(Self {
            changes: cli.changes.filter(|value| !value.is_empty()),
            summary_api_key,
            delivery_api_key: cli.api_key.filter(|value| !value.is_empty()),
            delivery_url: cli.api_url.filter(|value| !value.is_empty()),
            model: cli.model,
            repository_ident: env_var("GITHUB_REPOSITORY"),
            ref_name: env_var("GITHUB_REF_NAME"),
            output_path: env_var("GITHUB_OUTPUT").map(PathBuf::from),
        })
    }

    /// Whether delivery should be attempted.
    ///
    /// URL-only policy: the delivery key is optional and only controls the
    /// bearer header.
    pub fn delivery_configured(&self) -> bool {
        self.delivery_url.is_some()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Truncate a credential for logging. Only the first four characters may
/// ever appear in diagnostics.
pub fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}...")
}
