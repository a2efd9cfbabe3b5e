//! Pipeline orchestration: validate config, resolve the summary, deliver,
//! publish outputs.
//!
//! Control flow is strictly sequential and single-pass. Delivery returning a
//! non-2xx status is the one soft failure: it is logged and the run still
//! completes; every other failure aborts with a typed error.

use std::path::Path;

use tracing::{info, warn};

use crate::config::RunConfig;
use crate::deliver::DeliveryClient;
use crate::error::{ConfigError, PipelineError};
use crate::git::{self, CommitRecord};
use crate::summarize::SummaryClient;

/// Placeholder response body published when no delivery endpoint is
/// configured.
pub const SKIPPED_RESPONSE_BODY: &str = "Delivery skipped: no api-url configured";

/// Where the resolved summary comes from, decided once before the
/// summarization and delivery stages.
#[derive(Debug)]
pub enum SummarySource {
    /// Caller-supplied text, used verbatim.
    Supplied(String),
    /// Derived from the latest commit via the summarization backend.
    Derived(CommitRecord),
}

/// Outputs published at the end of a successful run.
#[derive(Debug)]
pub struct RunOutputs {
    /// Resolved commit summary.
    pub summary: String,
    /// Raw delivery response body, or [`SKIPPED_RESPONSE_BODY`].
    pub response: String,
    /// Delivery HTTP status, `200` when delivery was skipped.
    pub status: u16,
}

/// Execute one pass of the pipeline against the repository at `repo_path`.
pub async fn run(config: &RunConfig, repo_path: &Path) -> Result<RunOutputs, PipelineError> {
    if config.summary_api_key.is_empty() {
        return Err(ConfigError::MissingSummaryApiKey.into());
    }

    let source = resolve_source(config, repo_path)?;

    let (summary, commit) = match source {
        SummarySource::Supplied(text) => {
            info!("Using caller-supplied summary; skipping extraction and summarization");
            (text, None)
        }
        SummarySource::Derived(commit) => {
            let client = SummaryClient::new(config.summary_api_key.clone(), config.model.clone());
            let summary = client.generate(&commit).await?;
            (summary, Some(commit))
        }
    };

    let Some(target_url) = config.delivery_url.as_deref() else {
        info!("No delivery endpoint configured; skipping delivery");
        return Ok(RunOutputs {
            summary,
            response: SKIPPED_RESPONSE_BODY.to_string(),
            status: 200,
        });
    };

    let repository = resolve_repository(config, repo_path);
    let client = DeliveryClient::new(
        config.delivery_api_key.clone(),
        repository,
        config.ref_name.clone(),
    );
    let response = client.deliver(&summary, target_url, commit.as_ref()).await?;

    if !response.is_success() {
        warn!(
            status = response.status,
            body = %response.body,
            "Delivery endpoint returned a non-success status"
        );
    }

    Ok(RunOutputs {
        summary,
        response: response.body,
        status: response.status,
    })
}

/// Pick the summary source: a non-empty supplied value wins outright, and
/// the repository is never touched in that case.
fn resolve_source(config: &RunConfig, repo_path: &Path) -> Result<SummarySource, PipelineError> {
    if let Some(changes) = config.changes.as_deref() {
        if !changes.is_empty() {
            return Ok(SummarySource::Supplied(changes.to_string()));
        }
    }

    let commit = git::extract_commit(repo_path)?;
    Ok(SummarySource::Derived(commit))
}

/// Host-supplied identifier when present, else the remote-URL lookup.
fn resolve_repository(config: &RunConfig, repo_path: &Path) -> String {
    match config.repository_ident.as_deref() {
        Some(ident) if !ident.is_empty() => ident.to_string(),
        _ => git::repository_ident(repo_path),
    }
}
