//! Error types for the pipeline stages using thiserror.
//!
//! Each stage has its own enum; [`PipelineError`] folds them into the single
//! run-level failure surfaced to the caller. Every variant here is a hard
//! failure. A non-2xx status from the delivery endpoint is deliberately NOT
//! represented here: it travels back as a [`crate::deliver::RemoteResponse`]
//! and the orchestrator logs it as a warning.

use thiserror::Error;

/// Errors from assembling the run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The summarization credential is required for every run.
    #[error("blackbox-api-key input is required but was empty")]
    MissingSummaryApiKey,
}

/// Errors from reading commit metadata out of the local repository.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Working directory is not inside a git repository.
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    /// HEAD is unborn, i.e. the repository has no commits yet.
    #[error("Repository has no commits: {0}")]
    NoCommits(#[source] git2::Error),

    /// HEAD exists but could not be resolved to a commit.
    #[error("Failed to resolve HEAD commit: {0}")]
    ResolveHead(#[source] git2::Error),

    /// Diffing the commit against its parent failed.
    #[error("Failed to diff commit {hash}: {source}")]
    Diff {
        /// Full hash of the commit being diffed.
        hash: String,
        /// Underlying git failure.
        #[source]
        source: git2::Error,
    },

    /// Local branch enumeration failed during detached-HEAD fallback.
    #[error("Failed to enumerate local branches: {0}")]
    Branches(#[source] git2::Error),
}

/// Errors from the summarization backend call.
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// DNS, connection, or TLS failure before a response arrived.
    #[error("Summarization request failed: {0}")]
    Transport(String),

    /// The 30-second bound expired and the request was aborted.
    #[error("Summarization request timed out after {0} seconds")]
    Timeout(u64),

    /// The backend answered with a non-success HTTP status.
    #[error("Summarization backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code received.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The backend answered but the body was not the expected
    /// `choices[0].message.content` shape. Carries the raw body so the
    /// mismatch can be diagnosed.
    #[error("Unexpected summarization response shape ({reason}); raw body: {body}")]
    Shape {
        /// What was malformed or missing.
        reason: String,
        /// Response body, verbatim.
        body: String,
    },
}

/// Errors from the delivery call.
#[derive(Error, Debug)]
pub enum DeliverError {
    /// The configured endpoint could not be parsed as a URL.
    #[error("Invalid delivery URL '{url}': {source}")]
    InvalidUrl {
        /// The offending input.
        url: String,
        /// Parse failure detail.
        #[source]
        source: url::ParseError,
    },

    /// DNS, connection, or TLS failure before a response arrived.
    #[error("Delivery request failed: {0}")]
    Transport(String),

    /// The 30-second bound expired and the request was aborted.
    #[error("Delivery request timed out after {0} seconds")]
    Timeout(u64),
}

/// Run-level failure. Reaching any of these aborts the run with a non-zero
/// exit status.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Required configuration was missing; no remote calls were attempted.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Commit metadata could not be read.
    #[error("Could not read commit data: {0}")]
    Extract(#[from] ExtractError),

    /// The summarization backend call failed.
    #[error("Could not generate summary: {0}")]
    Summarize(#[from] SummarizeError),

    /// The delivery call failed at the transport level.
    #[error("Could not deliver summary: {0}")]
    Deliver(#[from] DeliverError),
}
