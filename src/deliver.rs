//! Delivery of the resolved summary to the collector endpoint.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::error::DeliverError;
use crate::git::CommitRecord;

/// Path segment every collector endpoint must end with.
pub const ENDPOINT_SUFFIX: &str = "/generate-content";

/// Bound on the single delivery call; expiry aborts the request.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Sentinel commit hash when no commit record accompanies the summary.
const UNKNOWN_SHA: &str = "unknown";

/// Sentinel branch name when neither the commit nor the host supplies one.
const UNKNOWN_BRANCH: &str = "unknown";

/// Raw HTTP response from the collector.
///
/// The status is set even on non-2xx responses; transport success does not
/// imply HTTP success, so callers must inspect [`RemoteResponse::status`].
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in arrival order; repeated names repeat here.
    pub headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: String,
}

impl RemoteResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON body sent to the collector.
#[derive(Serialize, Debug)]
struct DeliveryPayload<'a> {
    repository: &'a str,
    commit_sha: &'a str,
    branch: &'a str,
    summary: &'a str,
    timestamp: String,
}

/// Client for the collector endpoint.
pub struct DeliveryClient {
    client: Client,
    api_key: Option<String>,
    repository: String,
    branch_fallback: Option<String>,
}

impl DeliveryClient {
    /// Create a client.
    ///
    /// `repository` is the already-resolved `owner/name` identifier;
    /// `branch_fallback` is the host-supplied ref name used when the commit
    /// record carries no branch.
    pub fn new(
        api_key: Option<String>,
        repository: String,
        branch_fallback: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            repository,
            branch_fallback,
        }
    }

    /// POST `summary` to the normalized `target_url`.
    ///
    /// Returns the full [`RemoteResponse`] for any HTTP status; only
    /// transport-level failures and timeouts are errors.
    pub async fn deliver(
        &self,
        summary: &str,
        target_url: &str,
        commit: Option<&CommitRecord>,
    ) -> Result<RemoteResponse, DeliverError> {
        let endpoint = normalize_endpoint(target_url)?;
        let branch = self.resolve_branch(commit);
        let payload = DeliveryPayload {
            repository: &self.repository,
            commit_sha: commit.map_or(UNKNOWN_SHA, |c| c.full_hash.as_str()),
            branch: &branch,
            summary,
            timestamp: Utc::now().to_rfc3339(),
        };

        info!(url = %endpoint, repository = %self.repository, "Delivering commit summary");

        let mut request = self
            .client
            .post(endpoint)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .header("User-Agent", crate::USER_AGENT)
            .json(&payload);

        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await.map_err(classify_send_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).to_string(),
                )
            })
            .collect();
        let body = response.text().await.map_err(classify_send_error)?;

        debug!(status, body_len = body.len(), "Collector responded");

        Ok(RemoteResponse {
            status,
            headers,
            body,
        })
    }

    /// Commit branch when present, else the host ref name, else `unknown`.
    fn resolve_branch(&self, commit: Option<&CommitRecord>) -> String {
        if let Some(commit) = commit {
            if !commit.branch.is_empty() {
                return commit.branch.clone();
            }
        }

        match self.branch_fallback.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNKNOWN_BRANCH.to_string(),
        }
    }
}

/// Split reqwest failures into the timeout and transport categories.
fn classify_send_error(err: reqwest::Error) -> DeliverError {
    if err.is_timeout() {
        DeliverError::Timeout(REQUEST_TIMEOUT_SECS)
    } else {
        DeliverError::Transport(err.to_string())
    }
}

/// Normalize a collector URL so its path ends with [`ENDPOINT_SUFFIX`].
///
/// Idempotent: an already-normalized URL passes through unchanged. The query
/// string is preserved.
pub fn normalize_endpoint(raw: &str) -> Result<Url, DeliverError> {
    let mut url = Url::parse(raw).map_err(|source| DeliverError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    if !url.path().ends_with(ENDPOINT_SUFFIX) {
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{path}{ENDPOINT_SUFFIX}"));
    }

    Ok(url)
}
