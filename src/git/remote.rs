//! Repository identifier resolution from git remotes.

use std::path::Path;
use std::sync::LazyLock;

use git2::Repository;
use regex::Regex;
use tracing::debug;

/// Sentinel identifier used when no `owner/name` pair can be resolved.
pub const UNKNOWN_REPOSITORY: &str = "unknown/repository";

/// Matches a host-qualified remote URL tail: `host[:/]owner/name`, with an
/// optional trailing `.git` and slash.
static IDENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[:/](?P<owner>[^/:]+)/(?P<name>[^/:]+?)(?:\.git)?/?$").unwrap()
});

/// Resolve the `owner/name` identifier for the repository at `path`.
///
/// Prefers the `origin` remote, falling back to the first configured remote.
/// Returns [`UNKNOWN_REPOSITORY`] when there is no usable remote or its URL
/// does not match the expected form.
pub fn repository_ident(path: &Path) -> String {
    let Some(url) = remote_url(path) else {
        debug!("No usable remote found for repository identification");
        return UNKNOWN_REPOSITORY.to_string();
    };

    extract_owner_name(&url).unwrap_or_else(|| {
        debug!(url = %url, "Remote URL did not match owner/name pattern");
        UNKNOWN_REPOSITORY.to_string()
    })
}

/// Extract `owner/name` from a host-qualified remote URL.
///
/// Handles both SSH (`git@github.com:owner/repo.git`) and HTTPS
/// (`https://github.com/owner/repo`) forms.
pub fn extract_owner_name(url: &str) -> Option<String> {
    let caps = IDENT_PATTERN.captures(url)?;
    Some(format!("{}/{}", &caps["owner"], &caps["name"]))
}

fn remote_url(path: &Path) -> Option<String> {
    let repo = Repository::open(path).ok()?;

    if let Ok(remote) = repo.find_remote("origin") {
        if let Some(url) = remote.url() {
            return Some(url.to_string());
        }
    }

    let names = repo.remotes().ok()?;
    let first = names.iter().flatten().next()?.to_string();
    let remote = repo.find_remote(&first).ok()?;
    remote.url().map(ToString::to_string)
}
