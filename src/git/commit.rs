//! Commit metadata extraction for the most recent commit.

use std::path::Path;

use git2::{Commit, Delta, ErrorCode, Oid, Repository};
use tracing::debug;

use crate::error::ExtractError;
use crate::git::SHORT_HASH_LEN;

/// Structured snapshot of the most recent commit.
///
/// Produced once per run by [`extract_commit`] and read-only afterward.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    /// Subject line of the commit message.
    pub message: String,
    /// Full hex hash.
    pub full_hash: String,
    /// First [`SHORT_HASH_LEN`] characters of the full hash.
    pub short_hash: String,
    /// Newline-delimited `STATUS\tpath` lines for files changed by the commit.
    pub changed_files: String,
    /// Newline-delimited paths touched by the commit.
    pub touched_paths: String,
    /// Current branch name, empty when HEAD is detached.
    pub branch: String,
}

/// Read the HEAD commit of the repository at `path` into a [`CommitRecord`].
///
/// Read-only: queries repository state, never mutates it. Whether a failure
/// here is fatal is up to the caller.
pub fn extract_commit(path: &Path) -> Result<CommitRecord, ExtractError> {
    let repo = Repository::open(path).map_err(ExtractError::OpenRepository)?;

    let head = repo.head().map_err(classify_head_error)?;
    let commit = head.peel_to_commit().map_err(ExtractError::ResolveHead)?;

    let full_hash = commit.id().to_string();
    let short_hash = abbreviate(&full_hash);
    let message = commit.summary().unwrap_or("").to_string();

    let changes = changed_files(&repo, &commit)?;
    let changed_files = changes
        .iter()
        .map(|(status, path)| format!("{status}\t{path}"))
        .collect::<Vec<_>>()
        .join("\n");
    let touched_paths = changes
        .iter()
        .map(|(_, path)| path.clone())
        .collect::<Vec<_>>()
        .join("\n");

    let branch = detect_branch(&repo, commit.id())?;

    debug!(
        hash = %short_hash,
        branch = %branch,
        files = changes.len(),
        "Extracted commit record"
    );

    Ok(CommitRecord {
        message,
        full_hash,
        short_hash,
        changed_files,
        touched_paths,
        branch,
    })
}

/// First [`SHORT_HASH_LEN`] characters of a full hash.
fn abbreviate(full_hash: &str) -> String {
    full_hash.chars().take(SHORT_HASH_LEN).collect()
}

/// An unborn HEAD means the repository exists but has no commits.
fn classify_head_error(err: git2::Error) -> ExtractError {
    match err.code() {
        ErrorCode::UnbornBranch | ErrorCode::NotFound => ExtractError::NoCommits(err),
        _ => ExtractError::ResolveHead(err),
    }
}

/// Status+path pairs for the files changed by `commit`, diffed against its
/// first parent (the empty tree for a root commit).
fn changed_files(
    repo: &Repository,
    commit: &Commit,
) -> Result<Vec<(&'static str, String)>, ExtractError> {
    let diff_err = |source| ExtractError::Diff {
        hash: commit.id().to_string(),
        source,
    };

    let commit_tree = commit.tree().map_err(diff_err)?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(
            commit
                .parent(0)
                .and_then(|parent| parent.tree())
                .map_err(diff_err)?,
        )
    } else {
        None
    };

    let diff = repo
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)
        .map_err(diff_err)?;

    let mut changes = Vec::new();
    diff.foreach(
        &mut |delta, _progress| {
            let status = match delta.status() {
                Delta::Added => "A",
                Delta::Deleted => "D",
                Delta::Modified => "M",
                Delta::Renamed => "R",
                Delta::Copied => "C",
                Delta::Typechange => "T",
                _ => "?",
            };

            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .and_then(|p| p.to_str());
            if let Some(path) = path {
                changes.push((status, path.to_string()));
            }

            true
        },
        None,
        None,
        None,
    )
    .map_err(diff_err)?;

    Ok(changes)
}

/// Current branch name for the commit at `head_id`.
///
/// Primary: the symbolic HEAD shorthand, which wins whenever it names a real
/// branch. Fallback for detached HEAD: the lexicographically first local
/// branch whose tip is `head_id`. Empty string when neither applies.
fn detect_branch(repo: &Repository, head_id: Oid) -> Result<String, ExtractError> {
    if let Ok(head) = repo.head() {
        if let Some(name) = head.shorthand() {
            if name != "HEAD" {
                return Ok(name.to_string());
            }
        }
    }

    let mut candidates = Vec::new();
    let branches = repo
        .branches(Some(git2::BranchType::Local))
        .map_err(ExtractError::Branches)?;
    for entry in branches {
        let (branch, _) = entry.map_err(ExtractError::Branches)?;
        if branch.get().target() == Some(head_id) {
            if let Ok(Some(name)) = branch.name() {
                candidates.push(name.to_string());
            }
        }
    }
    candidates.sort();

    if let Some(name) = candidates.into_iter().next() {
        return Ok(name);
    }

    debug!("HEAD is detached and no local branch points at it");
    Ok(String::new())
}
