//! Shared test fixture: a temporary git repository with scripted commits.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use git2::{Repository, Signature};
use tempfile::TempDir;

/// Temporary git repository for driving commit extraction.
pub struct TestRepo {
    _temp_dir: TempDir,
    pub repo_path: PathBuf,
    pub repo: Repository,
    pub commits: Vec<git2::Oid>,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let repo_path = temp_dir.path().to_path_buf();

        let repo = Repository::init(&repo_path)?;

        // Pin the branch name so assertions don't depend on init.defaultBranch
        repo.set_head("refs/heads/main")?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        Ok(TestRepo {
            _temp_dir: temp_dir,
            repo_path,
            repo,
            commits: Vec::new(),
        })
    }

    /// Write `files`, stage them, and commit with `message`.
    pub fn add_commit(&mut self, message: &str, files: &[(&str, &str)]) -> Result<git2::Oid> {
        let mut index = self.repo.index()?;
        for (name, content) in files {
            let file_path = self.repo_path.join(name);
            fs::write(&file_path, content)?;
            index.add_path(std::path::Path::new(name))?;
        }
        index.write()?;

        let signature = Signature::now("Test User", "test@example.com")?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent_commit = if let Some(last_commit_id) = self.commits.last() {
            Some(self.repo.find_commit(*last_commit_id)?)
        } else {
            None
        };

        let parents: Vec<&git2::Commit> = if let Some(ref parent) = parent_commit {
            vec![parent]
        } else {
            vec![]
        };

        let commit_id = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        self.commits.push(commit_id);
        Ok(commit_id)
    }

    /// Detach HEAD at the given commit.
    pub fn detach_at(&self, oid: git2::Oid) -> Result<()> {
        self.repo.set_head_detached(oid)?;
        Ok(())
    }
}
