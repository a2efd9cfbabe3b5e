//! Integration tests for commit extraction against real repositories.

mod common;

use anyhow::Result;
use commit_relay::error::ExtractError;
use commit_relay::git::extract_commit;
use common::TestRepo;

#[test]
fn extracts_metadata_from_a_single_commit() -> Result<()> {
    let mut repo = TestRepo::new()?;
    repo.add_commit("Initial commit", &[("test.txt", "Hello, world!")])?;

    let record = extract_commit(&repo.repo_path)?;

    assert_eq!(record.message, "Initial commit");
    assert_eq!(record.full_hash.len(), 40);
    assert_eq!(record.short_hash.len(), 8);
    assert!(record.full_hash.starts_with(&record.short_hash));
    assert_eq!(record.changed_files, "A\ttest.txt");
    assert_eq!(record.touched_paths, "test.txt");
    assert_eq!(record.branch, "main");
    Ok(())
}

#[test]
fn diffs_against_the_parent_commit() -> Result<()> {
    let mut repo = TestRepo::new()?;
    repo.add_commit("Initial commit", &[("test.txt", "v1")])?;
    repo.add_commit(
        "Add feature",
        &[("test.txt", "v2"), ("feature.rs", "fn feature() {}")],
    )?;

    let record = extract_commit(&repo.repo_path)?;

    let lines: Vec<&str> = record.changed_files.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.contains(&"M\ttest.txt"));
    assert!(lines.contains(&"A\tfeature.rs"));

    let paths: Vec<&str> = record.touched_paths.lines().collect();
    assert!(paths.contains(&"test.txt"));
    assert!(paths.contains(&"feature.rs"));
    Ok(())
}

#[test]
fn message_is_the_subject_line_only() -> Result<()> {
    let mut repo = TestRepo::new()?;
    repo.add_commit(
        "Fix bug in parser\n\nLonger explanation of what went wrong\nand how it was fixed.",
        &[("parser.rs", "fixed")],
    )?;

    let record = extract_commit(&repo.repo_path)?;
    assert_eq!(record.message, "Fix bug in parser");
    Ok(())
}

#[test]
fn detached_head_at_branch_tip_resolves_the_branch() -> Result<()> {
    let mut repo = TestRepo::new()?;
    let tip = repo.add_commit("Only commit", &[("a.txt", "a")])?;
    repo.detach_at(tip)?;

    let record = extract_commit(&repo.repo_path)?;
    assert_eq!(record.branch, "main");
    Ok(())
}

#[test]
fn detached_head_mid_history_yields_empty_branch() -> Result<()> {
    let mut repo = TestRepo::new()?;
    let first = repo.add_commit("First", &[("a.txt", "a")])?;
    repo.add_commit("Second", &[("a.txt", "b")])?;
    repo.detach_at(first)?;

    let record = extract_commit(&repo.repo_path)?;
    assert_eq!(record.branch, "");
    // The record itself is still complete
    assert_eq!(record.message, "First");
    Ok(())
}

#[test]
fn repository_without_commits_is_a_no_commits_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    git2::Repository::init(dir.path())?;

    let err = extract_commit(dir.path()).unwrap_err();
    assert!(matches!(err, ExtractError::NoCommits(_)));
    Ok(())
}

#[test]
fn missing_repository_is_an_open_error() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let err = extract_commit(dir.path()).unwrap_err();
    assert!(matches!(err, ExtractError::OpenRepository(_)));
    Ok(())
}
