//! Git repository inspection.

pub mod commit;
pub mod remote;

pub use commit::{extract_commit, CommitRecord};
pub use remote::{repository_ident, UNKNOWN_REPOSITORY};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
