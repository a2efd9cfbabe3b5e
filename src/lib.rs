//! # commit-relay
//!
//! Summarizes the most recent git commit with a text-generation backend and
//! relays the result to a collector endpoint. One pass per invocation, no
//! persistent state.
//!
//! The pipeline is strictly sequential: extract commit metadata (unless a
//! pre-written summary is supplied), request a summary, deliver it. See
//! [`pipeline::run`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod deliver;
pub mod error;
pub mod git;
pub mod outputs;
pub mod pipeline;
pub mod summarize;

pub use crate::cli::Cli;

/// The current version of commit-relay.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-agent header sent on every outbound request.
pub const USER_AGENT: &str = concat!("commit-relay/", env!("CARGO_PKG_VERSION"));
