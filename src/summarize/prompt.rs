//! Prompt templates for the summarization backend.

use crate::git::CommitRecord;

/// System instruction framing the assistant for every request.
pub const SYSTEM_PROMPT: &str = "You are a technical writer summarizing git commits for a development team. \
Respond with 2-4 concise bullet points describing what changed and why it matters. \
Do not restate the commit hash or file names verbatim; describe the change.";

/// Build the user prompt embedding the commit metadata.
pub fn user_prompt(commit: &CommitRecord) -> String {
    format!(
        "Summarize this git commit.\n\n\
         Commit: {short_hash}\n\
         Message: {message}\n\n\
         Changed files:\n{changed_files}\n",
        short_hash = commit.short_hash,
        message = commit.message,
        changed_files = commit.changed_files,
    )
}
