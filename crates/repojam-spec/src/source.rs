//! Commit source collaborator interface.

use thiserror::Error;

use crate::commit::Commit;

/// Errors a commit source must distinguish.
///
/// "Not found" and "rate limited" are surfaced as distinct kinds so the
/// caller can react differently; the core performs no retry.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The repository does not exist or is not visible.
    #[error("repository {owner}/{repo} not found")]
    NotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
    },

    /// The host rejected the request due to rate limiting.
    #[error("rate limit exceeded, try again later")]
    RateLimited,

    /// Any other transport or protocol failure.
    #[error("commit host error: {0}")]
    Http(String),

    /// The host responded but the payload could not be interpreted.
    #[error("malformed commit payload: {0}")]
    Malformed(String),
}

/// Produces an ordered commit history, newest first.
pub trait CommitSource {
    /// Fetches up to `limit` commits for `owner/repo`, index 0 = most recent.
    fn fetch(&self, owner: &str, repo: &str, limit: usize) -> Result<Vec<Commit>, SourceError>;
}
