//! Mood analyzer collaborator interface.
//!
//! Genre classification and tempo selection happen outside the composition
//! core; the core treats the result as opaque input. A user override may
//! replace any field afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commit::Commit;
use crate::genre::Genre;

/// Result of analyzing a commit stream's mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    /// One sentence describing the coding energy.
    pub vibe: String,
    /// Suggested tempo, within the genre's BPM range.
    pub bpm: u32,
    /// Classified genre.
    pub genre: Genre,
}

/// Errors an analyzer must distinguish.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The analysis service rejected the supplied credential.
    #[error("invalid analyzer credential")]
    InvalidCredential,

    /// The analysis service failed.
    #[error("analyzer service error: {0}")]
    Service(String),
}

/// Derives a vibe, tempo, and genre from commit messages.
pub trait MoodAnalyzer {
    fn analyze(&self, commits: &[Commit]) -> Result<MoodAnalysis, AnalyzeError>;
}
