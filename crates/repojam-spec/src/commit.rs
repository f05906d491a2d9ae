//! Commit records and easter-egg tags.
//!
//! A [`Commit`] is the unit of one beat: the commit source produces them in
//! reverse-chronological order (index 0 = most recent) and the whole pipeline
//! is a deterministic function of that order.

use serde::{Deserialize, Serialize};

/// A single source-control commit record.
///
/// Immutable once fetched, except that the classifier fills in
/// [`easter_eggs`](Commit::easter_eggs) before composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Short hash (7 hex characters), unique within a track.
    pub id: String,
    /// First line of the commit message.
    pub message: String,
    /// Author display name.
    pub author: String,
    /// Commit time as seconds since the Unix epoch, already shifted into the
    /// author's local offset so that hour-of-day heuristics see local time.
    pub timestamp: i64,
    /// Number of files changed. May be an estimate when the host omits stats.
    pub files_changed: u32,
    /// Keyword-derived decorative tags, filled in by the classifier.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub easter_eggs: Vec<EasterEggKind>,
}

impl Commit {
    /// Creates a commit with no easter eggs.
    pub fn new(
        id: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        timestamp: i64,
        files_changed: u32,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            author: author.into(),
            timestamp,
            files_changed,
            easter_eggs: Vec::new(),
        }
    }

    /// Hour of day in 0..24, derived from the (locally shifted) timestamp.
    pub fn hour_of_day(&self) -> u8 {
        (self.timestamp.rem_euclid(86_400) / 3_600) as u8
    }

    /// Parses the first `digits` hex characters of the id as a number.
    ///
    /// Used for hash-derived musical gates (lead-note selection, vowel
    /// pitch). A short or non-hex id falls back to 0; this is a documented
    /// degenerate default, not an error.
    pub fn hash_prefix(&self, digits: usize) -> u32 {
        self.id
            .get(..digits)
            .and_then(|s| u32::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    }
}

/// Keyword class an easter-egg tag belongs to.
///
/// A commit may match several classes at once; the classes are independent
/// and each carries its own icon, description, and one-shot sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasterEggKind {
    /// Bug fix (fix/bug/error/issue).
    Bug,
    /// Refactoring work (refactor/cleanup/reorganize).
    Refactor,
    /// Breaking change (breaking/break/major).
    Breaking,
    /// Work in progress (wip/temp/todo/hack).
    Wip,
    /// Frustrated commit (profanity).
    Profanity,
    /// Merge commit (merge/merged).
    Merge,
}

impl EasterEggKind {
    /// All keyword classes, in scan order.
    pub const ALL: [EasterEggKind; 6] = [
        EasterEggKind::Bug,
        EasterEggKind::Refactor,
        EasterEggKind::Breaking,
        EasterEggKind::Wip,
        EasterEggKind::Profanity,
        EasterEggKind::Merge,
    ];

    /// Display icon for UI surfaces.
    pub fn icon(self) -> &'static str {
        match self {
            EasterEggKind::Bug => "\u{1f41b}",        // bug
            EasterEggKind::Refactor => "\u{267b}\u{fe0f}", // recycle
            EasterEggKind::Breaking => "\u{1f4a5}",   // collision
            EasterEggKind::Wip => "\u{1f6a7}",        // construction
            EasterEggKind::Profanity => "\u{1f514}",  // bell
            EasterEggKind::Merge => "\u{1f500}",      // shuffle
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            EasterEggKind::Bug => "Bug fix",
            EasterEggKind::Refactor => "Refactoring",
            EasterEggKind::Breaking => "Breaking change",
            EasterEggKind::Wip => "Work in progress",
            EasterEggKind::Profanity => "Frustrated commit",
            EasterEggKind::Merge => "Merge commit",
        }
    }

    /// The one-shot sound this tag schedules alongside the beat.
    pub fn sound(self) -> crate::event::Generator {
        use crate::event::Generator;
        match self {
            EasterEggKind::Bug => Generator::Scratch,
            EasterEggKind::Refactor => Generator::ReverseCymbal,
            EasterEggKind::Breaking => Generator::OrchestralHit,
            EasterEggKind::Wip => Generator::DrumRoll,
            EasterEggKind::Profanity => Generator::Cowbell,
            EasterEggKind::Merge => Generator::Glitch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_of_day() {
        // Day 19_000 at 14:30 local
        let c = Commit::new("abc1234", "fix: crash", "mel", 19_000 * 86_400 + 14 * 3_600 + 1_800, 2);
        assert_eq!(c.hour_of_day(), 14);
    }

    #[test]
    fn test_hour_of_day_pre_epoch() {
        // rem_euclid keeps the hour in range for negative timestamps
        let c = Commit::new("abc1234", "ancient", "mel", -3_600, 1);
        assert_eq!(c.hour_of_day(), 23);
    }

    #[test]
    fn test_hash_prefix() {
        let c = Commit::new("ff00aa1", "msg", "mel", 0, 1);
        assert_eq!(c.hash_prefix(2), 0xff);
        assert_eq!(c.hash_prefix(4), 0xff00);
    }

    #[test]
    fn test_hash_prefix_degenerate() {
        let c = Commit::new("zz", "msg", "mel", 0, 1);
        assert_eq!(c.hash_prefix(2), 0);
        assert_eq!(c.hash_prefix(4), 0); // shorter than requested
    }

    #[test]
    fn test_commit_json_round_trip() {
        let c = Commit::new("abc1234", "feat: add synth", "Ada", 1_700_000_000, 12);
        let json = serde_json::to_string(&c).unwrap();
        let back: Commit = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
