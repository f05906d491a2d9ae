//! Per-commit classification: drum patterns, intensity, effects, easter eggs.
//!
//! All classification reads only the commit's own metadata (message, files
//! changed, local hour) plus a short window of preceding commits, so results
//! never depend on anything outside the input list.

use std::sync::OnceLock;

use regex::Regex;
use repojam_spec::{Commit, EasterEggKind, Generator};

fn feature_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("(?i)feat|feature|add").expect("valid regex"))
}

fn upheaval_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("(?i)breaking|major|rewrite|refactor").expect("valid regex"))
}

fn fix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("(?i)fix|bug|patch").expect("valid regex"))
}

fn breaking_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("(?i)breaking|major").expect("valid regex"))
}

/// One slot in an eight-step drum cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrumHit {
    Kick,
    Snare,
    HiHat,
}

/// Eight-step drum cycles, chosen per commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeatPattern {
    Basic,
    Energetic,
    Syncopated,
    Breakdown,
    Buildup,
}

impl BeatPattern {
    /// The eight hits of this pattern, indexed by `beat % 8`.
    pub fn slots(self) -> [DrumHit; 8] {
        use DrumHit::{HiHat, Kick, Snare};
        match self {
            Self::Basic => [Kick, HiHat, Snare, HiHat, Kick, HiHat, Snare, HiHat],
            Self::Energetic => [Kick, HiHat, Kick, HiHat, Snare, HiHat, Kick, Snare],
            Self::Syncopated => [Kick, HiHat, HiHat, Snare, Kick, Kick, Snare, HiHat],
            Self::Breakdown => [Kick, Kick, Snare, Snare, Kick, Snare, Kick, Snare],
            Self::Buildup => [HiHat, HiHat, HiHat, HiHat, Kick, Snare, Kick, Snare],
        }
    }

    /// Picks the pattern for a commit.
    ///
    /// `recent` is the window of commits immediately preceding this one;
    /// three or more of them averaging under an hour apart reads as a burst
    /// of activity and selects the energetic pattern.
    pub fn select(commit: &Commit, recent: &[Commit]) -> Self {
        if commit.message.to_lowercase().contains("merge") {
            return Self::Breakdown;
        }
        if commit.files_changed > 15 {
            return Self::Syncopated;
        }
        if feature_re().is_match(&commit.message) {
            return Self::Buildup;
        }

        if recent.len() >= 3 {
            let total: i64 = recent
                .windows(2)
                .map(|pair| (pair[0].timestamp - pair[1].timestamp).abs())
                .sum();
            let avg_seconds = total as f64 / (recent.len() - 1) as f64;
            if avg_seconds < 3_600.0 {
                return Self::Energetic;
            }
        }

        Self::Basic
    }
}

/// Adjusts a section's base intensity for one commit.
///
/// Large commits and late-night hours push intensity up, bug fixes calm it
/// down, and the result is clamped to [0.3, 1.5].
pub fn dynamic_intensity(commit: &Commit, base_intensity: f64) -> f64 {
    let mut intensity = base_intensity;

    // Up to +0.3 for touching many files, saturating at 50
    if commit.files_changed > 0 {
        intensity += (commit.files_changed as f64 / 50.0).min(1.0) * 0.3;
    }

    // Late-night commits (10pm to 4am local) run hotter
    let hour = commit.hour_of_day();
    if (22..=23).contains(&hour) || hour <= 4 {
        intensity += 0.2;
    }

    if upheaval_re().is_match(&commit.message) {
        intensity += 0.3;
    }
    if fix_re().is_match(&commit.message) {
        intensity -= 0.1;
    }
    if feature_re().is_match(&commit.message) {
        intensity += 0.15;
    }

    intensity.clamp(0.3, 1.5)
}

/// A one-shot effect triggered by commit metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialEffect {
    Cowbell,
    OrchestralHit,
    Glitch,
    Scratch,
}

impl SpecialEffect {
    /// The sound this effect plays.
    pub fn generator(self) -> Generator {
        match self {
            Self::Cowbell => Generator::Cowbell,
            Self::OrchestralHit => Generator::OrchestralHit,
            Self::Glitch => Generator::Glitch,
            Self::Scratch => Generator::Scratch,
        }
    }
}

/// Picks at most one special effect for a commit; first matching rule wins.
pub fn special_effect(commit: &Commit) -> Option<SpecialEffect> {
    if commit.message.to_lowercase().contains("merge") {
        return Some(SpecialEffect::Cowbell);
    }
    if breaking_re().is_match(&commit.message) {
        return Some(SpecialEffect::OrchestralHit);
    }
    if commit.files_changed > 20 {
        return Some(SpecialEffect::Glitch);
    }
    // The 2am-4am window, narrower than the intensity boost
    let hour = commit.hour_of_day();
    if (2..=4).contains(&hour) {
        return Some(SpecialEffect::Scratch);
    }
    None
}

const EGG_KEYWORDS: [(EasterEggKind, &[&str]); 6] = [
    (EasterEggKind::Bug, &["fix", "bug", "error", "issue"]),
    (EasterEggKind::Refactor, &["refactor", "cleanup", "reorganize"]),
    (EasterEggKind::Breaking, &["breaking", "break", "major"]),
    (EasterEggKind::Wip, &["wip", "temp", "todo", "hack"]),
    (EasterEggKind::Profanity, &["fuck", "shit", "damn", "hell"]),
    (EasterEggKind::Merge, &["merge", "merged"]),
];

/// Finds every easter egg whose keywords appear in the message.
///
/// Matching is case-insensitive substring search; a commit can carry several
/// eggs at once.
pub fn detect_easter_eggs(message: &str) -> Vec<EasterEggKind> {
    let message = message.to_lowercase();
    EGG_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| message.contains(kw)))
        .map(|(kind, _)| *kind)
        .collect()
}

/// Fills in `easter_eggs` for every commit in place.
pub fn tag_commits(commits: &mut [Commit]) {
    for commit in commits {
        commit.easter_eggs = detect_easter_eggs(&commit.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn commit(message: &str, files_changed: u32, timestamp: i64) -> Commit {
        Commit::new("abc1234", message, "dev", timestamp, files_changed)
    }

    const NOON: i64 = 12 * 3_600;

    #[test]
    fn test_pattern_priority_order() {
        // Merge wins over file count and keywords
        let merge = commit("Merge branch 'feat/x' (30 files)", 30, NOON);
        assert_eq!(BeatPattern::select(&merge, &[]), BeatPattern::Breakdown);

        let big = commit("feat: huge drop", 16, NOON);
        assert_eq!(BeatPattern::select(&big, &[]), BeatPattern::Syncopated);

        let feat = commit("add login page", 3, NOON);
        assert_eq!(BeatPattern::select(&feat, &[]), BeatPattern::Buildup);
    }

    #[test]
    fn test_energetic_needs_rapid_burst() {
        let subject = commit("tweak styles", 1, NOON);
        let rapid: Vec<Commit> = (0..4)
            .map(|i| commit("work", 1, NOON + i * 600))
            .collect();
        assert_eq!(BeatPattern::select(&subject, &rapid), BeatPattern::Energetic);

        // Same commits spread over days fall back to basic
        let slow: Vec<Commit> = (0..4)
            .map(|i| commit("work", 1, NOON + i * 86_400))
            .collect();
        assert_eq!(BeatPattern::select(&subject, &slow), BeatPattern::Basic);

        // Two commits are not enough context
        assert_eq!(
            BeatPattern::select(&subject, &rapid[..2]),
            BeatPattern::Basic
        );
    }

    #[test]
    fn test_intensity_adjustments() {
        // Plain daytime commit keeps the base
        assert_eq!(dynamic_intensity(&commit("update docs", 0, NOON), 0.8), 0.8);

        // Bug fix calms things down
        let fixed = dynamic_intensity(&commit("fix typo", 0, NOON), 0.8);
        assert!((fixed - 0.7).abs() < 1e-9);

        // files boost: 25/50 * 0.3 = 0.15
        let sized = dynamic_intensity(&commit("update docs", 25, NOON), 0.8);
        assert!((sized - 0.95).abs() < 1e-9);

        // Late night boost
        let late = dynamic_intensity(&commit("update docs", 0, 23 * 3_600), 0.8);
        assert!((late - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_clamped() {
        let wild = commit("BREAKING rewrite, add everything", 200, 3 * 3_600);
        assert_eq!(dynamic_intensity(&wild, 1.0), 1.5);

        let calm = commit("fix bug", 0, NOON);
        assert_eq!(dynamic_intensity(&calm, 0.3), 0.3);
    }

    #[test]
    fn test_effect_first_match_wins() {
        let merge = commit("Merge pull request #12 (breaking)", 30, 3 * 3_600);
        assert_eq!(special_effect(&merge), Some(SpecialEffect::Cowbell));

        let breaking = commit("major overhaul", 30, 3 * 3_600);
        assert_eq!(special_effect(&breaking), Some(SpecialEffect::OrchestralHit));

        let big = commit("update deps", 21, 3 * 3_600);
        assert_eq!(special_effect(&big), Some(SpecialEffect::Glitch));

        let nocturnal = commit("update deps", 3, 3 * 3_600);
        assert_eq!(special_effect(&nocturnal), Some(SpecialEffect::Scratch));

        assert_eq!(special_effect(&commit("update deps", 3, NOON)), None);
    }

    #[test]
    fn test_eggs_can_stack() {
        let eggs = detect_easter_eggs("fix merge conflict hack");
        assert_eq!(
            eggs,
            vec![EasterEggKind::Bug, EasterEggKind::Wip, EasterEggKind::Merge]
        );
    }

    #[test]
    fn test_eggs_case_insensitive_substring() {
        assert_eq!(detect_easter_eggs("HOTFIX deploy"), vec![EasterEggKind::Bug]);
        assert_eq!(detect_easter_eggs("polish readme"), vec![]);
    }

    #[test]
    fn test_tag_commits_fills_eggs() {
        let mut commits = vec![commit("fix crash", 1, NOON), commit("polish", 1, NOON)];
        tag_commits(&mut commits);
        assert_eq!(commits[0].easter_eggs, vec![EasterEggKind::Bug]);
        assert!(commits[1].easter_eggs.is_empty());
    }
}
