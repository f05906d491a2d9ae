//! Keyword mood analyzer.
//!
//! Classifies a commit stream into a genre by scanning messages for file
//! extensions, then pairs the genre with its default tempo and a fixed vibe
//! line. Entirely offline and deterministic.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use repojam_spec::{AnalyzeError, Commit, Genre, MoodAnalysis, MoodAnalyzer};

fn extension_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.\w+").expect("valid regex"))
}

/// File extensions that vote for each genre.
fn extensions_for(genre: Genre) -> &'static [&'static str] {
    match genre {
        Genre::Synthwave => &[".jsx", ".tsx", ".css", ".scss", ".html", ".vue", ".svelte"],
        Genre::Industrial => &[".py", ".go", ".java", ".rs", ".cpp", ".c", ".rb"],
        Genre::Ambient => &[".csv", ".json", ".sql", ".ipynb", ".xml", ".yaml"],
        Genre::Chiptune => &[".unity", ".godot", ".asm", ".shader", ".glsl"],
        Genre::Experimental => &[],
    }
}

fn vibe_for(genre: Genre) -> &'static str {
    match genre {
        Genre::Synthwave => "Neon-lit frontend sprints with nostalgic momentum",
        Genre::Industrial => "Heavy backend machinery grinding through the stack",
        Genre::Ambient => "Calm analytical passes over drifting data",
        Genre::Chiptune => "Playful pixel-pushing at full speed",
        Genre::Experimental => "Unclassifiable energy jumping between layers",
    }
}

/// [`MoodAnalyzer`] that needs no network and no credential.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordMoodAnalyzer;

impl KeywordMoodAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Genre with the most extension mentions; ties and zero scores fall to
    /// the earliest genre in scan order, and no mentions at all means
    /// experimental.
    pub fn detect_genre(&self, commits: &[Commit]) -> Genre {
        let mut mentioned: HashSet<String> = HashSet::new();
        for commit in commits {
            for m in extension_re().find_iter(&commit.message) {
                mentioned.insert(m.as_str().to_lowercase());
            }
        }

        let mut best = Genre::Experimental;
        let mut max_score = 0usize;
        for genre in Genre::ALL {
            let score = extensions_for(genre)
                .iter()
                .filter(|ext| mentioned.contains(**ext))
                .count();
            if score > max_score {
                max_score = score;
                best = genre;
            }
        }

        debug!(genre = best.key(), score = max_score, "detected genre");
        best
    }
}

impl MoodAnalyzer for KeywordMoodAnalyzer {
    fn analyze(&self, commits: &[Commit]) -> Result<MoodAnalysis, AnalyzeError> {
        let genre = self.detect_genre(commits);
        Ok(MoodAnalysis {
            vibe: vibe_for(genre).to_string(),
            bpm: genre.default_bpm(),
            genre,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn commit(message: &str) -> Commit {
        Commit::new("abc1234", message, "dev", 0, 1)
    }

    #[test]
    fn test_frontend_repo_is_synthwave() {
        let commits = vec![
            commit("restyle App.jsx header"),
            commit("fix layout.css overflow"),
            commit("port modal to Widget.tsx"),
        ];
        let analysis = KeywordMoodAnalyzer::new().analyze(&commits).unwrap();
        assert_eq!(analysis.genre, Genre::Synthwave);
        assert_eq!(analysis.bpm, 120);
        assert!(!analysis.vibe.is_empty());
    }

    #[test]
    fn test_systems_repo_is_industrial() {
        let commits = vec![
            commit("rewrite scheduler.rs hot path"),
            commit("tune allocator.cpp arena size"),
        ];
        assert_eq!(
            KeywordMoodAnalyzer::new().detect_genre(&commits),
            Genre::Industrial
        );
    }

    #[test]
    fn test_no_extensions_is_experimental() {
        let commits = vec![commit("initial commit"), commit("fix everything")];
        let analysis = KeywordMoodAnalyzer::new().analyze(&commits).unwrap();
        assert_eq!(analysis.genre, Genre::Experimental);
        assert_eq!(analysis.bpm, 110);
    }

    #[test]
    fn test_tie_goes_to_earlier_genre() {
        // One vote each for synthwave and industrial
        let commits = vec![commit("move app.jsx logic into core.rs")];
        assert_eq!(
            KeywordMoodAnalyzer::new().detect_genre(&commits),
            Genre::Synthwave
        );
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        let commits = vec![commit("add Save.GLSL and skybox.Shader")];
        assert_eq!(
            KeywordMoodAnalyzer::new().detect_genre(&commits),
            Genre::Chiptune
        );
    }

    #[test]
    fn test_duplicate_mentions_count_once() {
        // Five .py mentions are one vote; two distinct frontend extensions win
        let commits = vec![
            commit("fix a.py b.py c.py d.py e.py"),
            commit("restyle index.html and theme.css"),
        ];
        assert_eq!(
            KeywordMoodAnalyzer::new().detect_genre(&commits),
            Genre::Synthwave
        );
    }
}
