//! Song-structure detection.
//!
//! Splits a commit list into intro/verse/chorus/bridge/outro sections, each
//! with its own active layers and base intensity. Commits arrive newest
//! first, so the intro sits at the tail of the list and the outro at the
//! head; the composer plays the list in index order regardless.

use std::sync::OnceLock;

use regex::Regex;
use repojam_spec::Commit;

fn upheaval_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("refactor|breaking|major|rewrite").expect("valid regex"))
}

/// Kind of a song section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Intro,
    Verse,
    Chorus,
    Bridge,
    Outro,
}

impl SectionKind {
    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Intro => "intro",
            SectionKind::Verse => "verse",
            SectionKind::Chorus => "chorus",
            SectionKind::Bridge => "bridge",
            SectionKind::Outro => "outro",
        }
    }
}

/// Which instrument layers a section plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSet {
    pub drums: bool,
    pub bass: bool,
    pub synth: bool,
    pub vocal: bool,
}

impl LayerSet {
    pub const DRUMS: LayerSet = LayerSet {
        drums: true,
        bass: false,
        synth: false,
        vocal: false,
    };
    pub const RHYTHM: LayerSet = LayerSet {
        drums: true,
        bass: true,
        synth: false,
        vocal: false,
    };
    pub const BAND: LayerSet = LayerSet {
        drums: true,
        bass: true,
        synth: true,
        vocal: false,
    };
    pub const FULL: LayerSet = LayerSet {
        drums: true,
        bass: true,
        synth: true,
        vocal: true,
    };
    pub const HARMONIC: LayerSet = LayerSet {
        drums: false,
        bass: true,
        synth: true,
        vocal: false,
    };
}

/// One detected section: a kind, the commit indices it claims, the layers it
/// plays, and the intensity baseline those beats start from.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub commits: Vec<usize>,
    pub layers: LayerSet,
    pub base_intensity: f64,
}

/// The section treated as active for commits no section claims.
pub static DEFAULT_SECTION: Section = Section {
    kind: SectionKind::Verse,
    commits: Vec::new(),
    layers: LayerSet::BAND,
    base_intensity: 0.8,
};

/// Detects song sections from a newest-first commit list.
///
/// Sections may overlap; when they do, the later entry in the returned list
/// claims the shared commits (see [`section_map`]). An empty result never
/// happens: with no detectable structure the whole list becomes one verse.
pub fn detect_sections(commits: &[Commit]) -> Vec<Section> {
    let total = commits.len();
    let mut sections = Vec::new();

    // Intro: the oldest commits, capped at 8 or 10% of history
    let intro_size = 8.min(total / 10);
    if intro_size > 0 {
        sections.push(Section {
            kind: SectionKind::Intro,
            commits: (total - intro_size..total).collect(),
            layers: LayerSet::DRUMS,
            base_intensity: 0.5,
        });
    }

    // Verse: the next 30% going forward in time
    let verse_size = total * 3 / 10;
    if verse_size > 0 {
        let end = total - intro_size;
        let start = end.saturating_sub(verse_size);
        sections.push(Section {
            kind: SectionKind::Verse,
            commits: (start..end).collect(),
            layers: LayerSet::RHYTHM,
            base_intensity: 0.7,
        });
    }

    // Chorus: the densest 10-commit window
    if let Some(window) = densest_window(commits) {
        if window.len() >= 4 {
            sections.push(Section {
                kind: SectionKind::Chorus,
                commits: window,
                layers: LayerSet::FULL,
                base_intensity: 1.0,
            });
        }
    }

    // Bridge: sustained upheaval (refactors, rewrites, breaking changes)
    let upheavals: Vec<usize> = commits
        .iter()
        .enumerate()
        .filter(|(_, c)| upheaval_re().is_match(&c.message.to_lowercase()))
        .map(|(i, _)| i)
        .collect();
    if upheavals.len() >= 4 {
        sections.push(Section {
            kind: SectionKind::Bridge,
            commits: upheavals.into_iter().take(8).collect(),
            layers: LayerSet::HARMONIC,
            base_intensity: 0.6,
        });
    }

    // Outro: the newest commits, capped at 4 or 10% of history
    let outro_size = 4.min(total / 10);
    if outro_size > 0 {
        sections.push(Section {
            kind: SectionKind::Outro,
            commits: (0..outro_size).collect(),
            layers: LayerSet::RHYTHM,
            base_intensity: 0.4,
        });
    }

    if sections.is_empty() {
        sections.push(Section {
            kind: SectionKind::Verse,
            commits: (0..total).collect(),
            layers: LayerSet::BAND,
            base_intensity: 0.8,
        });
    }

    sections
}

/// The 10-commit window with the highest commit density (commits per hour).
///
/// Returns `None` for histories shorter than 10 commits. Windows whose first
/// and last commit share a timestamp are skipped; if every window does, the
/// newest 10 commits are returned as a fallback.
fn densest_window(commits: &[Commit]) -> Option<Vec<usize>> {
    const WINDOW: usize = 10;
    if commits.len() < WINDOW {
        return None;
    }

    let mut max_density = 0.0_f64;
    let mut best: Option<usize> = None;

    for start in 0..commits.len() - WINDOW {
        let span_seconds =
            (commits[start].timestamp - commits[start + WINDOW - 1].timestamp).abs();
        if span_seconds == 0 {
            continue;
        }
        let density = WINDOW as f64 / (span_seconds as f64 / 3_600.0);
        if density > max_density {
            max_density = density;
            best = Some(start);
        }
    }

    let start = best.unwrap_or(0);
    Some((start..start + WINDOW).collect())
}

/// Maps each commit index to the section that claims it.
///
/// Later sections in the list override earlier ones for shared commits, so
/// a chorus claims its beats out of an overlapping verse.
pub fn section_map(sections: &[Section], total: usize) -> Vec<Option<usize>> {
    let mut map = vec![None; total];
    for (section_index, section) in sections.iter().enumerate() {
        for &commit_index in &section.commits {
            if commit_index < total {
                map[commit_index] = Some(section_index);
            }
        }
    }
    map
}
