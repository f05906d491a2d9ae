//! The closed set of musical genres a track can be rendered in.
//!
//! Genre selection itself happens outside the core (mood analyzer or user
//! override); this module owns only the genre metadata. The mapping from
//! genre to musical material (chords, scales) lives in `repojam-compose`.

use serde::{Deserialize, Serialize};

/// Musical style bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    /// Frontend-heavy, modern web vibes.
    Synthwave,
    /// Backend systems, heavy processing.
    Industrial,
    /// Data-focused, analytical flow.
    Ambient,
    /// Game dev, retro computing.
    Chiptune,
    /// Mixed or unknown styles (the fallback).
    Experimental,
}

impl Genre {
    /// All genres, in scoring order.
    pub const ALL: [Genre; 5] = [
        Genre::Synthwave,
        Genre::Industrial,
        Genre::Ambient,
        Genre::Chiptune,
        Genre::Experimental,
    ];

    /// Parses a genre key, falling back to [`Genre::Experimental`] for
    /// anything unknown. The fallback is a documented default, not an error.
    pub fn from_key(key: &str) -> Genre {
        match key.trim().to_lowercase().as_str() {
            "synthwave" => Genre::Synthwave,
            "industrial" => Genre::Industrial,
            "ambient" => Genre::Ambient,
            "chiptune" => Genre::Chiptune,
            _ => Genre::Experimental,
        }
    }

    /// Lowercase key used in file names and JSON.
    pub fn key(self) -> &'static str {
        match self {
            Genre::Synthwave => "synthwave",
            Genre::Industrial => "industrial",
            Genre::Ambient => "ambient",
            Genre::Chiptune => "chiptune",
            Genre::Experimental => "experimental",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Genre::Synthwave => "Synthwave",
            Genre::Industrial => "Industrial",
            Genre::Ambient => "Ambient",
            Genre::Chiptune => "Chiptune",
            Genre::Experimental => "Experimental",
        }
    }

    /// Display emoji.
    pub fn emoji(self) -> &'static str {
        match self {
            Genre::Synthwave => "\u{1f306}",    // city dusk
            Genre::Industrial => "\u{2699}\u{fe0f}", // gear
            Genre::Ambient => "\u{2601}\u{fe0f}",    // cloud
            Genre::Chiptune => "\u{1f3ae}",     // game pad
            Genre::Experimental => "\u{1f52c}", // microscope
        }
    }

    /// One-line description of the style.
    pub fn description(self) -> &'static str {
        match self {
            Genre::Synthwave => "Frontend-heavy, modern web vibes",
            Genre::Industrial => "Backend systems, heavy processing",
            Genre::Ambient => "Data-focused, analytical flow",
            Genre::Chiptune => "Game dev, retro computing",
            Genre::Experimental => "Mixed or unknown styles",
        }
    }

    /// Inclusive BPM range this genre is normally rendered at.
    pub fn bpm_range(self) -> (u32, u32) {
        match self {
            Genre::Synthwave => (110, 130),
            Genre::Industrial => (95, 115),
            Genre::Ambient => (80, 100),
            Genre::Chiptune => (140, 160),
            Genre::Experimental => (100, 120),
        }
    }

    /// Midpoint of the BPM range, used when no analysis supplies a tempo.
    pub fn default_bpm(self) -> u32 {
        let (lo, hi) = self.bpm_range();
        lo + (hi - lo) / 2
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Clamps a user-supplied BPM override into the supported range.
pub fn clamp_user_bpm(bpm: u32) -> u32 {
    bpm.clamp(60, 180)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_fallback() {
        assert_eq!(Genre::from_key("Chiptune"), Genre::Chiptune);
        assert_eq!(Genre::from_key("vaporwave"), Genre::Experimental);
        assert_eq!(Genre::from_key(""), Genre::Experimental);
    }

    #[test]
    fn test_default_bpm_is_midpoint() {
        assert_eq!(Genre::Synthwave.default_bpm(), 120);
        assert_eq!(Genre::Chiptune.default_bpm(), 150);
    }

    #[test]
    fn test_clamp_user_bpm() {
        assert_eq!(clamp_user_bpm(10), 60);
        assert_eq!(clamp_user_bpm(300), 180);
        assert_eq!(clamp_user_bpm(128), 128);
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&Genre::Industrial).unwrap();
        assert_eq!(json, "\"industrial\"");
        let back: Genre = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Genre::Industrial);
    }
}
