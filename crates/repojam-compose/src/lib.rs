//! Commit-history composition.
//!
//! Takes an ordered commit list (newest first, as a forge API returns it)
//! plus a tempo and genre, and produces a deterministic schedule of
//! [`repojam_spec::SoundEvent`]s. One commit is one beat; the commit's
//! metadata shapes the drum pattern, intensity, melodic voices, and the
//! one-shot effects layered on top.

pub mod classify;
pub mod compose;
pub mod structure;
pub mod theory;

pub use classify::{
    detect_easter_eggs, dynamic_intensity, special_effect, tag_commits, BeatPattern, DrumHit,
    SpecialEffect,
};
pub use compose::{compose, Composition, ProgressMark, ProgressSignal};
pub use structure::{detect_sections, LayerSet, Section, SectionKind};
pub use theory::{chord_index_for_beat, melodic_scale, note_to_frequency, progression_for, Progression};
