//! Repojam shared vocabulary
//!
//! This crate defines the types every other Repojam crate speaks:
//!
//! - [`Commit`] - one source-control commit record, the unit of one beat
//! - [`Genre`] - the closed set of musical styles a track can be rendered in
//! - [`SoundEvent`] / [`Generator`] / [`MixBus`] - the composer's output
//!   vocabulary, consumed by the synthesis bank
//! - [`CommitSource`] and [`MoodAnalyzer`] - the external collaborator
//!   interfaces (commit history host, commit-message mood analysis)
//!
//! Everything here is plain data. The composition algorithms live in
//! `repojam-compose`, synthesis in `repojam-synth`.

pub mod analyzer;
pub mod commit;
pub mod event;
pub mod genre;
pub mod source;

pub use analyzer::{AnalyzeError, MoodAnalysis, MoodAnalyzer};
pub use commit::{Commit, EasterEggKind};
pub use event::{Generator, HiHatVariant, MixBus, SoundEvent, Vowel};
pub use genre::{clamp_user_bpm, Genre};
pub use source::{CommitSource, SourceError};
