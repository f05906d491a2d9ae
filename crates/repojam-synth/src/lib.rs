//! Repojam sound synthesis bank
//!
//! This crate turns [`SoundEvent`](repojam_spec::SoundEvent) lists into
//! audio. It is the offline half of the dual renderer: a pure, synchronous
//! sample pipeline with no wall-clock dependency. The live renderer in
//! `repojam-play` streams the very same buffer, which is what makes
//! live/offline output equivalent by construction.
//!
//! # Determinism
//!
//! All synthesis is deterministic. Noise textures draw from PCG32 streams
//! whose seeds are derived per event via BLAKE3, so rendering the same event
//! list twice produces byte-identical PCM.
//!
//! # Crate structure
//!
//! - [`render`] - the [`Renderer`] entry point and [`TrackBuffer`] output
//! - [`generators`] - one synthesis routine per [`Generator`] variant
//! - [`mixer`] - per-bus accumulation and gain mixdown
//! - [`oscillator`] / [`filter`] / [`envelope`] - synthesis primitives
//! - [`rng`] - deterministic RNG with per-event seed derivation
//! - [`wav`] - deterministic 16-bit PCM WAV writer

pub mod envelope;
pub mod error;
pub mod filter;
pub mod generators;
pub mod mixer;
pub mod oscillator;
pub mod render;
pub mod rng;
pub mod wav;

pub use error::{SynthError, SynthResult};
pub use mixer::{MixBuffer, MixerGains};
pub use render::{Renderer, TrackBuffer, DEFAULT_SAMPLE_RATE};
