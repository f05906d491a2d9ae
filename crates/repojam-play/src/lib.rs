//! Live playback.
//!
//! Streams a pre-rendered [`repojam_synth::TrackBuffer`] through the default
//! audio output device and fires progress callbacks (beats, section changes)
//! as the track passes their scheduled times. Playback is a replay of the
//! offline render: what the speakers get is byte-for-byte what a WAV export
//! would contain, resampling aside.

mod session;

pub use session::{PlaybackSession, PlayError, LEAD_IN_SECONDS};
