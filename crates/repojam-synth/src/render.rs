//! Offline track renderer.
//!
//! Renders a full [`SoundEvent`] list into an in-memory sample buffer,
//! synchronously and with no wall-clock dependency. The live player streams
//! the same buffer, so any difference between "what you heard" and "what
//! you exported" is a bug here, not a timing artifact.

use repojam_spec::SoundEvent;

use crate::error::{SynthError, SynthResult};
use crate::generators;
use crate::mixer::{MixBuffer, MixerGains};
use crate::rng::create_event_rng;
use crate::wav;

/// Default render sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default track seed for noise textures.
const DEFAULT_SEED: u32 = 0x524a_414d;

/// Renders event lists into [`TrackBuffer`]s.
#[derive(Debug, Clone)]
pub struct Renderer {
    sample_rate: u32,
    seed: u32,
    gains: MixerGains,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl Renderer {
    /// Creates a renderer at the given sample rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            seed: DEFAULT_SEED,
            gains: MixerGains::default(),
        }
    }

    /// Overrides the track seed for noise textures.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the mixer gains.
    pub fn with_gains(mut self, gains: MixerGains) -> Self {
        self.gains = gains;
        self
    }

    /// Renders the events into a mono sample buffer.
    ///
    /// `min_duration` pads the buffer to at least that many seconds so a
    /// track's nominal length (beats x beat duration) is honored even when
    /// the final sounds decay early. One-shot tails past `min_duration` are
    /// kept, never truncated.
    pub fn render(&self, events: &[SoundEvent], min_duration: f64) -> SynthResult<TrackBuffer> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        for event in events {
            if !event.time.is_finite() || event.time < 0.0 {
                return Err(SynthError::InvalidEventTime { time: event.time });
            }
        }

        let mut mix = MixBuffer::new(self.sample_rate as f64);
        for (index, event) in events.iter().enumerate() {
            let mut rng = create_event_rng(self.seed, index as u32);
            generators::render_into(event, &mut mix, &mut rng);
        }

        let mut samples = mix.mixdown(&self.gains);
        let min_len = (min_duration.max(0.0) * self.sample_rate as f64).round() as usize;
        if samples.len() < min_len {
            samples.resize(min_len, 0.0);
        }

        Ok(TrackBuffer {
            samples,
            sample_rate: self.sample_rate,
        })
    }
}

/// A rendered mono track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackBuffer {
    /// Mono samples, nominally in [-1, 1]; clipped at PCM conversion.
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl TrackBuffer {
    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Samples converted to f32 for audio-device streaming.
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples.iter().map(|&s| s as f32).collect()
    }

    /// Encodes the buffer as a 16-bit PCM mono WAV file.
    pub fn to_wav(&self) -> Vec<u8> {
        let pcm = wav::samples_to_pcm16(&self.samples);
        wav::write_wav_to_vec(&wav::WavFormat::mono(self.sample_rate), &pcm)
    }
}
