//! Basic waveform generators.
//!
//! Phase-based pure functions plus a phase accumulator for frequency sweeps.
//! Phase is expressed in radians; callers advance it per sample.

use std::f64::consts::PI;

use rand::Rng;
use rand_pcg::Pcg32;

/// Two pi, the full phase cycle.
pub const TWO_PI: f64 = 2.0 * PI;

/// Sine wave at the given phase.
pub fn sine(phase: f64) -> f64 {
    phase.sin()
}

/// Naive square wave (50% duty) at the given phase.
pub fn square(phase: f64) -> f64 {
    if (phase / TWO_PI).rem_euclid(1.0) < 0.5 {
        1.0
    } else {
        -1.0
    }
}

/// Sawtooth wave rising from -1 to 1 over each cycle.
pub fn saw(phase: f64) -> f64 {
    2.0 * (phase / TWO_PI).rem_euclid(1.0) - 1.0
}

/// Triangle wave at the given phase.
pub fn triangle(phase: f64) -> f64 {
    let t = (phase / TWO_PI).rem_euclid(1.0);
    if t < 0.5 {
        4.0 * t - 1.0
    } else {
        3.0 - 4.0 * t
    }
}

/// Generates `num_samples` of white noise in [-1, 1].
pub fn white_noise(rng: &mut Pcg32, num_samples: usize) -> Vec<f64> {
    (0..num_samples).map(|_| rng.gen_range(-1.0..=1.0)).collect()
}

/// Accumulates phase sample by sample, allowing per-sample frequency changes
/// without discontinuities.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Creates an accumulator starting at phase zero.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Returns the current phase, then advances it by one sample at `freq`.
    pub fn advance(&mut self, freq: f64) -> f64 {
        let current = self.phase;
        self.phase += TWO_PI * freq / self.sample_rate;
        if self.phase >= TWO_PI {
            self.phase -= TWO_PI;
        }
        current
    }
}
