//! Biquad filter implementations.
//!
//! Highpass (snare, hi-hats) and bandpass (vowel formants) filters using the
//! standard biquad topology, coefficients per the Audio EQ Cookbook.

use std::f64::consts::PI;

/// Biquad filter coefficients.
#[derive(Debug, Clone, Copy)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Creates highpass filter coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor (resonance), 0.707 is Butterworth
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        // Clamp Q to a minimum safe value to prevent division by zero
        let q = q.max(0.5);
        let omega = 2.0 * PI * cutoff / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 + cos_omega) / 2.0;
        let b1 = -(1.0 + cos_omega);
        let b2 = (1.0 + cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Creates bandpass filter coefficients (constant skirt gain).
    ///
    /// # Arguments
    /// * `center` - Center frequency in Hz
    /// * `q` - Q factor (bandwidth = center / Q)
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn bandpass(center: f64, q: f64, sample_rate: f64) -> Self {
        let q = q.max(0.5);
        let omega = 2.0 * PI * center / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * q);

        let b0 = alpha;
        let b1 = 0.0;
        let b2 = -alpha;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Stateful biquad filter (Direct Form I).
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a filter from explicit coefficients.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Convenience constructor for a highpass filter.
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(BiquadCoeffs::highpass(cutoff, q, sample_rate))
    }

    /// Convenience constructor for a bandpass filter.
    pub fn bandpass(center: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(BiquadCoeffs::bandpass(center, q, sample_rate))
    }

    /// Processes a single sample.
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output =
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Processes a buffer in place.
    pub fn process_buffer(&mut self, samples: &mut [f64]) {
        for sample in samples.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oscillator;
    use crate::rng::create_rng;

    /// RMS amplitude helper.
    fn rms(samples: &[f64]) -> f64 {
        (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
    }

    #[test]
    fn test_highpass_attenuates_low_frequencies() {
        let sample_rate = 44_100.0;
        let mut low: Vec<f64> = (0..4_410)
            .map(|i| oscillator::sine(oscillator::TWO_PI * 100.0 * i as f64 / sample_rate))
            .collect();
        let before = rms(&low);
        let mut filter = BiquadFilter::highpass(8_000.0, 0.707, sample_rate);
        filter.process_buffer(&mut low);
        assert!(rms(&low) < before * 0.1);
    }

    #[test]
    fn test_bandpass_keeps_center() {
        let sample_rate = 44_100.0;
        let mut center: Vec<f64> = (0..4_410)
            .map(|i| oscillator::sine(oscillator::TWO_PI * 1_000.0 * i as f64 / sample_rate))
            .collect();
        let mut off: Vec<f64> = (0..4_410)
            .map(|i| oscillator::sine(oscillator::TWO_PI * 100.0 * i as f64 / sample_rate))
            .collect();

        let mut f1 = BiquadFilter::bandpass(1_000.0, 10.0, sample_rate);
        let mut f2 = BiquadFilter::bandpass(1_000.0, 10.0, sample_rate);
        f1.process_buffer(&mut center);
        f2.process_buffer(&mut off);

        assert!(rms(&center) > rms(&off) * 4.0);
    }

    #[test]
    fn test_filter_determinism() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let mut a = oscillator::white_noise(&mut rng1, 512);
        let mut b = oscillator::white_noise(&mut rng2, 512);

        BiquadFilter::highpass(1_000.0, 0.707, 44_100.0).process_buffer(&mut a);
        BiquadFilter::highpass(1_000.0, 0.707, 44_100.0).process_buffer(&mut b);
        assert_eq!(a, b);
    }
}
