//! Amplitude envelopes.
//!
//! Web-Audio-style ramp helpers plus the attack/sustain/release shape used
//! by the sung-vowel generator. All take a position in seconds and return a
//! gain multiplier.

/// Smallest target for exponential decays. Exponential ramps cannot reach
/// zero, so decays aim at this floor the way Web Audio ramps do.
pub const EXP_FLOOR: f64 = 0.001;

/// Exponential ramp from `v0` to `v1` at fraction `frac` in [0, 1].
///
/// `v(frac) = v0 * (v1 / v0)^frac`. Both endpoints must be positive; a
/// non-positive start collapses to silence.
pub fn exp_ramp(v0: f64, v1: f64, frac: f64) -> f64 {
    if v0 <= 0.0 {
        return 0.0;
    }
    let v1 = v1.max(EXP_FLOOR * EXP_FLOOR);
    v0 * (v1 / v0).powf(frac.clamp(0.0, 1.0))
}

/// Exponential decay from `peak` to the floor at fraction `frac`.
pub fn exp_decay(peak: f64, frac: f64) -> f64 {
    exp_ramp(peak, EXP_FLOOR, frac)
}

/// Linear ramp from `v0` to `v1` at fraction `frac` in [0, 1].
pub fn lin_ramp(v0: f64, v1: f64, frac: f64) -> f64 {
    v0 + (v1 - v0) * frac.clamp(0.0, 1.0)
}

/// Attack / sustain / release envelope.
///
/// Rises linearly from 0 over `attack`, holds at `peak`, then falls
/// linearly to 0 over the final `release` of the total duration.
#[derive(Debug, Clone, Copy)]
pub struct AsrEnvelope {
    /// Attack time in seconds.
    pub attack: f64,
    /// Release time in seconds.
    pub release: f64,
    /// Sustain level.
    pub peak: f64,
}

impl AsrEnvelope {
    /// Creates a new envelope.
    pub fn new(attack: f64, release: f64, peak: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            release: release.max(0.0),
            peak,
        }
    }

    /// Gain at `t` seconds into a sound of `duration` seconds.
    pub fn level(&self, t: f64, duration: f64) -> f64 {
        if t < 0.0 || t >= duration {
            return 0.0;
        }
        if self.attack > 0.0 && t < self.attack {
            return self.peak * (t / self.attack);
        }
        let release_start = duration - self.release;
        if self.release > 0.0 && t > release_start {
            return self.peak * ((duration - t) / self.release).max(0.0);
        }
        self.peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_decay_endpoints() {
        assert!((exp_decay(1.0, 0.0) - 1.0).abs() < 1e-12);
        assert!((exp_decay(1.0, 1.0) - EXP_FLOOR).abs() < 1e-9);
    }

    #[test]
    fn test_exp_decay_monotonic() {
        let mut last = f64::INFINITY;
        for i in 0..=10 {
            let v = exp_decay(0.8, i as f64 / 10.0);
            assert!(v < last);
            last = v;
        }
    }

    #[test]
    fn test_lin_ramp() {
        assert_eq!(lin_ramp(0.5, 0.0, 0.0), 0.5);
        assert_eq!(lin_ramp(0.5, 0.0, 1.0), 0.0);
        assert_eq!(lin_ramp(0.0, 1.0, 0.25), 0.25);
    }

    #[test]
    fn test_asr_shape() {
        let env = AsrEnvelope::new(0.05, 0.1, 0.3);
        let dur = 1.0;
        assert_eq!(env.level(-0.1, dur), 0.0);
        assert!((env.level(0.025, dur) - 0.15).abs() < 1e-12); // mid-attack
        assert_eq!(env.level(0.5, dur), 0.3); // sustain
        assert!((env.level(0.95, dur) - 0.15).abs() < 1e-12); // mid-release
        assert_eq!(env.level(1.0, dur), 0.0);
    }
}
