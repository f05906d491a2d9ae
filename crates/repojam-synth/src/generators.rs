//! The sound synthesis bank.
//!
//! One routine per [`Generator`] variant, dispatched exhaustively. Every
//! routine is a pure function of (event, sample rate, RNG stream) producing
//! samples that are accumulated onto the event's bus, so the same code path
//! serves both the offline export and live playback.
//!
//! Amplitudes and durations reproduce the bank's fixed character: see each
//! routine for its defining constants.

use rand_pcg::Pcg32;
use repojam_spec::{Generator, HiHatVariant, SoundEvent, Vowel};

use crate::envelope::{exp_decay, exp_ramp, lin_ramp, AsrEnvelope};
use crate::filter::BiquadFilter;
use crate::mixer::MixBuffer;
use crate::oscillator::{self, PhaseAccumulator};

/// Renders one event into the mix.
pub fn render_into(event: &SoundEvent, mix: &mut MixBuffer, rng: &mut Pcg32) {
    let sr = mix.sample_rate();
    match &event.generator {
        Generator::Kick { intensity } => {
            mix.add(event.bus, event.time, &kick(sr, *intensity));
        }
        Generator::Snare { intensity } => {
            mix.add(event.bus, event.time, &snare(sr, *intensity, rng));
        }
        Generator::HiHat { variant, intensity } => {
            mix.add(event.bus, event.time, &hi_hat(sr, *variant, *intensity, rng));
        }
        Generator::Bass {
            freq,
            duration,
            intensity,
        } => {
            mix.add(event.bus, event.time, &bass(sr, *freq, *duration, *intensity));
        }
        Generator::Chord {
            freqs,
            duration,
            intensity,
        } => {
            mix.add(event.bus, event.time, &chord(sr, freqs, *duration, *intensity));
        }
        Generator::Lead {
            freq,
            duration,
            intensity,
        } => {
            mix.add(event.bus, event.time, &lead(sr, *freq, *duration, *intensity));
        }
        Generator::Vowel {
            vowel,
            pitch,
            duration,
            intensity,
        } => {
            mix.add(
                event.bus,
                event.time,
                &sung_vowel(sr, *vowel, *pitch, *duration, *intensity),
            );
        }
        Generator::DrumRoll => {
            // Eight snares at 0.05 s spacing
            for i in 0..8 {
                mix.add(event.bus, event.time + i as f64 * 0.05, &snare(sr, 1.0, rng));
            }
        }
        Generator::ReverseCymbal => {
            mix.add(event.bus, event.time, &reverse_cymbal(sr, rng));
        }
        Generator::OrchestralHit => {
            mix.add(event.bus, event.time, &orchestral_hit(sr));
        }
        Generator::Cowbell => {
            // Five ascending blips at 0.1 s spacing
            for i in 0..5 {
                let freq = 800.0 + i as f64 * 100.0;
                mix.add(event.bus, event.time + i as f64 * 0.1, &cowbell_blip(sr, freq));
            }
        }
        Generator::Glitch => {
            mix.add(event.bus, event.time, &glitch(sr));
        }
        Generator::Scratch => {
            mix.add(event.bus, event.time, &scratch(sr));
        }
    }
}

fn num_samples(sr: f64, duration: f64) -> usize {
    (sr * duration.max(0.0)).round() as usize
}

/// Kick: sine sweeping 150 Hz down to near-zero over 0.5 s, amplitude 1.0
/// with exponential decay.
fn kick(sr: f64, intensity: f64) -> Vec<f64> {
    let n = num_samples(sr, 0.5);
    let mut acc = PhaseAccumulator::new(sr);
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let frac = i as f64 / n as f64;
        let freq = exp_ramp(150.0, 0.001, frac);
        let amp = exp_decay(1.0 * intensity, frac);
        out.push(oscillator::sine(acc.advance(freq)) * amp);
    }
    out
}

/// Snare: white noise through a 1 kHz highpass, amplitude 0.8 with 0.2 s
/// exponential decay.
fn snare(sr: f64, intensity: f64, rng: &mut Pcg32) -> Vec<f64> {
    let n = num_samples(sr, 0.2);
    let mut samples = oscillator::white_noise(rng, n);
    BiquadFilter::highpass(1_000.0, 0.707, sr).process_buffer(&mut samples);

    for (i, s) in samples.iter_mut().enumerate() {
        *s *= exp_decay(0.8 * intensity, i as f64 / n as f64);
    }
    samples
}

/// Hi-hat: pre-decayed noise burst through a steep highpass. Closed is 0.05 s
/// above 12 kHz at 0.15; open is 0.2 s above 8 kHz at 0.2.
fn hi_hat(sr: f64, variant: HiHatVariant, intensity: f64, rng: &mut Pcg32) -> Vec<f64> {
    let (duration, cutoff, volume) = match variant {
        HiHatVariant::Closed => (0.05, 12_000.0, 0.15),
        HiHatVariant::Open => (0.2, 8_000.0, 0.2),
    };

    let n = num_samples(sr, duration);
    let mut samples = oscillator::white_noise(rng, n);
    // Shape the noise itself before filtering, like a struck cymbal
    for (i, s) in samples.iter_mut().enumerate() {
        *s *= (-10.0 * i as f64 / n as f64).exp();
    }
    BiquadFilter::highpass(cutoff, 0.707, sr).process_buffer(&mut samples);

    for (i, s) in samples.iter_mut().enumerate() {
        *s *= exp_decay(volume * intensity, i as f64 / n as f64);
    }
    samples
}

/// Bass: sawtooth at the note frequency, amplitude 0.3 with exponential
/// decay over the given duration.
fn bass(sr: f64, freq: f64, duration: f64, intensity: f64) -> Vec<f64> {
    let n = num_samples(sr, duration);
    let mut acc = PhaseAccumulator::new(sr);
    (0..n)
        .map(|i| {
            let amp = exp_decay(0.3 * intensity, i as f64 / n as f64);
            oscillator::saw(acc.advance(freq)) * amp
        })
        .collect()
}

/// Chord: one sawtooth per note, each at 0.15 amplitude, shared duration.
fn chord(sr: f64, freqs: &[f64], duration: f64, intensity: f64) -> Vec<f64> {
    let n = num_samples(sr, duration);
    let mut out = vec![0.0; n];

    for &freq in freqs {
        let mut acc = PhaseAccumulator::new(sr);
        for (i, slot) in out.iter_mut().enumerate() {
            let amp = exp_decay(0.15 * intensity, i as f64 / n as f64);
            *slot += oscillator::saw(acc.advance(freq)) * amp;
        }
    }
    out
}

/// Lead: square wave at 0.15 amplitude decaying over the note duration.
fn lead(sr: f64, freq: f64, duration: f64, intensity: f64) -> Vec<f64> {
    let n = num_samples(sr, duration);
    let mut acc = PhaseAccumulator::new(sr);
    (0..n)
        .map(|i| {
            let amp = exp_decay(0.15 * intensity, i as f64 / n as f64);
            oscillator::square(acc.advance(freq)) * amp
        })
        .collect()
}

/// Formant triplet (F1, F2, F3) for each vowel.
fn formants(vowel: Vowel) -> [f64; 3] {
    match vowel {
        Vowel::A => [730.0, 1_090.0, 2_440.0],
        Vowel::E => [530.0, 1_840.0, 2_480.0],
        Vowel::I => [270.0, 2_290.0, 3_010.0],
        Vowel::O => [570.0, 840.0, 2_410.0],
        Vowel::U => [440.0, 1_020.0, 2_240.0],
    }
}

/// Sung vowel: sawtooth carrier through three cascaded bandpass filters
/// (Q 10) tuned to the vowel's formants, with a 0.05 s attack and 0.1 s
/// release around a 0.3-level sustain.
fn sung_vowel(sr: f64, vowel: Vowel, pitch: f64, duration: f64, intensity: f64) -> Vec<f64> {
    let n = num_samples(sr, duration);
    let mut acc = PhaseAccumulator::new(sr);
    let mut samples: Vec<f64> = (0..n).map(|_| oscillator::saw(acc.advance(pitch))).collect();

    for f in formants(vowel) {
        BiquadFilter::bandpass(f, 10.0, sr).process_buffer(&mut samples);
    }

    // Cascaded narrow bandpasses attenuate heavily; bring the result back to
    // unit peak before the envelope sets the actual level.
    let peak = samples.iter().fold(0.0_f64, |a, &b| a.max(b.abs()));
    if peak > 0.0 {
        let scale = 1.0 / peak;
        for s in samples.iter_mut() {
            *s *= scale;
        }
    }

    let env = AsrEnvelope::new(0.05, 0.1, 0.3 * intensity);
    for (i, s) in samples.iter_mut().enumerate() {
        *s *= env.level(i as f64 / sr, duration);
    }
    samples
}

/// Reverse cymbal: 0.3 s of noise ramping linearly up in amplitude, 0.3 gain.
fn reverse_cymbal(sr: f64, rng: &mut Pcg32) -> Vec<f64> {
    let n = num_samples(sr, 0.3);
    let mut samples = oscillator::white_noise(rng, n);
    for (i, s) in samples.iter_mut().enumerate() {
        *s *= 0.3 * (i as f64 / n as f64);
    }
    samples
}

/// Orchestral hit: 100 Hz triangle thump at 1.5 amplitude, 0.4 s decay.
fn orchestral_hit(sr: f64) -> Vec<f64> {
    let n = num_samples(sr, 0.4);
    let mut acc = PhaseAccumulator::new(sr);
    (0..n)
        .map(|i| {
            let amp = exp_decay(1.5, i as f64 / n as f64);
            oscillator::triangle(acc.advance(100.0)) * amp
        })
        .collect()
}

/// One cowbell blip: square wave, 0.3 amplitude, 0.1 s decay.
fn cowbell_blip(sr: f64, freq: f64) -> Vec<f64> {
    let n = num_samples(sr, 0.1);
    let mut acc = PhaseAccumulator::new(sr);
    (0..n)
        .map(|i| {
            let amp = exp_decay(0.3, i as f64 / n as f64);
            oscillator::square(acc.advance(freq)) * amp
        })
        .collect()
}

/// Glitch: square wave stepping 440 / 220 / 880 Hz in 0.05 s steps at 0.4
/// amplitude, cut dead at 0.15 s.
fn glitch(sr: f64) -> Vec<f64> {
    let n = num_samples(sr, 0.15);
    let mut acc = PhaseAccumulator::new(sr);
    (0..n)
        .map(|i| {
            let t = i as f64 / sr;
            let freq = if t < 0.05 {
                440.0
            } else if t < 0.1 {
                220.0
            } else {
                880.0
            };
            oscillator::square(acc.advance(freq)) * 0.4
        })
        .collect()
}

/// Scratch: sawtooth sweeping 1000 down to 100 Hz over 0.1 s, amplitude
/// fading linearly from 0.5 to 0.
fn scratch(sr: f64) -> Vec<f64> {
    let n = num_samples(sr, 0.1);
    let mut acc = PhaseAccumulator::new(sr);
    (0..n)
        .map(|i| {
            let frac = i as f64 / n as f64;
            let freq = lin_ramp(1_000.0, 100.0, frac);
            let amp = lin_ramp(0.5, 0.0, frac);
            oscillator::saw(acc.advance(freq)) * amp
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use repojam_spec::MixBus;

    const SR: f64 = 44_100.0;

    #[test]
    fn test_kick_length_and_decay() {
        let samples = kick(SR, 1.0);
        assert_eq!(samples.len(), 22_050);
        // Tail is near-silent
        assert!(samples[samples.len() - 1].abs() < 0.01);
    }

    #[test]
    fn test_snare_is_deterministic() {
        let mut rng1 = create_rng(9);
        let mut rng2 = create_rng(9);
        assert_eq!(snare(SR, 1.0, &mut rng1), snare(SR, 1.0, &mut rng2));
    }

    #[test]
    fn test_hi_hat_variants_differ_in_length() {
        let mut rng = create_rng(9);
        let closed = hi_hat(SR, HiHatVariant::Closed, 1.0, &mut rng);
        let open = hi_hat(SR, HiHatVariant::Open, 1.0, &mut rng);
        assert_eq!(closed.len(), num_samples(SR, 0.05));
        assert_eq!(open.len(), num_samples(SR, 0.2));
    }

    #[test]
    fn test_chord_stacks_notes() {
        let single = chord(SR, &[440.0], 0.1, 1.0);
        let stacked = chord(SR, &[440.0, 550.0, 660.0], 0.1, 1.0);
        assert_eq!(single.len(), stacked.len());

        let peak = |s: &[f64]| s.iter().fold(0.0_f64, |a, &b| a.max(b.abs()));
        assert!(peak(&stacked) > peak(&single));
    }

    #[test]
    fn test_vowel_envelope_opens_and_closes() {
        let samples = sung_vowel(SR, Vowel::A, 220.0, 0.5, 1.0);
        assert_eq!(samples.len(), num_samples(SR, 0.5));
        assert!(samples[0].abs() < 1e-9); // attack starts from silence
        assert!(samples[samples.len() - 1].abs() < 0.01);
    }

    #[test]
    fn test_glitch_steps_duration() {
        assert_eq!(glitch(SR).len(), num_samples(SR, 0.15));
    }

    #[test]
    fn test_render_into_drum_roll_spacing() {
        let mut mix = MixBuffer::new(SR);
        let event = SoundEvent::new(0.0, Generator::DrumRoll, MixBus::Drums);
        let mut rng = create_rng(1);
        render_into(&event, &mut mix, &mut rng);
        // Last snare starts at 0.35 s and lasts 0.2 s
        assert_eq!(mix.len(), num_samples(SR, 0.35) + num_samples(SR, 0.2));
    }

    #[test]
    fn test_render_into_cowbell_spacing() {
        let mut mix = MixBuffer::new(SR);
        let event = SoundEvent::new(0.0, Generator::Cowbell, MixBus::Drums);
        let mut rng = create_rng(1);
        render_into(&event, &mut mix, &mut rng);
        // Last blip starts at 0.4 s and lasts 0.1 s
        assert_eq!(mix.len(), num_samples(SR, 0.4) + num_samples(SR, 0.1));
    }
}
