//! Per-bus accumulation and gain mixdown.
//!
//! Sounds land on one of four buses (drums, bass, synth, vocal); the final
//! mixdown sums them with per-bus gains under a master gain, mirroring a
//! four-channel mixer feeding a master fader.

use repojam_spec::MixBus;

/// Number of mix buses.
const NUM_BUSES: usize = 4;

/// Per-bus and master gains applied at mixdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixerGains {
    pub drums: f64,
    pub bass: f64,
    pub synth: f64,
    pub vocal: f64,
    pub master: f64,
}

impl Default for MixerGains {
    fn default() -> Self {
        Self {
            drums: 1.0,
            bass: 1.0,
            synth: 1.0,
            vocal: 1.0,
            master: 0.6,
        }
    }
}

impl MixerGains {
    fn for_bus(&self, bus: MixBus) -> f64 {
        match bus {
            MixBus::Drums => self.drums,
            MixBus::Bass => self.bass,
            MixBus::Synth => self.synth,
            MixBus::Vocal => self.vocal,
        }
    }
}

/// Accumulates rendered sounds into per-bus sample buffers.
///
/// Buffers grow as sounds are added; nothing is pre-allocated to a track
/// length, so one-shot tails past the last beat are kept.
#[derive(Debug, Clone)]
pub struct MixBuffer {
    sample_rate: f64,
    buses: [Vec<f64>; NUM_BUSES],
}

impl MixBuffer {
    /// Creates an empty mix at the given sample rate.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            buses: Default::default(),
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Adds `samples` onto `bus` starting at `start_time` seconds.
    ///
    /// Negative start times are clamped to zero; the composer only produces
    /// them for boundary transitions near track start.
    pub fn add(&mut self, bus: MixBus, start_time: f64, samples: &[f64]) {
        let start = (start_time.max(0.0) * self.sample_rate).round() as usize;
        let buffer = &mut self.buses[bus.index()];

        let end = start + samples.len();
        if buffer.len() < end {
            buffer.resize(end, 0.0);
        }
        for (i, &s) in samples.iter().enumerate() {
            buffer[start + i] += s;
        }
    }

    /// Length of the longest bus in samples.
    pub fn len(&self) -> usize {
        self.buses.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when no sound has been added.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sums the buses into one mono buffer under the given gains.
    pub fn mixdown(&self, gains: &MixerGains) -> Vec<f64> {
        let len = self.len();
        let mut out = vec![0.0; len];

        for bus in [MixBus::Drums, MixBus::Bass, MixBus::Synth, MixBus::Vocal] {
            let gain = gains.for_bus(bus) * gains.master;
            for (i, &s) in self.buses[bus.index()].iter().enumerate() {
                out[i] += s * gain;
            }
        }

        out
    }
}
