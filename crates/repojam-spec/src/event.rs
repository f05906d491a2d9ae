//! Sound events - the composer's output vocabulary.
//!
//! A [`SoundEvent`] fully specifies one sound: what to synthesize
//! ([`Generator`]), when (absolute seconds from track start), and which mix
//! bus it lands on. Events are immutable, ordered by time with emission
//! order as the tiebreak, and consumed exactly once by a renderer.

/// Instrument group a sound is routed to. Each bus has its own gain in the
/// final mixdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixBus {
    Drums,
    Bass,
    Synth,
    Vocal,
}

impl MixBus {
    /// Stable index for per-bus buffers.
    pub fn index(self) -> usize {
        match self {
            MixBus::Drums => 0,
            MixBus::Bass => 1,
            MixBus::Synth => 2,
            MixBus::Vocal => 3,
        }
    }
}

/// Hi-hat articulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiHatVariant {
    /// Short, tight burst (~0.05 s, highpass 12 kHz).
    Closed,
    /// Longer wash (~0.2 s, highpass 8 kHz), slightly louder.
    Open,
}

/// Sung vowel for the vocal layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vowel {
    A,
    E,
    I,
    O,
    U,
}

impl Vowel {
    /// Picks the vowel an author "sings": first char code modulo the
    /// five-vowel set. An empty name falls back to /a/.
    pub fn for_author(name: &str) -> Vowel {
        const VOWELS: [Vowel; 5] = [Vowel::A, Vowel::E, Vowel::I, Vowel::O, Vowel::U];
        let code = name.chars().next().map(|c| c as u32).unwrap_or(0);
        VOWELS[(code % 5) as usize]
    }
}

/// A synthesis-bank entry with its generator-specific parameters.
///
/// The one-shot effects carry no parameters; their character is fixed.
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    /// Low sine sweep 150 Hz down to silence over 0.5 s.
    Kick { intensity: f64 },
    /// Highpass-filtered white noise, 0.2 s decay.
    Snare { intensity: f64 },
    /// Short filtered noise burst.
    HiHat { variant: HiHatVariant, intensity: f64 },
    /// Sawtooth at the chord's bass note.
    Bass { freq: f64, duration: f64, intensity: f64 },
    /// Simultaneous sawtooth per chord note.
    Chord { freqs: Vec<f64>, duration: f64, intensity: f64 },
    /// Square-wave melodic lead note.
    Lead { freq: f64, duration: f64, intensity: f64 },
    /// Sawtooth carrier through cascaded formant filters.
    Vowel { vowel: Vowel, pitch: f64, duration: f64, intensity: f64 },
    /// Eight snares at 0.05 s spacing.
    DrumRoll,
    /// Noise swelling in amplitude over 0.3 s.
    ReverseCymbal,
    /// Loud triangle thump, ~0.4 s.
    OrchestralHit,
    /// Five ascending square blips at 0.1 s spacing.
    Cowbell,
    /// Three-step square frequency stutter over 0.15 s.
    Glitch,
    /// Sawtooth pitch sweep 1000 to 100 Hz over 0.1 s.
    Scratch,
}

/// One fully-specified sound with an absolute start time.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEvent {
    /// Seconds from track start. Never negative.
    pub time: f64,
    /// What to synthesize.
    pub generator: Generator,
    /// Destination bus.
    pub bus: MixBus,
}

impl SoundEvent {
    pub fn new(time: f64, generator: Generator, bus: MixBus) -> Self {
        Self { time, generator, bus }
    }
}
