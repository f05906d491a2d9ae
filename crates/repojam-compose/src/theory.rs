//! Note names, chord progressions, and melodic scales.
//!
//! Everything here is a fixed lookup keyed by genre. Frequencies come from
//! twelve-tone equal temperament with A4 at 440 Hz.

use repojam_spec::Genre;

/// Converts a note name like `"C4"` or `"A#3"` to a frequency in Hz.
///
/// Accepts a letter A-G, an optional `#` or `b`, and a single octave digit.
/// Anything unparseable falls back to A4 (440 Hz).
pub fn note_to_frequency(note: &str) -> f64 {
    parse_note(note).unwrap_or(440.0)
}

fn parse_note(note: &str) -> Option<f64> {
    let mut chars = note.chars();
    let letter = chars.next()?;

    // Semitones relative to A within the same octave
    let base = match letter {
        'C' => -9,
        'D' => -7,
        'E' => -5,
        'F' => -4,
        'G' => -2,
        'A' => 0,
        'B' => 2,
        _ => return None,
    };

    let next = chars.next()?;
    let (accidental, octave_char) = match next {
        '#' => (1, chars.next()?),
        'b' => (-1, chars.next()?),
        _ => (0, next),
    };

    let octave = octave_char.to_digit(10)? as i32;
    let semitones = base + accidental + (octave - 4) * 12;

    Some(440.0 * 2.0_f64.powf(semitones as f64 / 12.0))
}

/// A four-chord progression with matching bass notes.
#[derive(Debug, Clone, Copy)]
pub struct Progression {
    pub chords: [&'static [&'static str]; 4],
    pub bass_notes: [&'static str; 4],
    pub name: &'static str,
}

impl Progression {
    /// Frequencies of the chord at `index` (0-3).
    pub fn chord_frequencies(&self, index: usize) -> Vec<f64> {
        self.chords[index % 4]
            .iter()
            .map(|note| note_to_frequency(note))
            .collect()
    }

    /// Frequency of the bass note at `index` (0-3).
    pub fn bass_frequency(&self, index: usize) -> f64 {
        note_to_frequency(self.bass_notes[index % 4])
    }
}

// Dm -> Am -> F -> C
const SYNTHWAVE: Progression = Progression {
    chords: [
        &["D3", "F3", "A3"],
        &["A2", "C3", "E3"],
        &["F2", "A2", "C3"],
        &["C3", "E3", "G3"],
    ],
    bass_notes: ["D2", "A2", "F2", "C2"],
    name: "vi-iii-IV-I (Emotional)",
};

// Em -> C -> G -> D
const INDUSTRIAL: Progression = Progression {
    chords: [
        &["E3", "G3", "B3"],
        &["C3", "E3", "G3"],
        &["G2", "B2", "D3"],
        &["D3", "F#3", "A3"],
    ],
    bass_notes: ["E2", "C2", "G2", "D2"],
    name: "i-VI-III-VII (Powerful)",
};

// Am -> F -> C -> G
const AMBIENT: Progression = Progression {
    chords: [
        &["A3", "C4", "E4"],
        &["F3", "A3", "C4"],
        &["C3", "E3", "G3"],
        &["G3", "B3", "D4"],
    ],
    bass_notes: ["A2", "F2", "C2", "G2"],
    name: "vi-IV-I-V (Dreamy)",
};

// C -> G -> Am -> F
const CHIPTUNE: Progression = Progression {
    chords: [
        &["C4", "E4", "G4"],
        &["G3", "B3", "D4"],
        &["A3", "C4", "E4"],
        &["F3", "A3", "C4"],
    ],
    bass_notes: ["C2", "G2", "A2", "F2"],
    name: "I-V-vi-IV (Pop)",
};

// Cmaj7 -> Fmaj7 -> Gmaj7 -> Am7
const EXPERIMENTAL: Progression = Progression {
    chords: [
        &["C3", "E3", "G3", "B3"],
        &["F3", "A3", "C4", "E4"],
        &["G3", "B3", "D4", "F#4"],
        &["A3", "C4", "E4", "G4"],
    ],
    bass_notes: ["C2", "F2", "G2", "A2"],
    name: "I-IV-V-vi (Jazz)",
};

/// The chord progression for a genre.
pub fn progression_for(genre: Genre) -> &'static Progression {
    match genre {
        Genre::Synthwave => &SYNTHWAVE,
        Genre::Industrial => &INDUSTRIAL,
        Genre::Ambient => &AMBIENT,
        Genre::Chiptune => &CHIPTUNE,
        Genre::Experimental => &EXPERIMENTAL,
    }
}

/// The melodic scale for a genre, as frequencies.
pub fn melodic_scale(genre: Genre) -> Vec<f64> {
    let notes: &[&str] = match genre {
        // Pentatonic major
        Genre::Synthwave => &["C4", "D4", "E4", "G4", "A4", "C5", "D5", "E5"],
        // Minor pentatonic
        Genre::Industrial => &["E3", "G3", "A3", "B3", "D4", "E4", "G4", "A4"],
        // Aeolian
        Genre::Ambient => &["A3", "B3", "C4", "E4", "F4", "A4", "B4", "C5"],
        // Arpeggio
        Genre::Chiptune => &["C4", "E4", "G4", "C5", "E5", "G5", "C6"],
        // Lydian
        Genre::Experimental => &["C4", "D4", "E4", "F#4", "G4", "A4", "B4", "C5"],
    };
    notes.iter().map(|note| note_to_frequency(note)).collect()
}

/// The chord slot (0-3) active at `beat`, changing every `beats_per_chord`.
pub fn chord_index_for_beat(beat: usize, beats_per_chord: usize) -> usize {
    (beat / beats_per_chord) % 4
}
