//! The composer: commits in, a sound-event schedule out.
//!
//! One commit is one beat. Each beat consults the commit's section for
//! active layers, classifies the commit for pattern and intensity, and emits
//! events for drums, bass, chords, lead, vocals, easter eggs, and special
//! effects. The output is a pure function of the inputs; playing it and
//! exporting it render the same schedule.

use repojam_spec::{Commit, Genre, Generator, HiHatVariant, MixBus, SoundEvent, Vowel};

use crate::classify::{dynamic_intensity, special_effect, BeatPattern, DrumHit};
use crate::structure::{detect_sections, section_map, Section, SectionKind, DEFAULT_SECTION};
use crate::theory::{chord_index_for_beat, melodic_scale, progression_for};

/// Offset of easter-egg sounds from their beat, in seconds.
const EGG_OFFSET: f64 = 0.1;
/// Offset of commit-driven special effects from their beat, in seconds.
const EFFECT_OFFSET: f64 = 0.05;

/// Something a playback surface may want to announce while the track runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressSignal {
    /// A beat started; carries the beat index.
    Beat(usize),
    /// A new section started at the given beat index.
    Section(SectionKind, usize),
}

/// A progress signal pinned to a track time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressMark {
    pub time: f64,
    pub signal: ProgressSignal,
}

/// A fully scheduled track.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Sound events, sorted by time (ties keep emission order).
    pub events: Vec<SoundEvent>,
    /// Progress marks in time order.
    pub progress: Vec<ProgressMark>,
    /// The detected sections, for display.
    pub sections: Vec<Section>,
    /// Nominal duration in seconds: beats times beat length. Decaying tails
    /// may ring past this.
    pub duration: f64,
}

/// Composes a track from a newest-first commit list.
///
/// An empty list yields an empty composition with zero duration.
pub fn compose(commits: &[Commit], bpm: u32, genre: Genre) -> Composition {
    let beat_duration = 60.0 / bpm as f64;
    let progression = progression_for(genre);
    let scale = melodic_scale(genre);

    let sections = detect_sections(commits);
    let map = section_map(&sections, commits.len());

    let mut events = Vec::new();
    let mut progress = Vec::new();
    let mut last_kind: Option<SectionKind> = None;

    for (beat, commit) in commits.iter().enumerate() {
        let time = beat as f64 * beat_duration;
        let section = map[beat]
            .map(|i| &sections[i])
            .unwrap_or(&DEFAULT_SECTION);

        let recent = &commits[beat.saturating_sub(5)..beat];
        let pattern = BeatPattern::select(commit, recent);
        let intensity = dynamic_intensity(commit, section.base_intensity);

        // Section boundary: transition sound plus a progress mark. The very
        // first section announces itself but gets no transition sound.
        if last_kind != Some(section.kind) {
            if beat > 0 {
                match section.kind {
                    SectionKind::Chorus | SectionKind::Verse => {
                        events.push(SoundEvent::new(
                            (time - beat_duration * 0.5).max(0.0),
                            Generator::DrumRoll,
                            MixBus::Drums,
                        ));
                    }
                    SectionKind::Bridge => {
                        events.push(SoundEvent::new(
                            (time - beat_duration * 1.5).max(0.0),
                            Generator::ReverseCymbal,
                            MixBus::Drums,
                        ));
                    }
                    SectionKind::Outro => {
                        events.push(SoundEvent::new(time, Generator::OrchestralHit, MixBus::Drums));
                    }
                    SectionKind::Intro => {}
                }
            }
            progress.push(ProgressMark {
                time,
                signal: ProgressSignal::Section(section.kind, beat),
            });
            last_kind = Some(section.kind);
        }

        let chord_index = chord_index_for_beat(beat, 4);

        if section.layers.drums {
            let hit = pattern.slots()[beat % 8];
            let generator = match hit {
                DrumHit::Kick => Generator::Kick { intensity },
                DrumHit::Snare => Generator::Snare { intensity },
                DrumHit::HiHat => Generator::HiHat {
                    variant: HiHatVariant::Closed,
                    intensity,
                },
            };
            events.push(SoundEvent::new(time, generator, MixBus::Drums));
        }

        if section.layers.bass && beat % 2 == 0 {
            events.push(SoundEvent::new(
                time,
                Generator::Bass {
                    freq: progression.bass_frequency(chord_index),
                    duration: beat_duration * 1.5,
                    intensity,
                },
                MixBus::Bass,
            ));
        }

        if (section.layers.synth || section.layers.vocal) && beat % 4 == 0 {
            events.push(SoundEvent::new(
                time,
                Generator::Chord {
                    freqs: progression.chord_frequencies(chord_index),
                    duration: beat_duration * 3.5,
                    intensity: intensity * 0.7,
                },
                MixBus::Synth,
            ));
        }

        // Hash-gated lead: roughly a third of commits get a melody note
        if section.layers.synth {
            let hash = commit.hash_prefix(2);
            if hash % 3 == 0 {
                let freq = scale
                    .get(hash as usize % scale.len())
                    .copied()
                    .unwrap_or(440.0);
                events.push(SoundEvent::new(
                    time,
                    Generator::Lead {
                        freq,
                        duration: beat_duration * 0.8,
                        intensity: intensity * 0.8,
                    },
                    MixBus::Synth,
                ));
            }
        }

        if section.layers.vocal && beat % 8 == 0 {
            let pitch = 220.0 + (commit.hash_prefix(4) % 220) as f64;
            events.push(SoundEvent::new(
                time,
                Generator::Vowel {
                    vowel: Vowel::for_author(&commit.author),
                    pitch,
                    duration: beat_duration * 2.0,
                    intensity,
                },
                MixBus::Vocal,
            ));
        }

        for egg in &commit.easter_eggs {
            events.push(SoundEvent::new(time + EGG_OFFSET, egg.sound(), MixBus::Drums));
        }

        if let Some(effect) = special_effect(commit) {
            events.push(SoundEvent::new(
                time + EFFECT_OFFSET,
                effect.generator(),
                MixBus::Drums,
            ));
        }

        progress.push(ProgressMark {
            time,
            signal: ProgressSignal::Beat(beat),
        });
    }

    events.sort_by(|a, b| a.time.total_cmp(&b.time));

    Composition {
        events,
        progress,
        sections,
        duration: commits.len() as f64 * beat_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DAY: i64 = 86_400;

    fn history(n: usize) -> Vec<Commit> {
        (0..n)
            .map(|i| {
                Commit::new(
                    format!("{:07x}", (i * 7 + 1) % 0xfff_ffff),
                    "update code",
                    "dev",
                    1_000_000_000 + 12 * 3_600 - (i as i64) * DAY,
                    2,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_history() {
        let c = compose(&[], 120, Genre::Experimental);
        assert!(c.events.is_empty());
        assert!(c.progress.is_empty());
        assert_eq!(c.duration, 0.0);
    }

    #[test]
    fn test_times_sorted_and_in_range() {
        let c = compose(&history(40), 120, Genre::Synthwave);
        for pair in c.events.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
        let beat_duration = 0.5;
        for event in &c.events {
            assert!(event.time >= 0.0);
            assert!(event.time <= 40.0 * beat_duration + 0.5);
        }
        assert_eq!(c.duration, 20.0);
    }

    #[test]
    fn test_determinism() {
        let commits = history(60);
        let a = compose(&commits, 110, Genre::Industrial);
        let b = compose(&commits, 110, Genre::Industrial);
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_section_announced_without_transition() {
        let c = compose(&history(20), 120, Genre::Ambient);
        let first = &c.progress[0];
        assert_eq!(first.time, 0.0);
        assert!(matches!(first.signal, ProgressSignal::Section(_, 0)));
        // No transition one-shot scheduled before the first beat
        assert!(!c
            .events
            .iter()
            .any(|e| e.time < 0.5 && matches!(e.generator, Generator::DrumRoll)));
    }

    #[test]
    fn test_beat_marks_cover_every_commit() {
        let c = compose(&history(25), 120, Genre::Chiptune);
        let beats: Vec<usize> = c
            .progress
            .iter()
            .filter_map(|m| match m.signal {
                ProgressSignal::Beat(i) => Some(i),
                _ => None,
            })
            .collect();
        assert_eq!(beats, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_bass_on_even_beats_only() {
        // Small history: one fallback verse with drums, bass, and synth
        let c = compose(&history(6), 120, Genre::Synthwave);
        let bass_times: Vec<f64> = c
            .events
            .iter()
            .filter(|e| matches!(e.generator, Generator::Bass { .. }))
            .map(|e| e.time)
            .collect();
        assert_eq!(bass_times, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_chords_follow_progression() {
        let c = compose(&history(9), 120, Genre::Chiptune);
        let chords: Vec<&SoundEvent> = c
            .events
            .iter()
            .filter(|e| matches!(e.generator, Generator::Chord { .. }))
            .collect();
        // Beats 0 and 4 play chord slots 0 and 1; beat 8 falls in the
        // detected verse, which has no synth layer
        assert_eq!(chords.len(), 2);
        if let Generator::Chord { freqs, duration, .. } = &chords[0].generator {
            let expected = crate::theory::progression_for(Genre::Chiptune).chord_frequencies(0);
            assert_eq!(freqs, &expected);
            assert!((duration - 0.5 * 3.5).abs() < 1e-9);
        }
        if let Generator::Chord { freqs, .. } = &chords[1].generator {
            let expected = crate::theory::progression_for(Genre::Chiptune).chord_frequencies(1);
            assert_eq!(freqs, &expected);
        }
    }

    #[test]
    fn test_merge_commit_gets_breakdown_and_cowbell() {
        let mut commits = history(4);
        commits[1].message = "Merge pull request #5".to_string();
        commits[1].easter_eggs = crate::classify::detect_easter_eggs(&commits[1].message);
        let c = compose(&commits, 120, Genre::Experimental);

        // Effect at beat time + 0.05
        let cowbell = c
            .events
            .iter()
            .find(|e| matches!(e.generator, Generator::Cowbell))
            .unwrap();
        assert!((cowbell.time - 0.55).abs() < 1e-9);

        // Merge easter egg at beat time + 0.1
        let glitch = c
            .events
            .iter()
            .find(|e| matches!(e.generator, Generator::Glitch))
            .unwrap();
        assert!((glitch.time - 0.6).abs() < 1e-9);

        // Breakdown pattern slot 1 is a kick
        assert!(c.events.iter().any(
            |e| matches!(e.generator, Generator::Kick { .. }) && (e.time - 0.5).abs() < 1e-9
        ));
    }

    #[test]
    fn test_fix_commit_is_calmer() {
        let mut commits = history(4);
        commits[0].message = "fix crash on startup".to_string();
        commits[0].files_changed = 0;
        let c = compose(&commits, 120, Genre::Experimental);
        // Fallback verse base 0.8 minus the fix penalty
        let kick = c
            .events
            .iter()
            .find(|e| e.time == 0.0 && matches!(e.generator, Generator::Kick { .. }))
            .unwrap();
        if let Generator::Kick { intensity } = kick.generator {
            assert!((intensity - 0.7).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vocals_only_in_vocal_sections() {
        // Short fallback verse has no vocal layer
        let c = compose(&history(6), 120, Genre::Ambient);
        assert!(!c
            .events
            .iter()
            .any(|e| matches!(e.generator, Generator::Vowel { .. })));
    }

    #[test]
    fn test_intro_beats_are_drums_only() {
        let commits = history(100);
        let c = compose(&commits, 120, Genre::Synthwave);
        // Intro owns beats 92..100; none of them carry bass or synth
        let melodic_in_intro = c.events.iter().any(|e| {
            e.time >= 92.0 * 0.5
                && matches!(
                    e.generator,
                    Generator::Bass { .. } | Generator::Chord { .. } | Generator::Lead { .. }
                )
        });
        assert!(!melodic_in_intro);
    }

    #[test]
    fn test_section_marks_follow_structure() {
        let commits = history(100);
        let c = compose(&commits, 120, Genre::Synthwave);
        let marks: Vec<SectionKind> = c
            .progress
            .iter()
            .filter_map(|m| match m.signal {
                ProgressSignal::Section(kind, _) => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(marks[0], SectionKind::Outro);
        // Verse follows the unclaimed gap, then intro at the tail
        assert!(marks.contains(&SectionKind::Verse));
        assert!(marks.contains(&SectionKind::Intro));
    }
}
