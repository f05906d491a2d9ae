//! End-to-end checks: commit list through composition to rendered audio.

use pretty_assertions::assert_eq;
use repojam_compose::{compose, tag_commits, ProgressSignal, SectionKind};
use repojam_spec::{Commit, Generator, Genre};
use repojam_synth::Renderer;

const DAY: i64 = 86_400;
const NOON: i64 = 1_000_000_000 / DAY * DAY + 12 * 3_600;

fn commit(id: &str, message: &str, timestamp: i64, files_changed: u32) -> Commit {
    Commit::new(id, message, "dev", timestamp, files_changed)
}

fn steady_history(n: usize) -> Vec<Commit> {
    (0..n)
        .map(|i| {
            commit(
                &format!("{:07x}", i * 31 + 5),
                "update code",
                NOON - (i as i64) * DAY,
                2,
            )
        })
        .collect()
}

#[test]
fn pipeline_is_deterministic_end_to_end() {
    let mut commits = steady_history(50);
    tag_commits(&mut commits);

    let first = compose(&commits, 120, Genre::Synthwave);
    let second = compose(&commits, 120, Genre::Synthwave);
    assert_eq!(first, second);

    let renderer = Renderer::new(22_050);
    let wav_a = renderer.render(&first.events, first.duration).unwrap().to_wav();
    let wav_b = renderer.render(&second.events, second.duration).unwrap().to_wav();
    assert_eq!(wav_a, wav_b);
}

#[test]
fn rendered_track_covers_nominal_duration() {
    let commits = steady_history(16);
    let composition = compose(&commits, 120, Genre::Industrial);
    assert!((composition.duration - 8.0).abs() < 1e-9);

    let track = Renderer::new(22_050)
        .render(&composition.events, composition.duration)
        .unwrap();
    assert!(track.duration_seconds() >= composition.duration);
    // Tails ring out, but not unboundedly
    assert!(track.duration_seconds() < composition.duration + 4.0);
}

#[test]
fn burst_of_commits_becomes_the_chorus() {
    let mut commits = steady_history(100);
    // A frantic afternoon in the middle of the history
    for (i, c) in commits[50..60].iter_mut().enumerate() {
        c.timestamp = NOON - 55 * DAY + (i as i64) * 300;
    }
    let composition = compose(&commits, 120, Genre::Synthwave);

    let chorus = composition
        .sections
        .iter()
        .find(|s| s.kind == SectionKind::Chorus)
        .expect("burst should produce a chorus");
    assert!(chorus.commits.contains(&55));
    assert!(chorus.layers.vocal);

    // Chorus beats carry vocals every eighth beat
    let has_vowel = composition
        .events
        .iter()
        .any(|e| matches!(e.generator, Generator::Vowel { .. }));
    assert!(has_vowel);
}

#[test]
fn tiny_history_falls_back_to_one_verse() {
    let commits = steady_history(3);
    let composition = compose(&commits, 120, Genre::Ambient);

    assert_eq!(composition.sections.len(), 1);
    let only = &composition.sections[0];
    assert_eq!(only.kind, SectionKind::Verse);
    assert_eq!(only.base_intensity, 0.8);
    assert!(only.layers.drums && only.layers.bass && only.layers.synth);
    assert!(!only.layers.vocal);
}

#[test]
fn fix_commit_scenario() {
    // A lone fix commit at noon: basic pattern, calmer intensity, a bug egg,
    // and no special effect
    let mut commits = vec![commit("abc1234", "fix: resolve login bug", NOON, 0)];
    tag_commits(&mut commits);
    assert_eq!(commits[0].easter_eggs.len(), 1);

    let composition = compose(&commits, 120, Genre::Experimental);

    let kick = composition
        .events
        .iter()
        .find(|e| matches!(e.generator, Generator::Kick { .. }))
        .expect("basic pattern opens with a kick");
    if let Generator::Kick { intensity } = kick.generator {
        assert!((intensity - 0.7).abs() < 1e-9);
    }

    // Bug egg plays a scratch shortly after the beat
    let scratch = composition
        .events
        .iter()
        .find(|e| matches!(e.generator, Generator::Scratch))
        .expect("bug egg schedules a scratch");
    assert!((scratch.time - 0.1).abs() < 1e-9);

    // No cowbell, orchestral hit, or glitch from the effect table
    assert!(!composition
        .events
        .iter()
        .any(|e| matches!(e.generator, Generator::Cowbell | Generator::Glitch)));
}

#[test]
fn merge_commit_scenario() {
    let mut commits = steady_history(4);
    commits[2] = commit("deadbee", "Merge branch 'main' into dev", NOON - 2 * DAY, 3);
    tag_commits(&mut commits);

    let composition = compose(&commits, 120, Genre::Experimental);

    // Special effect: cowbell 0.05 s after beat 2
    let cowbell = composition
        .events
        .iter()
        .find(|e| matches!(e.generator, Generator::Cowbell))
        .expect("merge commit triggers a cowbell");
    assert!((cowbell.time - (1.0 + 0.05)).abs() < 1e-9);

    // Easter egg: glitch 0.1 s after beat 2
    let glitch = composition
        .events
        .iter()
        .find(|e| matches!(e.generator, Generator::Glitch))
        .expect("merge egg schedules a glitch");
    assert!((glitch.time - (1.0 + 0.1)).abs() < 1e-9);
}

#[test]
fn user_bpm_scales_every_beat() {
    let commits = steady_history(8);
    let slow = compose(&commits, 60, Genre::Chiptune);
    let fast = compose(&commits, 180, Genre::Chiptune);

    assert!((slow.duration - 8.0).abs() < 1e-9);
    assert!((fast.duration - 8.0 / 3.0).abs() < 1e-9);

    // Same number of events either way, just compressed in time
    assert_eq!(slow.events.len(), fast.events.len());
}

#[test]
fn progress_marks_line_up_with_beats() {
    let commits = steady_history(12);
    let composition = compose(&commits, 120, Genre::Synthwave);

    let mut expected_beat = 0;
    for mark in &composition.progress {
        if let ProgressSignal::Beat(beat) = mark.signal {
            assert_eq!(beat, expected_beat);
            assert!((mark.time - beat as f64 * 0.5).abs() < 1e-9);
            expected_beat += 1;
        }
    }
    assert_eq!(expected_beat, 12);
}
