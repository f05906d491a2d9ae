//! Command handlers for the `repojam` binary.

use std::fs;
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::info;

use repojam_compose::{compose, tag_commits, Composition, ProgressSignal};
use repojam_play::PlaybackSession;
use repojam_spec::{clamp_user_bpm, Commit, CommitSource, Genre, MoodAnalysis, MoodAnalyzer};
use repojam_synth::{Renderer, TrackBuffer, DEFAULT_SAMPLE_RATE};

use crate::analyze::KeywordMoodAnalyzer;
use crate::github::GithubCommitSource;

/// Tempo/genre overrides shared by the track-producing commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackOptions {
    pub bpm: Option<u32>,
    pub genre: Option<Genre>,
    pub seed: Option<u32>,
}

/// Splits an `owner/repo` argument.
pub fn parse_repo(spec: &str) -> Result<(&str, &str)> {
    match spec.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => bail!("expected OWNER/REPO, got {spec:?}"),
    }
}

/// Loads commits from a JSON file (`--commits`) or from GitHub.
fn load_commits(repo_spec: &str, commits_file: Option<&str>, limit: usize) -> Result<Vec<Commit>> {
    let mut commits = match commits_file {
        Some(path) => {
            let data = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            let mut commits: Vec<Commit> =
                serde_json::from_str(&data).with_context(|| format!("parsing {path}"))?;
            commits.truncate(limit);
            commits
        }
        None => {
            let (owner, repo) = parse_repo(repo_spec)?;
            GithubCommitSource::new().fetch(owner, repo, limit)?
        }
    };
    if commits.is_empty() {
        bail!("{repo_spec} has no commits to play");
    }
    tag_commits(&mut commits);
    Ok(commits)
}

fn analyze_mood(commits: &[Commit]) -> Result<MoodAnalysis> {
    Ok(KeywordMoodAnalyzer::new().analyze(commits)?)
}

/// Resolves the final tempo and genre from analysis plus user overrides.
fn resolve_track(analysis: &MoodAnalysis, options: &TrackOptions) -> (u32, Genre) {
    let genre = options.genre.unwrap_or(analysis.genre);
    let bpm = match options.bpm {
        Some(user) => clamp_user_bpm(user),
        None if options.genre.is_some() => genre.default_bpm(),
        None => analysis.bpm,
    };
    (bpm, genre)
}

fn build_composition(commits: &[Commit], options: &TrackOptions) -> Result<(Composition, u32, Genre)> {
    let analysis = analyze_mood(commits)?;
    let (bpm, genre) = resolve_track(&analysis, options);
    print_analysis(&analysis, bpm, genre, commits);
    Ok((compose(commits, bpm, genre), bpm, genre))
}

fn render_track(composition: &Composition, options: &TrackOptions) -> Result<TrackBuffer> {
    let mut renderer = Renderer::new(DEFAULT_SAMPLE_RATE);
    if let Some(seed) = options.seed {
        renderer = renderer.with_seed(seed);
    }
    Ok(renderer.render(&composition.events, composition.duration)?)
}

fn print_analysis(analysis: &MoodAnalysis, bpm: u32, genre: Genre, commits: &[Commit]) {
    println!(
        "{} {}  {}",
        genre.emoji(),
        genre.name().bold(),
        format!("{bpm} BPM").cyan()
    );
    println!("  {}", analysis.vibe.italic());
    println!("  {}", genre.description().dimmed());

    let egg_count: usize = commits.iter().map(|c| c.easter_eggs.len()).sum();
    println!(
        "  {} commits, {} easter eggs",
        commits.len().to_string().bold(),
        egg_count.to_string().bold()
    );
}

/// `repojam analyze OWNER/REPO`
pub fn analyze(repo_spec: &str, commits_file: Option<&str>, limit: usize, json: bool) -> Result<()> {
    let commits = load_commits(repo_spec, commits_file, limit)?;
    let analysis = analyze_mood(&commits)?;

    if json {
        let egg_count: usize = commits.iter().map(|c| c.easter_eggs.len()).sum();
        let report = serde_json::json!({
            "vibe": analysis.vibe,
            "bpm": analysis.bpm,
            "genre": analysis.genre,
            "commits": commits.len(),
            "easter_eggs": egg_count,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_analysis(&analysis, analysis.bpm, analysis.genre, &commits);

    // Egg breakdown, most recent first
    for commit in commits.iter().filter(|c| !c.easter_eggs.is_empty()).take(10) {
        let icons: String = commit.easter_eggs.iter().map(|e| e.icon()).collect();
        println!("  {} {} {}", commit.id.yellow(), icons, commit.message.dimmed());
    }
    Ok(())
}

/// `repojam structure OWNER/REPO`
pub fn structure(repo_spec: &str, commits_file: Option<&str>, limit: usize) -> Result<()> {
    let commits = load_commits(repo_spec, commits_file, limit)?;
    let (composition, bpm, _) = build_composition(&commits, &TrackOptions::default())?;

    let beat_duration = 60.0 / bpm as f64;
    println!();
    for section in &composition.sections {
        let first = section.commits.iter().min().copied().unwrap_or(0);
        println!(
            "  {:<8} {:>3} beats  from {}  intensity {:.1}",
            section.kind.name().bold(),
            section.commits.len(),
            format!("{:.1}s", first as f64 * beat_duration).cyan(),
            section.base_intensity
        );
    }
    println!(
        "\n  total {}",
        format!("{:.1}s", composition.duration).bold()
    );
    Ok(())
}

/// `repojam render OWNER/REPO [-o file.wav]`
pub fn render(
    repo_spec: &str,
    commits_file: Option<&str>,
    limit: usize,
    options: TrackOptions,
    output: Option<String>,
) -> Result<()> {
    let commits = load_commits(repo_spec, commits_file, limit)?;
    let (composition, _, genre) = build_composition(&commits, &options)?;
    let track = render_track(&composition, &options)?;

    let path = output.unwrap_or_else(|| {
        let (owner, repo) = (repo_spec.split_once('/')).unwrap_or(("repo", repo_spec));
        format!("{owner}-{repo}-{}.wav", genre.key())
    });
    fs::write(&path, track.to_wav()).with_context(|| format!("writing {path}"))?;

    info!(path, duration = track.duration_seconds(), "wrote track");
    println!(
        "\n{} {} ({:.1}s)",
        "wrote".green().bold(),
        path,
        track.duration_seconds()
    );
    Ok(())
}

/// `repojam play OWNER/REPO`
pub fn play(
    repo_spec: &str,
    commits_file: Option<&str>,
    limit: usize,
    options: TrackOptions,
) -> Result<()> {
    let commits = load_commits(repo_spec, commits_file, limit)?;
    let (composition, _, _) = build_composition(&commits, &options)?;
    let track = render_track(&composition, &options)?;

    println!();
    let (tx, rx) = mpsc::channel();
    let session = PlaybackSession::start(&track, composition.progress.clone(), move |signal| {
        let _ = tx.send(signal);
    })?;

    // Print section changes as the progress thread reports them
    let total_beats = commits.len();
    let printer = std::thread::spawn(move || {
        for signal in rx {
            if let ProgressSignal::Section(kind, beat) = signal {
                println!(
                    "  {} {}",
                    format!("[{beat:>3}/{total_beats}]").dimmed(),
                    kind.name().bold().magenta()
                );
            }
        }
    });

    session.wait();
    let _ = printer.join();
    println!("\n{}", "done".green().bold());
    Ok(())
}
