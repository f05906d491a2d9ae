//! repojam - turn a repository's commit history into music.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use repojam_cli::commands::{self, TrackOptions};
use repojam_spec::Genre;

/// Turn a git repository's commit history into music
#[derive(Parser)]
#[command(name = "repojam")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a repository and report its genre, tempo, and easter eggs
    Analyze {
        /// Repository as OWNER/REPO
        repo: String,

        /// Read commits from a JSON file instead of GitHub
        #[arg(long)]
        commits: Option<String>,

        /// Maximum number of commits to fetch
        #[arg(long, default_value_t = 100)]
        limit: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the detected song structure without rendering audio
    Structure {
        /// Repository as OWNER/REPO
        repo: String,

        /// Read commits from a JSON file instead of GitHub
        #[arg(long)]
        commits: Option<String>,

        /// Maximum number of commits to fetch
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },

    /// Render the track to a WAV file
    Render {
        /// Repository as OWNER/REPO
        repo: String,

        /// Read commits from a JSON file instead of GitHub
        #[arg(long)]
        commits: Option<String>,

        /// Output file (default: OWNER-REPO-GENRE.wav)
        #[arg(short, long)]
        output: Option<String>,

        /// Tempo override in beats per minute (clamped to 60-180)
        #[arg(long)]
        bpm: Option<u32>,

        /// Genre override (synthwave, industrial, ambient, chiptune, experimental)
        #[arg(long)]
        genre: Option<String>,

        /// Noise seed override for reproducible variations
        #[arg(long)]
        seed: Option<u32>,

        /// Maximum number of commits to fetch
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },

    /// Play the track through the default audio output
    Play {
        /// Repository as OWNER/REPO
        repo: String,

        /// Read commits from a JSON file instead of GitHub
        #[arg(long)]
        commits: Option<String>,

        /// Tempo override in beats per minute (clamped to 60-180)
        #[arg(long)]
        bpm: Option<u32>,

        /// Genre override (synthwave, industrial, ambient, chiptune, experimental)
        #[arg(long)]
        genre: Option<String>,

        /// Noise seed override for reproducible variations
        #[arg(long)]
        seed: Option<u32>,

        /// Maximum number of commits to fetch
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },
}

fn track_options(bpm: Option<u32>, genre: Option<String>, seed: Option<u32>) -> TrackOptions {
    TrackOptions {
        bpm,
        genre: genre.as_deref().map(Genre::from_key),
        seed,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Analyze {
            repo,
            commits,
            limit,
            json,
        } => commands::analyze(&repo, commits.as_deref(), limit, json),
        Commands::Structure {
            repo,
            commits,
            limit,
        } => commands::structure(&repo, commits.as_deref(), limit),
        Commands::Render {
            repo,
            commits,
            output,
            bpm,
            genre,
            seed,
            limit,
        } => commands::render(
            &repo,
            commits.as_deref(),
            limit,
            track_options(bpm, genre, seed),
            output,
        ),
        Commands::Play {
            repo,
            commits,
            bpm,
            genre,
            seed,
            limit,
        } => commands::play(&repo, commits.as_deref(), limit, track_options(bpm, genre, seed)),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
