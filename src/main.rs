//! Auralis CLI.
//!
//! Without a subcommand, runs the interactive session mirroring the
//! single-page flow: pick a mode, enter a prompt and duration (or pick a
//! bundled track), watch the progress bar, get a playable file. The
//! `generate`, `play`, and `tracks` subcommands expose the same
//! operations one-shot.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use auralis::config::{AppConfig, ALLOWED_DURATIONS};
use auralis::generation::{generate, validate_request, Artifact, ProgressTicker};
use auralis::model::{load_model, Backend, ModelHandle};
use auralis::tracks::{self, TrackPlayback, CATALOG};
use auralis::ui::{Mode, Outcome, Session};
use auralis::ErrorCode;

/// Auralis - The New Age Music Generation Companion
#[derive(Parser, Debug)]
#[command(name = "auralis")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for generated WAV files
    #[arg(long, global = true)]
    generated_dir: Option<PathBuf>,

    /// Directory containing the bundled tracks
    #[arg(long, global = true)]
    tracks_dir: Option<PathBuf>,

    /// Model backend: mock or bridge
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Base URL of the inference bridge
    #[arg(long, global = true)]
    bridge_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a music clip from a text prompt
    Generate {
        /// Text description of the music to generate
        #[arg(short, long)]
        prompt: String,

        /// Clip duration in seconds (10, 20, or 30)
        #[arg(short, long, default_value_t = 20)]
        duration: u32,
    },

    /// Resolve a predefined track for playback
    Play {
        /// Track name (Matushka, Motherboard, or Veridis Quo)
        track: String,
    },

    /// List the predefined tracks and their availability
    Tracks,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&cli)?;

    match cli.command {
        Some(Commands::Generate { prompt, duration }) => {
            let model = load_model(&config)?;
            let artifact = run_generation(&model, &config, &prompt, duration)?;
            println!("{}", artifact.path.display());
            Ok(())
        }
        Some(Commands::Play { track }) => {
            let track = tracks::find(&track)
                .with_context(|| format!("Unknown track: {}", track))?;
            let playback = tracks::resolve(track, &config)?;
            print_playback(&playback);
            Ok(())
        }
        Some(Commands::Tracks) => {
            for track in &CATALOG {
                let path = config.track_path(track.file_name);
                let status = if path.exists() { "available" } else { "missing" };
                println!("{:<28} {:<10} {}", track.display_name, status, path.display());
            }
            Ok(())
        }
        None => interactive(&config),
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::default();
    if let Some(dir) = &cli.generated_dir {
        config.generated_dir = dir.clone();
    }
    if let Some(dir) = &cli.tracks_dir {
        config.tracks_dir = dir.clone();
    }
    if let Some(backend) = &cli.backend {
        config.backend = Backend::parse(backend)
            .with_context(|| format!("Unknown backend: {} (expected mock or bridge)", backend))?;
    }
    if let Some(url) = &cli.bridge_url {
        config.bridge_url = url.clone();
    }
    Ok(config)
}

/// Generates a clip with the cosmetic progress bar running alongside.
fn run_generation(
    model: &ModelHandle,
    config: &AppConfig,
    prompt: &str,
    duration: u32,
) -> auralis::Result<Artifact> {
    // Validate before spinning up any progress display.
    validate_request(prompt, duration)?;

    eprintln!("Generating music...");
    let ticker = ProgressTicker::start(render_progress_bar);
    let result = generate(model, config, prompt, duration);
    ticker.finish();
    eprintln!();
    result
}

/// Renders the fixed-schedule bar. The percentage is decorative and does
/// not reflect real synthesis progress.
fn render_progress_bar(percent: u8) {
    let filled = (percent as usize * 20) / 100;
    eprint!(
        "\r[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(20 - filled),
        percent
    );
    let _ = std::io::stderr().flush();
}

fn print_playback(playback: &TrackPlayback) {
    println!("Now playing: {}", playback.name);
    println!("  file:     {}", playback.path.display());
    println!("  download: {}", playback.download_name);
}

fn print_artifact(artifact: &Artifact) {
    println!("Music generated successfully!");
    println!("  file:     {}", artifact.path.display());
    println!("  download: {}", artifact.download_name());
    println!(
        "  {}s at {} Hz, synthesized in {:.1}s",
        artifact.duration_sec, artifact.sample_rate, artifact.generation_time_sec
    );
}

/// The interactive single-page flow.
///
/// The model is loaded once up front and reused for every request in the
/// session.
fn interactive(config: &AppConfig) -> anyhow::Result<()> {
    println!("Auralis - The New Age Music Generation Companion");

    let model = load_model(config)?;
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut session = Session::new();

    loop {
        println!();
        println!("Choose what you want to do:");
        println!("  1) {}", Mode::GenerateMusic.label());
        println!("  2) {}", Mode::PlayPredefinedTrack.label());
        println!("  q) Quit");

        let choice = match prompt_line(&mut lines, "> ")? {
            Some(line) => line,
            None => break,
        };

        match choice.trim() {
            "1" => {
                session.select_mode(Mode::GenerateMusic);
                if !generate_flow(&mut session, &model, config, &mut lines)? {
                    break;
                }
            }
            "2" => {
                session.select_mode(Mode::PlayPredefinedTrack);
                if !predefined_flow(&mut session, config, &mut lines)? {
                    break;
                }
            }
            "q" | "quit" | "exit" => break,
            other => println!("Unknown choice: {}", other),
        }
    }

    session.reset();
    Ok(())
}

/// Generate Music mode. Returns false when stdin is exhausted.
fn generate_flow(
    session: &mut Session,
    model: &ModelHandle,
    config: &AppConfig,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> anyhow::Result<bool> {
    let prompt = match prompt_line(lines, "Enter a music prompt: ")? {
        Some(line) => line,
        None => return Ok(false),
    };

    if prompt.trim().is_empty() {
        session.warn("Please enter a prompt to generate music.");
        println!("Warning: {}", session.warning().unwrap_or_default());
        return Ok(true);
    }

    let duration = match prompt_line(lines, "Select duration in seconds (10/20/30): ")? {
        Some(line) => line,
        None => return Ok(false),
    };
    let duration: u32 = match duration.trim().parse() {
        Ok(d) if AppConfig::duration_allowed(d) => d,
        _ => {
            session.warn(format!("Duration must be one of {:?} seconds.", ALLOWED_DURATIONS));
            println!("Warning: {}", session.warning().unwrap_or_default());
            return Ok(true);
        }
    };

    session.begin_processing();
    match run_generation(model, config, &prompt, duration) {
        Ok(artifact) => {
            print_artifact(&artifact);
            session.finish(Outcome::Generated(artifact));
        }
        Err(err) => {
            println!("Error: {}", err);
            session.fail(err.to_string());
        }
    }
    Ok(true)
}

/// Play Predefined Track mode. Returns false when stdin is exhausted.
fn predefined_flow(
    session: &mut Session,
    config: &AppConfig,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> anyhow::Result<bool> {
    println!("Choose a track:");
    for (i, track) in CATALOG.iter().enumerate() {
        println!("  {}) {}", i + 1, track.display_name);
    }

    let choice = match prompt_line(lines, "> ")? {
        Some(line) => line,
        None => return Ok(false),
    };

    let track = choice
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| CATALOG.get(i))
        .or_else(|| tracks::find(choice.trim()));

    let track = match track {
        Some(track) => track,
        None => {
            println!("Unknown track: {}", choice.trim());
            return Ok(true);
        }
    };

    session.begin_processing();
    println!("Loading '{}'...", track.name);
    match tracks::resolve(track, config) {
        Ok(playback) => {
            print_playback(&playback);
            session.finish(Outcome::Track(playback));
        }
        Err(err) => {
            // Missing files are recoverable; the user can pick another mode.
            debug_assert_eq!(err.code, ErrorCode::TrackNotFound);
            println!("Error: {}", err.message);
            session.fail(err.to_string());
        }
    }
    Ok(true)
}

fn prompt_line(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    prompt: &str,
) -> anyhow::Result<Option<String>> {
    print!("{}", prompt);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    match lines.next() {
        Some(line) => Ok(Some(line.context("Failed to read input")?)),
        None => Ok(None),
    }
}
