// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info};

use crate::app_config::Config;
use crate::player::mock::MockTransport;
use crate::player::{MediaDescriptor, PlayerEvent, VideoPlayer};
use crate::subtitle_model::{Cue, SubtitleFormat, Track, TrackDescriptor};
use crate::track_store::TrackStore;

mod app_config;
mod errors;
mod fetchers;
mod formats;
mod player;
mod subtitle_engine;
mod subtitle_model;
mod timecode;
mod track_store;

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Vtt,
    Ssa,
    Ass,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Vtt => SubtitleFormat::Vtt,
            CliSubtitleFormat::Ssa => SubtitleFormat::Ssa,
            CliSubtitleFormat::Ass => SubtitleFormat::Ass,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a subtitle file and print its cue timeline
    Inspect(InspectArgs),

    /// Print the cue active at a playback position
    Query(QueryArgs),

    /// Drive a simulated playback session over a parsed track
    Simulate(SimulateArgs),

    /// Generate shell completions for cueplay
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Subtitle file to parse
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Subtitle format (inferred from the extension when omitted)
    #[arg(short, long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct QueryArgs {
    /// Subtitle file to parse
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Playback position to resolve (e.g. '00:01:23,500')
    #[arg(short, long)]
    at: String,

    /// Subtitle format (inferred from the extension when omitted)
    #[arg(short, long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Subtitle file to play against
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Subtitle format (inferred from the extension when omitted)
    #[arg(short, long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Simulation speed multiplier
    #[arg(long, default_value_t = 10.0)]
    speed: f64,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// cueplay - subtitle timeline and playback engine
///
/// Parses SRT/VTT/SSA/ASS subtitle files into a normalized cue timeline and
/// resolves the active cue for any playback position.
#[derive(Parser, Debug)]
#[command(name = "cueplay")]
#[command(version = "0.1.0")]
#[command(about = "Subtitle timeline and playback engine")]
#[command(long_about = "cueplay parses subtitle files into a normalized cue timeline, resolves the
active cue for any playback position, and can drive a simulated playback
session over a parsed track.

EXAMPLES:
    cueplay inspect movie.srt                   # Print the parsed cue timeline
    cueplay inspect movie.sub --format vtt      # Force the payload format
    cueplay query movie.srt --at 00:01:23,500   # Resolve the active cue
    cueplay simulate movie.ass                  # Simulated playback session
    cueplay completions bash > cueplay.bash     # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let emoji = Self::get_emoji_for_level(record.level());
        let color = match record.level() {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        };

        let mut stderr = std::io::stderr();
        let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cueplay", &mut std::io::stdout());
            Ok(())
        }
        Commands::Inspect(args) => {
            init_logging(args.log_level)?;
            run_inspect(args)
        }
        Commands::Query(args) => {
            init_logging(args.log_level)?;
            run_query(args)
        }
        Commands::Simulate(args) => {
            init_logging(args.log_level)?;
            run_simulate(args).await
        }
    }
}

fn init_logging(level: Option<CliLogLevel>) -> Result<()> {
    let level = level.map(LevelFilter::from).unwrap_or(LevelFilter::Info);
    CustomLogger::init(level)?;
    Ok(())
}

/// Resolve the payload format from the CLI flag or the file extension.
fn detect_format(path: &Path, cli_format: Option<CliSubtitleFormat>) -> Result<SubtitleFormat> {
    if let Some(format) = cli_format {
        return Ok(format.into());
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| anyhow!("Cannot infer subtitle format from {:?}, pass --format", path))?;

    extension
        .parse::<SubtitleFormat>()
        .map_err(|_| anyhow!("Unrecognized subtitle extension '.{}', pass --format", extension))
}

/// Read and parse a subtitle file into its cue timeline.
fn load_cues(path: &Path, format: SubtitleFormat) -> Result<Vec<Cue>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read subtitle file {:?}: {}", path, e))?;
    let cues = formats::parse(&content, format)?;
    Ok(cues)
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let format = detect_format(&args.input_path, args.format)?;
    let cues = load_cues(&args.input_path, format)?;

    info!("Parsed {} cues from {:?} ({})", cues.len(), args.input_path, format);
    for cue in &cues {
        print!("{}", cue);
    }

    Ok(())
}

fn run_query(args: QueryArgs) -> Result<()> {
    let format = detect_format(&args.input_path, args.format)?;
    let cues = load_cues(&args.input_path, format)?;
    let position = timecode::parse_timestamp(&args.at)?;

    let mut store = TrackStore::new();
    let descriptor = TrackDescriptor::direct("local", args.input_path.display().to_string(), format);
    store.replace(Track::new(descriptor, cues));

    match store.cue_at(position) {
        Some(cue) => print!("{}", cue),
        None => println!("No active cue at {}", timecode::format_timestamp(position)),
    }

    Ok(())
}

async fn run_simulate(args: SimulateArgs) -> Result<()> {
    let format = detect_format(&args.input_path, args.format)?;
    let cues = load_cues(&args.input_path, format)?;
    if cues.is_empty() {
        return Err(anyhow!("No cues parsed from {:?}, nothing to simulate", args.input_path));
    }

    let config = if Path::new(&args.config_path).exists() {
        Config::from_file(&args.config_path)?
    } else {
        Config::default()
    };

    let total = cues
        .iter()
        .map(|cue| cue.end_time)
        .max()
        .unwrap_or_default()
        + Duration::from_millis(500);

    let mut store = TrackStore::new();
    let descriptor = TrackDescriptor::direct("local", args.input_path.display().to_string(), format);
    store.replace(Track::new(descriptor, cues));

    let (transport, transport_events) = MockTransport::working();
    transport.set_media_duration(total);
    let player = VideoPlayer::new(Arc::clone(&transport), transport_events, &config.player);

    // Relay player notifications to the log
    let mut events = player.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                PlayerEvent::StateChanged(state) => info!("Player state: {}", state),
                PlayerEvent::PositionChanged(position) => {
                    debug!("Position: {}", timecode::format_timestamp(position));
                }
                PlayerEvent::ErrorOccurred(message) => error!("Player error: {}", message),
            }
        }
    });

    let media_url = format!("file://{}", args.input_path.display());
    player.prepare(&MediaDescriptor::direct(media_url)).await?;
    player.play().await?;

    let step = config.player.poll_interval();
    let speed = args.speed.max(0.1);
    let mut clock = Duration::ZERO;
    let mut active: Option<usize> = None;

    while clock <= total {
        transport.set_position(clock);

        let cue = store.cue_at(clock);
        let current = cue.map(|cue| cue.index);
        if current != active {
            match cue {
                Some(cue) => println!(
                    "[{}] {}",
                    timecode::format_timestamp(clock),
                    cue.text.replace('\n', " / ")
                ),
                None => println!("[{}] ---", timecode::format_timestamp(clock)),
            }
            active = current;
        }

        tokio::time::sleep(step.div_f64(speed)).await;
        clock += step;
    }

    player.stop().await?;
    Ok(())
}
