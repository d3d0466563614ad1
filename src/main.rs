//! Vaadya CLI: compile svara notation into a MIDI file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vaadya::config::RenderConfig;
use vaadya::dsl::{CompileError, Compiler};

#[derive(Parser)]
#[command(name = "vaadya")]
#[command(version, about = "Compile Carnatic svara notation to MIDI", long_about = None)]
struct Cli {
    /// Render config file (default: ~/.vaadya/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// MIDI note of the shruti, overriding the config
    #[arg(long, global = true)]
    shruti: Option<u8>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a song into a MIDI file
    Compile {
        /// The song file to compile
        source: PathBuf,
        /// Output MIDI file
        output: PathBuf,
    },

    /// Print the tokens of a song
    Tokens {
        source: PathBuf,
    },

    /// Print the tune segments of a song
    Segments {
        source: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::load_default()?,
    };
    if let Some(shruti) = cli.shruti {
        config.shruti = shruti;
        config.validate()?;
    }

    match cli.command {
        Commands::Compile { source, output } => {
            let program = read_source(&source)?;
            let registry = config.registry()?;
            let song = Compiler::compile(&program, &config, &registry)
                .map_err(|e| located(&source, e))?;
            tracing::info!(
                source = %source.display(),
                segments = song.segment_count,
                events = song.events.len(),
                "compiled"
            );
            song.to_smf(config.ticks_per_beat)
                .save(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(output = %output.display(), "saved MIDI file");
        }
        Commands::Tokens { source } => {
            let program = read_source(&source)?;
            for token in Compiler::tokenize(&program).map_err(|e| located(&source, e))? {
                println!("{token}");
            }
        }
        Commands::Segments { source } => {
            let program = read_source(&source)?;
            let registry = config.registry()?;
            let segments =
                Compiler::segments(&program, &registry).map_err(|e| located(&source, e))?;
            for seg in segments {
                println!(
                    "{}:{}\t{:>4} -> {:<4} x{}\t{}",
                    seg.line,
                    seg.col,
                    seg.start_note,
                    seg.end_note,
                    seg.duration,
                    seg.gamaka.name()
                );
            }
        }
    }
    Ok(())
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Prefix a compile error with its file: `song.txt:3:7: ...`.
fn located(path: &Path, err: CompileError) -> anyhow::Error {
    anyhow!("{}:{err}", path.display())
}
