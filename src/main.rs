use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use chirpviz::{config::ChirpvizConfig, logging, ui};

/// Play an audio file with a live spectrum and waveform display
#[derive(Parser)]
#[command(name = "chirpviz")]
#[command(version)]
#[command(
    after_help = "KEYS:\n    space  pause/resume    s      stop      r/Enter  replay\n    1/2    toggle panels   q/Esc  quit      Ctrl-C   quit\n\nCONFIGURATION:\n    Config file:  ~/.config/chirpviz/chirpviz.toml\n    Logs:         ~/.local/state/chirpviz/chirpviz.log.*"
)]
struct Cli {
    /// Audio file to play
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Samples per analysis window (power of two, 32..=32768)
    #[arg(short, long)]
    window_size: Option<usize>,

    /// Smoothing between frames, 0.0..=1.0
    #[arg(short, long)]
    smoothing: Option<f32>,

    /// Read settings from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let mut config = ChirpvizConfig::load(cli.config.as_deref())?;
    if let Some(window_size) = cli.window_size {
        config.analysis.window_size = window_size;
    }
    if let Some(smoothing) = cli.smoothing {
        config.analysis.smoothing = smoothing;
    }

    ui::run(&cli.file, &config)
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
