// blip-rs - Demo renderer
//
// Renders the demo scenes to wave files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blip_rs::config::{DemoConfig, CONFIG_FILE};
use blip_rs::render::{self, Scene};
use blip_rs::wave::WaveWriter;

#[derive(Parser)]
#[command(name = "blip-rs")]
#[command(about = "Render band-limited synthesis demos to wave files")]
struct Cli {
    /// Configuration file (created with defaults if missing)
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweeping square wave at an NTSC-like clock
    Square {
        #[arg(short, long, default_value = "square.wav")]
        output: PathBuf,
    },
    /// Two square waves in fixed-size chunks
    Fixed {
        #[arg(short, long, default_value = "fixed.wav")]
        output: PathBuf,
    },
    /// Two square waves on separate stereo channels
    Stereo {
        #[arg(short, long, default_value = "stereo.wav")]
        output: PathBuf,
    },
    /// Replay a chip register log
    Chip {
        /// Log of "time channel register value" lines
        log: PathBuf,
        #[arg(short, long, default_value = "chip.wav")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = DemoConfig::load_or_default(&cli.config);

    let (scene, output, log) = match cli.command {
        Commands::Square { output } => (Scene::Square, output, None),
        Commands::Fixed { output } => (Scene::Fixed, output, None),
        Commands::Stereo { output } => (Scene::Stereo, output, None),
        Commands::Chip { log, output } => (Scene::Chip, output, Some(log)),
    };

    let path = config.output.directory.join(output);
    let count = run_scene(&config, scene, &path, log.as_deref())?;

    let seconds = count as f64 / scene.channels() as f64 / config.output.sample_rate as f64;
    info!(
        scene = scene.name(),
        samples = count,
        seconds,
        "wrote {}",
        path.display()
    );
    Ok(())
}

fn run_scene(
    config: &DemoConfig,
    scene: Scene,
    path: &Path,
    log: Option<&Path>,
) -> Result<usize> {
    let mut out = WaveWriter::create(path, config.output.sample_rate, scene.channels())
        .with_context(|| format!("failed to create {}", path.display()))?;

    let count = match (scene, log) {
        (Scene::Chip, Some(log)) => {
            let file =
                File::open(log).with_context(|| format!("failed to open {}", log.display()))?;
            render::render_chip(config, BufReader::new(file), &mut out)?
        }
        (Scene::Chip, None) => anyhow::bail!("chip scene needs a log file"),
        (Scene::Square, _) => render::render_square(config, &mut out)?,
        (Scene::Fixed, _) => render::render_fixed(config, &mut out)?,
        (Scene::Stereo, _) => render::render_stereo(config, &mut out)?,
    };

    out.finalize()
        .with_context(|| format!("failed to finish {}", path.display()))?;
    Ok(count)
}
