mod bg_subtract;
mod config;
mod controller;
mod display;
mod error;
mod refine;
mod source;
#[cfg(test)]
mod test_frames;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use config::{HarnessConfig, load_config};
use controller::{Controller, StopReason};
use display::HighGuiWindow;
use source::{VideoSource, VideoSourceSpec};

/// Shows MOG2 and KNN foreground masks of one video side by side.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file; built-in defaults are used without one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Video file path or camera index, overrides the config
    #[arg(short, long)]
    source: Option<String>,

    /// Playback rate used to pace the display, overrides the config
    #[arg(long)]
    frame_rate: Option<u32>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn build_config(args: &Args) -> Result<HarnessConfig> {
    let mut config: HarnessConfig = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => HarnessConfig::default(),
    };
    if let Some(source) = &args.source {
        config.source.video_source = VideoSourceSpec::parse(source);
    }
    if let Some(frame_rate) = args.frame_rate {
        config.source.frame_rate = frame_rate;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run(args: &Args) -> Result<StopReason> {
    let config = build_config(args)?;
    tracing::info!("Source: {}", config.source.video_source);
    tracing::info!("Target FPS: {}", config.source.frame_rate);
    tracing::debug!("{config:?}");

    let source = VideoSource::open(&config.source.video_source)
        .context("Failed to open video source")?;
    let mut controller = Controller::from_config(source, HighGuiWindow::new(), &config)
        .context("Failed to set up background models")?;
    tracing::info!("Press Esc to stop");
    Ok(controller.run()?)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match run(&args) {
        Ok(reason) => {
            tracing::info!("Quitting gracefully ({reason:?})");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
