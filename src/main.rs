//! Wavesketch CLI - draw-to-sound widget engine
//!
//! Headless command-line harness for the wavesketch library.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use wavesketch::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Wavesketch v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Demo {
            frequency,
            volume,
            seconds_to_wait,
        }) => commands::demo(frequency, volume, seconds_to_wait).context("demo playback failed")?,
        Some(Commands::Sample { width, height }) => {
            commands::sample(width, height).context("sampling failed")?
        }
        None => {
            println!("Wavesketch v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
        }
    }
    Ok(())
}
