//! CLI Module
//!
//! Headless harness for the wavesketch engine: programmatic strokes stand
//! in for pointer input, since widget layout is out of scope.

pub mod commands;

use clap::{Parser, Subcommand};

/// Wavesketch - draw-to-sound widget engine
#[derive(Parser, Debug)]
#[command(name = "wavesketch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw the built-in demo stroke, synthesize, and play it
    #[command(name = "demo")]
    Demo {
        /// Carrier frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        frequency: f32,

        /// Playback volume (0.0 - 1.0)
        #[arg(long, default_value_t = 0.3)]
        volume: f32,

        /// Seconds to keep waiting for playback beyond the clip length
        #[arg(long, default_value_t = 1)]
        seconds_to_wait: u64,
    },

    /// Draw the built-in demo stroke and print waveform statistics
    #[command(name = "sample")]
    Sample {
        /// Surface width in pixels
        #[arg(long, default_value_t = 800)]
        width: usize,

        /// Surface height in pixels
        #[arg(long, default_value_t = 300)]
        height: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_args_parse() {
        let cli = Cli::try_parse_from([
            "wavesketch",
            "demo",
            "--frequency",
            "880",
            "--volume",
            "0.5",
            "--seconds-to-wait",
            "3",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Demo {
                frequency,
                volume,
                seconds_to_wait,
            }) => {
                assert_eq!(frequency, 880.0);
                assert_eq!(volume, 0.5);
                assert_eq!(seconds_to_wait, 3);
            }
            other => panic!("expected demo command, got {:?}", other),
        }
    }

    #[test]
    fn test_demo_arg_defaults() {
        let cli = Cli::try_parse_from(["wavesketch", "demo"]).unwrap();
        match cli.command {
            Some(Commands::Demo {
                frequency,
                volume,
                seconds_to_wait,
            }) => {
                assert_eq!(frequency, 440.0);
                assert_eq!(volume, 0.3);
                assert_eq!(seconds_to_wait, 1);
            }
            other => panic!("expected demo command, got {:?}", other),
        }
    }
}
