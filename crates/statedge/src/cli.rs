use clap::{Parser, Subcommand};
use statedge_core::host::FrameTopology;
use statedge_core::AccessTier;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "statedge")]
#[command(version)]
#[command(about = "Navigation resolver tooling for the StatEdge access button")]
pub struct Cli {
    /// Destination config JSON (defaults to ~/.statedge/config.json, then environment)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that every tier has a usable destination
    Check,

    /// Show the destination and outbound message for a tier
    Resolve {
        /// free, premium or plus
        #[arg(short, long)]
        tier: AccessTier,
    },

    /// Simulate a button click inside a scripted frame topology
    Simulate {
        /// free, premium or plus
        #[arg(short, long)]
        tier: AccessTier,

        /// standalone, same-origin, cross-origin, nested or orphaned
        #[arg(short, long, default_value = "standalone")]
        frame: FrameTopology,

        /// Click while the session signal is still loading
        #[arg(long)]
        loading: bool,

        /// Append the resulting records to the diagnostics history
        #[arg(long)]
        record: bool,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// View recorded diagnostics history
    History {
        /// Show statistics summary
        #[arg(long)]
        stats: bool,
    },

    /// Print version information
    Version,
}
