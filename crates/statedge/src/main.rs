mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Check => commands::check::run(config_path),
        Commands::Resolve { tier } => commands::resolve::run(tier, config_path),
        Commands::Simulate {
            tier,
            frame,
            loading,
            record,
            json,
        } => commands::simulate::run(
            commands::simulate::SimulateArgs {
                tier,
                frame,
                loading,
                record,
                json,
            },
            config_path,
        ),
        Commands::History { stats } => commands::history::run(stats),
        Commands::Version => commands::version::run(),
    }
}
