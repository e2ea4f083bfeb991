use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use engagement_pipeline::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("engagement_pipeline=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
