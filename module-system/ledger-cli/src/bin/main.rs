use std::path::PathBuf;

use anyhow::Context;
use ledger_cli::clap::Parser;
use ledger_cli::Workflows;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct App {
    /// Runner configuration (TOML)
    #[clap(long, global = true, default_value = "ledger_config.toml")]
    config: PathBuf,
    #[clap(subcommand)]
    workflow: Workflows,
}

fn main() -> Result<(), anyhow::Error> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global default subscriber")?;

    let invocation = App::parse();
    invocation
        .workflow
        .run(&invocation.config, &mut std::io::stdout())
}
