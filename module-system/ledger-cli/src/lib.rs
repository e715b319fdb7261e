//! Workflows of the election ledger command line client.
use std::io::Write;
use std::path::Path;

use anyhow::Context as _;
pub use clap;
use election_ledger::Election;
use ledger_modules_api::utils::generate_address;
use ledger_modules_api::ModuleCallJsonSchema;
use ledger_runner::{from_toml_path, LedgerRunner, RunnerConfig};
use tracing::debug;

pub mod workflows;

use workflows::deploy::DeployWorkflow;
use workflows::query::QueryWorkflow;
use workflows::transactions::SubmitWorkflow;

/// The context used for every call sent from the command line.
pub type Ctx = ledger_modules_api::default_context::DefaultContext;

/// A runner over the election module.
pub type ElectionRunner = LedgerRunner<Election<Ctx>>;

/// Loads the runner configuration and opens the storage it names.
pub fn load_runner(
    config_path: impl AsRef<Path>,
) -> anyhow::Result<(RunnerConfig, ElectionRunner)> {
    let config_path = config_path.as_ref();
    let config: RunnerConfig = from_toml_path(config_path).with_context(|| {
        format!(
            "Failed to read runner configuration {}",
            config_path.display()
        )
    })?;
    debug!(?config, "Loaded runner configuration");

    let runner = LedgerRunner::from_config(config.storage.clone(), Election::<Ctx>::default())?;
    Ok((config, runner))
}

#[derive(clap::Subcommand)]
/// Deploy, drive and inspect the election ledger
pub enum Workflows {
    /// Run genesis and export the ledger info
    Deploy(DeployWorkflow),
    /// Apply a single call
    Submit(SubmitWorkflow),
    /// Read the ledger state
    #[clap(subcommand)]
    Query(QueryWorkflow),
    /// Print the JSON schema of the call messages
    Schema,
    /// Derive a deterministic address from a name
    Address {
        /// Name to derive the address from
        name: String,
    },
}

impl Workflows {
    /// Runs the workflow against the ledger configured at `config_path`, writing the output to `out`.
    pub fn run(self, config_path: impl AsRef<Path>, out: &mut impl Write) -> anyhow::Result<()> {
        match self {
            Workflows::Deploy(deploy) => {
                let (config, mut runner) = load_runner(config_path)?;
                deploy.run(&config, &mut runner, out)
            }
            Workflows::Submit(submit) => {
                let (_, mut runner) = load_runner(config_path)?;
                submit.run(&mut runner, out)
            }
            Workflows::Query(query) => {
                let (_, runner) = load_runner(config_path)?;
                query.run(&runner, out)
            }
            Workflows::Schema => {
                writeln!(out, "{}", Election::<Ctx>::json_schema())?;
                Ok(())
            }
            Workflows::Address { name } => {
                writeln!(out, "{}", generate_address(&name))?;
                Ok(())
            }
        }
    }
}

fn ensure_deployed(runner: &ElectionRunner) -> anyhow::Result<()> {
    anyhow::ensure!(
        runner.is_initialized(),
        "The ledger is not deployed yet, run the `deploy` workflow first"
    );
    Ok(())
}
