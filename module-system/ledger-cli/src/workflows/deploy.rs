//! Genesis and ledger info export
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use election_ledger::{Election, ElectionConfig};
use ledger_modules_api::{Address, ModuleCallJsonSchema, ModuleInfo};
use ledger_runner::RunnerConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Ctx, ElectionRunner};

/// Everything a client needs to talk to a deployed ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerInfo {
    /// Address of the election module.
    pub module_address: Address,
    /// The administrator set at genesis.
    pub admin: Address,
    /// JSON schema of the call messages.
    pub call_schema: serde_json::Value,
}

#[derive(clap::Args)]
/// Run genesis from a JSON configuration
pub struct DeployWorkflow {
    /// Genesis configuration. Defaults to the `genesis_path` of the runner configuration
    #[clap(long)]
    pub genesis: Option<PathBuf>,
    /// Where to write the ledger info. Printed when omitted
    #[clap(long)]
    pub info_out: Option<PathBuf>,
}

impl DeployWorkflow {
    /// Runs genesis once and exports the ledger info.
    pub fn run(
        self,
        config: &RunnerConfig,
        runner: &mut ElectionRunner,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let genesis_path = self.genesis.unwrap_or_else(|| config.genesis_path.clone());
        let genesis = std::fs::read_to_string(&genesis_path)
            .with_context(|| format!("Failed to read genesis {}", genesis_path.display()))?;
        let genesis: ElectionConfig<Ctx> = serde_json::from_str(&genesis)
            .with_context(|| format!("Invalid genesis {}", genesis_path.display()))?;

        runner.init_ledger(&genesis)?;

        let ledger_info = LedgerInfo {
            module_address: *runner.module().address(),
            admin: genesis.admin,
            call_schema: serde_json::from_str(&Election::<Ctx>::json_schema())?,
        };
        let ledger_info = serde_json::to_string_pretty(&ledger_info)?;
        info!(module_address = %runner.module().address(), "Ledger deployed");

        match self.info_out {
            Some(path) => {
                std::fs::write(&path, ledger_info)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                writeln!(out, "Ledger info written to {}", path.display())?;
            }
            None => writeln!(out, "{ledger_info}")?,
        }
        Ok(())
    }
}
