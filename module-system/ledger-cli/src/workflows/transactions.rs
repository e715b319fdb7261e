//! Submitting calls
use std::io::Write;
use std::path::PathBuf;

use election_ledger::{CallMessage, ElectionEvent};
use ledger_modules_api::Address;
use ledger_runner::{Transaction, TxEffect};
use serde::Serialize;

use crate::{ensure_deployed, Ctx, ElectionRunner};

#[derive(clap::Args)]
/// Apply a JSON encoded call message as `sender`
pub struct SubmitWorkflow {
    /// Address of the caller
    #[clap(long)]
    pub sender: Address,
    /// The call message as a JSON string
    #[clap(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,
    /// A file holding the JSON call message
    #[clap(long)]
    pub file: Option<PathBuf>,
}

/// Receipt with the events decoded.
#[derive(Debug, Serialize)]
struct SubmitReceipt {
    effect: TxEffect,
    events: Vec<ElectionEvent<Ctx>>,
}

impl SubmitWorkflow {
    /// Parses the call message.
    pub fn message(&self) -> anyhow::Result<CallMessage<Ctx>> {
        let json = match (&self.json, &self.file) {
            (Some(json), _) => json.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => anyhow::bail!("Either --json or --file must be provided"),
        };
        Ok(serde_json::from_str(&json)?)
    }

    /// Applies the call and prints its receipt. Fails if the call was reverted.
    pub fn run(self, runner: &mut ElectionRunner, out: &mut impl Write) -> anyhow::Result<()> {
        ensure_deployed(runner)?;
        let message = self.message()?;

        let mut batch = runner.apply_transactions(vec![Transaction::new(self.sender, message)])?;
        let receipt = batch
            .tx_receipts
            .pop()
            .ok_or_else(|| anyhow::anyhow!("The runner returned no receipt"))?;

        let events = receipt
            .events
            .iter()
            .map(|event| event.decode())
            .collect::<Result<Vec<ElectionEvent<Ctx>>, _>>()?;
        let printed = SubmitReceipt {
            effect: receipt.receipt,
            events,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&printed)?)?;

        if let TxEffect::Reverted(reason) = printed.effect {
            anyhow::bail!("Transaction reverted: {reason}");
        }
        Ok(())
    }
}
