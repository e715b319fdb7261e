#![deny(missing_docs)]
#![doc = include_str!("../README.md")]
mod config;

use anyhow::Context as _;
pub use config::{from_toml_path, RunnerConfig, StorageConfig};
use ledger_modules_api::{Context, Module, Spec};
use ledger_state::{Event, StateCheckpoint, Storage, WorkingSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

type StorageOf<M> = <<M as Module>::Context as Spec>::Storage;
type AddressOf<M> = <<M as Module>::Context as Spec>::Address;

/// A call admitted by the boundary, with the identity of its sender.
pub struct Transaction<M: Module> {
    /// The caller.
    pub sender: AddressOf<M>,
    /// The call message.
    pub message: M::CallMessage,
}

impl<M: Module> Transaction<M> {
    /// Creates a transaction.
    pub fn new(sender: AddressOf<M>, message: M::CallMessage) -> Self {
        Self { sender, message }
    }
}

/// Outcome of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxEffect {
    /// The call was applied.
    Successful,
    /// The call failed and left no trace. Carries the error message.
    Reverted(String),
}

/// Receipt of a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Events emitted by the call, empty when reverted.
    pub events: Vec<Event>,
    /// Outcome of the call.
    pub receipt: TxEffect,
}

/// Receipts of a batch, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReceipt {
    /// One receipt per transaction.
    pub tx_receipts: Vec<TransactionReceipt>,
}

impl BatchReceipt {
    /// Number of successful transactions.
    pub fn successful(&self) -> usize {
        self.tx_receipts
            .iter()
            .filter(|receipt| receipt.receipt == TxEffect::Successful)
            .count()
    }
}

/// Owns the storage of a module and applies transactions to it one at a time.
pub struct LedgerRunner<M: Module> {
    storage: StorageOf<M>,
    module: M,
}

impl<M: Module> LedgerRunner<M> {
    /// Creates a runner over existing storage.
    pub fn new(storage: StorageOf<M>, module: M) -> Self {
        Self { storage, module }
    }

    /// Creates a runner over the storage described by `config`.
    pub fn from_config(
        config: <StorageOf<M> as Storage>::RuntimeConfig,
        module: M,
    ) -> anyhow::Result<Self> {
        let storage = <StorageOf<M> as Storage>::with_config(config)?;
        Ok(Self::new(storage, module))
    }

    /// The module driven by this runner.
    pub fn module(&self) -> &M {
        &self.module
    }

    /// The committed storage.
    pub fn storage(&self) -> &StorageOf<M> {
        &self.storage
    }

    /// Returns `true` once genesis has been committed.
    pub fn is_initialized(&self) -> bool {
        !self.storage.is_empty()
    }

    /// Runs the module genesis and commits it. Fails if the storage already holds a ledger.
    pub fn init_ledger(&mut self, config: &M::Config) -> anyhow::Result<()> {
        if self.is_initialized() {
            anyhow::bail!("Ledger is already initialized");
        }

        let mut working_set = WorkingSet::new(self.storage.clone());
        self.module
            .genesis(config, &mut working_set)
            .context("Genesis failed")?;

        let mut checkpoint = working_set.checkpoint();
        let writes = checkpoint.freeze();
        self.storage.commit(&writes)?;
        info!(writes = writes.ordered_writes.len(), "Genesis committed");
        Ok(())
    }

    /// Applies `txs` in order and commits the result.
    ///
    /// Each transaction runs in its own revertable working set, so a failed call
    /// never affects the following ones.
    pub fn apply_transactions(
        &mut self,
        txs: Vec<Transaction<M>>,
    ) -> anyhow::Result<BatchReceipt> {
        debug!("Applying batch with {} txs", txs.len());
        let mut checkpoint = StateCheckpoint::new(self.storage.clone());
        let mut tx_receipts = Vec::with_capacity(txs.len());

        for tx in txs {
            let mut working_set = checkpoint.to_revertable();
            let context = <M::Context as Context>::new(tx.sender);

            let receipt = match self.module.call(tx.message, &context, &mut working_set) {
                Ok(_) => {
                    let events = working_set.take_events();
                    checkpoint = working_set.checkpoint();
                    TransactionReceipt {
                        events,
                        receipt: TxEffect::Successful,
                    }
                }
                Err(e) => {
                    warn!(sender = %context.sender(), "Transaction reverted: {}", e);
                    checkpoint = working_set.revert();
                    TransactionReceipt {
                        events: Vec::new(),
                        receipt: TxEffect::Reverted(e.to_string()),
                    }
                }
            };
            tx_receipts.push(receipt);
        }

        let writes = checkpoint.freeze();
        if !writes.is_empty() {
            self.storage.commit(&writes)?;
        }

        let receipt = BatchReceipt { tx_receipts };
        info!(
            txs = receipt.tx_receipts.len(),
            successful = receipt.successful(),
            "Batch committed"
        );
        Ok(receipt)
    }

    /// Runs `f` against the committed state. Writes made by `f` are discarded.
    pub fn query<R>(&self, f: impl FnOnce(&M, &mut WorkingSet<StorageOf<M>>) -> R) -> R {
        let mut working_set = WorkingSet::new(self.storage.clone());
        f(&self.module, &mut working_set)
    }
}
