use ledger_state::SnapshotStorage;
use serde::{Deserialize, Serialize};

use crate::{Address, Context, Spec};

/// The context used by the runner and the CLI: an address and snapshot backed storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultContext {
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = SnapshotStorage;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn new(sender: Self::Address) -> Self {
        Self { sender }
    }
}
