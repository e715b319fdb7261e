#![allow(dead_code)]

use election_ledger::{CallMessage, Election, ElectionConfig, ElectionError};
use ledger_modules_api::default_context::DefaultContext;
use ledger_modules_api::utils::generate_address;
use ledger_modules_api::{Address, Context, Module, WorkingSet};
use ledger_state::SnapshotStorage;

pub type C = DefaultContext;

pub fn admin() -> Address {
    generate_address("admin")
}

pub fn voter(index: usize) -> Address {
    generate_address(&format!("voter_{}", index))
}

/// A freshly deployed election with `candidates` and no voters.
pub fn setup(candidates: &[&str]) -> (Election<C>, WorkingSet<SnapshotStorage>) {
    let election = Election::<C>::default();
    let mut working_set = WorkingSet::new(SnapshotStorage::temporary());

    let config = ElectionConfig::<C> {
        admin: admin(),
        candidates: candidates.iter().map(|name| name.to_string()).collect(),
        voters: vec![],
    };
    election.genesis(&config, &mut working_set).unwrap();
    (election, working_set)
}

/// Sends `msg` from `sender`, returning the typed election error on failure.
pub fn send(
    election: &Election<C>,
    sender: Address,
    msg: CallMessage<C>,
    working_set: &mut WorkingSet<SnapshotStorage>,
) -> Result<(), ElectionError> {
    election
        .call(msg, &C::new(sender), working_set)
        .map(|_| ())
        .map_err(|err| {
            ElectionError::from_module_error(&err).expect("Election calls fail with ElectionError")
        })
}
