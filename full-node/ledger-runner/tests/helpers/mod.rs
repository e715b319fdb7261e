#![allow(dead_code)]

use election_ledger::{CallMessage, Election, ElectionConfig};
use ledger_modules_api::default_context::DefaultContext;
use ledger_modules_api::utils::generate_address;
use ledger_modules_api::Address;
use ledger_runner::Transaction;

pub type C = DefaultContext;

pub fn admin() -> Address {
    generate_address("admin")
}

pub fn voter(index: usize) -> Address {
    generate_address(&format!("voter_{}", index))
}

pub fn genesis_config(candidates: &[&str], voters: Vec<Address>) -> ElectionConfig<C> {
    ElectionConfig {
        admin: admin(),
        candidates: candidates.iter().map(|name| name.to_string()).collect(),
        voters,
    }
}

pub fn tx(sender: Address, message: CallMessage<C>) -> Transaction<Election<C>> {
    Transaction::new(sender, message)
}
