#![deny(missing_docs)]
#![doc = include_str!("../README.md")]
mod call;
mod error;
mod event;
mod genesis;
mod query;
mod types;

pub use call::CallMessage;
pub use error::ElectionError;
pub use event::ElectionEvent;
pub use genesis::ElectionConfig;
pub use query::{QueryMessage, QueryResponse, VoterStatus};
pub use types::{Candidate, Voter};

use ledger_modules_api::{
    CallResponse, Context, Module, ModuleCallJsonSchema, ModuleError, ModuleInfo, ModulePrefix,
    StateMap, StateValue, StateVec, WorkingSet,
};

const MODULE_NAME: &str = "Election";

/// The election module. The state lives in the [`WorkingSet`] handed to every call,
/// this struct only holds the prefixed handles to it.
pub struct Election<C: Context> {
    /// Address of the module.
    pub address: C::Address,

    /// The only caller allowed to configure the election.
    pub(crate) admin: StateValue<C::Address>,

    /// Whether votes are accepted.
    pub(crate) is_active: StateValue<bool>,

    /// Candidates in insertion order; the position is the candidate index.
    pub(crate) candidates: StateVec<Candidate>,

    /// Allowlisted voters. An address without an entry is not registered.
    pub(crate) voters: StateMap<C::Address, Voter>,
}

impl<C: Context> Default for Election<C> {
    fn default() -> Self {
        Self {
            address: ModulePrefix::new_module(module_path!(), MODULE_NAME)
                .hash()
                .into(),
            admin: StateValue::new(
                ModulePrefix::new_storage(module_path!(), MODULE_NAME, "admin").into(),
            ),
            is_active: StateValue::new(
                ModulePrefix::new_storage(module_path!(), MODULE_NAME, "is_active").into(),
            ),
            candidates: StateVec::new(
                ModulePrefix::new_storage(module_path!(), MODULE_NAME, "candidates").into(),
            ),
            voters: StateMap::new(
                ModulePrefix::new_storage(module_path!(), MODULE_NAME, "voters").into(),
            ),
        }
    }
}

impl<C: Context> ModuleInfo for Election<C> {
    type Context = C;

    fn address(&self) -> &C::Address {
        &self.address
    }

    fn prefix(&self) -> ModulePrefix {
        ModulePrefix::new_module(module_path!(), MODULE_NAME)
    }
}

impl<C: Context> Module for Election<C> {
    type Context = C;

    type Config = ElectionConfig<C>;

    type CallMessage = CallMessage<C>;

    type Event = ElectionEvent<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ModuleError> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ModuleError> {
        match msg {
            CallMessage::StartElection => Ok(self.start_election(context, working_set)?),

            CallMessage::EndElection => Ok(self.end_election(context, working_set)?),

            CallMessage::AddCandidate { name } => {
                Ok(self.add_candidate(name, context, working_set)?)
            }

            CallMessage::RegisterVoter(voter_address) => {
                Ok(self.register_voter(voter_address, context, working_set)?)
            }

            CallMessage::Vote(candidate_index) => {
                Ok(self.vote(candidate_index, context, working_set)?)
            }
        }
    }
}

impl<C: Context> ModuleCallJsonSchema for Election<C> {
    fn json_schema() -> String {
        let schema = schemars::schema_for!(CallMessage<C>);
        serde_json::to_string_pretty(&schema)
            .expect("Failed to serialize JSON schema; this is a bug in the module")
    }
}
