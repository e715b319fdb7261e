use ledger_modules_api::{Context, WorkingSet};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::types::Candidate;
use super::{Election, ElectionError};

/// Initial configuration of the election module.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ElectionConfig<C: Context> {
    /// Administrator of the election, fixed for the life of the ledger.
    pub admin: C::Address,
    /// Candidates seeded in order, with zero votes.
    #[serde(default)]
    pub candidates: Vec<String>,
    /// Voters seeded on the allowlist.
    #[serde(default)]
    pub voters: Vec<C::Address>,
}

impl<C: Context> Election<C> {
    pub(crate) fn init_module(
        &self,
        config: &ElectionConfig<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ElectionError> {
        self.admin.set(&config.admin, working_set);
        self.is_active.set(&false, working_set);

        for name in &config.candidates {
            self.candidates.push(&Candidate::new(name.clone()), working_set);
        }

        for voter in &config.voters {
            self.insert_voter(voter, working_set)?;
        }

        info!(
            admin = %config.admin,
            candidates = config.candidates.len(),
            voters = config.voters.len(),
            "Election module initialized"
        );
        Ok(())
    }
}
