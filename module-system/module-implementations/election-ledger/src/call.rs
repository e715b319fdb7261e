use ledger_modules_api::{CallResponse, Context, WorkingSet};
use tracing::debug;

use super::types::{Candidate, Voter};
use super::{Election, ElectionError, ElectionEvent};

/// Call actions supported by the module.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    Debug,
    PartialEq,
    Clone,
)]
#[schemars(bound = "C::Address: ::schemars::JsonSchema", rename = "CallMessage")]
pub enum CallMessage<C: Context> {
    /// Opens the election. Administrator only.
    StartElection,
    /// Closes the election. Administrator only.
    EndElection,
    /// Appends a candidate while the election is inactive. Administrator only.
    AddCandidate {
        /// Name of the candidate.
        name: String,
    },
    /// Adds an address to the voter allowlist. Administrator only.
    RegisterVoter(C::Address),
    /// Votes for the candidate at the given index. Registered voters only.
    Vote(usize),
}

impl<C: Context> Election<C> {
    /// Activates the election.
    pub(crate) fn start_election(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        self.exit_if_not_admin(context, working_set)?;

        if self.active_phase(working_set)? {
            return Err(ElectionError::AlreadyActive);
        }

        self.is_active.set(&true, working_set);
        self.emit(ElectionEvent::ElectionStarted, working_set);
        debug!("Election started");

        Ok(CallResponse::default())
    }

    /// Deactivates the election. Ending an inactive election succeeds without an event.
    pub(crate) fn end_election(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        self.exit_if_not_admin(context, working_set)?;

        if self.active_phase(working_set)? {
            self.is_active.set(&false, working_set);
            self.emit(ElectionEvent::ElectionEnded, working_set);
            debug!("Election ended");
        }

        Ok(CallResponse::default())
    }

    /// Appends a candidate with a zero tally.
    pub(crate) fn add_candidate(
        &self,
        name: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        self.exit_if_not_admin(context, working_set)?;
        self.exit_if_active(working_set)?;

        let index = self.candidates.push(&Candidate::new(name.clone()), working_set);
        debug!(index, name = %name, "Candidate added");
        self.emit(ElectionEvent::CandidateAdded { index, name }, working_set);

        Ok(CallResponse::default())
    }

    /// Adds a voter to the allowlist.
    pub(crate) fn register_voter(
        &self,
        voter_address: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        self.exit_if_not_admin(context, working_set)?;
        self.insert_voter(&voter_address, working_set)?;

        debug!(voter = %voter_address, "Voter registered");
        self.emit(
            ElectionEvent::VoterRegistered {
                voter: voter_address,
            },
            working_set,
        );

        Ok(CallResponse::default())
    }

    /// Counts the vote of the sender for `candidate_index`.
    pub(crate) fn vote(
        &self,
        candidate_index: usize,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        let voter = context.sender();

        match self.voters.get(voter, working_set) {
            None => return Err(ElectionError::NotRegistered),
            Some(Voter::Voted) => return Err(ElectionError::AlreadyVoted),
            Some(Voter::Fresh) => {}
        }

        if !self.active_phase(working_set)? {
            return Err(ElectionError::ElectionNotActive);
        }

        let mut candidate = self
            .candidates
            .get_or_err(candidate_index, working_set)
            .map_err(|_| ElectionError::InvalidCandidate)?;

        candidate.vote_count = candidate
            .vote_count
            .checked_add(1)
            .ok_or(ElectionError::VoteCountOverflow)?;

        self.candidates
            .set(candidate_index, &candidate, working_set)
            .map_err(|_| ElectionError::InvalidCandidate)?;
        self.voters.set(voter, &Voter::Voted, working_set);

        debug!(voter = %voter, candidate_index, "Vote accepted");
        self.emit(
            ElectionEvent::VoteCast {
                voter: voter.clone(),
                candidate_index,
            },
            working_set,
        );

        Ok(CallResponse::default())
    }

    /// Stores a fresh voter record, failing if the address is already on the allowlist.
    pub(crate) fn insert_voter(
        &self,
        voter_address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ElectionError> {
        if self.voters.get(voter_address, working_set).is_some() {
            return Err(ElectionError::AlreadyRegistered);
        }

        self.voters.set(voter_address, &Voter::Fresh, working_set);
        Ok(())
    }

    fn emit(&self, event: ElectionEvent<C>, working_set: &mut WorkingSet<C::Storage>) {
        working_set.add_event(event.key(), &event);
    }

    fn active_phase(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<bool, ElectionError> {
        self.is_active
            .get(working_set)
            .ok_or(ElectionError::Uninitialized)
    }

    fn exit_if_not_admin(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ElectionError> {
        let admin = self
            .admin
            .get(working_set)
            .ok_or(ElectionError::Uninitialized)?;

        if &admin != context.sender() {
            return Err(ElectionError::Unauthorized);
        }
        Ok(())
    }

    fn exit_if_active(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ElectionError> {
        if self.active_phase(working_set)? {
            return Err(ElectionError::ElectionActive);
        }
        Ok(())
    }
}
