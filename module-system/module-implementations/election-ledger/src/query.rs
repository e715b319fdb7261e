use ledger_modules_api::{Context, WorkingSet};
use serde::{Deserialize, Serialize};

use super::types::Candidate;
use super::{Election, ElectionError};

/// Read-only requests answered by [`Election::query`].
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum QueryMessage<C: Context> {
    /// The candidate at `index`.
    Candidate {
        /// Candidate index.
        index: usize,
    },
    /// Every candidate in insertion order.
    Results,
    /// Number of candidates.
    CandidatesCount,
    /// Whether the election accepts votes.
    ElectionActive,
    /// Registration and vote status of `address`.
    Voter {
        /// Address of the voter.
        address: C::Address,
    },
    /// The administrator address.
    Administrator,
}

/// Registration and vote status of an address.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub struct VoterStatus {
    /// The address is on the allowlist.
    pub is_registered: bool,
    /// The address has voted.
    pub has_voted: bool,
}

/// Answer to a [`QueryMessage`].
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum QueryResponse<C: Context> {
    /// A single candidate.
    Candidate(Candidate),
    /// All candidates.
    Results(Vec<Candidate>),
    /// Number of candidates.
    CandidatesCount(usize),
    /// Election phase.
    ElectionActive(bool),
    /// Status of a voter.
    Voter(VoterStatus),
    /// The administrator.
    Administrator(C::Address),
    /// The query was rejected.
    Err(String),
}

impl<C: Context> Election<C> {
    /// Dispatches a [`QueryMessage`].
    pub fn query(
        &self,
        msg: QueryMessage<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> QueryResponse<C> {
        let response = match msg {
            QueryMessage::Candidate { index } => self
                .get_candidate(index, working_set)
                .map(QueryResponse::Candidate),
            QueryMessage::Results => Ok(QueryResponse::Results(self.results(working_set))),
            QueryMessage::CandidatesCount => Ok(QueryResponse::CandidatesCount(
                self.candidates_count(working_set),
            )),
            QueryMessage::ElectionActive => Ok(QueryResponse::ElectionActive(
                self.election_active(working_set),
            )),
            QueryMessage::Voter { address } => Ok(QueryResponse::Voter(VoterStatus {
                is_registered: self.is_registered_voter(&address, working_set),
                has_voted: self.has_voter_voted(&address, working_set),
            })),
            QueryMessage::Administrator => self
                .administrator(working_set)
                .map(QueryResponse::Administrator),
        };

        response.unwrap_or_else(|e| QueryResponse::Err(e.to_string()))
    }

    /// Returns the candidate at `index`.
    pub fn get_candidate(
        &self,
        index: usize,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Candidate, ElectionError> {
        self.candidates
            .get_or_err(index, working_set)
            .map_err(|_| ElectionError::InvalidCandidate)
    }

    /// Returns every candidate with its tally, in insertion order. No winner is picked.
    pub fn results(&self, working_set: &mut WorkingSet<C::Storage>) -> Vec<Candidate> {
        self.candidates.iter_all(working_set)
    }

    /// Returns the number of candidates.
    pub fn candidates_count(&self, working_set: &mut WorkingSet<C::Storage>) -> usize {
        self.candidates.len(working_set)
    }

    /// Returns `true` while votes are accepted.
    pub fn election_active(&self, working_set: &mut WorkingSet<C::Storage>) -> bool {
        self.is_active.get(working_set).unwrap_or_default()
    }

    /// Returns `true` if `address` is on the allowlist.
    pub fn is_registered_voter(
        &self,
        address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> bool {
        self.voters.get(address, working_set).is_some()
    }

    /// Returns `true` if `address` has voted.
    pub fn has_voter_voted(
        &self,
        address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> bool {
        self.voters
            .get(address, working_set)
            .map_or(false, |voter| voter.has_voted())
    }

    /// Returns the administrator set at genesis.
    pub fn administrator(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<C::Address, ElectionError> {
        self.admin
            .get(working_set)
            .ok_or(ElectionError::Uninitialized)
    }
}
