use borsh::{BorshDeserialize, BorshSerialize};
use ledger_modules_api::Context;
use serde::{Deserialize, Serialize};

/// Events published by successful election calls.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum ElectionEvent<C: Context> {
    /// The election became active.
    ElectionStarted,
    /// The election went from active to inactive.
    ElectionEnded,
    /// A candidate was appended to the roster.
    CandidateAdded {
        /// Index of the new candidate.
        index: usize,
        /// Name of the new candidate.
        name: String,
    },
    /// An address joined the voter allowlist.
    VoterRegistered {
        /// The registered address.
        voter: C::Address,
    },
    /// A vote was counted.
    VoteCast {
        /// The voter.
        voter: C::Address,
        /// Index of the chosen candidate.
        candidate_index: usize,
    },
}

impl<C: Context> ElectionEvent<C> {
    /// The key under which the event is published.
    pub fn key(&self) -> &'static str {
        match self {
            ElectionEvent::ElectionStarted => "ElectionStarted",
            ElectionEvent::ElectionEnded => "ElectionEnded",
            ElectionEvent::CandidateAdded { .. } => "CandidateAdded",
            ElectionEvent::VoterRegistered { .. } => "VoterRegistered",
            ElectionEvent::VoteCast { .. } => "VoteCast",
        }
    }
}
