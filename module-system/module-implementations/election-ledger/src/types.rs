use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A candidate and its running tally.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Candidate {
    /// Display name, not required to be unique.
    pub name: String,
    /// Number of votes cast for this candidate.
    pub vote_count: u64,
}

impl Candidate {
    /// A candidate without votes.
    pub fn new(name: String) -> Self {
        Self {
            name,
            vote_count: 0,
        }
    }
}

/// The record of an allowlisted voter.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum Voter {
    /// Registered, has not voted yet.
    Fresh,
    /// Has voted. Never goes back to `Fresh`.
    Voted,
}

impl Voter {
    /// Whether the vote has been used.
    pub fn has_voted(&self) -> bool {
        matches!(self, Voter::Voted)
    }
}
