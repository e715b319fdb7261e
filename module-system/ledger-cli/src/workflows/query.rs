//! Reading the ledger state
use std::io::Write;

use election_ledger::{Candidate, QueryMessage};
use ledger_modules_api::Address;
use serde::Serialize;

use crate::{ensure_deployed, Ctx, ElectionRunner};

#[derive(clap::Subcommand)]
/// Query the election state
pub enum QueryWorkflow {
    /// All candidates with their tallies and vote shares
    Results,
    /// A single candidate
    Candidate {
        /// Index of the candidate
        index: usize,
    },
    /// Number of candidates
    Count,
    /// Whether the election is active
    Status,
    /// Registration and vote status of an address
    Voter {
        /// Address of the voter
        address: Address,
    },
    /// The administrator
    Admin,
}

#[derive(Debug, PartialEq, Serialize)]
struct CandidateShare {
    index: usize,
    name: String,
    vote_count: u64,
    share: String,
}

#[derive(Debug, PartialEq, Serialize)]
struct ResultsReport {
    total_votes: u64,
    candidates: Vec<CandidateShare>,
}

fn results_report(candidates: Vec<Candidate>) -> ResultsReport {
    let total_votes: u64 = candidates.iter().map(|c| c.vote_count).sum();

    let candidates = candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let share = if total_votes == 0 {
                0.0
            } else {
                candidate.vote_count as f64 * 100.0 / total_votes as f64
            };
            CandidateShare {
                index,
                name: candidate.name,
                vote_count: candidate.vote_count,
                share: format!("{share:.2}%"),
            }
        })
        .collect();

    ResultsReport {
        total_votes,
        candidates,
    }
}

impl QueryWorkflow {
    fn message(&self) -> QueryMessage<Ctx> {
        match self {
            QueryWorkflow::Results => QueryMessage::Results,
            QueryWorkflow::Candidate { index } => QueryMessage::Candidate { index: *index },
            QueryWorkflow::Count => QueryMessage::CandidatesCount,
            QueryWorkflow::Status => QueryMessage::ElectionActive,
            QueryWorkflow::Voter { address } => QueryMessage::Voter { address: *address },
            QueryWorkflow::Admin => QueryMessage::Administrator,
        }
    }

    /// Runs the query against the committed state and prints the answer as JSON.
    pub fn run(self, runner: &ElectionRunner, out: &mut impl Write) -> anyhow::Result<()> {
        ensure_deployed(runner)?;

        let output = match self {
            QueryWorkflow::Results => {
                let candidates =
                    runner.query(|election, working_set| election.results(working_set));
                serde_json::to_string_pretty(&results_report(candidates))?
            }
            query => {
                let message = query.message();
                let response =
                    runner.query(|election, working_set| election.query(message, working_set));
                serde_json::to_string_pretty(&response)?
            }
        };

        writeln!(out, "{output}")?;
        Ok(())
    }
}
