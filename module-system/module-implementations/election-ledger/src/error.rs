use ledger_modules_api::ModuleError;
use thiserror::Error;

/// Reasons for an election call to be rejected. A rejected call leaves the state untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ElectionError {
    /// The caller is not the administrator.
    #[error("Only the administrator can trigger this action")]
    Unauthorized,
    /// The election was started while already running.
    #[error("Election is already active")]
    AlreadyActive,
    /// Candidates can only be added while the election is inactive.
    #[error("Candidates cannot be added while the election is active")]
    ElectionActive,
    /// Votes are only accepted while the election is active.
    #[error("Election is not active")]
    ElectionNotActive,
    /// The voter is already on the allowlist.
    #[error("Voter is already registered")]
    AlreadyRegistered,
    /// The caller is not on the allowlist.
    #[error("Voter is not registered")]
    NotRegistered,
    /// The caller has used their vote.
    #[error("Voter has already voted")]
    AlreadyVoted,
    /// The candidate index is out of bounds.
    #[error("Candidate does not exist")]
    InvalidCandidate,
    /// The module state was read before genesis.
    #[error("Election module is not initialized")]
    Uninitialized,
    /// A tally would exceed `u64::MAX`.
    #[error("Vote count overflow")]
    VoteCountOverflow,
}

impl ElectionError {
    /// Recovers the election error carried by a [`ModuleError`] returned from `Module::call`.
    pub fn from_module_error(error: &ModuleError) -> Option<Self> {
        error.downcast_ref::<ElectionError>().copied()
    }
}

impl From<ElectionError> for ModuleError {
    fn from(error: ElectionError) -> Self {
        ModuleError::ModuleError(anyhow::Error::new(error))
    }
}
