//! Workflows of the command line client
pub mod deploy;
pub mod query;
pub mod transactions;
