//! Configuration for the storage backend.

use std::path::PathBuf;

/// Storage configuration, usually embedded in the runner configuration.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    /// Location of the JSON snapshot. When absent the state only lives in memory.
    pub path: Option<PathBuf>,
}
