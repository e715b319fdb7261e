use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
pub use ledger_state::config::Config as StorageConfig;

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunnerConfig {
    /// Storage configuration. In memory when the path is omitted.
    #[serde(default)]
    pub storage: StorageConfig,
    /// JSON genesis configuration of the module.
    pub genesis_path: PathBuf,
}

/// Reads a TOML file into `R`.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let path = path.as_ref();
    let mut contents = String::new();
    {
        let mut file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)
        .with_context(|| format!("Invalid configuration {}", path.display()))?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn create_config_from(content: &str) -> NamedTempFile {
        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(content.as_bytes()).unwrap();
        config_file
    }

    #[test]
    fn test_correct_config() {
        let config = r#"
            genesis_path = "genesis.json"
            [storage]
            path = "/tmp/state.json"
        "#;

        let config_file = create_config_from(config);

        let config: RunnerConfig = from_toml_path(config_file.path()).unwrap();
        let expected = RunnerConfig {
            storage: StorageConfig {
                path: Some(PathBuf::from("/tmp/state.json")),
            },
            genesis_path: PathBuf::from("genesis.json"),
        };
        assert_eq!(config, expected);
    }

    #[test]
    fn test_storage_section_is_optional() {
        let config_file = create_config_from(r#"genesis_path = "genesis.json""#);

        let config: RunnerConfig = from_toml_path(config_file.path()).unwrap();
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_missing_genesis_path() {
        let config_file = create_config_from("[storage]\n");

        assert!(from_toml_path::<_, RunnerConfig>(config_file.path()).is_err());
    }
}
