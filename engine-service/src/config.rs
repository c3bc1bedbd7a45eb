// Engine Service Configuration
// YAML settings for the registry and the launch planner

use crate::error::{ServiceError, ServiceResult};
use crate::registry::RankPreference;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extra alias registered on top of the built-in providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Public name of the alias
    pub name: String,
    /// Name of the provider it resolves to
    pub alias_of: String,
}

/// Configuration for the engine registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Which end of the rank order wins
    pub rank_preference: RankPreference,

    /// Engine used when a model does not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_engine: Option<String>,

    /// Python interpreter for engine workers
    pub python_executable: String,

    /// Launcher used for multi-process engines
    pub mpi_launcher: String,

    /// Additional aliases
    pub aliases: Vec<AliasConfig>,

    /// Built-in engines to leave out of the registry
    pub disabled: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rank_preference: RankPreference::default(),
            default_engine: None,
            python_executable: "python3".to_string(),
            mpi_launcher: "mpirun".to_string(),
            aliases: Vec::new(),
            disabled: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Default config location (~/.engine-service/config.yaml)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".engine-service")
            .join("config.yaml")
    }

    /// Parse a config from YAML text
    pub fn from_yaml(content: &str) -> ServiceResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load from the default location
    pub fn load_default() -> ServiceResult<Self> {
        Self::load(Self::default_path())
    }

    pub fn to_yaml(&self) -> ServiceResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> ServiceResult<()> {
        if self.python_executable.trim().is_empty() {
            return Err(ServiceError::Config(
                "python_executable must not be empty".to_string(),
            ));
        }
        if self.mpi_launcher.trim().is_empty() {
            return Err(ServiceError::Config(
                "mpi_launcher must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = EngineConfig::from_yaml("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.rank_preference, RankPreference::Highest);
        assert_eq!(config.mpi_launcher, "mpirun");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
rank_preference: lowest
default_engine: DeepSpeed
python_executable: /opt/conda/bin/python
mpi_launcher: /usr/bin/mpirun
aliases:
  - name: DS
    alias_of: DeepSpeed
disabled:
  - FasterTransformer
"#;
        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.rank_preference, RankPreference::Lowest);
        assert_eq!(config.default_engine.as_deref(), Some("DeepSpeed"));
        assert_eq!(config.python_executable, "/opt/conda/bin/python");
        assert_eq!(
            config.aliases,
            vec![AliasConfig {
                name: "DS".to_string(),
                alias_of: "DeepSpeed".to_string(),
            }]
        );
        assert_eq!(config.disabled, vec!["FasterTransformer".to_string()]);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EngineConfig::from_yaml("default_engine: Python\n").unwrap();
        assert_eq!(config.default_engine.as_deref(), Some("Python"));
        assert_eq!(config.python_executable, "python3");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            EngineConfig::from_yaml("rank_preference: sideways\n"),
            Err(ServiceError::Yaml(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml("mpi_launcher: \"\"\n"),
            Err(ServiceError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(temp.path().join("nope.yaml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_roundtrip_through_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        let config = EngineConfig {
            default_engine: Some("DeepSpeed".to_string()),
            ..Default::default()
        };
        fs::write(&path, config.to_yaml().unwrap()).unwrap();

        assert_eq!(EngineConfig::load(&path).unwrap(), config);
    }
}
