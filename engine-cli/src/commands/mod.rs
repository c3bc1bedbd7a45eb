pub mod config;
pub mod list;
pub mod plan;
pub mod prepare;
pub mod show;

use std::path::{Path, PathBuf};

use color_eyre::Result;

use engine_service::{EngineConfig, EngineRegistry};

/// Path of the config file in use
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(EngineConfig::default_path)
}

/// Load the config and build the registry it describes
pub fn load_registry(explicit: Option<&Path>) -> Result<(EngineConfig, EngineRegistry)> {
    let path = config_path(explicit);
    let config = EngineConfig::load(&path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load {}: {}", path.display(), e))?;
    let registry = EngineRegistry::from_config(&config)?;
    tracing::debug!("Loaded {} engine(s) using {}", registry.len(), path.display());
    Ok((config, registry))
}

/// Describe how a provider is launched
pub fn launch_label(multi_process: bool) -> &'static str {
    if multi_process {
        "multi-process"
    } else {
        "single process"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn test_load_registry_from_config_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(
            &path,
            "disabled: [FasterTransformer]\naliases:\n  - name: DS\n    alias_of: DeepSpeed\n",
        )
        .unwrap();

        let (config, registry) = load_registry(Some(path.as_path())).unwrap();
        assert_eq!(config.disabled, vec!["FasterTransformer".to_string()]);
        assert!(registry.contains("DS"));
        assert!(!registry.contains("FasterTransformer"));
    }

    #[test]
    fn test_load_registry_missing_file_uses_builtin() {
        let temp = tempfile::tempdir().unwrap();
        let (_, registry) = load_registry(Some(temp.path().join("missing.yaml").as_path())).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_load_registry_bad_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "rank_preference: [1, 2]\n").unwrap();
        assert!(load_registry(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_config_path_prefers_explicit() {
        let explicit = Path::new("/tmp/engines.yaml");
        assert_eq!(config_path(Some(explicit)), PathBuf::from("/tmp/engines.yaml"));
        assert_eq!(config_path(None), EngineConfig::default_path());
    }
}
