// Service Error Types
// Errors raised while building the registry, reading properties and planning launches

use std::io;
use thiserror::Error;

/// Errors produced by the engine service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Engine name must not be empty")]
    EmptyEngineName,

    #[error("Engine '{0}' is already registered")]
    DuplicateEngine(String),

    #[error("Engine not found: {name}{}", suggestion_suffix(.suggestion))]
    EngineNotFound {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Rank overflow deriving from base rank {base} with offset {offset}")]
    RankOverflow { base: i32, offset: i32 },

    #[error("No engines are registered")]
    NoEngines,

    #[error("Invalid value for '{key}': {value}")]
    InvalidOption { key: String, value: String },

    #[error("Launcher not found on PATH: {0}")]
    LauncherNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

impl ServiceError {
    pub fn invalid_option(key: impl Into<String>, value: impl Into<String>) -> Self {
        ServiceError::InvalidOption {
            key: key.into(),
            value: value.into(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_includes_suggestion() {
        let err = ServiceError::EngineNotFound {
            name: "deepspeed".to_string(),
            suggestion: Some("DeepSpeed".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Engine not found: deepspeed (did you mean 'DeepSpeed'?)"
        );

        let err = ServiceError::EngineNotFound {
            name: "Onnx".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Engine not found: Onnx");
    }
}
