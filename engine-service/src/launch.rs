// Launch Planning
// Decides how the selected engine's worker would be started

use crate::accel;
use crate::config::EngineConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::properties::ServingProperties;
use crate::registry::EngineRegistry;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// How the engine worker is started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaunchMode {
    /// One worker process
    SingleProcess,
    /// Coordinated group of `world_size` processes
    MultiProcess { world_size: u32 },
}

impl LaunchMode {
    pub fn world_size(&self) -> u32 {
        match self {
            LaunchMode::SingleProcess => 1,
            LaunchMode::MultiProcess { world_size } => *world_size,
        }
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchMode::SingleProcess => write!(f, "single process"),
            LaunchMode::MultiProcess { world_size } => {
                write!(f, "multi-process ({} ranks)", world_size)
            }
        }
    }
}

/// Program and arguments the activation step would run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub engine: String,
    pub mode: LaunchMode,
    pub entry_point: String,
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchPlan {
    /// Locate `program` on PATH (absolute paths are checked directly)
    pub fn resolve_program(&self) -> ServiceResult<PathBuf> {
        which::which(&self.program).map_err(|_| ServiceError::LauncherNotFound(self.program.clone()))
    }

    /// Shell-style rendering of the command line
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Builds launch plans from a registry and model properties
#[derive(Debug, Clone)]
pub struct LaunchPlanner {
    python_executable: String,
    mpi_launcher: String,
}

impl LaunchPlanner {
    pub fn new(python_executable: impl Into<String>, mpi_launcher: impl Into<String>) -> Self {
        Self {
            python_executable: python_executable.into(),
            mpi_launcher: mpi_launcher.into(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.python_executable.clone(),
            config.mpi_launcher.clone(),
        )
    }

    /// Plan the launch of the engine named in `props`, or of the registry
    /// default when the model names none
    pub fn plan(
        &self,
        registry: &EngineRegistry,
        props: &ServingProperties,
    ) -> ServiceResult<LaunchPlan> {
        let provider = match props.engine() {
            Some(name) => registry.get(name)?,
            None => registry.default_engine()?,
        };
        let engine = provider.engine_name().to_string();
        let world_size = props.tensor_parallel_degree()?.unwrap_or(1);

        let entry_point = props
            .entry_point()
            .or_else(|| accel::default_entry_point(&engine))
            .or_else(|| provider.alias_of().and_then(accel::default_entry_point))
            .ok_or_else(|| ServiceError::invalid_option("entryPoint", "<missing>"))?
            .to_string();

        let worker_args = vec![
            self.python_executable.clone(),
            "-m".to_string(),
            entry_point.clone(),
        ];

        let plan = if provider.requires_multi_process_launch() {
            let mut args = vec!["-np".to_string(), world_size.to_string()];
            args.extend(worker_args);
            LaunchPlan {
                engine,
                mode: LaunchMode::MultiProcess { world_size },
                entry_point,
                program: self.mpi_launcher.clone(),
                args,
            }
        } else {
            if world_size > 1 {
                tracing::warn!(
                    engine = %engine,
                    tensor_parallel_degree = world_size,
                    "Engine runs in a single process; tensor parallelism is left to the worker"
                );
            }
            let mut args = worker_args;
            let program = args.remove(0);
            LaunchPlan {
                engine,
                mode: LaunchMode::SingleProcess,
                entry_point,
                program,
                args,
            }
        };

        tracing::info!(
            engine = %plan.engine,
            mode = %plan.mode,
            "Selected engine"
        );
        Ok(plan)
    }
}

impl Default for LaunchPlanner {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
