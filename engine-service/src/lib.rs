// Engine Service Library
// Engine provider registry, model serving properties and launch planning

pub mod accel;
pub mod config;
pub mod engine;
pub mod error;
pub mod launch;
pub mod properties;
pub mod registry;

// Re-export commonly used types
pub use error::{ServiceError, ServiceResult};

// Re-export engine types
pub use engine::{builtin, EngineDescriptor, EngineProvider};

// Re-export registry and configuration types
pub use config::{AliasConfig, EngineConfig};
pub use registry::{EngineRegistry, RankPreference};

// Re-export model and launch types
pub use accel::Accelerator;
pub use launch::{LaunchMode, LaunchPlan, LaunchPlanner};
pub use properties::{ServingProperties, PROPERTIES_FILE};
