// Engine Module
// Provider descriptors and the built-in engine set

pub mod builtin;
pub mod descriptor;

// Re-export key types
pub use descriptor::{EngineDescriptor, EngineProvider};
