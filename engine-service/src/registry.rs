// Engine Registry
// Explicit name -> provider mapping with rank-based default selection

use crate::config::EngineConfig;
use crate::engine::{builtin, EngineDescriptor, EngineProvider};
use crate::error::{ServiceError, ServiceResult};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Which end of the rank order is preferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankPreference {
    /// Higher rank wins
    #[default]
    Highest,
    /// Lower rank wins
    Lowest,
}

impl RankPreference {
    /// Ordering that puts the preferred rank first
    fn compare(&self, a: i32, b: i32) -> Ordering {
        match self {
            RankPreference::Highest => b.cmp(&a),
            RankPreference::Lowest => a.cmp(&b),
        }
    }
}

/// Registry of available engine providers.
///
/// Populate it once at startup, then share it by reference; lookups never
/// mutate it.
pub struct EngineRegistry {
    providers: BTreeMap<String, Arc<dyn EngineProvider>>,
    preference: RankPreference,
    default_engine: Option<String>,
}

impl EngineRegistry {
    /// Create an empty registry
    pub fn new(preference: RankPreference) -> Self {
        Self {
            providers: BTreeMap::new(),
            preference,
            default_engine: None,
        }
    }

    /// Create a registry holding the built-in providers
    pub fn with_builtin() -> Self {
        let mut registry = Self::new(RankPreference::default());
        for descriptor in builtin::all() {
            registry
                .register(descriptor)
                .expect("built-in engine names are distinct and non-empty");
        }
        registry
    }

    /// Build a registry from configuration: built-ins minus `disabled`,
    /// plus configured aliases
    pub fn from_config(config: &EngineConfig) -> ServiceResult<Self> {
        let mut registry = Self::new(config.rank_preference);

        for name in &config.disabled {
            if !builtin::all().iter().any(|d| d.name() == name) {
                tracing::warn!("Ignoring unknown disabled engine '{}'", name);
            }
        }

        for descriptor in builtin::all() {
            if config.disabled.iter().any(|d| d == descriptor.name()) {
                tracing::debug!("Engine '{}' disabled by configuration", descriptor.name());
                continue;
            }
            registry.register(descriptor)?;
        }

        for alias in &config.aliases {
            let target = registry.get(&alias.alias_of).map_err(|_| {
                ServiceError::Config(format!(
                    "alias '{}' refers to unknown engine '{}'",
                    alias.name, alias.alias_of
                ))
            })?;
            let descriptor = EngineDescriptor::alias_for(target, alias.name.clone())?;
            registry.register(descriptor)?;
        }

        if let Some(name) = &config.default_engine {
            registry
                .set_default_engine(name)
                .map_err(|e| ServiceError::Config(format!("default_engine: {}", e)))?;
        }

        Ok(registry)
    }

    /// Register a provider under its engine name
    pub fn register<P>(&mut self, provider: P) -> ServiceResult<()>
    where
        P: EngineProvider + 'static,
    {
        let name = provider.engine_name().to_string();
        if name.trim().is_empty() {
            return Err(ServiceError::EmptyEngineName);
        }
        if self.providers.contains_key(&name) {
            return Err(ServiceError::DuplicateEngine(name));
        }

        tracing::debug!(
            engine = %name,
            rank = provider.engine_rank(),
            multi_process = provider.requires_multi_process_launch(),
            "Registered engine provider"
        );
        self.providers.insert(name, Arc::new(provider));
        Ok(())
    }

    /// Pin the engine returned by `default_engine`
    pub fn set_default_engine(&mut self, name: &str) -> ServiceResult<()> {
        self.get(name)?;
        self.default_engine = Some(name.to_string());
        Ok(())
    }

    /// Look up a provider by exact name
    pub fn get(&self, name: &str) -> ServiceResult<&dyn EngineProvider> {
        if let Some(provider) = self.providers.get(name) {
            return Ok(provider.as_ref());
        }

        let suggestion = self
            .providers
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .cloned();
        Err(ServiceError::EngineNotFound {
            name: name.to_string(),
            suggestion,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Providers in preference order; equal ranks are ordered by name
    pub fn ranked(&self) -> Vec<&dyn EngineProvider> {
        // BTreeMap iteration is already name-sorted and sort_by is stable
        let mut providers: Vec<&dyn EngineProvider> =
            self.providers.values().map(|p| p.as_ref()).collect();
        providers.sort_by(|a, b| self.preference.compare(a.engine_rank(), b.engine_rank()));
        providers
    }

    /// The pinned default engine, or the best-ranked provider
    pub fn default_engine(&self) -> ServiceResult<&dyn EngineProvider> {
        if let Some(name) = &self.default_engine {
            return self.get(name);
        }
        self.ranked()
            .into_iter()
            .next()
            .ok_or(ServiceError::NoEngines)
    }

    /// Providers that are aliases of `name`
    pub fn aliases_of(&self, name: &str) -> Vec<&dyn EngineProvider> {
        self.providers
            .values()
            .filter(|p| p.alias_of() == Some(name))
            .map(|p| p.as_ref())
            .collect()
    }

    pub fn preference(&self) -> RankPreference {
        self.preference
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
