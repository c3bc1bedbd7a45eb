// Engine Descriptor
// Named, ranked registration record for one pluggable backend

use crate::error::{ServiceError, ServiceResult};

use std::fmt;

/// Capability contract the registry consumes for every backend
pub trait EngineProvider: Send + Sync {
    /// Identifier used as the registry lookup key
    fn engine_name(&self) -> &str;

    /// Priority used to break ties between providers
    fn engine_rank(&self) -> i32;

    /// Whether the backend must be started as a coordinated process group
    fn requires_multi_process_launch(&self) -> bool;

    /// Name of the provider this one is an alias of, if any
    fn alias_of(&self) -> Option<&str> {
        None
    }
}

/// Immutable descriptor of an engine provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineDescriptor {
    name: String,
    rank: i32,
    multi_process: bool,
    alias_of: Option<String>,
}

impl EngineDescriptor {
    /// Create a descriptor from explicit values.
    ///
    /// Fails only when `name` is empty or whitespace.
    pub fn new(name: impl Into<String>, rank: i32, multi_process: bool) -> ServiceResult<Self> {
        let name = checked_name(name.into())?;
        Ok(Self {
            name,
            rank,
            multi_process,
            alias_of: None,
        })
    }

    /// Create a specialization of `base` whose rank is `base.rank() + offset`.
    pub fn derive(
        base: &EngineDescriptor,
        name: impl Into<String>,
        offset: i32,
        multi_process: bool,
    ) -> ServiceResult<Self> {
        let rank = base
            .rank
            .checked_add(offset)
            .ok_or(ServiceError::RankOverflow {
                base: base.rank,
                offset,
            })?;
        Self::new(name, rank, multi_process)
    }

    /// Create an alias: same rank and launch mode, different public name.
    pub fn alias(&self, name: impl Into<String>) -> ServiceResult<Self> {
        Self::alias_for(self, name)
    }

    /// Create an alias of any registered provider.
    ///
    /// Aliasing an alias records the root provider, so `alias_of` always
    /// names a provider that is not itself an alias.
    pub fn alias_for(provider: &dyn EngineProvider, name: impl Into<String>) -> ServiceResult<Self> {
        let name = checked_name(name.into())?;
        let root = provider.alias_of().unwrap_or(provider.engine_name());
        Ok(Self {
            name,
            rank: provider.engine_rank(),
            multi_process: provider.requires_multi_process_launch(),
            alias_of: Some(root.to_string()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> i32 {
        self.rank
    }

    pub fn requires_multi_process_launch(&self) -> bool {
        self.multi_process
    }

    pub fn alias_of(&self) -> Option<&str> {
        self.alias_of.as_deref()
    }

    /// Build a descriptor from trusted constants
    pub(crate) fn from_parts(name: &'static str, rank: i32, multi_process: bool) -> Self {
        debug_assert!(!name.trim().is_empty());
        Self {
            name: name.to_string(),
            rank,
            multi_process,
            alias_of: None,
        }
    }

    pub(crate) fn alias_from_parts(&self, name: &'static str) -> Self {
        debug_assert!(!name.trim().is_empty());
        Self {
            name: name.to_string(),
            rank: self.rank,
            multi_process: self.multi_process,
            alias_of: Some(self.name.clone()),
        }
    }
}

fn checked_name(name: String) -> ServiceResult<String> {
    if name.trim().is_empty() {
        return Err(ServiceError::EmptyEngineName);
    }
    Ok(name)
}

impl EngineProvider for EngineDescriptor {
    fn engine_name(&self) -> &str {
        &self.name
    }

    fn engine_rank(&self) -> i32 {
        self.rank
    }

    fn requires_multi_process_launch(&self) -> bool {
        self.multi_process
    }

    fn alias_of(&self) -> Option<&str> {
        self.alias_of.as_deref()
    }
}

impl fmt::Display for EngineDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (rank {})", self.name, self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_stable() {
        let d = EngineDescriptor::new("DeepSpeed", 11, true).unwrap();
        for _ in 0..3 {
            assert_eq!(d.name(), "DeepSpeed");
        }
        assert_eq!(d.engine_name(), "DeepSpeed");
    }

    #[test]
    fn test_multi_process_flag_is_fixed() {
        let d = EngineDescriptor::new("DeepSpeed", 11, true).unwrap();
        let copy = d.clone();
        assert!(d.requires_multi_process_launch());
        assert!(copy.requires_multi_process_launch());
        assert!(EngineProvider::requires_multi_process_launch(&d));
    }

    #[test]
    fn test_derived_rank_is_base_plus_offset() {
        let base = EngineDescriptor::new("Python", 10, false).unwrap();
        let derived = EngineDescriptor::derive(&base, "DeepSpeed", 1, true).unwrap();
        assert_eq!(derived.rank(), base.rank() + 1);
        assert!(derived.requires_multi_process_launch());
        assert_eq!(derived.alias_of(), None);
    }

    #[test]
    fn test_alias_overrides_only_name() {
        let base = EngineDescriptor::new("Python", 10, false).unwrap();
        let ds = EngineDescriptor::derive(&base, "DeepSpeed", 1, true).unwrap();
        let ft = ds.alias("FasterTransformer").unwrap();

        assert_eq!(ft.name(), "FasterTransformer");
        assert_eq!(ft.rank(), ds.rank());
        assert_eq!(ft.rank(), base.rank() + 1);
        assert_eq!(
            ft.requires_multi_process_launch(),
            ds.requires_multi_process_launch()
        );
        assert_eq!(ft.alias_of(), Some("DeepSpeed"));
    }

    #[test]
    fn test_alias_of_alias_points_at_root() {
        let ds = EngineDescriptor::new("DeepSpeed", 11, true).unwrap();
        let ds1 = ds.alias("DS").unwrap();
        let ds2 = ds1.alias("DS2").unwrap();

        assert_eq!(ds2.name(), "DS2");
        assert_eq!(ds2.alias_of(), Some("DeepSpeed"));
        assert_eq!(ds2.rank(), ds.rank());
        assert!(ds2.requires_multi_process_launch());
    }

    #[test]
    fn test_derive_rank_overflow_is_an_error() {
        let base = EngineDescriptor::new("Top", i32::MAX, false).unwrap();
        assert!(matches!(
            EngineDescriptor::derive(&base, "Above", 1, false),
            Err(ServiceError::RankOverflow { base: i32::MAX, offset: 1 })
        ));

        let base = EngineDescriptor::new("Bottom", i32::MIN, false).unwrap();
        assert!(EngineDescriptor::derive(&base, "Below", -1, false).is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            EngineDescriptor::new("", 1, false),
            Err(ServiceError::EmptyEngineName)
        ));
        let base = EngineDescriptor::new("Python", 10, false).unwrap();
        assert!(matches!(
            base.alias("   "),
            Err(ServiceError::EmptyEngineName)
        ));
    }

    #[test]
    fn test_display() {
        let d = EngineDescriptor::new("Python", 10, false).unwrap();
        assert_eq!(d.to_string(), "Python (rank 10)");
    }
}
