// Built-in Engine Providers
// Python is the base provider; DeepSpeed specializes it and FasterTransformer aliases DeepSpeed

use super::descriptor::EngineDescriptor;

/// Rank of the Python base provider
pub const PYTHON_RANK: i32 = 10;

pub const PYTHON: &str = "Python";
pub const DEEPSPEED: &str = "DeepSpeed";
pub const FASTER_TRANSFORMER: &str = "FasterTransformer";

/// Python engine: single process, base rank
pub fn python() -> EngineDescriptor {
    EngineDescriptor::from_parts(PYTHON, PYTHON_RANK, false)
}

/// DeepSpeed engine: ranks one above Python and needs an MPI launch
pub fn deepspeed() -> EngineDescriptor {
    EngineDescriptor::from_parts(DEEPSPEED, python().rank() + 1, true)
}

/// FasterTransformer: alias of DeepSpeed
pub fn faster_transformer() -> EngineDescriptor {
    deepspeed().alias_from_parts(FASTER_TRANSFORMER)
}

/// All built-in providers, base first
pub fn all() -> Vec<EngineDescriptor> {
    vec![python(), deepspeed(), faster_transformer()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deepspeed_descriptor() {
        let ds = deepspeed();
        assert_eq!(ds.name(), "DeepSpeed");
        assert!(ds.requires_multi_process_launch());
        assert_eq!(ds.rank(), PYTHON_RANK + 1);
    }

    #[test]
    fn test_faster_transformer_alias() {
        let ft = faster_transformer();
        assert_eq!(ft.name(), "FasterTransformer");
        assert!(ft.requires_multi_process_launch());
        assert_eq!(ft.rank(), PYTHON_RANK + 1);
        assert_eq!(ft.alias_of(), Some(DEEPSPEED));
    }

    #[test]
    fn test_builtin_matches_composed_descriptors() {
        let base = EngineDescriptor::new(PYTHON, PYTHON_RANK, false).unwrap();
        let ds = EngineDescriptor::derive(&base, DEEPSPEED, 1, true).unwrap();
        let ft = ds.alias(FASTER_TRANSFORMER).unwrap();

        assert_eq!(python(), base);
        assert_eq!(deepspeed(), ds);
        assert_eq!(faster_transformer(), ft);
    }

    #[test]
    fn test_builtin_names_unique() {
        let all = all();
        let mut names: Vec<&str> = all.iter().map(|d| d.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }
}
