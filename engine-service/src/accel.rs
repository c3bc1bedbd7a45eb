// Accelerator Presets
// Default serving properties for each supported inference accelerator

use crate::engine::builtin;
use crate::properties::ServingProperties;

use std::fmt;
use std::str::FromStr;

/// Inference accelerator a model can be prepared for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accelerator {
    DeepSpeed,
    HuggingFace,
    FasterTransformer,
}

impl Accelerator {
    pub const ALL: [Accelerator; 3] = [
        Accelerator::DeepSpeed,
        Accelerator::HuggingFace,
        Accelerator::FasterTransformer,
    ];

    /// Name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Accelerator::DeepSpeed => "deepspeed",
            Accelerator::HuggingFace => "huggingface",
            Accelerator::FasterTransformer => "fastertransformer",
        }
    }

    /// Engine the accelerator runs on
    pub fn engine(&self) -> &'static str {
        match self {
            Accelerator::DeepSpeed => builtin::DEEPSPEED,
            Accelerator::HuggingFace => builtin::PYTHON,
            Accelerator::FasterTransformer => builtin::FASTER_TRANSFORMER,
        }
    }

    /// Handler module loaded by the engine worker
    pub fn entry_point(&self) -> &'static str {
        match self {
            Accelerator::DeepSpeed => "djl_python.deepspeed",
            Accelerator::HuggingFace => "djl_python.huggingface",
            Accelerator::FasterTransformer => "djl_python.fastertransformer",
        }
    }

    /// Preset key/value pairs
    pub fn preset(&self) -> Vec<(&'static str, &'static str)> {
        // FasterTransformer presets write the unprefixed key
        let entry_key = match self {
            Accelerator::FasterTransformer => "entryPoint",
            _ => "option.entryPoint",
        };
        vec![("engine", self.engine()), (entry_key, self.entry_point())]
    }

    /// Fill preset keys that are missing from `props`.
    ///
    /// An entry point already given under either `option.entryPoint` or
    /// `entryPoint` is kept.
    pub fn apply_to(&self, props: &mut ServingProperties) {
        for (key, value) in self.preset() {
            if key.ends_with("entryPoint") && props.has_option("entryPoint") {
                continue;
            }
            props.set_if_absent(key, value);
        }
    }

    /// Preset accelerator whose engine is `engine`
    pub fn for_engine(engine: &str) -> Option<Accelerator> {
        Self::ALL.into_iter().find(|a| a.engine() == engine)
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Accelerator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown accelerator '{}', expected one of: deepspeed, huggingface, fastertransformer",
                    s
                )
            })
    }
}

/// Default entry point for an engine name, if a preset covers it
pub fn default_entry_point(engine: &str) -> Option<&'static str> {
    Accelerator::for_engine(engine).map(|a| a.entry_point())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accelerator() {
        assert_eq!("deepspeed".parse::<Accelerator>(), Ok(Accelerator::DeepSpeed));
        assert_eq!(
            "FasterTransformer".parse::<Accelerator>(),
            Ok(Accelerator::FasterTransformer)
        );
        assert!("tensorrt".parse::<Accelerator>().is_err());
    }

    #[test]
    fn test_apply_fills_missing_keys() {
        let mut props = ServingProperties::new();
        Accelerator::HuggingFace.apply_to(&mut props);
        assert_eq!(props.engine(), Some("Python"));
        assert_eq!(props.get("option.entryPoint"), Some("djl_python.huggingface"));
    }

    #[test]
    fn test_apply_keeps_existing_values() {
        let mut props = ServingProperties::parse("engine=Python\noption.entryPoint=model.py\n");
        Accelerator::DeepSpeed.apply_to(&mut props);
        assert_eq!(props.engine(), Some("Python"));
        assert_eq!(props.entry_point(), Some("model.py"));
    }

    #[test]
    fn test_faster_transformer_uses_bare_entry_point() {
        let mut props = ServingProperties::new();
        Accelerator::FasterTransformer.apply_to(&mut props);
        assert_eq!(props.get("entryPoint"), Some("djl_python.fastertransformer"));
        assert_eq!(props.get("option.entryPoint"), None);
        assert_eq!(props.entry_point(), Some("djl_python.fastertransformer"));

        let mut props = ServingProperties::parse("option.entryPoint=custom\n");
        Accelerator::FasterTransformer.apply_to(&mut props);
        assert_eq!(props.get("entryPoint"), None);
    }

    #[test]
    fn test_default_entry_point() {
        assert_eq!(default_entry_point("DeepSpeed"), Some("djl_python.deepspeed"));
        assert_eq!(default_entry_point("Python"), Some("djl_python.huggingface"));
        assert_eq!(default_entry_point("Custom"), None);
    }
}
