// Serving Properties
// Reader and writer for a model directory's serving.properties file

use crate::error::{ServiceError, ServiceResult};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up inside a model directory
pub const PROPERTIES_FILE: &str = "serving.properties";

const OPTION_PREFIX: &str = "option.";

/// Key/value settings of one model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServingProperties {
    entries: BTreeMap<String, String>,
}

impl ServingProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text.
    ///
    /// Each line is `key=value` or `key: value`, split at the first `=` or
    /// `:`. Lines starting with `#` or `!` are comments. A line without a
    /// separator is a key with an empty value. Later keys replace earlier ones.
    pub fn parse(content: &str) -> Self {
        let mut entries = BTreeMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = match line.find(|c: char| c == '=' || c == ':') {
                Some(idx) => (line[..idx].trim(), line[idx + 1..].trim()),
                None => (line, ""),
            };
            if key.is_empty() {
                continue;
            }
            entries.insert(key.to_string(), value.to_string());
        }

        Self { entries }
    }

    pub fn from_file(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&content))
    }

    /// Read `serving.properties` from a model directory
    pub fn from_dir(dir: impl AsRef<Path>) -> ServiceResult<Self> {
        Self::from_file(dir.as_ref().join(PROPERTIES_FILE))
    }

    /// Read `serving.properties` if present, empty properties otherwise
    pub fn from_dir_or_default(dir: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = dir.as_ref().join(PROPERTIES_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Set a key only if it is not present; returns whether it was set
    pub fn set_if_absent(&mut self, key: &str, value: impl Into<String>) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), value.into());
        true
    }

    /// Look up `option.<name>`, falling back to the bare `<name>`
    pub fn option(&self, name: &str) -> Option<&str> {
        self.get(&format!("{}{}", OPTION_PREFIX, name))
            .or_else(|| self.get(name))
    }

    /// Whether `option.<name>` or `<name>` is set
    pub fn has_option(&self, name: &str) -> bool {
        self.option(name).is_some()
    }

    /// Engine requested by the model
    pub fn engine(&self) -> Option<&str> {
        self.get("engine").filter(|e| !e.is_empty())
    }

    pub fn entry_point(&self) -> Option<&str> {
        self.option("entryPoint").filter(|e| !e.is_empty())
    }

    pub fn model_id(&self) -> Option<&str> {
        self.option("model_id")
    }

    pub fn dtype(&self) -> Option<&str> {
        self.option("dtype")
    }

    pub fn task(&self) -> Option<&str> {
        self.option("task")
    }

    /// Tensor parallel degree; must be a positive integer when present
    pub fn tensor_parallel_degree(&self) -> ServiceResult<Option<u32>> {
        let key = "tensor_parallel_degree";
        match self.option(key) {
            None => Ok(None),
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(Some(n)),
                _ => Err(ServiceError::invalid_option(key, raw)),
            },
        }
    }

    /// Streaming flag; accepts true/false in any case, absent means false
    pub fn enable_streaming(&self) -> ServiceResult<bool> {
        let key = "enable_streaming";
        match self.option(key) {
            None => Ok(false),
            Some(raw) => parse_bool(raw).ok_or_else(|| ServiceError::invalid_option(key, raw)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `key=value` lines sorted by key
    pub fn to_properties_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Write `serving.properties` into `dir`, creating it if needed
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> ServiceResult<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(PROPERTIES_FILE);
        fs::write(&path, self.to_properties_string())?;
        Ok(path)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
