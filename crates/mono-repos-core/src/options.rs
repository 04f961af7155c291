//! Free-form package options
//!
//! Options are a flat map of name to JSON value. The workspace holds a set of
//! defaults and every call site may layer overrides on top of them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option key controlling package-manager output
pub const SILENT: &str = "silent";
/// Option key holding an explicit release version
pub const VERSION: &str = "version";
/// Option key holding the release tier
pub const RELEASE: &str = "release";
/// Option key holding the text appended to release commit messages
pub const MESSAGE: &str = "message";

/// A flat mapping of option name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    values: BTreeMap<String, Value>,
}

impl Options {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an option
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a raw value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Look up a string value
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Look up a boolean value
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    /// Whether no options are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Shallow merge with `overrides` layered on top; overriding keys win.
    pub fn merge(&self, overrides: &Options) -> Options {
        let mut values = self.values.clone();
        values.extend(
            overrides
                .values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Options { values }
    }

    /// Whether package-manager output should be suppressed
    pub fn silent(&self) -> bool {
        self.get_bool(SILENT).unwrap_or(false)
    }

    /// Explicit release version, if one was given and is non-empty
    pub fn version(&self) -> Option<&str> {
        self.get_str(VERSION).filter(|v| !v.is_empty())
    }

    /// Release tier string; empty when unset
    pub fn release(&self) -> &str {
        self.get_str(RELEASE).unwrap_or("")
    }

    /// Commit message suffix; empty when unset
    pub fn message(&self) -> &str {
        self.get_str(MESSAGE).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_override_wins() {
        let base = Options::new().with("foo", "bar").with("bar", "baz");
        let overrides = Options::new().with("foo", "hello").with("hello", "world");

        let merged = base.merge(&overrides);
        let expected = Options::new()
            .with("foo", "hello")
            .with("hello", "world")
            .with("bar", "baz");
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_merge_does_not_mutate_layers() {
        let base = Options::new().with("foo", "bar");
        let overrides = Options::new().with("foo", "baz");
        let _ = base.merge(&overrides);

        assert_eq!(base.get_str("foo"), Some("bar"));
        assert_eq!(overrides.get_str("foo"), Some("baz"));
    }

    #[test]
    fn test_typed_accessors_defaults() {
        let opts = Options::new();
        assert!(!opts.silent());
        assert_eq!(opts.version(), None);
        assert_eq!(opts.release(), "");
        assert_eq!(opts.message(), "");
    }

    #[test]
    fn test_empty_version_counts_as_unset() {
        let opts = Options::new().with(VERSION, "");
        assert_eq!(opts.version(), None);

        let opts = Options::new().with(VERSION, "2.0.0");
        assert_eq!(opts.version(), Some("2.0.0"));
    }

    #[test]
    fn test_non_string_values_are_ignored_by_string_accessors() {
        let opts = Options::new().with(RELEASE, 3).with(SILENT, "yes");
        assert_eq!(opts.release(), "");
        assert!(!opts.silent());
    }

    #[test]
    fn test_deserializes_from_toml_table() {
        let opts: Options = toml::from_str("silent = true\nmessage = \"nightly\"\n").unwrap();
        assert!(opts.silent());
        assert_eq!(opts.message(), "nightly");
    }
}
