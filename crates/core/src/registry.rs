//! Namespaced registry keys.
//!
//! Registry keys identify blocks, items, tool categories, tiers and tags in
//! content packs (e.g., `toolcraft:star_pickaxe`, `minecraft:stone`). Custom
//! content lives in its own namespace; native content uses `minecraft`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default namespace used when a key omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "toolcraft";

/// Namespace of content provided by the host game itself.
pub const NATIVE_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`RegistryKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryKeyError {
    message: String,
}

impl RegistryKeyError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn with_hint(mut self, allowed: &str) -> Self {
        if self.message.contains("invalid character") {
            self.message = format!("{} (allowed: {allowed})", self.message);
        }
        self
    }
}

impl fmt::Display for RegistryKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RegistryKeyError {}

/// A namespaced key of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)` and is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse a registry key.
    ///
    /// Accepts either:
    /// - `namespace:path`
    /// - `path` (uses [`DEFAULT_NAMESPACE`])
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        Self::parse_with_default_namespace(input, DEFAULT_NAMESPACE)
    }

    /// Parse a registry key using a caller-provided default namespace.
    pub fn parse_with_default_namespace(
        input: &str,
        default_namespace: &str,
    ) -> Result<Self, RegistryKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RegistryKeyError::new("RegistryKey cannot be empty"));
        }

        let (namespace, path) = match input.split_once(':') {
            Some((ns, p)) => (ns, p),
            None => (default_namespace, input),
        };

        let namespace = namespace.trim();
        let path = path.trim();

        validate_namespace(namespace)?;
        validate_path(path)?;

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Registry key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registry key path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parse a key whose namespace defaults to [`NATIVE_NAMESPACE`].
    pub fn native(input: &str) -> Result<Self, RegistryKeyError> {
        Self::parse_with_default_namespace(input, NATIVE_NAMESPACE)
    }

    /// Whether this key belongs to the host game's namespace.
    pub fn is_native(&self) -> bool {
        self.namespace == NATIVE_NAMESPACE
    }
}

impl TryFrom<String> for RegistryKey {
    type Error = RegistryKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegistryKey> for String {
    fn from(key: RegistryKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for RegistryKey {
    type Err = RegistryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn validate_namespace(ns: &str) -> Result<(), RegistryKeyError> {
    validate_segment("namespace", ns, 64, |c| {
        matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
    })
    .map_err(|err| err.with_hint("a-z0-9_.-"))
}

fn validate_path(path: &str) -> Result<(), RegistryKeyError> {
    validate_segment("path", path, 128, |c| {
        matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/')
    })
    .map_err(|err| err.with_hint("a-z0-9_./-"))
}

fn validate_segment(
    what: &str,
    value: &str,
    max_len: usize,
    allowed: impl Fn(char) -> bool,
) -> Result<(), RegistryKeyError> {
    if value.is_empty() {
        return Err(RegistryKeyError::new(format!(
            "RegistryKey {what} cannot be empty"
        )));
    }
    if value.len() > max_len {
        return Err(RegistryKeyError::new(format!(
            "RegistryKey {what} too long (max {max_len})"
        )));
    }
    if let Some(bad) = value.chars().find(|c| !allowed(*c)) {
        return Err(RegistryKeyError::new(format!(
            "RegistryKey {what} has invalid character {bad:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_key() {
        let key = RegistryKey::parse("minecraft:mineable/pickaxe").unwrap();
        assert_eq!(key.namespace(), "minecraft");
        assert_eq!(key.path(), "mineable/pickaxe");
        assert!(key.is_native());
        assert_eq!(key.to_string(), "minecraft:mineable/pickaxe");
    }

    #[test]
    fn parses_with_default_namespace() {
        let key = RegistryKey::parse("star_pickaxe").unwrap();
        assert_eq!(key.to_string(), "toolcraft:star_pickaxe");
        assert!(!key.is_native());

        let key = RegistryKey::native("bamboo").unwrap();
        assert_eq!(key.to_string(), "minecraft:bamboo");
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = RegistryKey::parse("toolcraft:ruby_block").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"toolcraft:ruby_block\"");
        let back: RegistryKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<RegistryKey>("\"Bad Key\"").is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(RegistryKey::parse("").is_err());
        assert!(RegistryKey::parse("   ").is_err());
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(RegistryKey::parse("toolcraft:Ruby").is_err());
        assert!(RegistryKey::parse("TOOLCRAFT:ruby").is_err());
        assert!(RegistryKey::parse("toolcraft:ruby?").is_err());
        assert!(RegistryKey::parse("toolcraft:").is_err());
        assert!(RegistryKey::parse(":stone").is_err());
    }
}

