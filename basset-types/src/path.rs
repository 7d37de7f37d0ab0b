//! Hierarchical entity paths.
//!
//! Every entity in a Basset host is addressed by an absolute path of the
//! form `Namespace:/segment/segment`. The namespace prefix scopes the path;
//! a path without one belongs to [`DEFAULT_NAMESPACE`]. The textual form
//! preserves case; derived UUIDs fold it, so hosts address entities
//! case-insensitively.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// Delimiter between the namespace prefix and the partial path.
pub const NAMESPACE_DELIMITER: char = ':';

/// Namespace assumed when a path carries no prefix.
pub const DEFAULT_NAMESPACE: &str = "Main";

/// An absolute entity path: a namespace plus one or more segments.
///
/// Parsing normalizes the textual form, so `"/Plant/Line1"` and
/// `"Main:/Plant/Line1"` produce the same path. The canonical display form
/// is always `Namespace:/a/b` with no trailing separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityPath {
    namespace: String,
    segments: Vec<String>,
}

impl EntityPath {
    /// Parses an absolute path, applying [`DEFAULT_NAMESPACE`] when no
    /// namespace prefix is present.
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidPath("empty path".to_string()));
        }

        let (namespace, partial) = match trimmed.find(NAMESPACE_DELIMITER) {
            Some(0) => return Err(Error::InvalidPath(format!("empty namespace: {trimmed}"))),
            Some(i) => (&trimmed[..i], &trimmed[i + 1..]),
            None => (DEFAULT_NAMESPACE, trimmed),
        };

        let segments: Vec<String> = partial
            .split(PATH_SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        if segments.is_empty() {
            return Err(Error::InvalidPath(format!("no segments: {trimmed}")));
        }
        if segments.iter().any(|s| s.contains(NAMESPACE_DELIMITER)) {
            return Err(Error::InvalidPath(format!(
                "namespace delimiter inside segment: {trimmed}"
            )));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            segments,
        })
    }

    /// Builds a path from a namespace and pre-split segments.
    pub fn new<S: Into<String>>(namespace: S, segments: Vec<String>) -> Result<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(Error::InvalidPath("empty namespace".to_string()));
        }
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidPath("empty segment".to_string()));
        }
        Ok(Self {
            namespace,
            segments,
        })
    }

    /// The namespace prefix.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path segments, in order from root to leaf.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The leaf segment.
    pub fn name(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The partial path without the namespace prefix, e.g. `/Plant/Line1`.
    pub fn partial_path(&self) -> String {
        let mut s = String::new();
        for segment in &self.segments {
            s.push(PATH_SEPARATOR);
            s.push_str(segment);
        }
        s
    }

    /// The parent path, or `None` at the root segment.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            namespace: self.namespace.clone(),
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Appends a relative path of one or more segments, e.g. `"Line1/Status"`.
    pub fn combine(&self, relative: &str) -> Result<Self> {
        let extra: Vec<&str> = relative
            .split(PATH_SEPARATOR)
            .filter(|s| !s.is_empty())
            .collect();
        if extra.is_empty() {
            return Err(Error::InvalidPath(format!("empty relative path: {relative}")));
        }
        let mut path = self.clone();
        for segment in extra {
            path = path.join(segment)?;
        }
        Ok(path)
    }

    /// Appends one segment, yielding the child path.
    pub fn join(&self, segment: &str) -> Result<Self> {
        if segment.is_empty() || segment.contains(PATH_SEPARATOR) {
            return Err(Error::InvalidPath(format!("invalid segment: {segment}")));
        }
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self {
            namespace: self.namespace.clone(),
            segments,
        })
    }

    /// Returns the same partial path under a different namespace.
    pub fn with_namespace(&self, namespace: &str) -> Result<Self> {
        Self::new(namespace, self.segments.clone())
    }

    /// Deterministic UUID for this path as a lowercase hex string.
    ///
    /// Each segment's UUID chains the parent segment's UUID, so two paths
    /// share a prefix of UUIDs exactly when they share ancestor segments.
    /// Case-insensitive over both namespace and segments.
    pub fn uuid(&self) -> String {
        let ns = self.namespace.to_lowercase();
        let mut parent: Option<[u8; 32]> = None;
        for segment in &self.segments {
            let mut hasher = Sha256::new();
            hasher.update(ns.as_bytes());
            hasher.update([NAMESPACE_DELIMITER as u8]);
            hasher.update(segment.to_lowercase().as_bytes());
            if let Some(p) = parent {
                hasher.update(p);
            }
            parent = Some(hasher.finalize().into());
        }
        // segments is never empty by construction
        parent.map(hex::encode).unwrap_or_default()
    }

    /// Canonical absolute form, e.g. `Main:/Plant/Line1`.
    pub fn absolute(&self) -> String {
        format!(
            "{}{}{}",
            self.namespace,
            NAMESPACE_DELIMITER,
            self.partial_path()
        )
    }
}

impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.absolute())
    }
}

impl FromStr for EntityPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityPath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<EntityPath> for String {
    fn from(path: EntityPath) -> Self {
        path.absolute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_path() {
        let p = EntityPath::parse("Debug:/Entities/Boolean").unwrap();
        assert_eq!(p.namespace(), "Debug");
        assert_eq!(p.segments(), ["Entities", "Boolean"]);
        assert_eq!(p.to_string(), "Debug:/Entities/Boolean");
    }

    #[test]
    fn applies_default_namespace() {
        let p = EntityPath::parse("/Plant/Line1").unwrap();
        assert_eq!(p.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(p.to_string(), "Main:/Plant/Line1");
    }

    #[test]
    fn normalizes_trailing_separator() {
        let a = EntityPath::parse("Main:/Plant/Line1/").unwrap();
        let b = EntityPath::parse("Main:/Plant/Line1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_empty_and_bare_namespace() {
        assert!(EntityPath::parse("").is_err());
        assert!(EntityPath::parse("Main:/").is_err());
        assert!(EntityPath::parse(":/a").is_err());
    }

    #[test]
    fn parent_and_name() {
        let p = EntityPath::parse("Main:/Plant/Line1/Status").unwrap();
        assert_eq!(p.name(), "Status");
        assert_eq!(p.parent().unwrap().to_string(), "Main:/Plant/Line1");
        let root = EntityPath::parse("Main:/Plant").unwrap();
        assert!(root.parent().is_none());
    }

    #[test]
    fn combine_appends_relative_segments() {
        let base = EntityPath::parse("Main:/Plant").unwrap();
        let combined = base.combine("Line1/Status").unwrap();
        assert_eq!(combined.to_string(), "Main:/Plant/Line1/Status");
        assert!(base.combine("//").is_err());
    }

    #[test]
    fn uuid_is_case_insensitive() {
        let a = EntityPath::parse("Main:/Plant/Line1").unwrap();
        let b = EntityPath::parse("main:/plant/line1").unwrap();
        assert_eq!(a.uuid(), b.uuid());
        // The textual form keeps the caller's casing.
        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn uuid_differs_across_namespaces() {
        let a = EntityPath::parse("Main:/Plant").unwrap();
        let b = EntityPath::parse("Debug:/Plant").unwrap();
        assert_ne!(a.uuid(), b.uuid());
    }
}
