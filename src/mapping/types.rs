//! Mapping entry and catalog types.
//!
//! A catalog is read-only once loaded and can be shared between rewrites.

use serde::{Deserialize, Serialize};

/// A rule pairing a deprecated API string with its supported replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Text to search for in the manifest (e.g., "apiVersion: extensions/v1beta1")
    #[serde(rename = "deprecatedAPI")]
    pub deprecated_api: String,
    /// Replacement text
    #[serde(rename = "newAPI")]
    pub new_api: String,
    /// Kubernetes version where the deprecated API was deprecated
    #[serde(
        rename = "deprecatedInVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub deprecated_in_version: Option<String>,
    /// Kubernetes version where the deprecated API was removed
    #[serde(
        rename = "removedInVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub removed_in_version: Option<String>,
}

impl MappingEntry {
    pub fn new(deprecated_api: impl Into<String>, new_api: impl Into<String>) -> Self {
        Self {
            deprecated_api: deprecated_api.into(),
            new_api: new_api.into(),
            deprecated_in_version: None,
            removed_in_version: None,
        }
    }

    /// Set the deprecation version.
    pub fn deprecated_in(mut self, version: impl Into<String>) -> Self {
        self.deprecated_in_version = Some(version.into());
        self
    }

    /// Set the removal version.
    pub fn removed_in(mut self, version: impl Into<String>) -> Self {
        self.removed_in_version = Some(version.into());
        self
    }

    /// The version from which substitution applies.
    ///
    /// A non-empty deprecation version wins; otherwise the removal version is
    /// used, and an entry with neither yields an empty string.
    pub fn effective_version(&self) -> &str {
        match self.deprecated_in_version.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => self.removed_in_version.as_deref().unwrap_or_default(),
        }
    }
}

/// Ordered collection of mapping entries. Order is application order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingCatalog {
    #[serde(default)]
    pub mappings: Vec<MappingEntry>,
}

impl MappingCatalog {
    pub fn new(mappings: Vec<MappingEntry>) -> Self {
        Self { mappings }
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingEntry> {
        self.mappings.iter()
    }
}

impl FromIterator<MappingEntry> for MappingCatalog {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MappingCatalog {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.mappings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_version_prefers_deprecation() {
        let entry = MappingEntry::new("a", "b")
            .deprecated_in("1.14")
            .removed_in("1.22");
        assert_eq!(entry.effective_version(), "1.14");
    }

    #[test]
    fn test_effective_version_falls_back_to_removal() {
        let entry = MappingEntry::new("a", "b").removed_in("1.22");
        assert_eq!(entry.effective_version(), "1.22");

        let entry = MappingEntry::new("a", "b")
            .deprecated_in("")
            .removed_in("1.25");
        assert_eq!(entry.effective_version(), "1.25");
    }

    #[test]
    fn test_effective_version_empty_when_unset() {
        assert_eq!(MappingEntry::new("a", "b").effective_version(), "");
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog: MappingCatalog = ["x", "y", "z"]
            .into_iter()
            .map(|s| MappingEntry::new(s, "n"))
            .collect();
        let names: Vec<_> = catalog.iter().map(|e| e.deprecated_api.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(catalog.len(), 3);
    }
}
