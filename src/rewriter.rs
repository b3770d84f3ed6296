//! Version-aware rewriting of deprecated API references in manifests.
//!
//! The manifest is treated as opaque text. Each catalog entry is applied in
//! order with a literal, case-sensitive global replace, so later entries see
//! the text produced by earlier ones. A replacement is only kept when the
//! cluster has reached the entry's effective version.

use std::fmt;

use crate::mapping::{MappingCatalog, MappingEntry};
use crate::version::{self, Applicability, KubeVersion, VersionParseError};

/// What happened to a single catalog entry during a rewrite.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeKind {
    /// The deprecated API was found and replaced
    Applied {
        occurrences: usize,
        effective_version: String,
    },
    /// The deprecated API was found but the cluster predates the change
    NotYetApplicable { effective_version: String },
    /// The deprecated API was found but the entry's version could not be parsed
    InvalidVersion {
        effective_version: String,
        reason: String,
    },
    /// The deprecated API does not occur in the manifest
    NoMatch,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied { .. } => "applied",
            Self::NotYetApplicable { .. } => "not-yet-applicable",
            Self::InvalidVersion { .. } => "invalid-version",
            Self::NoMatch => "no-match",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome for one catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryOutcome {
    pub deprecated_api: String,
    pub new_api: String,
    pub kind: OutcomeKind,
}

impl EntryOutcome {
    fn new(entry: &MappingEntry, kind: OutcomeKind) -> Self {
        Self {
            deprecated_api: entry.deprecated_api.clone(),
            new_api: entry.new_api.clone(),
            kind,
        }
    }
}

/// The rewritten manifest plus one outcome per catalog entry, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteResult {
    pub manifest: String,
    pub cluster_version: KubeVersion,
    pub outcomes: Vec<EntryOutcome>,
}

impl RewriteResult {
    /// Entries whose substitution was kept.
    pub fn applied(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.kind, OutcomeKind::Applied { .. }))
    }

    /// Entries that matched but were not applied.
    pub fn skipped(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| {
            matches!(
                o.kind,
                OutcomeKind::NotYetApplicable { .. } | OutcomeKind::InvalidVersion { .. }
            )
        })
    }

    pub fn applied_count(&self) -> usize {
        self.applied().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    /// Whether the rewritten manifest differs from `original`.
    pub fn is_modified(&self, original: &str) -> bool {
        self.manifest != original
    }
}

/// Rewrite `manifest`, replacing deprecated APIs from `catalog` that are in
/// effect on a cluster running `cluster_version`.
///
/// Fails only when `cluster_version` cannot be parsed; per-entry problems are
/// reported in the outcome log and the remaining entries are still applied.
pub fn rewrite(
    manifest: &str,
    catalog: &MappingCatalog,
    cluster_version: &str,
) -> Result<RewriteResult, VersionParseError> {
    let cluster = KubeVersion::parse(cluster_version)?;
    log::debug!(
        "Kubernetes server version: '{}', parsed as {}",
        cluster,
        cluster.value()
    );

    let mut current = manifest.to_string();
    let mut outcomes = Vec::with_capacity(catalog.len());

    for entry in catalog {
        let kind = apply_entry(&mut current, entry, &cluster);
        outcomes.push(EntryOutcome::new(entry, kind));
    }

    Ok(RewriteResult {
        manifest: current,
        cluster_version: cluster,
        outcomes,
    })
}

fn apply_entry(current: &mut String, entry: &MappingEntry, cluster: &KubeVersion) -> OutcomeKind {
    let deprecated = entry.deprecated_api.as_str();
    if deprecated.is_empty() {
        log::warn!("Skipping mapping with an empty deprecated API");
        return OutcomeKind::NoMatch;
    }

    let occurrences = current.matches(deprecated).count();
    if occurrences == 0 {
        return OutcomeKind::NoMatch;
    }
    let candidate = current.replace(deprecated, &entry.new_api);
    if candidate == *current {
        return OutcomeKind::NoMatch;
    }

    log::info!(
        "Found deprecated or removed Kubernetes API:\n\"{}\"\nSupported API equivalent:\n\"{}\"",
        deprecated,
        entry.new_api
    );

    let effective_version = entry.effective_version().to_string();
    let effective = match KubeVersion::parse(&effective_version) {
        Ok(v) => v,
        Err(e) => {
            log::warn!(
                "Failed to get the deprecated or removed Kubernetes version for API \"{}\": {}",
                deprecated,
                e
            );
            return OutcomeKind::InvalidVersion {
                effective_version,
                reason: e.reason,
            };
        }
    };

    match version::compare(&effective, cluster) {
        Applicability::NotYetApplicable => {
            log::info!(
                "API \"{}\" does not require mapping yet: not valid until Kubernetes '{}' (current: '{}')",
                deprecated,
                effective,
                cluster
            );
            OutcomeKind::NotYetApplicable { effective_version }
        }
        Applicability::ApplicableNow => {
            *current = candidate;
            OutcomeKind::Applied {
                occurrences,
                effective_version,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(deprecated: &str, new: &str, version: &str) -> MappingEntry {
        MappingEntry::new(deprecated, new).deprecated_in(version)
    }

    fn catalog(entries: Vec<MappingEntry>) -> MappingCatalog {
        MappingCatalog::new(entries)
    }

    #[test]
    fn test_end_to_end_ingress() {
        let manifest = "kind: Ingress\napiVersion: extensions/v1beta1";
        let catalog = catalog(vec![
            MappingEntry::new("extensions/v1beta1", "networking.k8s.io/v1").removed_in("1.22"),
        ]);

        let result = rewrite(manifest, &catalog, "1.23").unwrap();
        assert_eq!(result.manifest, "kind: Ingress\napiVersion: networking.k8s.io/v1");
        assert_eq!(
            result.outcomes[0].kind,
            OutcomeKind::Applied {
                occurrences: 1,
                effective_version: "1.22".to_string()
            }
        );
        assert!(result.is_modified(manifest));
    }

    #[test]
    fn test_empty_catalog_returns_manifest_unchanged() {
        let result = rewrite("apiVersion: v1\nkind: Pod", &MappingCatalog::default(), "1.20").unwrap();
        assert_eq!(result.manifest, "apiVersion: v1\nkind: Pod");
        assert!(result.outcomes.is_empty());
    }

    #[test]
    fn test_empty_manifest_yields_no_matches() {
        let catalog = catalog(vec![entry("v1beta1", "v1", "1.22"), entry("a", "b", "1.0")]);
        let result = rewrite("", &catalog, "1.25").unwrap();
        assert_eq!(result.manifest, "");
        assert_eq!(result.outcomes.len(), 2);
        assert!(result.outcomes.iter().all(|o| o.kind == OutcomeKind::NoMatch));
    }

    #[test]
    fn test_version_gating() {
        let catalog = catalog(vec![entry("v1beta1", "v1", "1.22")]);
        let manifest = "apiVersion: apps/v1beta1";

        let result = rewrite(manifest, &catalog, "1.21").unwrap();
        assert_eq!(result.manifest, manifest);
        assert_eq!(
            result.outcomes[0].kind,
            OutcomeKind::NotYetApplicable {
                effective_version: "1.22".to_string()
            }
        );
        assert_eq!(result.skipped_count(), 1);

        for cluster in ["1.22", "1.25"] {
            let result = rewrite(manifest, &catalog, cluster).unwrap();
            assert_eq!(result.manifest, "apiVersion: apps/v1");
            assert_eq!(result.applied_count(), 1);
        }
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let manifest = "apiVersion: extensions/v1beta1\n---\napiVersion: extensions/v1beta1\n";
        let catalog = catalog(vec![entry("extensions/v1beta1", "apps/v1", "1.16")]);
        let result = rewrite(manifest, &catalog, "1.16").unwrap();
        assert_eq!(result.manifest, "apiVersion: apps/v1\n---\napiVersion: apps/v1\n");
        assert_eq!(
            result.outcomes[0].kind,
            OutcomeKind::Applied {
                occurrences: 2,
                effective_version: "1.16".to_string()
            }
        );
    }

    #[test]
    fn test_later_entries_see_earlier_rewrites() {
        let a = entry("apps/v1beta1", "apps/v1beta2", "1.0");
        let b = entry("apps/v1beta2", "apps/v1", "1.16");
        let manifest = "apiVersion: apps/v1beta1";

        let forward = rewrite(manifest, &catalog(vec![a.clone(), b.clone()]), "1.16").unwrap();
        assert_eq!(forward.manifest, "apiVersion: apps/v1");
        assert_eq!(forward.applied_count(), 2);

        let reversed = rewrite(manifest, &catalog(vec![b, a]), "1.16").unwrap();
        assert_eq!(reversed.manifest, "apiVersion: apps/v1beta2");
        assert_eq!(reversed.outcomes[0].kind, OutcomeKind::NoMatch);
    }

    #[test]
    fn test_invalid_cluster_version_is_fatal() {
        let catalog = catalog(vec![entry("v1beta1", "v1", "1.22")]);
        let err = rewrite("apiVersion: v1beta1", &catalog, "not-a-version").unwrap_err();
        assert_eq!(err.input, "not-a-version");
    }

    #[test]
    fn test_invalid_entry_version_is_skipped() {
        let catalog = catalog(vec![
            entry("extensions/v1beta1", "apps/v1", "one-point-sixteen"),
            entry("batch/v1beta1", "batch/v1", "1.21"),
        ]);
        let manifest = "apiVersion: extensions/v1beta1\n---\napiVersion: batch/v1beta1\n";

        let result = rewrite(manifest, &catalog, "1.25").unwrap();
        assert_eq!(
            result.manifest,
            "apiVersion: extensions/v1beta1\n---\napiVersion: batch/v1\n"
        );
        assert!(matches!(
            &result.outcomes[0].kind,
            OutcomeKind::InvalidVersion { effective_version, .. } if effective_version == "one-point-sixteen"
        ));
        assert_eq!(result.applied_count(), 1);
    }

    #[test]
    fn test_entry_without_versions_is_invalid_when_matched() {
        let catalog = catalog(vec![MappingEntry::new("v1beta1", "v1")]);
        let result = rewrite("v1beta1", &catalog, "1.25").unwrap();
        assert_eq!(result.manifest, "v1beta1");
        assert!(matches!(result.outcomes[0].kind, OutcomeKind::InvalidVersion { .. }));
    }

    #[test]
    fn test_unmatched_entry_with_bad_version_is_no_match() {
        let catalog = catalog(vec![entry("absent", "present", "garbage")]);
        let result = rewrite("apiVersion: v1", &catalog, "1.25").unwrap();
        assert_eq!(result.outcomes[0].kind, OutcomeKind::NoMatch);
    }

    #[test]
    fn test_empty_deprecated_api_never_matches() {
        let catalog = catalog(vec![entry("", "x", "1.0")]);
        let result = rewrite("abc", &catalog, "1.25").unwrap();
        assert_eq!(result.manifest, "abc");
        assert_eq!(result.outcomes[0].kind, OutcomeKind::NoMatch);
    }

    #[test]
    fn test_identity_mapping_is_no_match() {
        let catalog = catalog(vec![entry("apps/v1", "apps/v1", "1.0")]);
        let result = rewrite("apiVersion: apps/v1", &catalog, "1.25").unwrap();
        assert_eq!(result.outcomes[0].kind, OutcomeKind::NoMatch);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let catalog = catalog(vec![entry("Extensions/V1beta1", "apps/v1", "1.16")]);
        let result = rewrite("apiVersion: extensions/v1beta1", &catalog, "1.25").unwrap();
        assert_eq!(result.manifest, "apiVersion: extensions/v1beta1");
    }

    #[test]
    fn test_substring_of_unrelated_text_is_replaced() {
        let catalog = catalog(vec![entry("v1beta1", "v1", "1.22")]);
        let result = rewrite("description: uses v1beta1 today", &catalog, "1.22").unwrap();
        assert_eq!(result.manifest, "description: uses v1 today");
    }

    #[test]
    fn test_two_digit_minor_cluster_against_single_digit_entry() {
        // Decimal ordering: 1.9 > 1.10, so the mapping is held back.
        let catalog = catalog(vec![entry("apps/v1beta2", "apps/v1", "1.9")]);
        let result = rewrite("apps/v1beta2", &catalog, "1.10").unwrap();
        assert_eq!(result.manifest, "apps/v1beta2");
        assert!(matches!(result.outcomes[0].kind, OutcomeKind::NotYetApplicable { .. }));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(OutcomeKind::NoMatch.to_string(), "no-match");
        assert_eq!(
            OutcomeKind::NotYetApplicable {
                effective_version: "1.22".into()
            }
            .as_str(),
            "not-yet-applicable"
        );
    }

    fn arb_manifest() -> impl Strategy<Value = String> {
        let chunk = prop_oneof![
            Just("extensions/v1beta1"),
            Just("apiVersion: "),
            Just("kind: Ingress\n"),
            Just("metadata:\n  name: web\n"),
            Just("---\n"),
            Just("x"),
        ];
        prop::collection::vec(chunk, 0..16).prop_map(|chunks| chunks.concat())
    }

    proptest! {
        #[test]
        fn prop_empty_catalog_is_identity(manifest in ".{0,64}", minor in 0u32..40) {
            let cluster = format!("1.{}", minor);
            let result = rewrite(&manifest, &MappingCatalog::default(), &cluster).unwrap();
            prop_assert_eq!(result.manifest, manifest);
            prop_assert!(result.outcomes.is_empty());
        }

        #[test]
        fn prop_rewrite_is_idempotent(manifest in arb_manifest(), minor in 15u32..30) {
            let catalog = catalog(vec![
                MappingEntry::new("extensions/v1beta1", "networking.k8s.io/v1").removed_in("1.22"),
            ]);
            let cluster = format!("1.{}", minor);
            let once = rewrite(&manifest, &catalog, &cluster).unwrap();
            let twice = rewrite(&once.manifest, &catalog, &cluster).unwrap();
            prop_assert_eq!(&twice.manifest, &once.manifest);
            prop_assert!(!twice.is_modified(&once.manifest));
        }

        #[test]
        fn prop_only_deprecated_text_changes(manifest in arb_manifest()) {
            let catalog = catalog(vec![
                MappingEntry::new("extensions/v1beta1", "networking.k8s.io/v1").removed_in("1.22"),
            ]);
            let result = rewrite(&manifest, &catalog, "1.22").unwrap();
            prop_assert_eq!(result.manifest, manifest.replace("extensions/v1beta1", "networking.k8s.io/v1"));
        }
    }
}
