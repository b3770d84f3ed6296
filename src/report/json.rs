//! JSON formatter for rewrite results.
//!
//! Produces machine-readable JSON output.

use serde::Serialize;

use crate::mapping::MappingCatalog;
use crate::rewriter::{OutcomeKind, RewriteResult};

/// JSON output structure for a single entry outcome.
#[derive(Serialize)]
struct JsonOutcome<'a> {
    deprecated_api: &'a str,
    new_api: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    occurrences: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    effective_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

/// JSON output structure for a rewrite.
#[derive(Serialize)]
struct JsonOutput<'a> {
    cluster_version: &'a str,
    applied_count: usize,
    skipped_count: usize,
    outcomes: Vec<JsonOutcome<'a>>,
}

/// Format a rewrite result as JSON.
pub fn format(result: &RewriteResult) -> String {
    let output = JsonOutput {
        cluster_version: result.cluster_version.as_str(),
        applied_count: result.applied_count(),
        skipped_count: result.skipped_count(),
        outcomes: result
            .outcomes
            .iter()
            .map(|o| {
                let (occurrences, effective_version, reason) = match &o.kind {
                    OutcomeKind::Applied {
                        occurrences,
                        effective_version,
                    } => (Some(*occurrences), Some(effective_version.as_str()), None),
                    OutcomeKind::NotYetApplicable { effective_version } => {
                        (None, Some(effective_version.as_str()), None)
                    }
                    OutcomeKind::InvalidVersion {
                        effective_version,
                        reason,
                    } => (None, Some(effective_version.as_str()), Some(reason.as_str())),
                    OutcomeKind::NoMatch => (None, None, None),
                };
                JsonOutcome {
                    deprecated_api: &o.deprecated_api,
                    new_api: &o.new_api,
                    outcome: o.kind.as_str(),
                    occurrences,
                    effective_version,
                    reason,
                }
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Format a mapping catalog as JSON, using the map file field names.
pub fn format_catalog(catalog: &MappingCatalog) -> String {
    serde_json::to_string_pretty(catalog).unwrap_or_else(|_| "{}".to_string())
}
