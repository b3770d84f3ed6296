//! Stylish formatter for rewrite results.
//!
//! Produces human-readable colored output, one line per catalog entry that
//! matched the manifest.

use crate::mapping::MappingCatalog;
use crate::report::one_line;
use crate::rewriter::{OutcomeKind, RewriteResult};

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";
}

/// Format a rewrite result in stylish format.
pub fn format(result: &RewriteResult) -> String {
    let mut output = format!(
        "{}Kubernetes server version {}{}\n",
        colors::BOLD,
        result.cluster_version,
        colors::RESET
    );

    let mut no_match = 0;
    for outcome in &result.outcomes {
        let (color, detail) = match &outcome.kind {
            OutcomeKind::Applied {
                occurrences,
                effective_version,
            } => (
                colors::GREEN,
                format!(
                    "{} occurrence{}, effective {}",
                    occurrences,
                    if *occurrences == 1 { "" } else { "s" },
                    effective_version
                ),
            ),
            OutcomeKind::NotYetApplicable { effective_version } => {
                (colors::YELLOW, format!("not valid until {}", effective_version))
            }
            OutcomeKind::InvalidVersion {
                effective_version,
                reason,
            } => (
                colors::RED,
                format!("bad version '{}': {}", effective_version, reason),
            ),
            OutcomeKind::NoMatch => {
                no_match += 1;
                continue;
            }
        };

        output.push_str(&format!(
            "  {}{:<18}{}  {} -> {}  {}({}){}\n",
            color,
            outcome.kind.as_str(),
            colors::RESET,
            one_line(&outcome.deprecated_api),
            one_line(&outcome.new_api),
            colors::DIM,
            detail,
            colors::RESET
        ));
    }

    output.push_str(&format!(
        "\n{}{} applied, {} skipped, {} without match{}\n",
        colors::BOLD,
        result.applied_count(),
        result.skipped_count(),
        no_match,
        colors::RESET
    ));
    output
}

/// Format a mapping catalog as a listing.
pub fn format_catalog(catalog: &MappingCatalog) -> String {
    if catalog.is_empty() {
        return "No mappings defined\n".to_string();
    }

    let mut output = String::new();
    for entry in catalog {
        let version = entry.effective_version();
        output.push_str(&format!(
            "{}{:<6}{}  {} -> {}\n",
            colors::BOLD,
            if version.is_empty() { "-" } else { version },
            colors::RESET,
            one_line(&entry.deprecated_api),
            one_line(&entry.new_api)
        ));
    }
    output
}
