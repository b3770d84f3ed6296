//! Output formatters for rewrite results.
//!
//! Provides multiple output formats:
//! - Stylish: Human-readable with colors
//! - JSON: Machine-readable format

pub mod json;
pub mod stylish;

use serde::{Deserialize, Serialize};

use crate::mapping::MappingCatalog;
use crate::rewriter::RewriteResult;

/// Output format options.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format with colors
    #[default]
    Stylish,
    /// JSON format for machine parsing
    Json,
}

/// Format a rewrite result to a string.
pub fn format_result_to_string(result: &RewriteResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format(result),
        OutputFormat::Stylish => stylish::format(result),
    }
}

/// Format a mapping catalog listing.
pub fn format_catalog_to_string(catalog: &MappingCatalog, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_catalog(catalog),
        OutputFormat::Stylish => stylish::format_catalog(catalog),
    }
}

/// Collapse a multi-line API snippet onto one line for display.
pub(crate) fn one_line(api: &str) -> String {
    api.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
