//! Kubernetes version parsing and ordering for mapping decisions.
//!
//! Cluster versions and the effective versions recorded in mapping entries are
//! both read as a single `major.minor` decimal ("1.22" becomes `1.22`) and
//! compared numerically. Map files are authored against this encoding, so the
//! comparison is kept as plain float ordering even though it does not follow
//! semantic versioning once a minor version reaches two digits ("1.9" reads as
//! greater than "1.10").

use std::fmt;
use std::num::ParseFloatError;

/// Error returned when a version string cannot be read as a decimal number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid Kubernetes version '{input}': {reason}")]
pub struct VersionParseError {
    /// The text that failed to parse
    pub input: String,
    /// Why it was rejected
    pub reason: String,
}

impl VersionParseError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Whether a mapping's effective version has been reached by a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// The cluster is at or beyond the effective version
    ApplicableNow,
    /// The cluster predates the effective version
    NotYetApplicable,
}

/// A Kubernetes version in its comparable decimal form.
#[derive(Debug, Clone, PartialEq)]
pub struct KubeVersion {
    raw: String,
    value: f32,
}

impl KubeVersion {
    /// Parse from a string like "1.22".
    ///
    /// The text must be a finite decimal number; a leading `v`, patch
    /// components and surrounding whitespace are all rejected.
    pub fn parse(s: &str) -> Result<Self, VersionParseError> {
        let value: f32 = s
            .parse()
            .map_err(|e: ParseFloatError| VersionParseError::new(s, e.to_string()))?;
        if !value.is_finite() {
            return Err(VersionParseError::new(s, "not a finite number"));
        }
        Ok(Self {
            raw: s.to_string(),
            value,
        })
    }

    /// The numeric value used for ordering.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The text this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for KubeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Decide whether a mapping that takes effect at `effective` applies to a
/// cluster running `cluster`.
pub fn compare(effective: &KubeVersion, cluster: &KubeVersion) -> Applicability {
    if effective.value > cluster.value {
        Applicability::NotYetApplicable
    } else {
        Applicability::ApplicableNow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> KubeVersion {
        KubeVersion::parse(s).unwrap()
    }

    #[test]
    fn test_parse_major_minor() {
        assert_eq!(v("1.22").value(), 1.22_f32);
        assert_eq!(v("1.22").as_str(), "1.22");
        assert_eq!(v("1").value(), 1.0);
    }

    #[test]
    fn test_parse_rejects_non_decimal() {
        for bad in ["not-a-version", "", "v1.22", "1.22.3", " 1.22", "1.22+"] {
            let err = KubeVersion::parse(bad).unwrap_err();
            assert_eq!(err.input, bad);
        }
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(KubeVersion::parse("inf").is_err());
        assert!(KubeVersion::parse("NaN").is_err());
    }

    #[test]
    fn test_compare_gates_on_effective_version() {
        assert_eq!(compare(&v("1.22"), &v("1.21")), Applicability::NotYetApplicable);
        assert_eq!(compare(&v("1.22"), &v("1.22")), Applicability::ApplicableNow);
        assert_eq!(compare(&v("1.22"), &v("1.25")), Applicability::ApplicableNow);
        assert_eq!(compare(&v("1.16"), &v("2.0")), Applicability::ApplicableNow);
    }

    #[test]
    fn test_two_digit_minor_compares_as_decimal() {
        // 1.9 > 1.10 as decimals, so a 1.9 mapping waits on a 1.10 cluster.
        assert_eq!(compare(&v("1.9"), &v("1.10")), Applicability::NotYetApplicable);
        // 1.10 == 1.1 as decimals.
        assert_eq!(compare(&v("1.10"), &v("1.1")), Applicability::ApplicableNow);
        assert_eq!(compare(&v("1.16"), &v("1.22")), Applicability::ApplicableNow);
    }

    #[test]
    fn test_display_keeps_original_text() {
        assert_eq!(v("1.10").to_string(), "1.10");
    }
}
