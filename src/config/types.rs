use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::report::OutputFormat;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Map file to load instead of the built-in catalog
    pub mapfile: Option<PathBuf>,
    /// Kubeconfig context used to query the cluster version
    pub kube_context: Option<String>,
    /// Kubeconfig file used to query the cluster version
    pub kubeconfig: Option<PathBuf>,
    /// Fixed cluster version; skips the cluster lookup when set
    pub kube_version: Option<String>,
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}
