//! Cluster version lookup.
//!
//! The rewriter only needs a `"<major>.<minor>"` string. Where it comes from is
//! behind [`ClusterVersionSource`]: a fixed value from the command line, or a
//! live API server reached through a kubeconfig.
//!
//! # Example
//!
//! ```rust,ignore
//! use mapkubeapis::cluster::{ClusterVersionSource, KubeConfig, KubeVersionSource};
//!
//! let source = KubeVersionSource::new(&KubeConfig::default()).await?;
//! println!("{}", source.server_version().await?);
//! ```

use std::future::Future;
use std::path::PathBuf;

use kube::{
    Client, Config,
    config::{KubeConfigOptions, Kubeconfig},
};

/// Error type for cluster version lookups.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("Failed to create Kubernetes client: {0}")]
    ClientCreation(#[from] kube::Error),

    #[error("Failed to infer Kubernetes config: {0}")]
    ConfigError(#[from] kube::config::InferConfigError),

    #[error("Failed to read kubeconfig: {0}")]
    KubeconfigError(#[from] kube::config::KubeconfigError),

    #[error("kubernetes cluster unreachable: {0}")]
    Unreachable(String),
}

/// Kubeconfig selection for reaching a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KubeConfig {
    /// Context name; the kubeconfig's current context when unset
    pub context: Option<String>,
    /// Kubeconfig file; the default lookup when unset
    pub file: Option<PathBuf>,
}

/// Something that can report the cluster's `"<major>.<minor>"` version.
pub trait ClusterVersionSource {
    fn server_version(&self) -> impl Future<Output = Result<String, ClusterError>> + Send;
}

/// A version supplied up front, e.g. from `--kube-version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticVersion(pub String);

impl StaticVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl ClusterVersionSource for StaticVersion {
    async fn server_version(&self) -> Result<String, ClusterError> {
        Ok(self.0.clone())
    }
}

/// Reads the version from a live API server.
pub struct KubeVersionSource {
    client: Client,
}

impl KubeVersionSource {
    /// Build a client from the given kubeconfig selection.
    pub async fn new(kube_config: &KubeConfig) -> Result<Self, ClusterError> {
        // Install rustls crypto provider (required for TLS connections to K8s API)
        let _ = rustls::crypto::ring::default_provider().install_default();

        let config = match (&kube_config.file, &kube_config.context) {
            (None, None) => Config::infer().await?,
            (file, context) => {
                let kubeconfig = match file {
                    Some(path) => Kubeconfig::read_from(path)?,
                    None => Kubeconfig::read()?,
                };
                Config::from_custom_kubeconfig(
                    kubeconfig,
                    &KubeConfigOptions {
                        context: context.clone(),
                        ..Default::default()
                    },
                )
                .await?
            }
        };
        let client = Client::try_from(config)?;
        Ok(Self { client })
    }
}

impl ClusterVersionSource for KubeVersionSource {
    async fn server_version(&self) -> Result<String, ClusterError> {
        let info = self
            .client
            .apiserver_version()
            .await
            .map_err(|e| ClusterError::Unreachable(e.to_string()))?;
        log::debug!(
            "API server reported major='{}' minor='{}' ({})",
            info.major,
            info.minor,
            info.git_version
        );
        Ok(normalize_server_version(&info.major, &info.minor))
    }
}

/// Join version components as `"<major>.<minor>"`.
///
/// Managed clusters report components such as `"22+"`; a trailing non-digit
/// suffix is dropped. A component without leading digits is kept verbatim so
/// that parsing fails instead of guessing.
pub fn normalize_server_version(major: &str, minor: &str) -> String {
    format!("{}.{}", leading_digits(major), leading_digits(minor))
}

fn leading_digits(component: &str) -> &str {
    let component = component.trim();
    let end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    if end == 0 { component } else { &component[..end] }
}
