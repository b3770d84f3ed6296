//! # mapkubeapis
//!
//! Rewrites Kubernetes manifests so that API versions which are deprecated or
//! removed in the target cluster's Kubernetes version are replaced with their
//! supported successors.
//!
//! ## Features
//!
//! - **Version-aware**: A mapping is only applied once the cluster has reached
//!   the Kubernetes version where the change took effect
//! - **Textual**: The manifest is rewritten as text, so templates and comments
//!   survive untouched
//! - **Pluggable inputs**: Mappings come from a YAML map file or the built-in
//!   catalog; the cluster version comes from a live cluster or a fixed value
//! - **Outcome log**: Every mapping reports whether it was applied, skipped or
//!   did not match
//!
//! ## Example
//!
//! ```rust
//! use mapkubeapis::mapping::{MappingCatalog, MappingEntry};
//! use mapkubeapis::rewrite;
//!
//! let catalog = MappingCatalog::new(vec![
//!     MappingEntry::new("extensions/v1beta1", "networking.k8s.io/v1").removed_in("1.22"),
//! ]);
//! let result = rewrite("kind: Ingress\napiVersion: extensions/v1beta1", &catalog, "1.23").unwrap();
//! assert_eq!(result.manifest, "kind: Ingress\napiVersion: networking.k8s.io/v1");
//! ```

pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod report;
pub mod rewriter;
pub mod version;

use std::path::Path;

// Re-export commonly used types and functions
pub use cluster::{ClusterVersionSource, KubeConfig, StaticVersion};
pub use error::{MapkubeapisError, Result};
pub use mapping::{MappingCatalog, MappingEntry};
pub use rewriter::{EntryOutcome, OutcomeKind, RewriteResult, rewrite};
pub use version::{KubeVersion, VersionParseError};

use cli::Commands;
use config::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load the catalog from `mapfile`, or the built-in catalog when unset.
pub fn load_catalog(mapfile: Option<&Path>) -> Result<MappingCatalog> {
    match mapfile {
        Some(path) => mapping::load_mapfile(path).map_err(|source| {
            MapkubeapisError::CatalogUnavailable {
                path: path.to_path_buf(),
                source,
            }
        }),
        None => Ok(mapping::builtin_catalog()),
    }
}

/// Rewrite `manifest` for the cluster reported by `source`.
///
/// Both an unreachable cluster and an unparseable version abort the rewrite.
pub async fn replace_manifest_unsupported_apis<S: ClusterVersionSource>(
    manifest: &str,
    catalog: &MappingCatalog,
    source: &S,
) -> Result<RewriteResult> {
    let cluster_version = source.server_version().await?;
    log::info!("Kubernetes server version: '{}'", cluster_version);

    let result = rewrite(manifest, catalog, &cluster_version)?;
    log::info!(
        "{} of {} mappings applied",
        result.applied_count(),
        catalog.len()
    );
    Ok(result)
}

pub async fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Map {
            manifest,
            mapfile,
            kube_version,
            kube_context,
            kubeconfig,
            output,
            dry_run,
            format,
        } => {
            let options = handlers::MapOptions {
                manifest,
                mapfile: mapfile.or_else(|| config.mapfile.clone()),
                kube_version: kube_version.or_else(|| config.kube_version.clone()),
                kube_config: KubeConfig {
                    context: kube_context.or_else(|| config.kube_context.clone()),
                    file: kubeconfig.or_else(|| config.kubeconfig.clone()),
                },
                output,
                dry_run,
                format: format.unwrap_or(config.output.format),
            };
            handlers::handle_map(options).await
        }
        Commands::Mappings { mapfile, format } => {
            let mapfile = mapfile.or_else(|| config.mapfile.clone());
            handlers::handle_mappings(mapfile.as_deref(), format.unwrap_or(config.output.format))
        }
    }
}
