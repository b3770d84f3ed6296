//! Loading mapping catalogs from YAML map files.
//!
//! ```yaml
//! mappings:
//!   - deprecatedAPI: "apiVersion: extensions/v1beta1\nkind: Ingress"
//!     newAPI: "apiVersion: networking.k8s.io/v1\nkind: Ingress"
//!     removedInVersion: "1.22"
//! ```

use std::fs;
use std::path::Path;

use crate::mapping::types::MappingCatalog;

/// Errors raised while reading a map file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse map file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Load a mapping catalog from a YAML file on disk.
pub fn load_mapfile(path: &Path) -> Result<MappingCatalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    let catalog = parse_mapfile(&content)?;
    log::debug!(
        "Loaded {} mappings from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Parse a mapping catalog from YAML text.
pub fn parse_mapfile(content: &str) -> Result<MappingCatalog, CatalogError> {
    Ok(serde_yaml::from_str(content)?)
}
