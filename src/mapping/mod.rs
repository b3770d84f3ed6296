//! Deprecated API mapping data.
//!
//! This module provides:
//! - The mapping entry and catalog types
//! - Loading a catalog from a YAML map file
//! - A built-in catalog of well-known Kubernetes API removals

pub mod builtin;
pub mod loader;
pub mod types;

pub use builtin::builtin_catalog;
pub use loader::{CatalogError, load_mapfile, parse_mapfile};
pub use types::{MappingCatalog, MappingEntry};
