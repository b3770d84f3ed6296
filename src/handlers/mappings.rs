use std::path::Path;

use crate::error::Result;
use crate::load_catalog;
use crate::report::{self, OutputFormat};

/// Print the catalog that `map` would use.
pub fn handle_mappings(mapfile: Option<&Path>, format: OutputFormat) -> Result<()> {
    let catalog = load_catalog(mapfile)?;
    print!("{}", report::format_catalog_to_string(&catalog, format));
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
