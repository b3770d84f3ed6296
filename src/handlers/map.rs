use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::cluster::{KubeConfig, KubeVersionSource, StaticVersion};
use crate::error::Result;
use crate::report::{self, OutputFormat};
use crate::rewriter::RewriteResult;
use crate::{load_catalog, replace_manifest_unsupported_apis};

/// Options for the `map` command, after merging flags with the config file.
#[derive(Debug, Clone, Default)]
pub struct MapOptions {
    pub manifest: PathBuf,
    pub mapfile: Option<PathBuf>,
    pub kube_version: Option<String>,
    pub kube_config: KubeConfig,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub format: OutputFormat,
}

/// Rewrite a manifest and report what changed.
///
/// The report goes to stderr; the manifest goes to `--output` or stdout.
pub async fn handle_map(options: MapOptions) -> Result<()> {
    let manifest = read_manifest(&options.manifest)?;
    let catalog = load_catalog(options.mapfile.as_deref())?;

    let result = match &options.kube_version {
        Some(version) => {
            replace_manifest_unsupported_apis(&manifest, &catalog, &StaticVersion::new(version.as_str()))
                .await?
        }
        None => {
            let source = KubeVersionSource::new(&options.kube_config).await?;
            replace_manifest_unsupported_apis(&manifest, &catalog, &source).await?
        }
    };

    eprint!("{}", report::format_result_to_string(&result, options.format));
    if options.format == OutputFormat::Json {
        eprintln!();
    }

    write_manifest(&result, &manifest, &options)
}

fn read_manifest(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut manifest = String::new();
        io::stdin().read_to_string(&mut manifest)?;
        return Ok(manifest);
    }
    Ok(fs::read_to_string(path)?)
}

fn write_manifest(result: &RewriteResult, original: &str, options: &MapOptions) -> Result<()> {
    match &options.output {
        Some(path) if !options.dry_run => {
            if result.is_modified(original) {
                log::info!("Writing updated manifest to {}", path.display());
            }
            fs::write(path, &result.manifest)?;
        }
        Some(path) => {
            log::info!("Dry run: {} not written", path.display());
            print_manifest(&result.manifest)?;
        }
        None => print_manifest(&result.manifest)?,
    }
    Ok(())
}

fn print_manifest(manifest: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(manifest.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
