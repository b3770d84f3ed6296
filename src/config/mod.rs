pub mod types;

use crate::error::{MapkubeapisError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{Config, OutputConfig};

const CONFIG_FILE_NAME: &str = ".mapkubeapis.toml";

/// Get the global config file path (~/.mapkubeapis.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (dir/.mapkubeapis.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from an explicit file, or search for one.
///
/// An explicit file must exist and parse. Otherwise the current directory is
/// checked first, then the home directory, then defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    load_config_in(explicit, &cwd, global_config_path())
}

fn load_config_in(explicit: Option<&Path>, local_dir: &Path, global: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let candidates = std::iter::once(local_config_path(local_dir)).chain(global);
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match read_config(&path) {
            Ok(config) => return Ok(config),
            Err(e) => log::warn!("Ignoring config file {}: {}", path.display(), e),
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        MapkubeapisError::Config(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config = toml::from_str(&content).map_err(|e| {
        MapkubeapisError::Config(format!("cannot parse {}: {}", path.display(), e))
    })?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}
