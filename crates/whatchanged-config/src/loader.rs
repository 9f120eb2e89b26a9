//! Locating and reading `whatchanged.toml`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Config, ConfigError, ConfigResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "whatchanged.toml";

/// Reads, parses and validates the configuration at `path`.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, not TOML, or invalid.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    debug!(?path, "loading configuration");
    let config: Config = toml::from_str(&std::fs::read_to_string(path)?)?;
    config.validate()?;
    Ok(config)
}

/// Returns the nearest `whatchanged.toml` in `start_dir` or one of its ancestors.
pub fn discover_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Loads the nearest configuration file above `start_dir`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no ancestor holds a configuration file,
/// or any error from [`load_config`].
pub fn find_and_load_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<Config> {
    let start_dir = start_dir.as_ref();
    let path = discover_config(start_dir)
        .ok_or_else(|| ConfigError::NotFound(start_dir.join(CONFIG_FILE_NAME)))?;
    load_config(path)
}

/// Loads the explicit file if given, otherwise the nearest one above `start_dir`.
///
/// An explicit path must exist. Without one, a missing file means defaults.
///
/// # Errors
///
/// Returns an error if a file is found but cannot be read, parsed or validated.
pub fn load_or_default(explicit: Option<&Path>, start_dir: impl AsRef<Path>) -> ConfigResult<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match discover_config(start_dir.as_ref()) {
        Some(path) => load_config(path),
        None => {
            debug!("no configuration file, using defaults");
            Ok(Config::default())
        }
    }
}
