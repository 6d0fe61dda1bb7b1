//! Configuration loading and root folder resolution
//!
//! The root folder holds everything FormDrop persists (the SQLite database).
//! Resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `FORMDROP_ROOT` environment variable
//! 3. `config.toml` in the platform config directory
//! 4. OS-dependent default data directory (fallback)

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no CLI argument is given
pub const ROOT_ENV_VAR: &str = "FORMDROP_ROOT";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "formdrop.db";

/// Resolve the root folder from CLI argument, environment, config file,
/// or platform default, in that order.
pub fn resolve_root_folder(cli_arg: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(root_folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent default
    Ok(default_root_folder())
}

/// Ensure the root folder exists, creating it if necessary
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Path of the SQLite database inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DATABASE_FILE)
}

/// Locate the configuration file for the platform
///
/// Linux checks `~/.config/formdrop/config.toml` then
/// `/etc/formdrop/config.toml`; other platforms use the per-user
/// config directory only.
fn find_config_file() -> Result<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("formdrop").join("config.toml")) {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/formdrop/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("formdrop"))
        .unwrap_or_else(|| PathBuf::from("./formdrop_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_takes_priority() {
        let root = resolve_root_folder(Some("/tmp/formdrop-test")).unwrap();
        assert_eq!(root, PathBuf::from("/tmp/formdrop-test"));
    }

    #[test]
    fn database_path_is_inside_root() {
        let root = PathBuf::from("/tmp/formdrop-test");
        assert_eq!(
            database_path(&root),
            PathBuf::from("/tmp/formdrop-test/formdrop.db")
        );
    }
}
