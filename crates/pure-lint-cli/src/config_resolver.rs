//! Locating and loading the configuration file.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config <FILE>`
//! 2. `pure-lint.toml`, then `.pure-lint.toml`, in the checked directory
//! 3. `config.toml` in `$PURE_LINT_CONFIG_DIR`, else in `~/.pure-lint/`
//! 4. built-in defaults

use anyhow::{Context, Result};
use pure_lint_core::Config;
use std::path::{Path, PathBuf};

/// Project config names, in priority order.
const PROJECT_CONFIG_NAMES: &[&str] = &["pure-lint.toml", ".pure-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "PURE_LINT_CONFIG_DIR";

/// Origin of the configuration in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Next to the checked sources.
    Project(PathBuf),
    /// From the user's global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The config file, unless defaults are used.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and parses the config file, or returns the defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid configuration.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Resolves the config for checking `target` (a directory or a single file).
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(target, explicit, global_config_dir())
}

fn resolve_with(target: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let project_dir = if target.is_file() {
        target.parent().unwrap_or(target)
    } else {
        target
    };
    let project = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file());
    if let Some(path) = project {
        tracing::debug!("Found project config: {}", path.display());
        return ConfigSource::Project(path);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |path| {
            tracing::debug!("Found global config: {}", path.display());
            ConfigSource::Global(path)
        })
}

/// `$PURE_LINT_CONFIG_DIR`, else `~/.pure-lint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".pure-lint")))
}
