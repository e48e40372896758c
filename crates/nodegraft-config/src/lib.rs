use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid fragment pattern {pattern}: {source}")]
    BadFragmentPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Fragment path {0} is outside the project root")]
    FragmentOutsideRoot(PathBuf),
}

/// Project configuration for one consolidation run.
///
/// `fragments` is an ordered list of relative paths or glob patterns; the
/// layering order (base first, then extensions) is the caller's contract, so
/// entries are resolved in list order and globs expand alphabetically within
/// their entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub module_name: String,
    pub output: RelativePathBuf,
    pub fragments: Vec<String>,
    /// Optional project root override; defaults to the config file's
    /// directory. Supports `~` and environment variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the root override
        config.root = config.root.map(|root| Self::expand_path(&root).unwrap_or(root));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::default_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from("nodegraft.toml")
    }

    /// Resolve the fragment list against the project root, in list order.
    /// Entries containing glob metacharacters expand to their matches
    /// (alphabetical within the entry); plain entries pass through untouched.
    pub fn resolve_fragments(&self, root: &Path) -> Result<Vec<RelativePathBuf>, ConfigError> {
        let mut resolved = Vec::new();
        for entry in &self.fragments {
            if entry.contains(['*', '?', '[']) {
                let pattern = root.join(entry).to_string_lossy().into_owned();
                let matches =
                    glob::glob(&pattern).map_err(|source| ConfigError::BadFragmentPattern {
                        pattern: entry.clone(),
                        source,
                    })?;
                for path in matches.filter_map(Result::ok) {
                    resolved.push(relative_to_root(&path, root)?);
                }
            } else {
                resolved.push(RelativePathBuf::from(entry.as_str()));
            }
        }
        Ok(resolved)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

fn relative_to_root(path: &Path, root: &Path) -> Result<RelativePathBuf, ConfigError> {
    let stripped = path
        .strip_prefix(root)
        .map_err(|_| ConfigError::FragmentOutsideRoot(path.to_path_buf()))?;
    RelativePathBuf::from_path(stripped)
        .map_err(|_| ConfigError::FragmentOutsideRoot(path.to_path_buf()))
}
