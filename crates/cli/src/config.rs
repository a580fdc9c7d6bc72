// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading for `retest.toml`.
//!
//! All settings have defaults so a project without a config file still works.
//! Unknown top-level keys produce a warning, not an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default coverage ignore pattern.
///
/// Excludes vendored code, test fixtures, generated code, non-executable
/// config/markup files, and temporary-directory paths.
pub const DEFAULT_COVERAGE_IGNORE: &str =
    r"(?:/vendor/|/fixtures/|/generated/|\.ya?ml$|\.xml$|/tmp/)";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub runner: RunnerConfig,
    pub coverage: CoverageConfig,
}

/// Project layout settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory scanned for test files, relative to the project root.
    #[serde(default = "ProjectConfig::default_test_dir")]
    pub test_dir: PathBuf,

    /// File-name glob a test file must match.
    #[serde(default = "ProjectConfig::default_pattern")]
    pub pattern: String,

    /// Directory holding the failure status file, relative to the project root.
    #[serde(default = "ProjectConfig::default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            test_dir: Self::default_test_dir(),
            pattern: Self::default_pattern(),
            cache_dir: Self::default_cache_dir(),
        }
    }
}

impl ProjectConfig {
    pub(crate) fn default_test_dir() -> PathBuf {
        PathBuf::from("tests")
    }

    pub(crate) fn default_pattern() -> String {
        "*Test.*".to_string()
    }

    pub(crate) fn default_cache_dir() -> PathBuf {
        PathBuf::from(".retest")
    }
}

/// External harness settings.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Interpreter command a test file is passed to, e.g. `["sh"]` or
    /// `["python", "-u"]`. Empty means the file is executed directly.
    pub command: Vec<String>,
}

/// Coverage collection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Regex matched against normalized file paths; matching files are
    /// dropped from coverage data.
    #[serde(default = "CoverageConfig::default_ignore")]
    pub ignore: String,

    /// Optional path substring; when set, only files containing it are kept.
    pub folder: Option<String>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self { ignore: Self::default_ignore(), folder: None }
    }
}

impl CoverageConfig {
    pub(crate) fn default_ignore() -> String {
        DEFAULT_COVERAGE_IGNORE.to_string()
    }
}

/// A resolved project: root directory plus loaded configuration.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory all configured relative paths resolve against.
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    /// Resolve the project for `cwd`.
    ///
    /// An explicit config path wins; otherwise retest.toml is discovered by
    /// walking up to the git root, and defaults apply when none exists.
    pub fn resolve(cwd: &Path, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => {
                let config = load(path)?;
                let root = path
                    .parent()
                    .filter(|parent| !parent.as_os_str().is_empty())
                    .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
                Ok(Self { root, config })
            }
            None => match crate::discovery::find_config(cwd) {
                Some(path) => {
                    let config = load(&path)?;
                    let root = path
                        .parent()
                        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
                    Ok(Self { root, config })
                }
                None => Ok(Self { root: cwd.to_path_buf(), config: Config::default() }),
            },
        }
    }

    /// Absolute test directory.
    pub fn test_dir(&self) -> PathBuf {
        self.root.join(&self.config.project.test_dir)
    }

    /// Absolute path of the failure status file.
    pub fn status_path(&self) -> PathBuf {
        self.root
            .join(&self.config.project.cache_dir)
            .join(crate::status::STATUS_FILE_NAME)
    }
}

/// Load configuration from a file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    warn_unknown_keys(path, &content);
    Ok(config)
}

/// Warn about unrecognized top-level sections.
///
/// Deserialization ignores unknown fields, so a typo like `[projetc]` would
/// otherwise silently fall back to defaults.
fn warn_unknown_keys(path: &Path, content: &str) {
    const KNOWN: &[&str] = &["project", "runner", "coverage", "version"];

    let Ok(value) = content.parse::<toml::Table>() else {
        return;
    };
    for key in value.keys() {
        if !KNOWN.contains(&key.as_str()) {
            tracing::warn!("unknown key `{}` in {}", key, path.display());
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
