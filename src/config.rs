//! Run configuration.
//!
//! Configuration is optional and only read from a file the caller names
//! explicitly. Without one, the defaults apply: conflicts abort the run and
//! every top-level entry takes part.
//!
//! # Configuration File Format
//!
//! ```toml
//! [organize]
//! on_conflict = "skip"
//!
//! [filters]
//! include_hidden = false
//!
//! [filters.exclude]
//! names = ["desktop.ini", "Thumbs.db"]
//! patterns = ["*.part", "*.crdownload"]
//! regex = ['^~\$']
//! ```

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or compiling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid configuration in {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("could not read configuration {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidGlobPattern { pattern: String, reason: String },

    #[error("invalid regex pattern '{pattern}': {reason}")]
    InvalidRegexPattern { pattern: String, reason: String },
}

/// What to do when the destination already holds an entry with the same name.
///
/// Overwriting is never an option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Stop the run with a `MoveConflict` error.
    #[default]
    Abort,
    /// Leave the entry where it is, report it, and continue.
    Skip,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeConfig {
    #[serde(default)]
    pub organize: OrganizeRules,
    #[serde(default)]
    pub filters: FilterRules,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeRules {
    #[serde(default)]
    pub on_conflict: ConflictPolicy,
}

/// Which top-level entries take part in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether dot-files and dot-directories are organized. Defaults to true.
    #[serde(default = "default_include_hidden")]
    pub include_hidden: bool,

    #[serde(default)]
    pub exclude: ExcludeRules,
}

fn default_include_hidden() -> bool {
    true
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            include_hidden: default_include_hidden(),
            exclude: ExcludeRules::default(),
        }
    }
}

/// Entries matching any of these stay where they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact entry names.
    #[serde(default)]
    pub names: Vec<String>,

    /// Glob patterns matched against the entry name.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regular expressions matched against the entry name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl OrganizeConfig {
    /// Loads configuration from `config_path`, or returns the defaults when
    /// no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the named file is missing, unreadable, or not
    /// valid TOML for this schema.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Filter rules with every pattern compiled up front.
#[derive(Debug, Clone)]
pub struct EntryFilter {
    include_hidden: bool,
    names: HashSet<String>,
    patterns: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl EntryFilter {
    /// Compiles `rules`.
    ///
    /// # Errors
    ///
    /// Returns an error for the first invalid glob or regex.
    pub fn compile(rules: &FilterRules) -> Result<Self, ConfigError> {
        let patterns = rules
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| ConfigError::InvalidGlobPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_hidden: rules.include_hidden,
            names: rules.exclude.names.iter().cloned().collect(),
            patterns,
            regexes,
        })
    }

    /// Returns true if the top-level entry called `name` takes part in a run.
    pub fn allows(&self, name: &str) -> bool {
        if !self.include_hidden && name.starts_with('.') {
            return false;
        }
        if self.names.contains(name) {
            return false;
        }
        if self.patterns.iter().any(|p| p.matches(name)) {
            return false;
        }
        !self.regexes.iter().any(|r| r.is_match(name))
    }
}

impl Default for EntryFilter {
    /// A filter that allows everything.
    fn default() -> Self {
        Self {
            include_hidden: true,
            names: HashSet::new(),
            patterns: Vec::new(),
            regexes: Vec::new(),
        }
    }
}
