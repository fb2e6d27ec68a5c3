//! # Configuration Schema and Resolution
//!
//! This module defines the typed configuration records for meshwork and the
//! resolution logic that layers the three possible sources into one
//! [`Config`]:
//!
//! 1. Built-in defaults (`configFile = "meshwork.json"`, `verbose = false`).
//! 2. Caller-supplied [`Options`] (CLI flags or library arguments).
//! 3. An on-disk JSON configuration file.
//!
//! Precedence is deliberate and wholesale: when the resolved configuration
//! file exists, its contents *replace* the caller options entirely — `base`
//! and `modules` come only from the file, and the only layering that still
//! applies is the serde default for fields the file leaves unset. When the
//! file does not exist, the caller options (over defaults) are the
//! configuration verbatim.
//!
//! Resolution performs no existence checks for `base` or `modules`; those
//! belong to the orchestrator's validation sequence.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Well-known configuration file name, resolved against the current
/// working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "meshwork.json";

/// Caller-supplied options, prior to resolution. All fields are optional;
/// anything unset falls back to the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Path to the on-disk configuration file (default `meshwork.json`).
    pub config_file: Option<PathBuf>,
    /// Path to the base package whose fields are propagated.
    pub base: Option<PathBuf>,
    /// Target module packages, in merge order.
    pub modules: Option<Vec<PathBuf>>,
    /// Print diagnostics as operations occur.
    pub verbose: bool,
}

/// The `modules` entry of a configuration document.
///
/// Parsed untagged so that a non-array value (a string, a mapping, a list
/// with non-string entries) is still representable and can be rejected
/// later, in validation order, rather than failing the parse itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ModulesField {
    /// A proper list of module paths.
    List(Vec<PathBuf>),
    /// Any other JSON shape; rejected during validation.
    Other(serde_json::Value),
}

/// The resolved, not-yet-validated configuration for one invocation.
///
/// Read-only once validation begins; discarded at the end of the run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path to the base package whose fields are propagated.
    #[serde(default)]
    pub base: Option<PathBuf>,
    /// Target module packages, in merge order.
    #[serde(default)]
    pub modules: Option<ModulesField>,
    /// Print diagnostics as operations occur.
    #[serde(default)]
    pub verbose: bool,
}

/// Resolve caller options into a configuration record.
///
/// The configuration-file path is made absolute against the current working
/// directory before its existence is checked. A file that exists but holds
/// malformed JSON is a fatal parse error here, before any validation.
///
/// # Errors
///
/// Returns `Error::Io` if the current directory cannot be determined or the
/// file cannot be read, and `Error::Json` if the file is not valid JSON.
pub fn resolve(opts: Options) -> Result<Config> {
    let config_file = opts
        .config_file
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config_file = absolute_path(&config_file)?;

    if config_file.exists() {
        log::debug!("loading configuration from {}", config_file.display());
        let raw = fs::read_to_string(&config_file)?;
        let config: Config = serde_json::from_str(&raw)?;
        return Ok(config);
    }

    Ok(Config {
        base: opts.base,
        modules: opts.modules.map(ModulesField::List),
        verbose: opts.verbose,
    })
}

/// Resolve a path to absolute form against the current working directory.
pub(crate) fn absolute_path(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}
