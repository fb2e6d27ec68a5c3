//! # Error Handling
//!
//! Centralized error type for meshwork operations, built with `thiserror`.
//!
//! Configuration problems each get their own variant so callers can match on
//! the exact failure instead of probing message strings, while the `Display`
//! output stays stable because it is part of the observable contract: the
//! validation sequence in [`crate::orchestrator`] is defined by which of
//! these messages surfaces first for a given malformed configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for meshwork operations
#[derive(Error, Debug)]
pub enum Error {
    /// The resolved configuration has no `base` entry.
    #[error("No base package given in configuration")]
    MissingBase,

    /// The resolved configuration has no `modules` entry.
    #[error("No modules list given in configuration")]
    MissingModules,

    /// The `modules` entry is present but is not a JSON array of paths.
    #[error("Modules list must be of type Array")]
    ModulesNotArray,

    /// The `modules` list parsed as an array but holds no entries.
    #[error("Modules list contains no entries")]
    ModulesEmpty,

    /// The resolved `base` path does not exist on disk.
    #[error("Can't find base package: {}", path.display())]
    BaseNotFound { path: PathBuf },

    /// A resolved module path does not exist on disk. Raised mid-batch;
    /// modules merged before this one stay mutated.
    #[error("Can't find module package: {}", path.display())]
    ModuleNotFound { path: PathBuf },

    /// One side of a document merge did not parse as JSON.
    #[error("JSON merge error in {context}: {source}")]
    Merge {
        context: String,
        source: serde_json::Error,
    },

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
