//! # Meshwork
//!
//! Meshwork propagates a base `package.json` into a set of module package
//! files in a multi-package workspace. Shared fields from the base are added
//! to each module; module-specific fields always win on collision. It is
//! used to keep canonical metadata synchronized across many independently
//! versioned manifests.
//!
//! ## Quick Example
//!
//! ```
//! use meshwork::config::{self, Options};
//!
//! let opts = Options {
//!     config_file: Some("no-such-meshwork.json".into()),
//!     base: Some("package.json".into()),
//!     modules: Some(vec!["module1/package.json".into()]),
//!     ..Default::default()
//! };
//!
//! // No config file on disk, so the options become the configuration.
//! let config = config::resolve(opts).unwrap();
//! assert!(!config.verbose);
//! ```
//!
//! ## Execution Flow
//!
//! One invocation is one batch, flowing strictly one way:
//!
//! 1. **Resolution (`config`)**: layer built-in defaults, caller options and
//!    the optional on-disk `meshwork.json` into a typed [`config::Config`].
//!    A config file that exists supersedes the caller options wholesale.
//! 2. **Validation (`orchestrator`)**: check base presence, modules
//!    presence, base existence, modules shape and non-emptiness, in that
//!    order, failing on the first violation.
//! 3. **Merging (`orchestrator` + `merge`)**: for each module in list
//!    order, merge the base document into the module file and write it
//!    back. The batch is sequential, fail-fast and non-transactional.
//!
//! The [`run`] helper wires the three steps together for callers that just
//! want the single-call form.

pub mod config;
pub mod error;
pub mod merge;
pub mod orchestrator;

pub use config::{Config, Options};
pub use error::{Error, Result};
pub use orchestrator::Orchestrator;

/// Resolve the given options and run the merge batch.
///
/// # Errors
///
/// Propagates any resolution, validation or merge failure unchanged.
pub fn run(opts: Options) -> Result<()> {
    let config = config::resolve(opts)?;
    Orchestrator::new(config).run()
}
