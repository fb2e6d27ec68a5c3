//! Merge orchestrator
//!
//! Validates a resolved [`Config`] and executes the merge batch: the base
//! package is merged into each module package in list order, sequentially,
//! stopping at the first failure.
//!
//! The validation sequence short-circuits and its order is part of the
//! observable contract — base existence is checked before the modules
//! type/emptiness checks, so a configuration that is wrong in both ways
//! reports the base error. Execution is fail-fast and non-transactional:
//! a missing module aborts the batch with modules already processed left
//! mutated and the rest untouched. There is no retry; every failure is
//! terminal for the invocation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{absolute_path, Config, ModulesField};
use crate::error::{Error, Result};
use crate::merge;

/// Default tag for diagnostic output lines.
pub const DEFAULT_PREFIX: &str = "meshwork";

/// Executes one validated merge batch over the configured modules.
#[derive(Debug)]
pub struct Orchestrator {
    config: Config,
    prefix: String,
}

impl Orchestrator {
    /// Create an orchestrator with the default diagnostic prefix.
    pub fn new(config: Config) -> Self {
        Self::with_prefix(config, DEFAULT_PREFIX)
    }

    /// Create an orchestrator with a custom diagnostic prefix.
    pub fn with_prefix(config: Config, prefix: impl Into<String>) -> Self {
        Self {
            config,
            prefix: prefix.into(),
        }
    }

    /// Validate the configuration and run the merge batch.
    ///
    /// # Errors
    ///
    /// Any validation failure, a missing module mid-batch, a malformed
    /// package document, or an I/O failure aborts the batch and is returned
    /// to the caller unchanged. Modules merged before the failure stay
    /// mutated; there is no rollback.
    pub fn run(&self) -> Result<()> {
        let (base, modules) = self.validate()?;

        if self.config.verbose {
            println!("{}: base={}", self.prefix, base.display());
        }

        for module in &modules {
            let module = absolute_path(module)?;
            if !module.exists() {
                return Err(Error::ModuleNotFound { path: module });
            }

            if self.config.verbose {
                println!(
                    "{}: merging {} with {}",
                    self.prefix,
                    module.display(),
                    base.display()
                );
            }

            self.merge_module(&base, &module)?;
        }

        Ok(())
    }

    /// Run the validation sequence, returning the resolved base path and
    /// the module list. Check order is contractual; see the module docs.
    fn validate(&self) -> Result<(PathBuf, Vec<PathBuf>)> {
        let base = self.config.base.as_ref().ok_or(Error::MissingBase)?;
        let modules = self.config.modules.as_ref().ok_or(Error::MissingModules)?;

        let base = absolute_path(base)?;
        if !base.exists() {
            return Err(Error::BaseNotFound { path: base });
        }

        let modules = match modules {
            ModulesField::List(list) => list.clone(),
            ModulesField::Other(_) => return Err(Error::ModulesNotArray),
        };
        if modules.is_empty() {
            return Err(Error::ModulesEmpty);
        }

        Ok((base, modules))
    }

    /// Merge the base package into one module file, replacing its contents.
    /// Handles are scoped to this one read/write pair.
    fn merge_module(&self, base: &Path, module: &Path) -> Result<()> {
        let dest = fs::read(module)?;
        let src = fs::read(base)?;

        let combined = merge::merge_packages(&dest, &src)?;
        log::debug!(
            "writing {} bytes to {}",
            combined.len(),
            module.display()
        );
        fs::write(module, combined)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_with(base: Option<PathBuf>, modules: Option<ModulesField>) -> Config {
        Config {
            base,
            modules,
            verbose: false,
        }
    }

    fn write_fixture(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
        let base = dir.path().join("package.json");
        fs::write(&base, r#"{"common":"common stuff"}"#).unwrap();

        fs::create_dir(dir.path().join("module1")).unwrap();
        let module1 = dir.path().join("module1/package.json");
        fs::write(&module1, r#"{"module1":"module1"}"#).unwrap();

        fs::create_dir(dir.path().join("module2")).unwrap();
        let module2 = dir.path().join("module2/package.json");
        fs::write(&module2, r#"{"module2":"module2"}"#).unwrap();

        (base, module1, module2)
    }

    #[test]
    fn test_missing_base_in_configuration() {
        let config = config_with(None, None);
        let err = Orchestrator::new(config).run().unwrap_err();
        assert_eq!(format!("{}", err), "No base package given in configuration");
    }

    #[test]
    fn test_missing_modules_in_configuration() {
        let config = config_with(Some(PathBuf::from("aslkdjalskjgalskdj")), None);
        let err = Orchestrator::new(config).run().unwrap_err();
        assert_eq!(
            format!("{}", err),
            "No modules list given in configuration"
        );
    }

    #[test]
    fn test_missing_base_file_checked_before_modules_shape() {
        // Both the base path and the modules list are bad; the base error
        // must win because base existence is checked first.
        let config = config_with(
            Some(PathBuf::from("aslkdjalskjgalskdj")),
            Some(ModulesField::List(vec![])),
        );
        let err = Orchestrator::new(config).run().unwrap_err();
        assert!(format!("{}", err).starts_with("Can't find base package: "));
    }

    #[test]
    fn test_modules_wrong_datatype() {
        let temp = TempDir::new().unwrap();
        let (base, _, _) = write_fixture(&temp);

        let config = config_with(
            Some(base),
            Some(ModulesField::Other(serde_json::Value::String(String::new()))),
        );
        let err = Orchestrator::new(config).run().unwrap_err();
        assert_eq!(format!("{}", err), "Modules list must be of type Array");
    }

    #[test]
    fn test_modules_empty_list() {
        let temp = TempDir::new().unwrap();
        let (base, _, _) = write_fixture(&temp);

        let config = config_with(Some(base), Some(ModulesField::List(vec![])));
        let err = Orchestrator::new(config).run().unwrap_err();
        assert_eq!(format!("{}", err), "Modules list contains no entries");
    }

    #[test]
    fn test_missing_module_file() {
        let temp = TempDir::new().unwrap();
        let (base, _, _) = write_fixture(&temp);

        let config = config_with(
            Some(base),
            Some(ModulesField::List(vec![temp
                .path()
                .join("alsdjfalksdjglaksdj")])),
        );
        let err = Orchestrator::new(config).run().unwrap_err();
        assert!(format!("{}", err).starts_with("Can't find module package: "));
    }

    #[test]
    fn test_merge_batch() {
        let temp = TempDir::new().unwrap();
        let (base, module1, module2) = write_fixture(&temp);

        let config = config_with(
            Some(base.clone()),
            Some(ModulesField::List(vec![module1.clone(), module2.clone()])),
        );
        Orchestrator::new(config).run().unwrap();

        // The base file itself is never touched.
        assert_eq!(
            fs::read_to_string(&base).unwrap(),
            r#"{"common":"common stuff"}"#
        );
        assert_eq!(
            fs::read_to_string(&module1).unwrap(),
            "{\n\t\"module1\": \"module1\",\n\t\"common\": \"common stuff\"\n}\n"
        );
        assert_eq!(
            fs::read_to_string(&module2).unwrap(),
            "{\n\t\"module2\": \"module2\",\n\t\"common\": \"common stuff\"\n}\n"
        );
    }

    #[test]
    fn test_merge_batch_rerun_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let (base, module1, module2) = write_fixture(&temp);

        let config = config_with(
            Some(base),
            Some(ModulesField::List(vec![module1.clone(), module2])),
        );
        let orchestrator = Orchestrator::new(config);

        orchestrator.run().unwrap();
        let first = fs::read_to_string(&module1).unwrap();
        orchestrator.run().unwrap();
        assert_eq!(fs::read_to_string(&module1).unwrap(), first);
    }

    #[test]
    fn test_fail_fast_leaves_partial_batch() {
        let temp = TempDir::new().unwrap();
        let (base, module1, module2) = write_fixture(&temp);
        let missing = temp.path().join("missing/package.json");

        let config = config_with(
            Some(base),
            Some(ModulesField::List(vec![
                module1.clone(),
                missing,
                module2.clone(),
            ])),
        );
        let err = Orchestrator::new(config).run().unwrap_err();
        assert!(matches!(err, Error::ModuleNotFound { .. }));

        // First module was merged before the failure, third never reached.
        assert_eq!(
            fs::read_to_string(&module1).unwrap(),
            "{\n\t\"module1\": \"module1\",\n\t\"common\": \"common stuff\"\n}\n"
        );
        assert_eq!(
            fs::read_to_string(&module2).unwrap(),
            r#"{"module2":"module2"}"#
        );
    }

    #[test]
    fn test_custom_prefix() {
        let config = config_with(None, None);
        let orchestrator = Orchestrator::with_prefix(config, "custom");
        assert_eq!(orchestrator.prefix, "custom");
    }
}
