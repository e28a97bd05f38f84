use std::path::Path;

use anyhow::Result;

use crate::choose::{ChooseResult, ISINTTY};
use crate::chooser::{ChooserCallbacks, validate_chooser};
use crate::io::Io;
use crate::schema::SchemaReport;

use super::Status;

const INDENT: &str = "    ";

/// Print the structured violations of `report` under a `* stack:` heading.
pub fn report_schema_errors(io: &mut Io<'_>, report: &SchemaReport) -> Result<()> {
    io.error("* stack:")?;
    for line in report.to_string().lines() {
        io.error(format!("{INDENT}{line}"))?;
    }
    Ok(())
}

/// Explain a negative resolution outcome and map it to its exit status.
pub fn report_choose_error(io: &mut Io<'_>, result: &ChooseResult) -> Result<Status> {
    match result {
        ChooseResult::Chosen { .. } => Ok(Status::Success),
        ChooseResult::IndeterminableTty => {
            io.error("[ERROR] Cannot determine whether terminal is graphical or not")?;
            io.error(format!(
                "help: You may set {ISINTTY}=true to use terminal editors, or {ISINTTY}=false to use graphical editors"
            ))?;
            Ok(Status::IndeterminableTty)
        }
        ChooseResult::NotFound => {
            io.error("[ERROR] No editor detected")?;
            io.error("help: Check if (at least one of) your editors are installed")?;
            io.error("help: Check if there is any typo in your config")?;
            Ok(Status::NotFound)
        }
        ChooseResult::NoEditor => {
            io.error("[ERROR] No suitable editor")?;
            io.error(format!(
                "help: When {ISINTTY}=true, \"terminal\" property of your config must not be empty"
            ))?;
            io.error(format!(
                "help: When {ISINTTY}=false, either \"graphical\" or \"terminal\" property of your config must not be empty"
            ))?;
            Ok(Status::NoSuitableEditor)
        }
        ChooseResult::PrefixesParsingFailure {
            env_key,
            env_value,
            error,
        } => {
            io.error("[ERROR] Failed to parse prefixes")?;
            io.error("help: Content must be a valid yaml array of strings")?;
            io.error(format!("* env key: {env_key:?}"))?;
            io.error(format!("* env value: {env_value:?}"))?;
            io.error(format!("* error: {error:#}"))?;
            Ok(Status::InvalidPrefixes)
        }
        ChooseResult::InvalidPrefixes {
            env_key,
            instance,
            report,
        } => {
            io.error("[ERROR] Prefixes does not satisfy its schema")?;
            io.error("help: Instance must be an array of strings")?;
            io.error(format!("* env key: {env_key:?}"))?;
            io.error(format!("* instance: {instance}"))?;
            report_schema_errors(io, report)?;
            Ok(Status::InvalidPrefixes)
        }
    }
}

/// Validate `chooser`, printing why it was rejected.
pub fn report_chooser_validation(
    io: &mut Io<'_>,
    chooser: &str,
    package_name: &str,
    package_version: &str,
    config_path: &Path,
) -> Result<bool> {
    let mut diagnostics = ChooserDiagnostics {
        io,
        config_path,
        package_name,
        failure: None,
    };
    let valid = validate_chooser(chooser, package_name, package_version, &mut diagnostics);
    match diagnostics.failure {
        Some(err) => Err(err),
        None => Ok(valid),
    }
}

struct ChooserDiagnostics<'a, 'io> {
    io: &'a mut Io<'io>,
    config_path: &'a Path,
    package_name: &'a str,
    failure: Option<anyhow::Error>,
}

impl ChooserDiagnostics<'_, '_> {
    fn emit(&mut self, lines: &[String]) {
        if self.failure.is_some() {
            return;
        }
        for line in lines {
            if let Err(err) = self.io.error(line) {
                self.failure = Some(err);
                return;
            }
        }
    }

    fn config_file(&self) -> String {
        format!("* config file: {:?}", self.config_path.display().to_string())
    }
}

impl ChooserCallbacks for ChooserDiagnostics<'_, '_> {
    fn on_invalid_package_name(&mut self, config_name: &str, used_name: &str) {
        let lines = [
            "[ERROR] Invalid chooser".to_string(),
            self.config_file(),
            format!("* config package: {config_name:?}"),
            format!("* used package: {used_name:?}"),
        ];
        self.emit(&lines);
    }

    fn on_non_empty_path(&mut self, path: &str) {
        let lines = [
            "[ERROR] Package path is expected to NOT be specified, but it was".to_string(),
            self.config_file(),
            format!("* package path: {path:?}"),
        ];
        self.emit(&lines);
    }

    fn on_invalid_version_range(&mut self, range: &str) {
        let lines = [
            "[ERROR] Invalid version range for chooser".to_string(),
            "help: Read https://docs.npmjs.com/misc/semver#ranges for valid version range syntax"
                .to_string(),
            self.config_file(),
            format!("* config version range: {range:?}"),
        ];
        self.emit(&lines);
    }

    fn on_unsatisfied_version(&mut self, range: &str, used_version: &str) {
        let package = self.package_name;
        let lines = [
            "[ERROR] Incompatible chooser".to_string(),
            format!("help: This version of {package} does not satisfy what is required in config"),
            format!("help: Please update {package} or your config"),
            self.config_file(),
            format!("* config version: {range:?}"),
            format!("* used version: {used_version:?}"),
        ];
        self.emit(&lines);
    }
}
