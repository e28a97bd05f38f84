//! Orchestration: load config, validate it, resolve an editor, dispatch.

use anyhow::Result;
use tracing::debug;

use crate::choose::{ChooseResult, Env, PathLookup, choose};
use crate::io::Io;
use crate::schema::SchemaStore;

mod config;
mod dispatch;
mod options;
mod report;
mod status;
mod validation;

pub use config::{
    ConfigError, ConfigLoader, ConfigOutcome, DEFAULT_PACKAGE_PROP, DEFAULT_SEARCH_PLACES,
    ExplicitConfig, SearchConfig,
};
pub use dispatch::{
    DispatchOptions, HandlingMethod, Spawn, SpawnOutcome, SystemSpawn, handle_chosen_command,
};
pub use options::RunOptions;
pub use report::{report_choose_error, report_chooser_validation, report_schema_errors};
pub use status::{Status, show_status};
pub use validation::{ValidationOutcome, validate_editor_set};

/// External capabilities a run depends on.
pub struct Collaborators<'a> {
    pub env: &'a Env,
    pub lookup: &'a dyn PathLookup,
    pub spawn: &'a dyn Spawn,
    pub config: &'a dyn ConfigLoader,
    pub schemas: &'a SchemaStore,
}

/// Run one full invocation and return the status to exit with.
pub fn run(options: &RunOptions, deps: Collaborators<'_>, io: &mut Io<'_>) -> Result<Status> {
    if options.show_status {
        show_status(io)?;
        return Ok(Status::Success);
    }

    let (config, config_path) = match deps.config.load() {
        ConfigOutcome::Found { config, path } => (config, path),
        ConfigOutcome::NotFound => {
            io.error("[ERROR] No config file found")?;
            io.error("help: Create a choose-text-editor config file, or point --config at one")?;
            return Ok(Status::ConfigNotFound);
        }
        ConfigOutcome::Empty { path } => {
            io.error("[ERROR] Config file is empty")?;
            io.error(format!("* config file: {:?}", path.display().to_string()))?;
            return Ok(Status::EmptyConfig);
        }
        ConfigOutcome::Failed(err) => {
            io.error("[ERROR] Failed to load config file")?;
            io.error(format!("* error: {:#}", anyhow::Error::new(err)))?;
            return Ok(Status::ConfigLoadingFailure);
        }
    };
    debug!(path = %config_path.display(), "config loaded");

    let editor_set = match validate_editor_set(&config, deps.schemas) {
        ValidationOutcome::Valid(editor_set) => editor_set,
        ValidationOutcome::Invalid(report) => {
            io.error("[ERROR] Config does not satisfy the EditorSet schema")?;
            io.error(format!("* config file: {:?}", config_path.display().to_string()))?;
            report_schema_errors(io, &report)?;
            return Ok(Status::InvalidEditorSet);
        }
    };

    let chooser_ok = report_chooser_validation(
        io,
        &editor_set.chooser,
        &options.package_name,
        &options.package_version,
        &config_path,
    )?;
    if !chooser_ok {
        return Ok(Status::UnsatisfiedChooserVersion);
    }

    let command = match choose(deps.env, deps.lookup, &editor_set, deps.schemas) {
        ChooseResult::Chosen { command } => command,
        other => return report_choose_error(io, &other),
    };

    handle_chosen_command(
        options.handling,
        DispatchOptions {
            command: &command,
            args: &options.args,
            spawn: deps.spawn,
            io,
        },
    )
}
