#![deny(rust_2018_idioms)]

mod app;
mod choose;
mod chooser;
mod domain;
mod io;
mod schema;

pub use app::{
    Collaborators, ConfigError, ConfigLoader, ConfigOutcome, DEFAULT_PACKAGE_PROP,
    DEFAULT_SEARCH_PLACES, DispatchOptions, ExplicitConfig, HandlingMethod, RunOptions,
    SearchConfig, Spawn, SpawnOutcome, Status, SystemSpawn, ValidationOutcome,
    handle_chosen_command, report_choose_error, report_chooser_validation, report_schema_errors,
    run, show_status, validate_editor_set,
};
pub use choose::{
    ChooseResult, Env, FORCE_EDITOR, FORCE_EDITOR_PREFIXES, ISINTTY, Override, PathLookup,
    SystemPath, TtyState, build_command, candidates, choose, resolve_override,
};
pub use chooser::{ChooserCallbacks, PackageIdentifier, VersionRange, validate_chooser};
pub use domain::{
    CliArgument, Command, Editor, EditorOptions, EditorSet, OptionScalar, OptionValue,
    encode_cli_flag, encode_cli_options,
};
pub use io::{DocumentFormat, Io, parse_document_str};
pub use schema::{SchemaIssue, SchemaKind, SchemaReport, SchemaStore, schema_document};

pub mod prelude {
    pub use super::{
        ChooseResult, Command, EditorSet, Env, HandlingMethod, PathLookup, SchemaStore, Status,
        choose, handle_chosen_command,
    };
}
