//! Editor resolution: environment override first, then ordered PATH probing.

use tracing::{debug, info};

use crate::domain::{
    CliArgument, Command, Editor, EditorSet, encode_cli_flag, encode_cli_options,
};
use crate::schema::SchemaStore;

mod env;
mod result;
mod which;

pub use env::{
    Env, FORCE_EDITOR, FORCE_EDITOR_PREFIXES, ISINTTY, Override, TtyState, resolve_override,
};
pub use result::ChooseResult;
pub use which::{PathLookup, SystemPath};

/// Resolve the single command to run for `editor_set` under `env`.
///
/// A forced editor short-circuits before any PATH lookup. Otherwise candidates
/// are probed one at a time, in order, and the first one found wins.
pub fn choose(
    env: &Env,
    lookup: &dyn PathLookup,
    editor_set: &EditorSet,
    schemas: &SchemaStore,
) -> ChooseResult {
    let (prefixes, forced) = match resolve_override(env, schemas) {
        Override::Prefixes { prefixes, forced } => (prefixes, forced),
        Override::Rejected(result) => return result,
    };

    if let Some(path) = forced {
        debug!(%path, "{FORCE_EDITOR} is set; skipping candidate probing");
        return ChooseResult::chosen(Command::new(path, prefixes));
    }

    let candidates = match candidates(editor_set, env.tty_state()) {
        Some(candidates) => candidates,
        None => return ChooseResult::IndeterminableTty,
    };

    if candidates.is_empty() {
        return ChooseResult::NoEditor;
    }

    for editor in candidates {
        if let Some(command) = build_command(editor, lookup, &prefixes) {
            info!(program = %editor.program, path = %command.path, "editor chosen");
            return ChooseResult::chosen(command);
        }
    }

    ChooseResult::NotFound
}

/// Editors eligible under `tty`, in probing order. `None` when the TTY state is unknown.
pub fn candidates(editor_set: &EditorSet, tty: TtyState) -> Option<Vec<&Editor>> {
    match tty {
        TtyState::Undetermined => None,
        TtyState::Terminal => Some(editor_set.terminal.iter().collect()),
        TtyState::Graphical => Some(
            editor_set
                .graphical
                .iter()
                .chain(editor_set.terminal.iter())
                .collect(),
        ),
    }
}

/// Locate `editor.program` and assemble its argument vector.
/// Returns `None` when the program cannot be found.
pub fn build_command(
    editor: &Editor,
    lookup: &dyn PathLookup,
    prefixes: &[CliArgument],
) -> Option<Command> {
    let path = match lookup.probe(&editor.program) {
        Ok(path) => path,
        Err(err) => {
            debug!(program = %editor.program, error = %err, "candidate unavailable");
            return None;
        }
    };
    debug!(program = %editor.program, path = %path.display(), "candidate found");

    let mut args = prefixes.to_vec();
    args.extend(editor.flags.iter().map(|flag| CliArgument::from(encode_cli_flag(flag))));
    args.extend(encode_cli_options(&editor.options).into_iter().map(CliArgument::from));
    args.extend(editor.suffixes.iter().cloned().map(CliArgument::from));

    Some(Command::new(path.to_string_lossy().into_owned(), args))
}
