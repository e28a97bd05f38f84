use serde_json::Value;

use crate::domain::Command;
use crate::schema::SchemaReport;

/// Exactly one of these is produced per resolution attempt.
#[derive(Debug)]
pub enum ChooseResult {
    Chosen {
        command: Command,
    },
    /// Candidates existed but none of their programs could be located.
    NotFound,
    /// No candidate applies to the current TTY state.
    NoEditor,
    IndeterminableTty,
    PrefixesParsingFailure {
        env_key: String,
        env_value: String,
        error: anyhow::Error,
    },
    InvalidPrefixes {
        env_key: String,
        instance: Value,
        report: SchemaReport,
    },
}

impl ChooseResult {
    pub fn chosen(command: Command) -> Self {
        ChooseResult::Chosen { command }
    }

    pub fn command(&self) -> Option<&Command> {
        match self {
            ChooseResult::Chosen { command } => Some(command),
            _ => None,
        }
    }
}
