use std::fmt;
use std::sync::OnceLock;

use anyhow::Result;
use jsonschema::Validator;
use serde_json::Value;

mod loader;

pub use loader::schema_document;

/// The shapes untrusted input is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    EditorSet,
    CliArguments,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::EditorSet => write!(f, "EditorSet"),
            SchemaKind::CliArguments => write!(f, "CliArguments"),
        }
    }
}

/// Compiled validators for every [`SchemaKind`]. Read-only once built.
pub struct SchemaStore {
    editor_set: Validator,
    cli_arguments: Validator,
}

static SHARED: OnceLock<SchemaStore> = OnceLock::new();

impl SchemaStore {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor_set: loader::compile(SchemaKind::EditorSet)?,
            cli_arguments: loader::compile(SchemaKind::CliArguments)?,
        })
    }

    /// Process-wide store, compiled on first use.
    pub fn shared() -> Result<&'static SchemaStore> {
        if let Some(store) = SHARED.get() {
            return Ok(store);
        }
        let store = SchemaStore::new()?;
        Ok(SHARED.get_or_init(|| store))
    }

    fn validator(&self, kind: SchemaKind) -> &Validator {
        match kind {
            SchemaKind::EditorSet => &self.editor_set,
            SchemaKind::CliArguments => &self.cli_arguments,
        }
    }

    pub fn validate(&self, instance: &Value, kind: SchemaKind) -> SchemaReport {
        let errors = self
            .validator(kind)
            .iter_errors(instance)
            .map(|error| SchemaIssue {
                pointer: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();
        SchemaReport { kind, errors }
    }
}

impl fmt::Debug for SchemaStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaStore").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaReport {
    pub kind: SchemaKind,
    pub errors: Vec<SchemaIssue>,
}

impl SchemaReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.errors.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// One violation: where in the instance, and what was expected there.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaIssue {
    pub pointer: String,
    pub message: String,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pointer = if self.pointer.is_empty() {
            "<root>"
        } else {
            self.pointer.as_str()
        };
        write!(f, "{pointer}: {}", self.message)
    }
}
