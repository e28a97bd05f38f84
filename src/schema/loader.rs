use anyhow::{Context, Result};
use jsonschema::Validator;
use serde_json::Value;

use super::SchemaKind;

const EDITOR_SET_SCHEMA: &str = include_str!("editor-set.schema.json");
const CLI_ARGUMENTS_SCHEMA: &str = include_str!("cli-arguments.schema.json");

/// Raw JSON Schema document embedded for `kind`.
pub fn schema_document(kind: SchemaKind) -> Result<Value> {
    let source = match kind {
        SchemaKind::EditorSet => EDITOR_SET_SCHEMA,
        SchemaKind::CliArguments => CLI_ARGUMENTS_SCHEMA,
    };
    serde_json::from_str(source)
        .with_context(|| format!("embedded {kind} schema is not valid JSON"))
}

/// Compile the embedded schema for `kind` into a reusable validator.
pub fn compile(kind: SchemaKind) -> Result<Validator> {
    let document = schema_document(kind)?;
    jsonschema::validator_for(&document)
        .with_context(|| format!("failed to compile {kind} schema"))
}
