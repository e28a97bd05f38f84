use serde_json::Value;

use crate::domain::EditorSet;
use crate::schema::{SchemaIssue, SchemaKind, SchemaReport, SchemaStore};

#[derive(Debug)]
pub enum ValidationOutcome {
    Valid(EditorSet),
    Invalid(SchemaReport),
}

/// Check `config` against the EditorSet schema, then build the typed set.
pub fn validate_editor_set(config: &Value, schemas: &SchemaStore) -> ValidationOutcome {
    let report = schemas.validate(config, SchemaKind::EditorSet);
    if !report.is_valid() {
        return ValidationOutcome::Invalid(report);
    }
    match serde_json::from_value::<EditorSet>(config.clone()) {
        Ok(editor_set) => ValidationOutcome::Valid(editor_set),
        Err(err) => ValidationOutcome::Invalid(SchemaReport {
            kind: SchemaKind::EditorSet,
            errors: vec![SchemaIssue {
                pointer: String::new(),
                message: err.to_string(),
            }],
        }),
    }
}
