use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::CliArgument;
use crate::io::{DocumentFormat, parse_document_str};
use crate::schema::{SchemaKind, SchemaStore};

use super::ChooseResult;

pub const FORCE_EDITOR: &str = "FORCE_EDITOR";
pub const FORCE_EDITOR_PREFIXES: &str = "FORCE_EDITOR_PREFIXES";
pub const ISINTTY: &str = "ISINTTY";

/// Process environment as a string-keyed mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: BTreeMap<String, String>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment. Non UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn tty_state(&self) -> TtyState {
        TtyState::from_signal(self.get(ISINTTY))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtyState {
    Terminal,
    Graphical,
    Undetermined,
}

impl TtyState {
    /// Only the exact strings `true` and `false` are meaningful.
    pub fn from_signal(signal: Option<&str>) -> Self {
        match signal {
            Some("true") => TtyState::Terminal,
            Some("false") => TtyState::Graphical,
            _ => TtyState::Undetermined,
        }
    }
}

/// Outcome of reading the override variables.
#[derive(Debug)]
pub enum Override {
    /// Prefixes are usable; `forced` holds the forced editor when one is set.
    Prefixes {
        prefixes: Vec<CliArgument>,
        forced: Option<String>,
    },
    /// Prefixes could not be parsed or validated; resolution stops here.
    Rejected(ChooseResult),
}

/// Parse and validate the prefix list, then check for a forced editor.
pub fn resolve_override(env: &Env, schemas: &SchemaStore) -> Override {
    let prefixes = match env.get(FORCE_EDITOR_PREFIXES) {
        Some(raw) => match parse_prefixes(raw, schemas) {
            Ok(prefixes) => prefixes,
            Err(rejected) => return Override::Rejected(rejected),
        },
        None => Vec::new(),
    };

    let forced = env
        .get(FORCE_EDITOR)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Override::Prefixes { prefixes, forced }
}

fn parse_prefixes(raw: &str, schemas: &SchemaStore) -> Result<Vec<CliArgument>, ChooseResult> {
    let instance = parse_document_str(raw, DocumentFormat::Yaml).map_err(|error| {
        ChooseResult::PrefixesParsingFailure {
            env_key: FORCE_EDITOR_PREFIXES.to_string(),
            env_value: raw.to_string(),
            error,
        }
    })?;

    let report = schemas.validate(&instance, SchemaKind::CliArguments);
    let scalars = match &instance {
        Value::Array(items) if report.is_valid() => items
            .iter()
            .map(CliArgument::from_value)
            .collect::<Option<Vec<_>>>(),
        _ => None,
    };

    scalars.ok_or_else(|| ChooseResult::InvalidPrefixes {
        env_key: FORCE_EDITOR_PREFIXES.to_string(),
        instance,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schemas() -> &'static SchemaStore {
        SchemaStore::shared().unwrap()
    }

    #[test]
    fn tty_signal_is_tri_state() {
        assert_eq!(TtyState::from_signal(Some("true")), TtyState::Terminal);
        assert_eq!(TtyState::from_signal(Some("false")), TtyState::Graphical);
        assert_eq!(TtyState::from_signal(Some("TRUE")), TtyState::Undetermined);
        assert_eq!(TtyState::from_signal(Some("")), TtyState::Undetermined);
        assert_eq!(TtyState::from_signal(None), TtyState::Undetermined);
    }

    #[test]
    fn absent_prefixes_default_to_empty() {
        match resolve_override(&Env::new(), schemas()) {
            Override::Prefixes { prefixes, forced } => {
                assert!(prefixes.is_empty());
                assert_eq!(forced, None);
            }
            Override::Rejected(result) => panic!("unexpected rejection: {result:?}"),
        }
    }

    #[test]
    fn empty_forced_editor_is_ignored() {
        let env = Env::new().with(FORCE_EDITOR, "");
        assert!(matches!(
            resolve_override(&env, schemas()),
            Override::Prefixes { forced: None, .. }
        ));
    }

    #[test]
    fn prefixes_keep_scalar_types() {
        let env = Env::new()
            .with(FORCE_EDITOR, "myEditor")
            .with(FORCE_EDITOR_PREFIXES, "[abc, 123, true, null]");
        match resolve_override(&env, schemas()) {
            Override::Prefixes { prefixes, forced } => {
                assert_eq!(
                    prefixes,
                    vec![
                        CliArgument::from("abc"),
                        CliArgument::from(123_i64),
                        CliArgument::from(true),
                        CliArgument::Null,
                    ]
                );
                assert_eq!(forced.as_deref(), Some("myEditor"));
            }
            Override::Rejected(result) => panic!("unexpected rejection: {result:?}"),
        }
    }

    #[test]
    fn mapping_prefixes_are_rejected_by_schema() {
        let env = Env::new().with(FORCE_EDITOR_PREFIXES, "abc: 123");
        match resolve_override(&env, schemas()) {
            Override::Rejected(ChooseResult::InvalidPrefixes {
                env_key, instance, ..
            }) => {
                assert_eq!(env_key, FORCE_EDITOR_PREFIXES);
                assert_eq!(instance, serde_json::json!({"abc": 123}));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
