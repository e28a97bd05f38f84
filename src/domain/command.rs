use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::editor::{EditorOptions, OptionValue};

/// Fully resolved invocation, built once per successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub path: String,
    pub args: Vec<CliArgument>,
}

impl Command {
    pub fn new(path: impl Into<String>, args: Vec<CliArgument>) -> Self {
        Self {
            path: path.into(),
            args,
        }
    }

    /// `path`, then `args`, then `trailing`, all rendered as strings.
    pub fn argv<'a>(&'a self, trailing: &'a [String]) -> impl Iterator<Item = String> + 'a {
        std::iter::once(self.path.clone()).chain(self.args_with(trailing))
    }

    /// `args` followed by caller-supplied trailing arguments.
    pub fn args_with<'a>(&'a self, trailing: &'a [String]) -> impl Iterator<Item = String> + 'a {
        self.args
            .iter()
            .map(CliArgument::to_string)
            .chain(trailing.iter().cloned())
    }
}

/// A single scalar command-line argument. Prefixes coming from the environment
/// keep their parsed type; everything produced by encoding is a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CliArgument {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl CliArgument {
    /// Convert a scalar JSON value; returns `None` for arrays and objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(CliArgument::Null),
            Value::Bool(flag) => Some(CliArgument::Bool(*flag)),
            Value::Number(number) => Some(CliArgument::Number(number.clone())),
            Value::String(text) => Some(CliArgument::String(text.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for CliArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliArgument::Null => write!(f, "null"),
            CliArgument::Bool(flag) => write!(f, "{flag}"),
            CliArgument::Number(number) => f.write_str(&number_to_arg(number)),
            CliArgument::String(text) => f.write_str(text),
        }
    }
}

impl From<&str> for CliArgument {
    fn from(value: &str) -> Self {
        CliArgument::String(value.to_string())
    }
}

impl From<String> for CliArgument {
    fn from(value: String) -> Self {
        CliArgument::String(value)
    }
}

impl From<bool> for CliArgument {
    fn from(value: bool) -> Self {
        CliArgument::Bool(value)
    }
}

impl From<i64> for CliArgument {
    fn from(value: i64) -> Self {
        CliArgument::Number(value.into())
    }
}

/// Render a number as a command-line argument. Floats print in their shortest
/// form, so `1.0` becomes `1`.
pub(crate) fn number_to_arg(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float.to_string(),
        _ => number.to_string(),
    }
}

/// `-x` for a single character name, `--name` otherwise.
pub fn encode_cli_flag(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(_), None) => format!("-{name}"),
        _ => format!("--{name}"),
    }
}

/// Encode options in declaration order: `true` becomes a bare flag, `false`
/// disappears, scalars become `flag value`, lists become `flag v1 v2 ...`.
pub fn encode_cli_options(options: &EditorOptions) -> Vec<String> {
    let mut args = Vec::new();
    for (name, value) in options {
        match value {
            OptionValue::Bool(true) => args.push(encode_cli_flag(name)),
            OptionValue::Bool(false) => {}
            OptionValue::Scalar(scalar) => {
                args.push(encode_cli_flag(name));
                args.push(scalar.to_arg());
            }
            OptionValue::List(values) => {
                args.push(encode_cli_flag(name));
                args.extend(values.iter().map(|value| value.to_arg()));
            }
        }
    }
    args
}
