use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::command::number_to_arg;

/// Validated configuration root: who may resolve it and which editors to try.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSet {
    pub chooser: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graphical: Vec<Editor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terminal: Vec<Editor>,
}

impl EditorSet {
    pub fn new(chooser: impl Into<String>) -> Self {
        Self {
            chooser: chooser.into(),
            graphical: Vec::new(),
            terminal: Vec::new(),
        }
    }

    pub fn with_graphical(mut self, editors: impl IntoIterator<Item = Editor>) -> Self {
        self.graphical.extend(editors);
        self
    }

    pub fn with_terminal(mut self, editors: impl IntoIterator<Item = Editor>) -> Self {
        self.terminal.extend(editors);
        self
    }
}

/// One candidate program together with the switches it should be launched with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Editor {
    pub program: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: EditorOptions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suffixes: Vec<String>,
}

pub type EditorOptions = IndexMap<String, OptionValue>;

impl Editor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flags: Vec::new(),
            options: EditorOptions::new(),
            suffixes: Vec::new(),
        }
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Scalar(OptionScalar),
    List(Vec<OptionScalar>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionScalar {
    Number(serde_json::Number),
    String(String),
}

impl OptionScalar {
    pub fn to_arg(&self) -> String {
        match self {
            OptionScalar::Number(number) => number_to_arg(number),
            OptionScalar::String(text) => text.clone(),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Scalar(OptionScalar::String(value.to_string()))
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Scalar(OptionScalar::String(value))
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Scalar(OptionScalar::Number(value.into()))
    }
}

impl From<Vec<OptionScalar>> for OptionValue {
    fn from(values: Vec<OptionScalar>) -> Self {
        OptionValue::List(values)
    }
}

impl From<&str> for OptionScalar {
    fn from(value: &str) -> Self {
        OptionScalar::String(value.to_string())
    }
}

impl From<i64> for OptionScalar {
    fn from(value: i64) -> Self {
        OptionScalar::Number(value.into())
    }
}
