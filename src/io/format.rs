use std::fmt;
use std::path::Path;

/// Supported data formats for configuration documents and environment payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    Json,
    #[default]
    Yaml,
}

impl DocumentFormat {
    /// `.json` files are JSON; everything else, extensionless included, is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.to_string_lossy().eq_ignore_ascii_case("json") => {
                DocumentFormat::Json
            }
            _ => DocumentFormat::Yaml,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            DocumentFormat::Yaml => write!(f, "yaml"),
        }
    }
}
