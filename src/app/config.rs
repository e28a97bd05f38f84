use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::io::{DocumentFormat, is_empty_document, parse_document_str};

pub const DEFAULT_SEARCH_PLACES: [&str; 6] = [
    "choose-text-editor",
    "choose-text-editor.json",
    "choose-text-editor.yaml",
    "choose-text-editor.yml",
    "package.json",
    "package.yaml",
];

pub const DEFAULT_PACKAGE_PROP: &str = "choose-text-editor";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {} as {format}", path.display())]
    Parse {
        path: PathBuf,
        format: DocumentFormat,
        #[source]
        source: anyhow::Error,
    },
}

/// The three ways loading can go wrong are distinct from success.
#[derive(Debug)]
pub enum ConfigOutcome {
    Found { config: Value, path: PathBuf },
    Empty { path: PathBuf },
    NotFound,
    Failed(ConfigError),
}

pub trait ConfigLoader {
    fn load(&self) -> ConfigOutcome;
}

/// Load one specific file. A package manifest contributes only its
/// `package_prop` key.
#[derive(Debug, Clone)]
pub struct ExplicitConfig {
    pub path: PathBuf,
    pub package_prop: String,
}

impl ExplicitConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            package_prop: DEFAULT_PACKAGE_PROP.to_string(),
        }
    }

    pub fn with_package_prop(mut self, prop: impl Into<String>) -> Self {
        self.package_prop = prop.into();
        self
    }
}

impl ConfigLoader for ExplicitConfig {
    fn load(&self) -> ConfigOutcome {
        match read_document(&self.path) {
            Ok(Some(document)) => document
                .into_outcome(&self.path, &self.package_prop)
                .unwrap_or(ConfigOutcome::NotFound),
            Ok(None) => ConfigOutcome::NotFound,
            Err(err) => failed(err),
        }
    }
}

/// Walk from `start_dir` upward looking for the first matching search place.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub search_places: Vec<String>,
    pub package_prop: String,
    pub start_dir: PathBuf,
    pub stop_dir: Option<PathBuf>,
}

impl SearchConfig {
    /// Defaults: the standard search places, starting at `start_dir` and
    /// stopping at the home directory.
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            search_places: DEFAULT_SEARCH_PLACES.map(String::from).to_vec(),
            package_prop: DEFAULT_PACKAGE_PROP.to_string(),
            start_dir: start_dir.into(),
            stop_dir: dirs::home_dir(),
        }
    }

    pub fn with_search_places(mut self, places: Vec<String>) -> Self {
        self.search_places = places;
        self
    }

    pub fn with_package_prop(mut self, prop: impl Into<String>) -> Self {
        self.package_prop = prop.into();
        self
    }

    pub fn with_stop_dir(mut self, stop_dir: Option<PathBuf>) -> Self {
        self.stop_dir = stop_dir;
        self
    }

    fn search_in(&self, dir: &Path) -> Result<Option<ConfigOutcome>, ConfigError> {
        for place in &self.search_places {
            let path = dir.join(place);
            let Some(document) = read_document(&path)? else {
                continue;
            };
            if let Some(outcome) = document.into_outcome(&path, &self.package_prop) {
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }
}

impl ConfigLoader for SearchConfig {
    fn load(&self) -> ConfigOutcome {
        for dir in self.start_dir.ancestors() {
            match self.search_in(dir) {
                Ok(Some(outcome)) => return outcome,
                Ok(None) => {}
                Err(err) => return failed(err),
            }
            if self.stop_dir.as_deref() == Some(dir) {
                break;
            }
        }
        ConfigOutcome::NotFound
    }
}

struct Document {
    raw: String,
    value: Value,
}

impl Document {
    /// `None` when `path` is a package manifest without `package_prop`.
    fn into_outcome(mut self, path: &Path, package_prop: &str) -> Option<ConfigOutcome> {
        if is_package_manifest(path) {
            let Some(config) = self.value.get_mut(package_prop).map(Value::take) else {
                debug!(
                    path = %path.display(),
                    prop = %package_prop,
                    "manifest has no config property"
                );
                return None;
            };
            return Some(if config.is_null() {
                ConfigOutcome::Empty {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigOutcome::Found {
                    config,
                    path: path.to_path_buf(),
                }
            });
        }
        Some(self.into_plain_outcome(path))
    }

    fn into_plain_outcome(self, path: &Path) -> ConfigOutcome {
        if is_empty_document(&self.raw, &self.value) {
            ConfigOutcome::Empty {
                path: path.to_path_buf(),
            }
        } else {
            ConfigOutcome::Found {
                config: self.value,
                path: path.to_path_buf(),
            }
        }
    }
}

/// `Ok(None)` when there is no file at `path`.
fn read_document(path: &Path) -> Result<Option<Document>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if raw.trim().is_empty() {
        return Ok(Some(Document {
            raw,
            value: Value::Null,
        }));
    }
    let format = DocumentFormat::from_path(path);
    let value = parse_document_str(&raw, format).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        format,
        source,
    })?;
    Ok(Some(Document { raw, value }))
}

fn is_package_manifest(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|name| name.to_str()),
        Some("package.json" | "package.yaml")
    )
}

fn failed(err: ConfigError) -> ConfigOutcome {
    warn!(error = %err, "config loading failed");
    ConfigOutcome::Failed(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    fn search(root: &Path, start: &Path) -> ConfigOutcome {
        SearchConfig::new(start)
            .with_stop_dir(Some(root.to_path_buf()))
            .load()
    }

    #[test]
    fn finds_config_in_ancestor_directory() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join("choose-text-editor.yaml"),
            "chooser: choose-text-editor\nterminal:\n  - program: vim\n",
        )
        .unwrap();

        match search(root.path(), &nested) {
            ConfigOutcome::Found { config, path } => {
                assert_eq!(path, root.path().join("choose-text-editor.yaml"));
                assert_eq!(
                    config,
                    json!({"chooser": "choose-text-editor", "terminal": [{"program": "vim"}]})
                );
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn earlier_search_place_wins() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("choose-text-editor"), "{\"chooser\": \"a\"}").unwrap();
        fs::write(root.path().join("choose-text-editor.json"), "{\"chooser\": \"b\"}").unwrap();
        match search(root.path(), root.path()) {
            ConfigOutcome::Found { config, .. } => assert_eq!(config["chooser"], json!("a")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn package_manifest_without_prop_is_skipped() {
        let root = tempdir().unwrap();
        let nested = root.path().join("pkg");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("package.json"), "{\"name\": \"unrelated\"}").unwrap();
        fs::write(
            root.path().join("package.json"),
            "{\"choose-text-editor\": {\"chooser\": \"choose-text-editor\"}}",
        )
        .unwrap();
        match search(root.path(), &nested) {
            ConfigOutcome::Found { config, path } => {
                assert_eq!(path, root.path().join("package.json"));
                assert_eq!(config, json!({"chooser": "choose-text-editor"}));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn blank_file_is_empty() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("choose-text-editor.yml"), "\n  \n").unwrap();
        assert!(matches!(
            search(root.path(), root.path()),
            ConfigOutcome::Empty { .. }
        ));
    }

    #[test]
    fn malformed_file_fails() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("choose-text-editor.json"), "{not json").unwrap();
        match search(root.path(), root.path()) {
            ConfigOutcome::Failed(ConfigError::Parse { format, .. }) => {
                assert_eq!(format, DocumentFormat::Json)
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn search_stops_at_stop_dir() {
        let root = tempdir().unwrap();
        let stop = root.path().join("stop");
        let start = stop.join("start");
        fs::create_dir_all(&start).unwrap();
        fs::write(root.path().join("choose-text-editor.json"), "{\"chooser\": \"x\"}").unwrap();
        assert!(matches!(search(&stop, &start), ConfigOutcome::NotFound));
    }

    #[test]
    fn explicit_package_manifest_uses_package_prop() {
        let root = tempdir().unwrap();
        let manifest = root.path().join("package.json");
        fs::write(
            &manifest,
            "{\"name\": \"app\", \"editors\": {\"chooser\": \"choose-text-editor\"}}",
        )
        .unwrap();

        match ExplicitConfig::new(&manifest).with_package_prop("editors").load() {
            ConfigOutcome::Found { config, path } => {
                assert_eq!(path, manifest);
                assert_eq!(config, json!({"chooser": "choose-text-editor"}));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(
            ExplicitConfig::new(&manifest).load(),
            ConfigOutcome::NotFound
        ));
    }

    #[test]
    fn explicit_package_manifest_with_null_prop_is_empty() {
        let root = tempdir().unwrap();
        let manifest = root.path().join("package.yaml");
        fs::write(&manifest, "name: app\nchoose-text-editor: ~\n").unwrap();
        assert!(matches!(
            ExplicitConfig::new(&manifest).load(),
            ConfigOutcome::Empty { .. }
        ));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let root = tempdir().unwrap();
        let loader = ExplicitConfig::new(root.path().join("nope.yaml"));
        assert!(matches!(loader.load(), ConfigOutcome::NotFound));
    }
}
