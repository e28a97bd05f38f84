//! Compatibility check for the `chooser` identifier embedded in an editor set.

use std::sync::OnceLock;

use regex::Regex;
use semver::{Version, VersionReq};

/// `[@scope/]name[/sub/path][@range]`, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentifier {
    pub name: String,
    pub path: Option<String>,
    pub version: String,
}

impl PackageIdentifier {
    pub fn parse(identifier: &str) -> Self {
        static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^((?:@[^/@]+/)?[^/@]+)(?:/([^@]+))?(?:@(.*))?$").ok()
        });

        let captures = pattern.as_ref().and_then(|pattern| pattern.captures(identifier));
        match captures {
            Some(captures) => Self {
                name: captures[1].to_string(),
                path: captures.get(2).map(|m| m.as_str().to_string()),
                version: captures
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            },
            None => Self {
                name: identifier.to_string(),
                path: None,
                version: String::new(),
            },
        }
    }
}

/// Receives the reason a chooser was rejected. At most one method fires per check.
pub trait ChooserCallbacks {
    fn on_invalid_package_name(&mut self, config_name: &str, used_name: &str);
    fn on_non_empty_path(&mut self, path: &str);
    fn on_invalid_version_range(&mut self, range: &str);
    fn on_unsatisfied_version(&mut self, range: &str, used_version: &str);
}

/// Check `chooser` against the running package name and version.
///
/// Name, sub-path, range syntax and range satisfaction are checked in that
/// order; the first failure is reported and the rest are skipped.
pub fn validate_chooser(
    chooser: &str,
    name: &str,
    version: &str,
    callbacks: &mut dyn ChooserCallbacks,
) -> bool {
    let config = PackageIdentifier::parse(chooser);

    if config.name != name {
        callbacks.on_invalid_package_name(&config.name, name);
        return false;
    }

    if let Some(path) = &config.path {
        callbacks.on_non_empty_path(path);
        return false;
    }

    let Some(range) = VersionRange::parse(&config.version) else {
        callbacks.on_invalid_version_range(&config.version);
        return false;
    };

    if !range.matches_str(version) {
        callbacks.on_unsatisfied_version(&config.version, version);
        return false;
    }

    true
}

/// An npm-style range: `||`-separated alternatives of comparator sets.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRange {
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// `None` when `range` is not valid range syntax. An empty range matches anything.
    pub fn parse(range: &str) -> Option<Self> {
        let alternatives = range
            .split("||")
            .map(|alternative| translate_comparator_set(alternative.trim()))
            .map(|req| req.and_then(|req| VersionReq::parse(&req).ok()))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { alternatives })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// A version string that fails to parse satisfies nothing.
    pub fn matches_str(&self, version: &str) -> bool {
        Version::parse(version.trim().trim_start_matches('v'))
            .map(|version| self.matches(&version))
            .unwrap_or(false)
    }
}

/// Rewrite one npm comparator set into `semver::VersionReq` syntax.
fn translate_comparator_set(set: &str) -> Option<String> {
    if set.is_empty() {
        return Some("*".to_string());
    }

    let tokens: Vec<&str> = set.split_whitespace().collect();
    if let [low, "-", high] = tokens.as_slice() {
        return Some(format!(
            ">={}, {}",
            translate_bound(low)?,
            translate_upper_hyphen_bound(high)?
        ));
    }

    let mut comparators = Vec::new();
    let mut pending_operator: Option<&str> = None;
    for token in tokens {
        if is_bare_operator(token) {
            if pending_operator.replace(token).is_some() {
                return None;
            }
            continue;
        }
        let token = match pending_operator.take() {
            Some(op) => format!("{op}{token}"),
            None => token.to_string(),
        };
        comparators.push(translate_comparator(&token)?);
    }
    if pending_operator.is_some() {
        return None;
    }
    Some(comparators.join(", "))
}

fn is_bare_operator(token: &str) -> bool {
    matches!(token, "<" | "<=" | ">" | ">=" | "=" | "^" | "~")
}

fn translate_comparator(token: &str) -> Option<String> {
    let split = token
        .find(|c: char| c.is_ascii_alphanumeric() || c == '*')
        .unwrap_or(token.len());
    let (operator, version) = token.split_at(split);
    let version = version.trim_start_matches('v');
    if version.is_empty() {
        return None;
    }
    match operator {
        "" => translate_bare(version),
        "=" => translate_bare(version),
        "^" | "~" | ">" | ">=" | "<" | "<=" => Some(format!("{operator}{version}")),
        "~>" => Some(format!("~{version}")),
        _ => None,
    }
}

/// npm treats a bare full version as an exact match and a partial one as a wildcard.
fn translate_bare(version: &str) -> Option<String> {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.iter().any(|part| is_wildcard(part)) || parts.len() < 3 {
        let mut kept: Vec<&str> = parts
            .iter()
            .take_while(|part| !is_wildcard(part))
            .copied()
            .collect();
        if kept.is_empty() {
            return Some("*".to_string());
        }
        kept.push("*");
        return Some(kept.join("."));
    }
    Some(format!("={version}"))
}

fn translate_bound(version: &str) -> Option<String> {
    let parts: Vec<&str> = version
        .split('.')
        .take_while(|part| !is_wildcard(part))
        .collect();
    if parts.is_empty() {
        return None;
    }
    let mut padded = parts;
    while padded.len() < 3 {
        padded.push("0");
    }
    Some(padded.join("."))
}

/// `1.2.3 - 2.3` means `<2.4.0`; `1.2.3 - 2.3.4` means `<=2.3.4`.
fn translate_upper_hyphen_bound(version: &str) -> Option<String> {
    let parts: Vec<&str> = version
        .split('.')
        .take_while(|part| !is_wildcard(part))
        .collect();
    match parts.as_slice() {
        [] => None,
        [_, _, _, ..] => Some(format!("<={version}")),
        [major, minor] => Some(format!("<{major}.{}.0", minor.parse::<u64>().ok()? + 1)),
        [major] => Some(format!("<{}.0.0", major.parse::<u64>().ok()? + 1)),
    }
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}
