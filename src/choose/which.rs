use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves a program name to the executable that would run.
pub trait PathLookup {
    fn probe(&self, program: &str) -> Result<PathBuf>;
}

/// PATH lookup against the real environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPath;

impl PathLookup for SystemPath {
    fn probe(&self, program: &str) -> Result<PathBuf> {
        which::which(program).with_context(|| format!("not found: {program}"))
    }
}

impl<F> PathLookup for F
where
    F: Fn(&str) -> Result<PathBuf>,
{
    fn probe(&self, program: &str) -> Result<PathBuf> {
        self(program)
    }
}
