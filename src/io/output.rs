use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

/// Where printed output and diagnostics go. The CLI wires these to
/// stdout/stderr; tests use in-memory buffers.
pub struct Io<'a> {
    pub info: &'a mut dyn Write,
    pub error: &'a mut dyn Write,
}

impl<'a> Io<'a> {
    pub fn new(info: &'a mut dyn Write, error: &'a mut dyn Write) -> Self {
        Self { info, error }
    }

    pub fn info(&mut self, line: impl AsRef<str>) -> Result<()> {
        write_line(self.info, line.as_ref()).context("failed to write to info output")
    }

    pub fn error(&mut self, line: impl AsRef<str>) -> Result<()> {
        write_line(self.error, line.as_ref()).context("failed to write to error output")
    }

    pub fn flush(&mut self) -> Result<()> {
        self.info.flush().context("failed to flush info output")?;
        self.error.flush().context("failed to flush error output")
    }
}

/// Serialize `value` as indented JSON.
pub fn to_pretty_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize JSON")
}

fn write_line(sink: &mut dyn Write, line: &str) -> io::Result<()> {
    sink.write_all(line.as_bytes())?;
    sink.write_all(b"\n")
}
