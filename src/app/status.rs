use std::fmt;

use anyhow::Result;

use crate::io::Io;

/// Process exit statuses, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    Success = 0,
    IndeterminableTty = 1,
    NotFound = 2,
    NoSuitableEditor = 3,
    InvalidEditorSet = 4,
    ConfigLoadingFailure = 5,
    EmptyConfig = 6,
    ConfigNotFound = 7,
    ExecutionFailure = 8,
    UnsatisfiedChooserVersion = 9,
    InvalidPrefixes = 10,
    UnknownFailure = 255,
}

impl Status {
    pub const ALL: [Status; 12] = [
        Status::Success,
        Status::IndeterminableTty,
        Status::NotFound,
        Status::NoSuitableEditor,
        Status::InvalidEditorSet,
        Status::ConfigLoadingFailure,
        Status::EmptyConfig,
        Status::ConfigNotFound,
        Status::ExecutionFailure,
        Status::UnsatisfiedChooserVersion,
        Status::InvalidPrefixes,
        Status::UnknownFailure,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::IndeterminableTty => "IndeterminableTty",
            Status::NotFound => "NotFound",
            Status::NoSuitableEditor => "NoSuitableEditor",
            Status::InvalidEditorSet => "InvalidEditorSet",
            Status::ConfigLoadingFailure => "ConfigLoadingFailure",
            Status::EmptyConfig => "EmptyConfig",
            Status::ConfigNotFound => "ConfigNotFound",
            Status::ExecutionFailure => "ExecutionFailure",
            Status::UnsatisfiedChooserVersion => "UnsatisfiedChooserVersion",
            Status::InvalidPrefixes => "InvalidPrefixes",
            Status::UnknownFailure => "UnknownFailure",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Status> for std::process::ExitCode {
    fn from(status: Status) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Print the table of status codes and their names.
pub fn show_status(io: &mut Io<'_>) -> Result<()> {
    let longest = Status::ALL
        .iter()
        .map(|status| status.name().len())
        .max()
        .unwrap_or_default();

    io.info(" code | name")?;
    io.info(format!("------|{}", "-".repeat(longest + 2)))?;
    for status in Status::ALL {
        io.info(format!("{:>5} | {}", status.code(), status.name()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn codes_are_distinct_and_ordered() {
        let codes: Vec<u8> = Status::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 255]);
    }

    #[test]
    fn table_lists_every_status() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        show_status(&mut Io::new(&mut out, &mut err)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " code | name");
        assert_eq!(lines[1], format!("------|{}", "-".repeat(27)));
        assert_eq!(lines[2], "    0 | Success");
        assert_eq!(lines[13], "  255 | UnknownFailure");
        assert_eq!(lines.len(), 2 + Status::ALL.len());
        assert!(err.is_empty());
    }
}
