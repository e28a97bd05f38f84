use std::fmt;
use std::io;
use std::process::{Command as ProcessCommand, ExitStatus};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use crate::domain::{CliArgument, Command};
use crate::io::{Io, to_pretty_json};

use super::Status;

/// What to do with a resolved command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlingMethod {
    #[default]
    PrintSingleLine,
    PrintMultiLine,
    PrintJson,
    Execute,
}

impl HandlingMethod {
    pub const ALL: [HandlingMethod; 4] = [
        HandlingMethod::PrintSingleLine,
        HandlingMethod::PrintMultiLine,
        HandlingMethod::PrintJson,
        HandlingMethod::Execute,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HandlingMethod::PrintSingleLine => "print:single",
            HandlingMethod::PrintMultiLine => "print:multi",
            HandlingMethod::PrintJson => "print:json",
            HandlingMethod::Execute => "exec",
        }
    }
}

impl fmt::Display for HandlingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandlingMethod {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match HandlingMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == value)
        {
            Some(method) => Ok(method),
            None => bail!(
                "unknown handling method '{value}'; expected one of {}",
                HandlingMethod::ALL.map(HandlingMethod::as_str).join(", ")
            ),
        }
    }
}

/// Outcome of a synchronous spawn: the exit code when the child ran, the
/// error when it could not be started.
#[derive(Debug, Default)]
pub struct SpawnOutcome {
    pub status: Option<i32>,
    pub error: Option<io::Error>,
}

impl SpawnOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && matches!(self.status, Some(0) | None)
    }
}

/// Runs a program to completion with inherited standard I/O.
pub trait Spawn {
    fn spawn(&self, program: &str, args: &[String]) -> SpawnOutcome;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawn;

impl Spawn for SystemSpawn {
    fn spawn(&self, program: &str, args: &[String]) -> SpawnOutcome {
        match ProcessCommand::new(program).args(args).status() {
            Ok(status) => SpawnOutcome {
                status: exit_code(status),
                error: None,
            },
            Err(error) => SpawnOutcome {
                status: None,
                error: Some(error),
            },
        }
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    // killed by a signal: report the conventional 128 + signal
    status.code().or_else(|| status.signal().map(|signal| 128 + signal))
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> Option<i32> {
    status.code()
}

/// Everything a handling method needs.
pub struct DispatchOptions<'a, 'io> {
    pub command: &'a Command,
    pub args: &'a [String],
    pub spawn: &'a dyn Spawn,
    pub io: &'a mut Io<'io>,
}

/// Hand the resolved command to the selected handling method.
pub fn handle_chosen_command(
    method: HandlingMethod,
    options: DispatchOptions<'_, '_>,
) -> Result<Status> {
    debug!(%method, path = %options.command.path, "dispatching chosen command");
    match method {
        HandlingMethod::PrintSingleLine => print_single_line(options),
        HandlingMethod::PrintMultiLine => print_multi_line(options),
        HandlingMethod::PrintJson => print_json(options),
        HandlingMethod::Execute => execute(options),
    }
}

fn print_single_line(options: DispatchOptions<'_, '_>) -> Result<Status> {
    let argv: Vec<String> = options.command.argv(options.args).collect();
    let line = shlex::try_join(argv.iter().map(String::as_str))
        .context("command contains an argument that cannot be shell-escaped")?;
    options.io.info(line)?;
    Ok(Status::Success)
}

fn print_multi_line(options: DispatchOptions<'_, '_>) -> Result<Status> {
    for token in options.command.argv(options.args) {
        let escaped = shlex::try_quote(&token)
            .with_context(|| format!("cannot shell-escape argument {token:?}"))?;
        options.io.info(escaped)?;
    }
    Ok(Status::Success)
}

/// Typed prefixes stay JSON scalars; trailing arguments are strings.
#[derive(Serialize)]
struct JsonCommand<'a> {
    path: &'a str,
    args: Vec<CliArgument>,
}

fn print_json(options: DispatchOptions<'_, '_>) -> Result<Status> {
    let payload = JsonCommand {
        path: &options.command.path,
        args: options
            .command
            .args
            .iter()
            .cloned()
            .chain(options.args.iter().cloned().map(CliArgument::from))
            .collect(),
    };
    options.io.info(to_pretty_json(&payload)?)?;
    Ok(Status::Success)
}

fn execute(options: DispatchOptions<'_, '_>) -> Result<Status> {
    let DispatchOptions {
        command,
        args,
        spawn,
        io,
    } = options;
    let final_args: Vec<String> = command.args_with(args).collect();
    let outcome = spawn.spawn(&command.path, &final_args);
    if outcome.succeeded() {
        return Ok(Status::Success);
    }

    io.error("[ERROR] Execution of command resulted in failure")?;
    io.error(format!("* executable: {:?}", command.path))?;
    io.error(format!("* arguments: {final_args:?}"))?;
    match &outcome.error {
        Some(error) => io.error(format!("* error: {error}"))?,
        None => io.error("* error: null")?,
    }
    match outcome.status {
        Some(status) => io.error(format!("* status: {status}"))?,
        None => io.error("* status: null")?,
    }
    Ok(Status::ExecutionFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    struct RecordingSpawn {
        calls: RefCell<Vec<(String, Vec<String>)>>,
        outcome: fn() -> SpawnOutcome,
    }

    impl RecordingSpawn {
        fn new(outcome: fn() -> SpawnOutcome) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                outcome,
            }
        }
    }

    impl Spawn for RecordingSpawn {
        fn spawn(&self, program: &str, args: &[String]) -> SpawnOutcome {
            self.calls
                .borrow_mut()
                .push((program.to_string(), args.to_vec()));
            (self.outcome)()
        }
    }

    struct Run {
        status: Status,
        out: String,
        err: String,
        calls: Vec<(String, Vec<String>)>,
    }

    fn run(method: HandlingMethod, outcome: fn() -> SpawnOutcome) -> Run {
        let command = Command::new(
            "/usr/bin/chosen-command",
            vec!["abc".into(), "def".into(), "multiple words again".into()],
        );
        let args: Vec<String> = ["a", "0", "true", "multiple words"]
            .into_iter()
            .map(String::from)
            .collect();
        let spawn = RecordingSpawn::new(outcome);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = {
            let mut io = Io::new(&mut out, &mut err);
            handle_chosen_command(
                method,
                DispatchOptions {
                    command: &command,
                    args: &args,
                    spawn: &spawn,
                    io: &mut io,
                },
            )
            .unwrap()
        };
        Run {
            status,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
            calls: spawn.calls.into_inner(),
        }
    }

    fn exited_cleanly() -> SpawnOutcome {
        SpawnOutcome {
            status: Some(0),
            error: None,
        }
    }

    fn exited_with_123() -> SpawnOutcome {
        SpawnOutcome {
            status: Some(123),
            error: None,
        }
    }

    #[test]
    fn parses_method_names() {
        for method in HandlingMethod::ALL {
            assert_eq!(method.as_str().parse::<HandlingMethod>().unwrap(), method);
        }
        assert!("print".parse::<HandlingMethod>().is_err());
    }

    #[test]
    fn single_line_is_shell_escaped() {
        let run = run(HandlingMethod::PrintSingleLine, exited_cleanly);
        assert_eq!(run.status, Status::Success);
        assert_eq!(
            run.out,
            "/usr/bin/chosen-command abc def 'multiple words again' a 0 true 'multiple words'\n"
        );
        assert!(run.err.is_empty());
        assert!(run.calls.is_empty());
    }

    #[test]
    fn multi_line_prints_one_token_per_line() {
        let run = run(HandlingMethod::PrintMultiLine, exited_cleanly);
        assert_eq!(run.status, Status::Success);
        assert_eq!(
            run.out.lines().collect::<Vec<_>>(),
            vec![
                "/usr/bin/chosen-command",
                "abc",
                "def",
                "'multiple words again'",
                "a",
                "0",
                "true",
                "'multiple words'",
            ]
        );
        assert!(run.calls.is_empty());
    }

    #[test]
    fn json_is_unescaped() {
        let run = run(HandlingMethod::PrintJson, exited_cleanly);
        let value: serde_json::Value = serde_json::from_str(&run.out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "path": "/usr/bin/chosen-command",
                "args": ["abc", "def", "multiple words again", "a", "0", "true", "multiple words"]
            })
        );
        assert!(run.calls.is_empty());
    }

    #[test]
    fn json_keeps_prefix_types() {
        let command = Command::new(
            "myEditor",
            vec!["abc".into(), 123_i64.into(), true.into(), CliArgument::Null],
        );
        let args = vec!["notes.md".to_string()];
        let spawn = RecordingSpawn::new(exited_cleanly);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = handle_chosen_command(
            HandlingMethod::PrintJson,
            DispatchOptions {
                command: &command,
                args: &args,
                spawn: &spawn,
                io: &mut Io::new(&mut out, &mut err),
            },
        )
        .unwrap();
        assert_eq!(status, Status::Success);
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "path": "myEditor",
                "args": ["abc", 123, true, null, "notes.md"]
            })
        );
    }

    #[test]
    fn execute_spawns_with_full_argument_vector() {
        let run = run(HandlingMethod::Execute, exited_cleanly);
        assert_eq!(run.status, Status::Success);
        assert!(run.out.is_empty() && run.err.is_empty());
        assert_eq!(
            run.calls,
            vec![(
                "/usr/bin/chosen-command".to_string(),
                ["abc", "def", "multiple words again", "a", "0", "true", "multiple words"]
                    .map(String::from)
                    .to_vec()
            )]
        );
    }

    #[test]
    fn non_zero_exit_is_an_execution_failure() {
        let run = run(HandlingMethod::Execute, exited_with_123);
        assert_eq!(run.status, Status::ExecutionFailure);
        assert!(run.out.is_empty());
        assert!(run.err.starts_with("[ERROR] Execution of command resulted in failure\n"));
        assert!(run.err.ends_with("* error: null\n* status: 123\n"));
    }

    #[test]
    fn spawn_error_is_an_execution_failure() {
        let run = run(HandlingMethod::Execute, || SpawnOutcome {
            status: None,
            error: Some(io::Error::new(io::ErrorKind::NotFound, "ENOENT")),
        });
        assert_eq!(run.status, Status::ExecutionFailure);
        assert!(run.err.contains("* error: ENOENT\n"));
        assert!(run.err.ends_with("* status: null\n"));
        assert_eq!(run.calls.len(), 1);
    }
}
