#![doc = include_str!("../../README.md")]

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use tracing_subscriber::EnvFilter;

use choose_text_editor::{
    Collaborators, ConfigLoader, DEFAULT_PACKAGE_PROP, Env, ExplicitConfig, HandlingMethod, Io,
    RunOptions, SchemaStore, SearchConfig, Status, SystemPath, SystemSpawn, run,
};

const LOG_ENV: &str = "CHOOSE_TEXT_EDITOR_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "choose-text-editor",
    version,
    about = "Choose a text editor from a config file and the environment"
)]
struct Cli {
    /// Load this config file instead of searching for one
    #[arg(long = "config", env = "CHOOSE_TEXT_EDITOR_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// File names to look for in each directory, in order
    #[arg(
        long = "search-places",
        env = "CHOOSE_TEXT_EDITOR_SEARCH_PLACES",
        value_name = "NAME",
        num_args = 1..,
        value_delimiter = ','
    )]
    search_places: Vec<String>,

    /// Property to read when the config is a package.json/package.yaml
    #[arg(
        long = "package-prop",
        env = "CHOOSE_TEXT_EDITOR_PACKAGE_PROP",
        value_name = "KEY",
        default_value = DEFAULT_PACKAGE_PROP
    )]
    package_prop: String,

    /// Last directory to search (defaults to your home directory)
    #[arg(long = "stop-dir", env = "CHOOSE_TEXT_EDITOR_STOP_DIR", value_name = "DIR")]
    stop_dir: Option<PathBuf>,

    /// What to do with the chosen command: print:single, print:multi, print:json or exec
    #[arg(
        long = "on-chosen",
        value_name = "METHOD",
        default_value = "print:single",
        value_parser = parse_handling_method
    )]
    on_chosen: HandlingMethod,

    /// Print the table of exit status codes and exit
    #[arg(long = "show-status")]
    show_status: bool,

    /// Extra arguments appended after the chosen command
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();
    let cli = Cli::parse();

    let status = match execute(cli) {
        Ok(status) => status,
        Err(err) => {
            eprintln!("[ERROR] An error occurred");
            eprintln!("{err:?}");
            Status::UnknownFailure
        }
    };
    Ok(status.into())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn execute(cli: Cli) -> Result<Status> {
    tracing::debug!(?cli, "parsed command line");
    let loader = build_loader(&cli)?;
    let options = RunOptions::default()
        .with_show_status(cli.show_status)
        .with_handling(cli.on_chosen)
        .with_args(cli.args);

    let env = Env::from_process();
    let schemas = SchemaStore::shared().map_err(into_report)?;

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let mut io = Io::new(&mut stdout, &mut stderr);

    let status = run(
        &options,
        Collaborators {
            env: &env,
            lookup: &SystemPath,
            spawn: &SystemSpawn,
            config: loader.as_ref(),
            schemas,
        },
        &mut io,
    )
    .map_err(into_report)?;
    io.flush().map_err(into_report)?;
    Ok(status)
}

fn build_loader(cli: &Cli) -> Result<Box<dyn ConfigLoader>> {
    if let Some(path) = &cli.config {
        return Ok(Box::new(
            ExplicitConfig::new(path).with_package_prop(cli.package_prop.clone()),
        ));
    }

    let cwd = env::current_dir().wrap_err("failed to read the current directory")?;
    let mut search = SearchConfig::new(cwd).with_package_prop(cli.package_prop.clone());
    if !cli.search_places.is_empty() {
        search = search.with_search_places(cli.search_places.clone());
    }
    if let Some(stop_dir) = &cli.stop_dir {
        search = search.with_stop_dir(Some(stop_dir.clone()));
    }
    Ok(Box::new(search))
}

/// Keep the whole context chain; `Report::msg` alone would only show the outermost message.
fn into_report(err: anyhow::Error) -> Report {
    Report::msg(format!("{err:#}"))
}

fn parse_handling_method(value: &str) -> Result<HandlingMethod, String> {
    value.parse().map_err(|err| format!("{err}"))
}
