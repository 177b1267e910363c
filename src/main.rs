// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Command-line interface for the dhall-docker-img binary.
//!
//! The CLI scans a file or directory (or standard input) for pinned image
//! references and prints a Dhall record describing them. Help and version
//! output go to standard error so that standard output only ever carries a
//! complete record.

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{ArgAction, CommandFactory, Parser};
use dhall_docker_img::{DEFAULT_PREFIX, Error, ImageReference, ScanConfig, render_images, scan};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const COMMIT: &str = match option_env!("DHALL_DOCKER_IMG_COMMIT") {
    Some(commit,) => commit,
    None => "unknown",
};
const BUILD_DATE: &str = match option_env!("DHALL_DOCKER_IMG_BUILD_DATE") {
    Some(date,) => date,
    None => "unknown",
};

const USAGE_TEMPLATE: &str = "\
Usage of {name}: {usage}

{about}

OPTIONS:
{options}

ARGS:
  [PATH]  (optional) file or directory to scan; standard input is read when omitted
";

/// Command line interface for generating the Dhall image record.
#[derive(Debug, Parser,)]
#[command(
    name = "dhall-docker-img",
    about = "Generate a Dhall record of pinned images referenced in YAML and Dhall files",
    disable_help_flag = true,
    disable_version_flag = true,
    override_usage = "dhall-docker-img [--help] [--version] [--prefix <PREFIX>] [PATH]",
    help_template = USAGE_TEMPLATE
)]
struct Cli
{
    /// print usage instructions
    #[arg(long = "help", action = ArgAction::SetTrue)]
    help: bool,

    /// print version information
    #[arg(long = "version", action = ArgAction::SetTrue)]
    version: bool,

    /// Organization prefix image names must start with to be emitted.
    #[arg(
        long = "prefix",
        value_name = "PREFIX",
        env = "DHALL_DOCKER_IMG_PREFIX",
        default_value = DEFAULT_PREFIX
    )]
    prefix: String,

    /// (optional) file or directory to scan; standard input is read when
    /// omitted.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf,>,
}

/// Terminal action selected from the parsed arguments.
#[derive(Debug, PartialEq, Eq,)]
enum Action
{
    Help,
    Version,
    Usage,
    Scan
    {
        roots: Vec<PathBuf,>, config: ScanConfig,
    },
}

impl Action
{
    /// `--help` wins over `--version`; both win over argument validation.
    fn from_cli(cli: Cli,) -> Self
    {
        if cli.help {
            return Self::Help;
        }
        if cli.version {
            return Self::Version;
        }
        if cli.paths.len() > 1 {
            return Self::Usage;
        }

        Self::Scan {
            roots:  cli.paths,
            config: ScanConfig::default().with_prefix(cli.prefix,),
        }
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main() -> ExitCode
{
    init_tracing();

    match run() {
        Ok(code,) => code,
        Err(error,) => {
            eprintln!("{}", error.to_display_string());
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr subscriber filtered through `RUST_LOG`, defaulting to
/// warnings only.
fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn",),);

    // Logging is best effort; a failed install leaves the scan unaffected.
    let _ = tracing_subscriber::registry()
        .with(filter,)
        .with(fmt::layer().with_writer(io::stderr,).with_target(false,),)
        .try_init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates scan and output errors; usage problems are reported here and
/// mapped to a failing exit code without an error value.
fn run() -> Result<ExitCode, Error,>
{
    let cli = match Cli::try_parse() {
        Ok(cli,) => cli,
        Err(error,) => {
            eprint!("{error}");
            print_usage();
            return Ok(ExitCode::FAILURE,);
        }
    };

    match Action::from_cli(cli,) {
        Action::Help => {
            print_usage();
            Ok(ExitCode::SUCCESS,)
        }
        Action::Version => {
            eprintln!("{}", version_string(VERSION, COMMIT, BUILD_DATE));
            Ok(ExitCode::SUCCESS,)
        }
        Action::Usage => {
            print_usage();
            Ok(ExitCode::FAILURE,)
        }
        Action::Scan {
            roots,
            config,
        } => {
            let references = scan(roots, io::stdin().lock(), config,)?;

            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_output(&mut handle, &references,)?;

            Ok(ExitCode::SUCCESS,)
        }
    }
}

fn print_usage()
{
    eprint!("{}", Cli::command().render_help());
}

/// Renders the record in memory and writes it with a single call, so a
/// failed render never leaves a partial record behind.
fn write_output<W: Write,>(writer: &mut W, references: &[ImageReference],) -> Result<(), Error,>
{
    let mut buffer = Vec::new();
    render_images(&mut buffer, references,)?;

    writer
        .write_all(&buffer,)
        .and_then(|()| writer.flush(),)
        .map_err(|source| Error::Output {
            source,
        },)
}

/// Formats the three-line version block with labels padded to a common
/// column.
fn version_string(version: &str, commit: &str, date: &str,) -> String
{
    let rows = [("version:", version,), ("commit:", commit,), ("build date:", date,),];
    let width = rows.iter().map(|(label, _,)| label.len(),).max().unwrap_or_default() + 1;

    rows.iter()
        .map(|(label, value,)| format!("{label:<width$}{value}"),)
        .collect::<Vec<_,>>()
        .join("\n",)
}
