use std::error::Error;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::ArgAction::Set;
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use parser::{parse_and_emit, ExitStatus, Options, ParseFailure};

/// Reads IPPcode23 source code, checks it for lexical and syntactic
/// correctness, and prints its XML representation.
#[derive(Parser, Debug)]
#[clap(long_about = None, disable_version_flag = true)]
struct Cli {
    /// File from which source code is read (default: standard input).
    #[clap(action = Set, short = 'i', long)]
    input: Option<OsString>,

    /// File to which the XML document is written (default: standard
    /// output).
    #[clap(action = Set, short = 'o', long)]
    output: Option<OsString>,
}

#[derive(Debug)]
enum Fail {
    /// The command line was not acceptable.
    BadInvocation(String),
    /// We were not able to correctly initialise the parser.
    InitialisationFailure(String),
    /// We initialised the parser but then it fails.
    ParseFail(ParseFailure),
}

impl Fail {
    fn exit_status(&self) -> i32 {
        match self {
            Fail::BadInvocation(_) => ExitStatus::BadInvocation.code(),
            Fail::InitialisationFailure(_) => ExitStatus::InternalError.code(),
            Fail::ParseFail(e) => e.exit_status().code(),
        }
    }
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::BadInvocation(msg) | Fail::InitialisationFailure(msg) => {
                f.write_str(msg.as_str())
            }
            Fail::ParseFail(parse_failure) => parse_failure.fmt(f),
        }
    }
}

impl Error for Fail {}

/// Returns `None` when help was requested (and printed).
fn parse_command_line() -> Result<Option<Cli>, Fail> {
    let args: Vec<OsString> = std::env::args_os().collect();
    match Cli::try_parse_from(args.clone()) {
        Ok(cli) => Ok(Some(cli)),
        // Help may only be requested on its own.
        Err(e) if e.kind() == ErrorKind::DisplayHelp && args.len() == 2 => match e.print() {
            Ok(()) => Ok(None),
            Err(io_err) => Err(Fail::BadInvocation(format!(
                "failed to print help: {io_err}"
            ))),
        },
        Err(e) if e.kind() == ErrorKind::DisplayHelp => Err(Fail::BadInvocation(
            "--help cannot be combined with other arguments".to_string(),
        )),
        Err(e) => Err(Fail::BadInvocation(e.to_string())),
    }
}

fn run_parser() -> Result<(), Fail> {
    let cli = match parse_command_line()? {
        Some(cli) => cli,
        None => {
            return Ok(());
        }
    };

    // See
    // https://docs.rs/tracing-subscriber/latest/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.  Standard output is reserved for the document.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let span = span!(Level::ERROR, "parse", input=?cli.input, output=?cli.output);
    let _enter = span.enter();
    let options = Options {
        input: cli.input.map(PathBuf::from),
        output: cli.output.map(PathBuf::from),
    };
    let result = parse_and_emit(&options).map_err(Fail::ParseFail);
    match &result {
        Err(e) => {
            event!(Level::ERROR, "parse failed: {:?}", e);
        }
        Ok(document) => {
            event!(
                Level::INFO,
                "parse succeeded ({} instructions)",
                document.instructions().len()
            );
        }
    }
    result.map(|_| ())
}

fn main() {
    match run_parser() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_status());
        }
        Ok(()) => {
            std::process::exit(ExitStatus::Success.code());
        }
    }
}
