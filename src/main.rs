
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate regex;
extern crate term_grid;

pub mod assembler;
pub mod repl;

use clap::{Arg, ArgMatches, App};

use assembler::codegen::StubBackend;
use assembler::config::{self, Limits};
use assembler::diagnostics::LogSink;

use std::io;
use std::path::Path;

fn main() {
    let args = process_arguments();
    let log_path = Path::new(args.value_of("log-file").unwrap_or("compiler.log"));

    if let Err(err) = initialize_logging(args.occurrences_of("verbose"), log_path) {
        eprintln!("fatal: unable to set up logging to `{}`: {}", log_path.display(), err);
        std::process::exit(1);
    }

    let limits = Limits {
        max_tokens:       usize_arg(&args, "max-tokens", config::MAX_TOKENS),
        max_token_length: usize_arg(&args, "max-token-length", config::MAX_TOKEN_LENGTH),
        max_line_length:  usize_arg(&args, "max-line-length", config::MAX_LINE_LENGTH),
    };

    debug!("Arguments:\n\tVerbosity: {}\n\tLog file: {}\n\tShow tokens: {}\n\tLimits: {:?}",
        verbosity_filter(args.occurrences_of("verbose")),
        log_path.display(),
        args.is_present("show-tokens"),
        limits
    );

    let limits = match limits.validate() {
        Ok(limits) => limits,
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(1);
        }
    };

    let mut session = repl::Session::new(limits, LogSink, StubBackend::new())
        .show_tokens(args.is_present("show-tokens"));

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = repl::run(stdin.lock(), stdout.lock(), &mut session) {
        error!("fatal: unable to read input: {}", err);
        std::process::exit(1);
    }

    info!("processed session, code generation ran {} time(s)", session.backend().invocations());
}

fn usize_arg(args: &ArgMatches, name: &str, default: usize) -> usize {
    args.value_of(name)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn is_usize(v: String) -> Result<(), String> {
    v.parse::<usize>()
        .map(|_| ())
        .map_err(|e| format!("`{}` is not a non-negative integer: {}", v, e))
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap())
        .version(option_env!("CARGO_PKG_VERSION").unwrap())
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap())
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap())
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("log-file")
            .short("l")
            .long("log-file")
            .takes_value(true)
            .default_value("compiler.log")
            .help("append diagnostics to this file"))
        .arg(Arg::with_name("show-tokens")
            .short("d")
            .long("show-tokens")
            .takes_value(false)
            .help("prints each line's tokens before its AST"))
        .arg(Arg::with_name("max-tokens")
            .long("max-tokens")
            .takes_value(true)
            .validator(is_usize)
            .help("tokens allowed per line, end marker included (default 100)"))
        .arg(Arg::with_name("max-token-length")
            .long("max-token-length")
            .takes_value(true)
            .validator(is_usize)
            .help("characters kept from each field (default 19)"))
        .arg(Arg::with_name("max-line-length")
            .long("max-line-length")
            .takes_value(true)
            .validator(is_usize)
            .help("characters kept from each input line (default 255)"))
        .get_matches()
}

fn verbosity_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 | _ => log::LevelFilter::Debug,
    }
}

/// Diagnostics go to `log_path` (appended, never truncated) and to stderr,
/// leaving stdout to the prompt and rendered ASTs.
fn initialize_logging(verbosity: u64, log_path: &Path) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity_filter(verbosity))
        .chain(std::io::stderr())
        .chain(fern::log_file(log_path)?)
        .apply()?;
    Ok(())
}
