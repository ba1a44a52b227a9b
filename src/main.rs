//! Command-line driver for the expression toolchain.

use anyhow::{anyhow, bail, Context, Result};
use itertools::Itertools;
use log::{info, Level};
use std::fs::File;
use std::io::{self, BufReader};

use exprc::errors::EXIT_FAILURE;
use exprc::{CompilerConfig, LangError, Mode, ParserStyle};

/// Parsed command-line arguments.
#[derive(Debug)]
struct Args {
    mode: Mode,
    config: CompilerConfig,
    log_level: Level,
    /// Input file (None = standard input).
    path: Option<String>,
}
impl Args {
    /// Parses command-line arguments, not including the program name. Returns
    /// `Ok(None)` if help was requested.
    fn parse(argv: &[String]) -> Result<Option<Self>> {
        let mut ret = Self {
            mode: Mode::default(),
            config: CompilerConfig::default(),
            log_level: Level::Warn,
            path: None,
        };

        let mut has_input = false;
        let mut argv = argv.iter();
        while let Some(arg) = argv.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "-v" | "--verbose" => ret.log_level = more_verbose(ret.log_level),
                "--style" => {
                    let s = argv
                        .next()
                        .ok_or_else(|| anyhow!("'--style' requires an argument"))?;
                    ret.config.parser_style = s
                        .parse()
                        .map_err(|()| anyhow!("unknown parser style '{}'", s))?;
                }
                "--registers" => {
                    let s = argv
                        .next()
                        .ok_or_else(|| anyhow!("'--registers' requires an argument"))?;
                    ret.config.register_count = s
                        .parse()
                        .with_context(|| format!("invalid register count '{}'", s))?;
                    if ret.config.register_count == 0 {
                        bail!("there must be at least one register");
                    }
                }
                s if s.starts_with("--") => {
                    ret.mode = s[2..]
                        .parse()
                        .map_err(|()| anyhow!("unknown option '{}'", s))?;
                }
                s if s.starts_with('-') && s != "-" => bail!("unknown option '{}'", s),
                path => {
                    if has_input {
                        bail!("only one input file may be given");
                    }
                    has_input = true;
                    if path != "-" {
                        ret.path = Some(path.to_owned());
                    }
                }
            }
        }

        Ok(Some(ret))
    }
}

fn more_verbose(level: Level) -> Level {
    match level {
        Level::Error => Level::Warn,
        Level::Warn => Level::Info,
        Level::Info => Level::Debug,
        Level::Debug | Level::Trace => Level::Trace,
    }
}

fn usage(program: &str) -> String {
    format!(
        "\
Usage: {} [{}] [--style {}] [--registers N] [-v]... [FILE]

Reads statements from FILE, or from standard input if FILE is missing or '-'.
A line containing only '{}' ends the input.",
        program,
        Mode::ALL.iter().map(|mode| format!("--{}", mode)).join(" | "),
        ParserStyle::ALL.iter().join("|"),
        exprc::lexer::END_SENTINEL,
    )
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let program = argv.first().map_or("exprc", String::as_str);

    let args = match Args::parse(argv.get(1..).unwrap_or(&[])) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", usage(program));
            return;
        }
        Err(e) => {
            eprintln!("{:#}\n\n{}", e, usage(program));
            std::process::exit(EXIT_FAILURE);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("{:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Returns the process exit status for an error that ended the run.
fn exit_code(e: &anyhow::Error) -> i32 {
    e.downcast_ref::<LangError>()
        .map_or(EXIT_FAILURE, |e| e.msg.exit_code())
}

fn run(args: &Args) -> Result<()> {
    simple_logger::init_with_level(args.log_level)?;
    info!("Starting exprc v{} ...", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    match &args.path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Error opening {}", path))?;
            exprc::run(args.mode, BufReader::new(file), stdout.lock(), &args.config)?;
        }
        None => {
            let stdin = io::stdin();
            exprc::run(args.mode, stdin.lock(), stdout.lock(), &args.config)?;
        }
    }
    Ok(())
}
