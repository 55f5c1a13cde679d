use std::io::{self, Read, Write};
use std::process;

use anyhow::{bail, Context};
use yalig::{Config, Scanner, Session};

const HELP_MSG: &str = "\
Usage: yalig [FILE] [OPTIONS]

Evaluates every form in FILE (or stdin) and prints each value.

Options:
  --tokens      Print the token stream as JSON lines instead of evaluating
  --fail-fast   Stop at the first evaluation error
  --quiet       Do not print form values
  -h, --help    Show this message

Environment:
  YALIG_MAX_DEPTH   Maximum evaluation nesting (default 10000)
  RUST_LOG          Log filter, e.g. RUST_LOG=yalig=debug";

struct Cli {
    path: Option<String>,
    config: Config,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Option<Cli>> {
    let mut path = None;
    let mut config = Config::from_env();

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--tokens" => config.dump_tokens = true,
            "--fail-fast" => config.fail_fast = true,
            "--quiet" => config.echo = false,
            flag if flag.starts_with('-') && flag != "-" => bail!("unknown option `{}`", flag),
            file => {
                if path.is_some() {
                    bail!("more than one input file given");
                }
                path = Some(file.to_string());
            }
        }
    }

    Ok(Some(Cli { path, config }))
}

fn read_source(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path)),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

fn dump_tokens(source: &str) -> anyhow::Result<()> {
    let tokens = Scanner::new(source).scan_tokens()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for token in &tokens {
        serde_json::to_writer(&mut out, token)?;
        writeln!(out)?;
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let source = read_source(cli.path.as_deref())?;

    if cli.config.dump_tokens {
        return dump_tokens(&source);
    }

    let echo = cli.config.echo;
    let mut session = Session::new(cli.config);
    let summary = session.run(&source, |value| {
        if echo {
            println!("{}", value);
        }
    })?;

    tracing::debug!(
        "Evaluated {} forms, {} failed",
        summary.forms,
        summary.failures
    );
    if summary.failures > 0 {
        eprintln!(
            "{} of {} forms failed to evaluate",
            summary.failures, summary.forms
        );
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    init_tracing();

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            println!("{HELP_MSG}");
            return;
        }
        Err(err) => {
            eprintln!("error: {:#}\n\n{HELP_MSG}", err);
            process::exit(2);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}
