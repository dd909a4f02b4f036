//! `jsonpull` CLI: stream JSON values from a file or stdin, one per line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-serialize every top-level value of a multi-value stream
//! printf '1 [2] {"a":3}' | jsonpull
//!
//! # Stream the records of a large wrapper array without building it
//! jsonpull --flatten-depth 1 records.json
//!
//! # Keep duplicate keys as [key, value] pairs
//! jsonpull --duplicates list data.json
//!
//! # Run JSONTestSuite fixtures through the decoder
//! jsonpull check JSONTestSuite/test_parsing
//! ```

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use jsonpull::{DEFAULT_MAX_DEPTH, DecoderOptions, ObjectPairsHook, conformance, factory};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsonpull",
    version,
    about = "Incremental JSON stream decoder",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    decode: DecodeArgs,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a directory of y_/n_/i_ conformance fixtures
    Check {
        /// Directory holding the fixture files
        dir: PathBuf,
    },
}

#[derive(Args)]
struct DecodeArgs {
    /// Input file (reads from stdin if omitted)
    file: Option<PathBuf>,

    /// Number of wrapper arrays whose elements are streamed individually
    #[arg(long, default_value_t = 0)]
    flatten_depth: usize,

    /// Maximum container nesting inside one value
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// What to do with repeated object keys
    #[arg(long, value_enum, default_value_t = Duplicates::Last)]
    duplicates: Duplicates,

    /// Pretty-print each value instead of one compact line per value
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Duplicates {
    /// Last value wins, first position is kept
    Last,
    /// First value wins
    First,
    /// Keep every member as a [key, value] pair
    List,
    /// Fail on the first repeated key
    Reject,
}

impl Duplicates {
    fn hook(self) -> ObjectPairsHook {
        match self {
            Duplicates::Last => factory::last_wins,
            Duplicates::First => factory::first_wins,
            Duplicates::List => factory::pairs_list,
            Duplicates::Reject => factory::reject_duplicates,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Check { dir }) => {
            if !check(&dir)? {
                process::exit(1);
            }
        }
        None => decode(&cli.decode)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn decode(args: &DecodeArgs) -> Result<()> {
    let options = DecoderOptions {
        object_pairs_hook: args.duplicates.hook(),
        flatten_depth: args.flatten_depth,
        max_depth: args.max_depth,
    };
    let input = open_input(args.file.as_ref())?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (index, value) in jsonpull::parse_reader(input, options).enumerate() {
        let value = value.with_context(|| format!("Failed to decode value #{index}"))?;
        if args.pretty {
            serde_json::to_writer_pretty(&mut out, &value)
                .context("Failed to write value")?;
            writeln!(out)?;
        } else {
            writeln!(out, "{value}")?;
        }
        // Values are forwarded as soon as they are complete.
        out.flush()?;
    }
    debug!("input exhausted");
    Ok(())
}

fn check(dir: &Path) -> Result<bool> {
    let report = conformance::run_dir(dir)
        .with_context(|| format!("Failed to run fixtures in {}", dir.display()))?;

    for (path, reason) in &report.failures {
        println!("NOT_PASS {}", path.display());
        println!("    {reason}");
    }
    println!(
        "{} passed, {} not passed, {} total",
        report.passed,
        report.failures.len(),
        report.total()
    );
    Ok(report.all_passed())
}
