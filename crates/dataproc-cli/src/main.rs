//! `dataproc` CLI — flatten, merge, filter and validate JSON data from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Flatten nested JSON (stdin → stdout)
//! echo '{"user":{"name":"Alice","age":30}}' | dataproc flatten
//!
//! # Flatten with a custom separator, file to file
//! dataproc flatten --separator _ -i data.json -o flat.json
//!
//! # Merge several JSON objects, later files win
//! dataproc merge defaults.json overrides.json --pretty
//!
//! # Keep or drop keys
//! dataproc filter --keys name,age -i user.json
//! dataproc filter --keys password --exclude -i user.json
//!
//! # Split a delimited line into a JSON array
//! dataproc csv "apple, banana, cherry"
//!
//! # Validate formats (exit status 1 when invalid)
//! dataproc validate email user@example.com
//! dataproc validate phone "(555) 123-4567" --country US
//!
//! # Re-emit JSON, optionally pretty-printed
//! dataproc json --pretty -i data.json
//! ```
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=dataproc_core=trace`) or pass `-v` for
//! diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dataproc_core::{Country, FilterMode, DEFAULT_DELIMITER, DEFAULT_SEPARATOR};
use serde_json::Value;
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dataproc",
    version,
    about = "Data transformation and validation utilities"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug diagnostics to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten nested JSON objects into composite keys
    Flatten {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// String placed between nested keys
        #[arg(short, long, default_value = DEFAULT_SEPARATOR)]
        separator: String,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Merge JSON objects; later inputs override earlier ones
    Merge {
        /// Input files, each a JSON object or null ("-" reads stdin)
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Keep (or drop, with --exclude) the given top-level keys
    Filter {
        /// Comma-separated keys
        #[arg(short, long)]
        keys: String,
        /// Drop the listed keys instead of keeping them
        #[arg(long)]
        exclude: bool,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Split one delimited line into a JSON array of trimmed fields
    Csv {
        /// The line to split
        line: String,
        /// Field delimiter
        #[arg(short, long, default_value = DEFAULT_DELIMITER)]
        delimiter: String,
    },
    /// Check the format of an email address or phone number
    Validate {
        #[command(subcommand)]
        target: ValidateTarget,
    },
    /// Parse JSON and write it back out
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Subcommand)]
enum ValidateTarget {
    /// Validate an email address
    Email {
        email: String,
    },
    /// Validate a phone number
    Phone {
        phone: String,
        /// Country code: CN or US (unknown codes are treated as CN)
        #[arg(short, long, default_value = "CN")]
        country: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

/// Execute one subcommand. `Ok(false)` means a validation check failed.
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Flatten {
            input,
            output,
            separator,
            pretty,
        } => {
            let value = read_json(input.as_deref())?;
            let flat = dataproc_core::flatten(&value, &separator);
            debug!(entries = flat.len(), "flattened input");
            write_json(output.as_deref(), &flat, pretty)?;
        }
        Commands::Merge {
            inputs,
            output,
            pretty,
        } => {
            let documents = inputs
                .iter()
                .map(|path| read_json(stdin_or_path(path)))
                .collect::<Result<Vec<Value>>>()?;
            let maps = documents
                .iter()
                .enumerate()
                .map(|(i, doc)| {
                    dataproc_core::as_object(doc, i)
                        .with_context(|| format!("Cannot merge input: {}", inputs[i]))
                })
                .collect::<Result<Vec<_>>>()?;
            let merged = dataproc_core::merge(maps);
            debug!(inputs = inputs.len(), keys = merged.len(), "merged inputs");
            write_json(output.as_deref(), &merged, pretty)?;
        }
        Commands::Filter {
            keys,
            exclude,
            input,
            output,
            pretty,
        } => {
            let value = read_json(input.as_deref())?;
            let map = value
                .as_object()
                .context("Filter input must be a JSON object")?;
            let keys = split_keys(&keys);
            let mode = FilterMode::from_include(!exclude);
            let filtered = dataproc_core::filter_keys(map, &keys, mode);
            write_json(output.as_deref(), &filtered, pretty)?;
        }
        Commands::Csv { line, delimiter } => {
            let fields = dataproc_core::parse_csv_line(&line, &delimiter)
                .context("Failed to split line")?;
            write_json(None, &fields, false)?;
        }
        Commands::Validate { target } => {
            let valid = match target {
                ValidateTarget::Email { email } => dataproc_core::validate_email(&email),
                ValidateTarget::Phone { phone, country } => {
                    dataproc_core::validate_phone(&phone, Country::from_code(&country))
                }
            };
            println!("{}", if valid { "valid" } else { "invalid" });
            return Ok(valid);
        }
        Commands::Json {
            input,
            output,
            pretty,
        } => {
            let value = read_json(input.as_deref())?;
            write_json(output.as_deref(), &value, pretty)?;
        }
    }

    Ok(true)
}

/// Split a `--keys a,b,c` argument, dropping blank entries.
fn split_keys(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect()
}

fn stdin_or_path(path: &str) -> Option<&str> {
    if path == "-" {
        None
    } else {
        Some(path)
    }
}

fn read_json(path: Option<&str>) -> Result<Value> {
    let text = read_input(path)?;
    dataproc_core::try_parse_json(&text)
        .with_context(|| format!("Invalid JSON in {}", path.unwrap_or("<stdin>")))
}

fn write_json<T: serde::Serialize + ?Sized>(path: Option<&str>, data: &T, pretty: bool) -> Result<()> {
    let text = dataproc_core::to_json(data, pretty).context("Failed to serialize output")?;
    write_output(path, &text)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
