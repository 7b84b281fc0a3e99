//! `bridge-transcode` CLI: run bridge map conversions over JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # JSON -> bridge map -> JSON: shows what the script side gets back
//! echo '{"count":2,"ok":true}' | bridge-transcode normalize
//!
//! # Flatten every value to a string (null stays null)
//! bridge-transcode stringify -i client.json
//!
//! # Check a user-attribute map, dropping values that are not scalars
//! bridge-transcode --skip-unsupported attributes -i attrs.json -o out.json
//!
//! # JSON -> generic container -> JSON, keeping integer typing
//! bridge-transcode generic -i payload.json
//!
//! # Load options from a file; flags win over the file
//! bridge-transcode --config options.json --max-depth 16 normalize
//! ```
//!
//! Set `RUST_LOG=debug` to see values skipped under `--skip-unsupported`.

use anyhow::{Context, Result};
use bridge_transcode::{
    json_to_string_map, parse_object, BridgeMap, TranscodeOptions, Transcoder, UnsupportedPolicy,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bridge-transcode",
    version,
    about = "Convert JSON through bridge maps and generic containers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with transcoder options
    #[arg(long, global = true)]
    config: Option<String>,

    /// Drop values the target cannot hold instead of failing
    #[arg(long, global = true)]
    skip_unsupported: bool,

    /// Maximum container nesting depth
    #[arg(long, global = true)]
    max_depth: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Round-trip a JSON object through a bridge map
    Normalize(IoArgs),
    /// Flatten a JSON object to string values
    Stringify(IoArgs),
    /// Convert a JSON object to a user-attribute map via a bridge map
    Attributes(IoArgs),
    /// Round-trip a JSON object through a generic container
    Generic(IoArgs),
}

#[derive(Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let transcoder = Transcoder::new(load_options(&cli)?);
    tracing::debug!(options = ?transcoder.options(), "transcoder ready");

    match cli.command {
        Commands::Normalize(args) => {
            let object = read_object(&args)?;
            let bridge: BridgeMap = transcoder
                .json_to_write_map(&object)
                .context("Failed to build bridge map")?;
            let back = transcoder
                .read_map_to_json(&bridge)
                .context("Failed to read bridge map back to JSON")?;
            write_json(&args, &back)?;
        }
        Commands::Stringify(args) => {
            let object = read_object(&args)?;
            write_json(&args, &json_to_string_map(&object))?;
        }
        Commands::Attributes(args) => {
            let object = read_object(&args)?;
            let bridge: BridgeMap = transcoder
                .json_to_write_map(&object)
                .context("Failed to build bridge map")?;
            let attributes = transcoder
                .read_map_to_attributes(&bridge)
                .context("Failed to convert attributes")?;
            write_json(&args, &attributes)?;
        }
        Commands::Generic(args) => {
            let object = read_object(&args)?;
            let generic = transcoder
                .json_to_dynamic_map(&object)
                .context("Failed to build generic container")?;
            let back = transcoder
                .dynamic_to_json(&generic)
                .context("Failed to convert generic container to JSON")?;
            write_json(&args, &back)?;
        }
    }

    Ok(())
}

/// Options file first, then command-line overrides.
fn load_options(cli: &Cli) -> Result<TranscodeOptions> {
    let mut options: TranscodeOptions = match cli.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            serde_json::from_str(&text).with_context(|| format!("Invalid config: {}", path))?
        }
        None => TranscodeOptions::default(),
    };
    if cli.skip_unsupported {
        options.on_unsupported = UnsupportedPolicy::Skip;
    }
    if let Some(depth) = cli.max_depth {
        options.max_depth = depth;
    }
    Ok(options)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_object(args: &IoArgs) -> Result<serde_json::Map<String, serde_json::Value>> {
    let text = read_input(args.input.as_deref())?;
    parse_object(&text).context("Input must be a JSON object")
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

fn write_json<T: Serialize>(args: &IoArgs, value: &T) -> Result<()> {
    let mut pretty = serde_json::to_string_pretty(value)?;
    pretty.push('\n');
    match args.output.as_deref() {
        Some(path) => {
            std::fs::write(path, pretty).with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", pretty);
        }
    }
    Ok(())
}
