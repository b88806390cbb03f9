//! flatten-children: Flatten a JSON children tree into keyed leaves
//!
//! Usage:
//!   # Read from file, one leaf per line
//!   flatten-children tree.json
//!
//!   # Read from stdin, print only the composed keys
//!   echo '[{"type": "span"}, {"type": "#fragment", "key": "a", "children": [{"type": "b"}]}]' \
//!     | flatten-children --format keys
//!
//!   # Process NDJSON, one array of leaves per record
//!   flatten-children --ndjson trees.jsonl --format array --compact

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flatten_children::{read_children, FlattenConfig, Flattener, LeafWriter, OutputMode};
use std::fs::File;
use std::io::{BufReader, Read};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "flatten-children")]
#[command(about = "Flatten fragments and nested children into keyed leaves", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one children value per line)
    #[arg(long)]
    ndjson: bool,

    /// Output layout
    #[arg(long, value_enum, default_value_t = Format::Lines)]
    format: Format,

    /// Compact output in array mode (no pretty-printing)
    #[arg(long)]
    compact: bool,

    /// Separator between inherited key segments (default: ".")
    #[arg(long)]
    separator: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One JSON leaf per line
    Lines,
    /// One JSON array per input value
    Array,
    /// Element keys and primitive values, one per line
    Keys,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = FlattenConfig::default();
    if let Some(sep) = args.separator {
        config.separator = sep;
    }

    let mode = match args.format {
        Format::Lines => OutputMode::Lines,
        Format::Array => OutputMode::Array {
            pretty: !args.compact,
        },
        Format::Keys => OutputMode::Keys,
    };

    let reader = if let Some(file_path) = &args.input {
        let file = File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?;
        Box::new(BufReader::new(file)) as Box<dyn Read>
    } else {
        Box::new(std::io::stdin()) as Box<dyn Read>
    };

    let values = read_children(reader, args.ndjson)?;
    if values.is_empty() {
        warn!("no children values found in input");
        return Ok(());
    }

    let mut writer = LeafWriter::new(std::io::stdout().lock(), mode);
    let flattener = Flattener::new(config);
    for children in &values {
        let leaves = flattener.flatten(children)?;
        writer.write_leaves(leaves)?;
    }
    writer.flush()?;

    info!(values = values.len(), "done");
    Ok(())
}
