//! `snapdiff` CLI -- diff JSON/MessagePack snapshots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Diff two JSON files (first is the baseline)
//! snapdiff old.json new.json
//!
//! # Diff the baseline against several later snapshots
//! snapdiff base.json day1.json day2.json day3.json
//!
//! # Suppress noisy subtrees
//! snapdiff old.json new.json --ignore '/meta/*' --ignore '*/timestamp'
//!
//! # Compare scalar lists as sets, remap compacted keys first
//! snapdiff old.msgpack new.msgpack --set-sort --fixup-keys
//!
//! # Inspect a single document (reads stdin when no files are given)
//! snapdiff --fixup-keys --dump-fixedup --dump-counts < snapshot.json
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use snapdiff_core::{
    count_report, decode, diff, fixup_keys, to_pretty_json, DiffOptions, Format, IgnoreSet,
    Reporter, Value,
};
use tracing::{debug, info, Level};

#[derive(Parser, Debug)]
#[command(
    name = "snapdiff",
    version,
    about = "Structural diff for JSON/MessagePack document snapshots"
)]
struct Cli {
    /// Input files; the first is the baseline, each remaining file is diffed
    /// against it. Reads a single document from stdin when omitted.
    /// `.msgpack` files decode as MessagePack, everything else as JSON.
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Glob pattern for paths to suppress, with the whole subtree beneath
    /// them (repeatable). `*` matches across `/`.
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Compare lists of int/str/bytes scalars as unordered sets
    #[arg(long)]
    set_sort: bool,

    /// Remap compact integer keys via each document's [payload, keyNames] table
    #[arg(long)]
    fixup_keys: bool,

    /// Write each loaded document as pretty sorted-key JSON to _<name>.json
    #[arg(long)]
    dump_fixedup: bool,

    /// Write per-node child counts to _<name>.counts
    #[arg(long)]
    dump_counts: bool,

    /// Info-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Debug-level logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    debug!(?cli, "parsed arguments");

    let ignore = IgnoreSet::new(&cli.ignore).context("Failed to compile ignore patterns")?;
    let options = DiffOptions {
        set_sort: cli.set_sort,
    };

    let baseline = match cli.inputs.first() {
        Some(path) => load_file(path, &cli)?,
        None => load_stdin(&cli)?,
    };

    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());
    for path in cli.inputs.iter().skip(1) {
        let document = load_file(path, &cli)?;
        info!("diffing {} against baseline", path.display());
        let mut failed = None;
        diff(&baseline, &document, &ignore, options, &mut |record| {
            if failed.is_none() {
                failed = reporter.report(&record).err();
            }
        });
        if let Some(err) = failed {
            return Err(err).context("Failed to write diff output");
        }
    }
    reporter
        .into_inner()
        .flush()
        .context("Failed to write diff output")?;

    Ok(())
}

/// Load and prepare one document from a file: decode by extension, apply key
/// fixup, and write any requested dump files.
fn load_file(path: &Path, cli: &Cli) -> Result<Value> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let format = Format::from_path(path);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_owned());
    prepare(&bytes, format, &stem, cli)
        .with_context(|| format!("Failed to load document: {}", path.display()))
}

/// Load the baseline from stdin when no files are given. Always JSON.
fn load_stdin(cli: &Cli) -> Result<Value> {
    let mut bytes = Vec::new();
    io::stdin()
        .read_to_end(&mut bytes)
        .context("Failed to read from stdin")?;
    prepare(&bytes, Format::Json, "stdin", cli).context("Failed to load document from stdin")
}

fn prepare(bytes: &[u8], format: Format, stem: &str, cli: &Cli) -> Result<Value> {
    let mut document = decode(bytes, format)?;
    if cli.fixup_keys {
        document = fixup_keys(&document)?;
    }

    if cli.dump_fixedup {
        let out = format!("_{stem}.json");
        fs::write(&out, to_pretty_json(&document)?)
            .with_context(|| format!("Failed to write dump file: {out}"))?;
        info!("wrote {out}");
    }
    if cli.dump_counts {
        let out = format!("_{stem}.counts");
        fs::write(&out, count_report(&document))
            .with_context(|| format!("Failed to write counts file: {out}"))?;
        info!("wrote {out}");
    }

    Ok(document)
}
