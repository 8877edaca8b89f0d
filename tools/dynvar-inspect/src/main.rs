// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

mod json;
mod stats;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dynvar::{codec, DecodeLimits, Decoder, Kind, Variant};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dynvar-inspect")]
#[command(about = "Inspect and convert dynvar binary encodings")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a file and summarize its shape
    Inspect {
        /// Encoded input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Maximum nesting accepted while decoding
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Decode a file and print it as JSON
    ToJson {
        /// Encoded input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Compact single-line output
        #[arg(long)]
        compact: bool,
    },

    /// Encode a JSON document
    FromJson {
        /// JSON input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Encoded output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Inspect { input, max_depth } => cmd_inspect(&input, max_depth)?,
        Commands::ToJson { input, compact } => cmd_to_json(&input, compact)?,
        Commands::FromJson { input, output } => cmd_from_json(&input, &output)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    // A second init only happens under tests; ignore it.
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.to_string()),
    )
    .format_timestamp_millis()
    .try_init();
}

fn read_value(input: &Path, limits: DecodeLimits) -> anyhow::Result<Variant> {
    let bytes =
        std::fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
    let mut decoder = Decoder::with_limits(bytes.as_slice(), limits);
    let value = decoder
        .decode_value()
        .with_context(|| format!("{} is not a valid encoding", input.display()))?;
    let trailing = bytes.len() - decoder.position();
    if trailing > 0 {
        anyhow::bail!(
            "{}: {} trailing bytes after the first value",
            input.display(),
            trailing
        );
    }
    log::debug!("[inspect] decoded {} bytes from {}", bytes.len(), input.display());
    Ok(value)
}

fn cmd_inspect(input: &Path, max_depth: Option<usize>) -> anyhow::Result<()> {
    let mut limits = DecodeLimits::default();
    if let Some(depth) = max_depth {
        limits = limits.max_depth(depth);
    }
    let value = read_value(input, limits)?;
    let stats = stats::TreeStats::collect(&value);
    let size = std::fs::metadata(input).map(|m| m.len()).unwrap_or(0);

    println!("[OK] {}", input.display());
    println!("  root:  {}", value.kind());
    println!("  size:  {size} bytes");
    println!("  nodes: {}", stats.nodes);
    println!("  depth: {}", stats.depth);
    if stats.tombstones > 0 {
        println!("  tombstones: {}", stats.tombstones);
    }
    println!("\nKinds:");
    for kind in Kind::ALL {
        let count = stats.count(kind);
        if count > 0 {
            println!("  {:<9} {}", kind.name(), count);
        }
    }
    Ok(())
}

fn cmd_to_json(input: &Path, compact: bool) -> anyhow::Result<()> {
    let value = read_value(input, DecodeLimits::default())?;
    let doc = json::to_json(&value)?;
    let text = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    println!("{text}");
    Ok(())
}

fn cmd_from_json(input: &Path, output: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let doc: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;
    let value = json::from_json(&doc)?;
    let bytes = codec::encode(&value)?;
    std::fs::write(output, &bytes)
        .with_context(|| format!("cannot write {}", output.display()))?;
    println!(
        "[OK] Wrote {} bytes ({} root) to {}",
        bytes.len(),
        value.kind(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_then_inspect() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("doc.json");
        let bin_path = dir.path().join("doc.bin");
        std::fs::write(&json_path, r#"{"a": [1, true, "x"], "b": null}"#).unwrap();

        cmd_from_json(&json_path, &bin_path).unwrap();
        let value = read_value(&bin_path, DecodeLimits::default()).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 2);

        cmd_inspect(&bin_path, None).unwrap();
        cmd_to_json(&bin_path, true).unwrap();
        assert!(cmd_inspect(&bin_path, Some(1)).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.bin");
        std::fs::write(&path, b"nn").unwrap();
        let err = read_value(&path, DecodeLimits::default()).unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }
}
