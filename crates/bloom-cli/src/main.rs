//! Bloom CLI
//!
//! Command-line interface for Bloom document processing.

#![forbid(unsafe_code)]

use anyhow::Result;
use bloom_cli::{Args, BloomConfig, logging};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();

    // Config errors resurface in `run`; logging falls back to warn
    let level = BloomConfig::load(args.config.as_deref())
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| "warn".to_string());
    logging::init(&level, args.verbose);

    let output = bloom_cli::run(args)?;
    if !output.is_empty() {
        println!("{}", output.trim_end_matches('\n'));
    }
    Ok(())
}
