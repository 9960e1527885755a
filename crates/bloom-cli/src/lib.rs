//! # bloom-cli
//!
//! Command-line front end for Bloom.
//!
//! - `bloom render <FILE>`: process a document, print `{metadata, content}`
//! - `bloom split <FILE>`: print the raw front matter block and body
//! - `bloom config show|path|get|init`: inspect or create `bloom.toml`

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod logging;

pub use cli::{Args, Command, ConfigAction};
pub use config::BloomConfig;

use anyhow::Result;

/// Runs a parsed command line and returns what should be printed.
pub fn run(args: Args) -> Result<String> {
    let config_path = args.config.as_deref();

    match args.command {
        Command::Config { action } => config_handlers::handle_config_command(config_path, action),
        Command::Render(render) => {
            let config = BloomConfig::load(config_path)?;
            commands::cmd_render(&config, &render)
        }
        Command::Split(split) => {
            let config = BloomConfig::load(config_path)?;
            commands::cmd_split(&config, &split)
        }
    }
}
