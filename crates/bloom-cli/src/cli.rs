//! Command-line arguments.

use std::path::PathBuf;

use bloom_core::Format;
use clap::{Parser, Subcommand};

/// Bloom: front matter aggregation and markdown rendering
#[derive(Parser, Debug)]
#[command(name = "bloom", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to ./bloom.toml when present)
    #[arg(short, long, global = true, env = "BLOOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process a document and print `{metadata, content}` as JSON
    Render(RenderArgs),

    /// Split a document and print its raw front matter and body
    Split(SplitArgs),

    /// Inspect or create the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Front matter options shared by `render` and `split`.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FrontMatterArgs {
    /// Front matter format (none, ini, json, yaml, toml)
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Literal fence line delimiting the front matter
    #[arg(short, long)]
    pub divider: Option<String>,

    /// Regex divider with a `meta` capture group
    #[arg(long, conflicts_with = "divider")]
    pub pattern: Option<String>,
}

/// Arguments of `bloom render`.
#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Input file, or `-` for stdin
    pub input: PathBuf,

    /// Front matter options
    #[command(flatten)]
    pub front_matter: FrontMatterArgs,

    /// Add a class to matching elements, as SELECTOR=CLASS (repeatable)
    #[arg(long = "add-class", value_name = "SELECTOR=CLASS")]
    pub add_class: Vec<String>,

    /// Remove a class from matching elements, as SELECTOR=CLASS (repeatable)
    #[arg(long = "remove-class", value_name = "SELECTOR=CLASS")]
    pub remove_class: Vec<String>,

    /// Print only the rendered content instead of JSON
    #[arg(long)]
    pub content_only: bool,
}

/// Arguments of `bloom split`.
#[derive(clap::Args, Debug)]
pub struct SplitArgs {
    /// Input file, or `-` for stdin
    pub input: PathBuf,

    /// Front matter options
    #[command(flatten)]
    pub front_matter: FrontMatterArgs,
}

/// `bloom config` actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the path of the configuration file in use
    Path,

    /// Print a single value by dotted key (e.g. `front_matter.format`)
    Get {
        /// Dotted key
        key: String,
    },

    /// Write a default configuration file
    Init {
        /// Target file (defaults to ./bloom.toml)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
