use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "preserve")]
#[command(about = "Shield template tokens from text transforms", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: nearest preserve.toml, then the global config)
    #[arg(long, global = true, env = "PRESERVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pipe text through a command with protected tokens kept intact
    Run(RunArgs),

    /// Show the placeholder text the transform would receive
    Extract(ExtractArgs),

    /// Write a default preserve.toml in the current directory
    Init {
        /// Overwrite an existing preserve.toml
        #[arg(long)]
        force: bool,
    },

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Regex for the tokens to protect (overrides config)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Read from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// What to put in place of a placeholder with no capture
    #[arg(long, value_enum, conflicts_with = "marker")]
    pub on_miss: Option<MissArg>,

    /// Put this sentinel in place of a placeholder with no capture
    #[arg(long)]
    pub marker: Option<String>,

    /// Fail if any placeholder cannot be restored
    #[arg(long)]
    pub strict: bool,

    /// Transform command and its arguments (default: transform.command from config)
    #[arg(last = true)]
    pub command: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the text and the captured tokens as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissArg {
    Empty,
    Keep,
}
