use crate::domain::Version;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

fn parse_version(s: &str) -> Result<Version, String> {
    Version::parse(s).map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "qsup", version, about = "Resolve and download qsuits releases")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to an optional TOML config file overriding endpoints and timeouts
    #[arg(long, global = true, env = "QSUITS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the latest published version
    Latest,

    /// Download a version into the local cache unless it is already there
    Update(UpdateArgs),

    /// Check whether a version is cached
    Exists(ExistsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Directory holding the .qsuits cache
    #[arg(long, env = "QSUITS_PATH", default_value = ".")]
    pub path: PathBuf,

    /// Version to fetch (defaults to the latest published version)
    #[arg(long, env = "QSUITS_VERSION", value_parser = parse_version)]
    pub version: Option<Version>,
}

#[derive(Args, Debug)]
pub struct ExistsArgs {
    /// Directory holding the .qsuits cache
    #[arg(long, env = "QSUITS_PATH", default_value = ".")]
    pub path: PathBuf,

    /// Version to look for
    #[arg(long, value_parser = parse_version)]
    pub version: Version,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generates and prints shell completions to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.shell, &mut cmd, "qsup", &mut std::io::stdout());
    }
}
