//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Gallery CLI - Validate and reconcile property photo galleries
///
/// Checks gallery documents against their minimum and maximum image counts,
/// predicts whether an edit would be allowed, runs the final submission gate
/// and prints the create/update/delete plan for persistence.
#[derive(Parser, Debug)]
#[command(
    name = "gallery",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GALLERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate gallery documents against their image count bounds
    Validate(ValidateArgs),

    /// Check whether an operation would be allowed on a gallery
    Check(CheckArgs),

    /// Run the submission gate and print the persistence plan
    Submit(SubmitArgs),

    /// Print the persistence plan without validating
    Reconcile(ReconcileArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Bounds selection shared by gallery commands
#[derive(Args, Debug, Clone, Default)]
pub struct BoundsArgs {
    /// Minimum number of visible images
    #[arg(long)]
    pub min: Option<usize>,

    /// Maximum number of visible images
    #[arg(long)]
    pub max: Option<usize>,

    /// Named bounds profile from the configuration (e.g. listing, gallery)
    #[arg(long)]
    pub profile: Option<String>,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Gallery documents (JSON or YAML)
    #[arg(value_name = "GALLERY", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub bounds: BoundsArgs,

    /// Show every image with its stage
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Gallery document (JSON or YAML)
    #[arg(value_name = "GALLERY")]
    pub file: PathBuf,

    /// Operation to check
    #[arg(value_enum)]
    pub operation: OperationArg,

    #[command(flatten)]
    pub bounds: BoundsArgs,
}

/// Arguments for the submit command
#[derive(Parser, Debug)]
pub struct SubmitArgs {
    /// Gallery document (JSON or YAML)
    #[arg(value_name = "GALLERY")]
    pub file: PathBuf,

    #[command(flatten)]
    pub bounds: BoundsArgs,

    /// Write the plan to a file instead of stdout
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the reconcile command
#[derive(Parser, Debug)]
pub struct ReconcileArgs {
    /// Gallery document (JSON or YAML)
    #[arg(value_name = "GALLERY")]
    pub file: PathBuf,

    /// Write the plan to a file instead of stdout
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show current configuration values
    Show,

    /// Validate current configuration
    Validate,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to .gallery.yaml)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Gallery operations the guard can check
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OperationArg {
    /// Add one image
    Add,
    /// Delete one image
    Delete,
    /// Reorder images
    Reorder,
    /// Start one more upload
    Upload,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<OperationArg> for gallery_core::Operation {
    fn from(operation: OperationArg) -> Self {
        match operation {
            OperationArg::Add => gallery_core::Operation::Add,
            OperationArg::Delete => gallery_core::Operation::Delete,
            OperationArg::Reorder => gallery_core::Operation::Reorder,
            OperationArg::Upload => gallery_core::Operation::Upload,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
