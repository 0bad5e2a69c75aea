use clap::{ArgAction, Parser, Subcommand};
use skillsync::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skillsync",
    version,
    about = "Keep AI assistant skills consistent across platforms"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Permissions config file (defaults to <config-dir>/permissions.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that skills can be synced from one platform to another
    Validate {
        /// Source platform (claude-code, cursor, codex)
        source: String,

        /// Target platform
        target: String,

        /// Scope whose directories are used (user or repo)
        #[arg(long, default_value = "user")]
        scope: String,

        /// Treat empty content and unreadable files as errors
        #[arg(long)]
        strict: bool,

        /// Warn about skills that already exist in the target
        #[arg(long)]
        check_conflicts: bool,

        /// Scan skill content for secrets
        #[arg(long)]
        scan_secrets: bool,

        /// Warn about near-duplicate skills
        #[arg(long)]
        similarity: bool,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,
    },

    /// Scan files or directories for secrets
    Scan {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,
    },

    /// Find near-duplicate skills across platforms
    Similar {
        /// Platforms whose user-scope skills are compared
        #[arg(required = true)]
        platforms: Vec<String>,

        /// Minimum score to report, in (0, 1]
        #[arg(long, default_value_t = 0.6)]
        threshold: f64,

        /// lcs, jaccard, or combined
        #[arg(long, default_value = "combined")]
        algorithm: String,

        /// Compare characters instead of lines
        #[arg(long)]
        char_mode: bool,

        /// Character n-gram size for jaccard in char mode
        #[arg(long, default_value_t = 3)]
        ngram_size: usize,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,
    },

    /// Score the similarity of two files
    Compare {
        file_a: PathBuf,
        file_b: PathBuf,

        /// lcs, jaccard, or combined
        #[arg(long, default_value = "combined")]
        algorithm: String,

        /// Compare characters instead of lines
        #[arg(long)]
        char_mode: bool,
    },

    /// Inspect and manage the permissions config
    Permissions {
        #[command(subcommand)]
        action: PermissionsAction,
    },

    /// Show each platform's resolved skill directories
    Platforms,
}

#[derive(Subcommand)]
pub enum PermissionsAction {
    /// Print the effective config as YAML
    Show,

    /// Report problems in the config
    Validate,

    /// Write the default config
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Check whether an operation is allowed
    Check {
        /// read, write, delete, overwrite, backup, backup_delete
        operation: String,

        /// Scope the operation targets
        #[arg(long, default_value = "user")]
        scope: String,

        /// What the operation affects, shown in the prompt
        #[arg(long, default_value = "skill files")]
        details: String,

        /// Ask for confirmation when the operation requires it
        #[arg(long)]
        confirm: bool,
    },
}
