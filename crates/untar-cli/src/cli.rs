//! CLI argument parsing using clap.

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "untar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// ustar archives to extract, processed in order
    #[arg(value_name = "ARCHIVE", required_unless_present = "completions")]
    pub archives: Vec<PathBuf>,

    /// Extract into this directory instead of the current one
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Enable verbose output and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output one JSON result per archive
    #[arg(short, long)]
    pub json: bool,

    /// Ignore modes recorded in the archive and use 0644/0755
    #[arg(long)]
    pub no_preserve_permissions: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "error" }
    }
}
