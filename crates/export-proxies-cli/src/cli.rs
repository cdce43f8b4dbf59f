//! CLI argument definitions for export-proxies
//!
//! Uses clap for argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// export-proxies - print the system proxy settings as shell exports
///
/// Reads the active proxy configuration of the operating system and prints
/// `export` statements for http_proxy, https_proxy, ftp_proxy, all_proxy and
/// no_proxy (plus their uppercase and capitalized spellings).
#[derive(Parser, Debug)]
#[command(name = "export-proxies")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Pick up the system proxy in the current shell
    eval \"$(export-proxies)\"

    # Use a saved snapshot instead of the system store
    export-proxies --from proxies.json

    # Capture the current system settings as a snapshot
    export-proxies --dump > proxies.json
")]
pub struct Cli {
    /// Read proxy settings from a JSON snapshot instead of the system store
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Print the raw proxy settings as JSON instead of export lines
    #[arg(long)]
    pub dump: bool,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is not set.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
