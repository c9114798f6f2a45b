use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::logging::LogDestination;

/// Submit a Maven POM to a purplecat license service and show the result.
#[derive(Debug, Parser)]
#[command(name = "pomcheck", version)]
#[command(about = "Check the licenses of a Maven POM against a license service", long_about = None)]
pub struct Cli {
    /// Root URL of the license API (the part before `licenses`).
    #[arg(long, env = "POMCHECK_ENDPOINT", global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Dependency depth the service should resolve.
    #[arg(long, global = true, value_name = "N")]
    pub depth: Option<u32>,

    /// RON config file (default: ./pomcheck.ron when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LogTarget::File, global = true)]
    pub log: LogTarget,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Submit one POM and print the license report.
    Check {
        /// URL of a POM; takes precedence over --file when both are given.
        #[arg(long)]
        url: Option<String>,

        /// Local POM file (pom.xml or *.pom). Only the first one is uploaded.
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Also write the pretty-printed report to this file.
        #[arg(short, long, value_name = "FILE")]
        dest: Option<PathBuf>,
    },

    /// Interactive form: set a URL or file, submit, reset.
    Form,

    /// Inspect or clear the service's cache.
    Caches {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum CacheAction {
    /// Print every cached entry.
    Dump,
    /// Drop all cached entries.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
    Off,
}

impl LogTarget {
    pub fn destination(self) -> Option<LogDestination> {
        match self {
            LogTarget::Terminal => Some(LogDestination::Terminal),
            LogTarget::File => Some(LogDestination::File),
            LogTarget::Both => Some(LogDestination::Both),
            LogTarget::Off => None,
        }
    }
}
