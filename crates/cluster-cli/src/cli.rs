//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use cluster_inventory::QueryMode;
use std::path::PathBuf;

/// Cluster dynamic inventory - prints the Ansible inventory built from config/
#[derive(Parser, Debug)]
#[command(name = "cluster-inventory")]
#[command(author, version, about, long_about = None)]
pub struct InventoryCli {
    /// Print the full inventory (the default when --host is not given)
    #[arg(long, conflicts_with = "host")]
    pub list: bool,

    /// Print the variables of a single host
    #[arg(long, value_name = "NAME")]
    pub host: Option<String>,

    /// Cluster root containing config/ and .env (defaults to the current directory)
    #[arg(long, env = "CLUSTER_ROOT", value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Enable verbose output on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl InventoryCli {
    /// The query selected by the flags.
    pub fn mode(&self) -> QueryMode {
        QueryMode::from_host(self.host.clone())
    }
}

/// Cluster tools - maintenance helpers for a cluster repository
#[derive(Parser, Debug)]
#[command(name = "cluster-tools")]
#[command(author, version, about, long_about = None)]
pub struct ToolsCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: ToolsCommand,
}

/// Available maintenance commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ToolsCommand {
    /// Remove caches and build debris under a root
    ///
    /// Protected system paths are never removed.
    ///
    /// Examples:
    ///   cluster-tools clean                      # Default patterns in the current directory
    ///   cluster-tools clean --dry-run            # Show what would go
    ///   cluster-tools clean --pattern '*.log'    # Only remove log files
    Clean {
        /// Root to clean (defaults to the current directory)
        #[arg(long, value_name = "PATH")]
        root: Option<PathBuf>,

        /// Glob matched against file and directory names (repeatable)
        #[arg(long = "pattern", value_name = "GLOB")]
        patterns: Vec<String>,

        /// Glob matched against directory names only (repeatable)
        #[arg(long = "dir", value_name = "GLOB")]
        dirs: Vec<String>,

        /// Preview removals without deleting anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Prompt for a password and print its SHA-512 crypt hash as .env lines
    HashPassword,
}
