//! Cluster maintenance tools

use clap::Parser;
use colored::Colorize;

use cluster_cli::Result;
use cluster_cli::cli::{ToolsCli, ToolsCommand};
use cluster_cli::commands;
use cluster_cli::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = ToolsCli::parse();
    logging::init(cli.verbose);

    match cli.command {
        ToolsCommand::Clean {
            root,
            patterns,
            dirs,
            dry_run,
        } => {
            let root = commands::resolve_root(root.as_deref())?;
            commands::run_clean(&root, &patterns, &dirs, dry_run)
        }
        ToolsCommand::HashPassword => commands::run_hash_password(),
    }
}
