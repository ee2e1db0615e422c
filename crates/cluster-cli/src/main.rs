//! Cluster dynamic inventory
//!
//! Prints the Ansible inventory for a cluster repository and persists it to
//! `inventory/inventory.json`.

use clap::Parser;
use colored::Colorize;

use cluster_cli::Result;
use cluster_cli::cli::InventoryCli;
use cluster_cli::commands;
use cluster_cli::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = InventoryCli::parse();
    logging::init(cli.verbose);

    let root = commands::resolve_root(cli.root.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run_inventory(&root, &cli.mode(), &mut out)
}
