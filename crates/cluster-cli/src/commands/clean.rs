//! Cleanup command implementation

use std::path::Path;

use colored::Colorize;

use cluster_fs::{CleanOptions, CleanReport, clean};

use crate::error::Result;

/// Run the clean command
///
/// Empty pattern lists fall back to the default cache patterns.
pub fn run_clean(root: &Path, patterns: &[String], dirs: &[String], dry_run: bool) -> Result<()> {
    let defaults = CleanOptions::default();
    let options = CleanOptions {
        patterns: if patterns.is_empty() {
            defaults.patterns
        } else {
            patterns.to_vec()
        },
        dirs: if dirs.is_empty() {
            defaults.dirs
        } else {
            dirs.to_vec()
        },
        dry_run,
    };

    println!(
        "{} Cleaning {}{}",
        "=>".blue().bold(),
        root.display().to_string().cyan(),
        if dry_run { " (dry run)".dimmed().to_string() } else { String::new() }
    );

    let report = clean(root, &options)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &CleanReport) {
    let verb = if report.dry_run { "Would remove" } else { "Removed" };

    for path in &report.removed {
        println!("   {} {}", "-".yellow(), path.display());
    }
    for skipped in &report.skipped {
        println!(
            "   {} {} ({})",
            "!".red(),
            skipped.path.display(),
            skipped.reason.dimmed()
        );
    }

    if report.removed.is_empty() {
        println!("{} Nothing to clean.", "OK".green().bold());
    } else {
        println!(
            "{} {} {} path(s).",
            "OK".green().bold(),
            verb,
            report.removed.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn dry_run_leaves_matches_in_place() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pkg/__pycache__")).unwrap();

        run_clean(temp.path(), &[], &[], true).unwrap();

        assert!(temp.path().join("pkg/__pycache__").exists());
    }

    #[test]
    fn custom_pattern_replaces_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("run.log"), "x").unwrap();
        fs::create_dir_all(temp.path().join("__pycache__")).unwrap();

        run_clean(temp.path(), &["*.log".to_string()], &[], false).unwrap();

        assert!(!temp.path().join("run.log").exists());
        assert!(temp.path().join("__pycache__").exists());
    }
}
