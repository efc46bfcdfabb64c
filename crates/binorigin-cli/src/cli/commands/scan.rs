//! Scan a path and print one line per Go binary found.

use anyhow::Result;
use binorigin_core::config::BinoriginConfig;
use binorigin_core::providers::ProviderRegistry;
use binorigin_core::scan::{self, BinRecord};
use binorigin_core::vanity::VanityResolver;
use std::path::Path;

pub fn run_scan(root: &Path, cfg: &BinoriginConfig) -> Result<()> {
    tracing::info!("scanning {}", root.display());

    let mut registry = ProviderRegistry::builtin();
    registry.extend_default_convention(cfg.extra_providers.iter().cloned());
    let vanity = VanityResolver::from_config(cfg);

    let records = scan::scan_path(root, &registry, &vanity)?;
    if records.is_empty() {
        println!("No Go binaries found under {}", root.display());
        return Ok(());
    }
    print_table(&records);
    Ok(())
}

/// Prints `filename version revision url`, padding the first three columns
/// to their widest value so the URLs line up.
fn print_table(records: &[BinRecord]) {
    let name_width = records.iter().map(|r| r.filename.len()).max().unwrap_or(0);
    let version_width = records
        .iter()
        .map(|r| r.module_version.len())
        .max()
        .unwrap_or(0);

    for record in records {
        println!(
            "{:<name_width$} {:<version_width$} {:<8} {}",
            record.filename,
            record.module_version,
            short_revision(&record.vcs_revision),
            record.repo_url,
        );
    }
}

/// First 8 characters of the revision hash (or the `?` placeholder).
fn short_revision(revision: &str) -> &str {
    match revision.char_indices().nth(8) {
        Some((idx, _)) => &revision[..idx],
        None => revision,
    }
}
