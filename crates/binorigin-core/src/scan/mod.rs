//! Filesystem scanning for Go binaries.
//!
//! Walks a directory tree (or takes a single file), keeps the executables,
//! reads each one's embedded build info and resolves its repository URL.

use crate::buildinfo;
use crate::providers::ProviderRegistry;
use crate::resolve::{self, BuildMetadata, RepoUrl};
use crate::vanity::VanityLookup;
use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// One scanned Go binary with its resolved repository URL.
#[derive(Debug, Clone)]
pub struct BinRecord {
    /// File name without its directory, e.g. `arc` / `arc.exe`.
    pub filename: String,
    pub package_path: String,
    pub module_path: String,
    /// Version tag, e.g. `v3.5.1`; `(devel)` for bootstrap-installed tools.
    pub module_version: String,
    /// VCS revision hash, `?` when the binary carries none.
    pub vcs_revision: String,
    /// Browsable repository URL, possibly a marked guess.
    pub repo_url: RepoUrl,
}

/// Scans `root` (a file or directory tree) and resolves every Go binary
/// found under it.
///
/// A binary whose module path is malformed under a known provider is skipped
/// with a warning; the rest of the scan continues.
pub fn scan_path(
    root: &Path,
    registry: &ProviderRegistry,
    vanity: &dyn VanityLookup,
) -> Result<Vec<BinRecord>> {
    let mut records = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.with_context(|| format!("couldn't walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !is_executable(entry.path()) {
            continue;
        }
        match scan_file(entry.path(), registry, vanity) {
            Ok(Some(record)) => records.push(record),
            // Not a Go binary; ignore.
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("skipping {}: {:#}", entry.path().display(), err);
            }
        }
    }
    Ok(records)
}

/// Reads one executable's build info and resolves its repository URL.
///
/// Returns `Ok(None)` when the file is not a Go binary.
pub fn scan_file(
    path: &Path,
    registry: &ProviderRegistry,
    vanity: &dyn VanityLookup,
) -> Result<Option<BinRecord>> {
    let info = match buildinfo::read_file(path)? {
        Some(info) => info,
        None => return Ok(None),
    };

    let meta = BuildMetadata {
        package_path: info.package_path.clone(),
        module_path: info.module_path.clone(),
    };
    let repo_url = resolve::resolve_repo_url(&meta, registry, vanity)
        .with_context(|| format!("couldn't resolve repository for {}", path.display()))?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(BinRecord {
        filename,
        package_path: info.package_path,
        module_path: info.module_path,
        module_version: info.module_version,
        vcs_revision: info.vcs_revision,
        repo_url,
    }))
}

/// Whether the file should be considered an executable.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("exe"))
        .unwrap_or(false)
}
