//! Go build-info extraction.
//!
//! Compiled Go binaries embed the module metadata that `go version -m`
//! prints. The payload is fenced by a fixed 16-byte sentinel, so we locate
//! the fence directly in the raw bytes instead of walking each object
//! format's section table; the same search works for ELF, Mach-O and PE.

mod parse;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Magic that opens the embedded build-info header.
const BUILDINFO_MAGIC: &[u8] = b"\xff Go buildinf:";

/// 16-byte fence surrounding the module-info payload.
const MODINFO_SENTINEL: [u8; 16] = [
    0x30, 0x77, 0xaf, 0x0c, 0x92, 0x74, 0x08, 0x02, 0x41, 0xe1, 0xc1, 0x07, 0xe6, 0xd6, 0x18, 0xe6,
];

/// Build metadata embedded in a Go binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Package that was built, e.g. `github.com/mholt/archiver/v3/cmd/arc`.
    pub package_path: String,
    /// Module root, e.g. `github.com/mholt/archiver/v3`.
    pub module_path: String,
    /// Module version tag, e.g. `v3.5.1`; `(devel)` when the binary carries
    /// no usable version (bootstrap-installed tools like mage).
    pub module_version: String,
    /// VCS revision hash, `?` when absent.
    pub vcs_revision: String,
}

/// Reads the build info embedded in the file at `path`.
///
/// Returns `Ok(None)` when the file is not a Go binary (no build-info magic
/// or no module-info fence); `Err` when a recognized payload is malformed.
pub fn read_file(path: &Path) -> Result<Option<BuildInfo>> {
    let data =
        fs::read(path).with_context(|| format!("couldn't read {}", path.display()))?;
    read_bytes(&data)
}

/// Same as [`read_file`], over bytes already in memory.
pub fn read_bytes(data: &[u8]) -> Result<Option<BuildInfo>> {
    if find(data, BUILDINFO_MAGIC).is_none() {
        return Ok(None);
    }
    let payload = match modinfo_payload(data) {
        Some(payload) => payload,
        None => return Ok(None),
    };
    let text = std::str::from_utf8(payload).context("module info is not valid UTF-8")?;
    parse::parse_module_info(text).map(Some)
}

/// Bytes between the first sentinel pair, if both fences are present.
fn modinfo_payload(data: &[u8]) -> Option<&[u8]> {
    let start = find(data, &MODINFO_SENTINEL)? + MODINFO_SENTINEL.len();
    let rest = &data[start..];
    let end = find(rest, &MODINFO_SENTINEL)?;
    Some(&rest[..end])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
