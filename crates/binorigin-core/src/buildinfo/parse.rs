//! Parser for the sentinel-fenced module-info payload.
//!
//! The payload is the text `go version -m` prints, tab-separated:
//!
//! ```text
//! path	github.com/mholt/archiver/v3/cmd/arc
//! mod	github.com/mholt/archiver/v3	v3.5.1	h1:abc=
//! build	vcs.revision=cc194d2e4af2dc09a812aa0ff61adc4813ea6c69
//! ```

use super::BuildInfo;
use anyhow::{anyhow, Result};

pub fn parse_module_info(text: &str) -> Result<BuildInfo> {
    let mut package_path = None;
    let mut module_path = None;
    let mut module_version = None;
    let mut vcs_revision = None;

    for line in text.lines() {
        let mut fields = line.split('\t');
        match fields.next() {
            Some("path") => package_path = fields.next().map(str::to_string),
            Some("mod") => {
                module_path = fields.next().map(str::to_string);
                module_version = fields.next().map(str::to_string);
            }
            Some("build") => {
                if let Some(setting) = fields.next() {
                    if let Some(rev) = setting.strip_prefix("vcs.revision=") {
                        vcs_revision = Some(rev.to_string());
                    }
                }
            }
            // dep/=>/other build settings are irrelevant here.
            _ => {}
        }
    }

    let package_path =
        package_path.ok_or_else(|| anyhow!("module info has no `path` line"))?;
    let module_path = module_path.ok_or_else(|| anyhow!("module info has no `mod` line"))?;

    Ok(BuildInfo {
        package_path,
        module_path,
        module_version: module_version.unwrap_or_else(|| "(devel)".to_string()),
        vcs_revision: vcs_revision.unwrap_or_else(|| "?".to_string()),
    })
}
