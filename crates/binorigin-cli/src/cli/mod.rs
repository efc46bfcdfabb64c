//! CLI for binorigin.

mod commands;
#[cfg(test)]
mod tests;

use anyhow::{bail, Context, Result};
use binorigin_core::config;
use clap::Parser;
use std::env;
use std::path::PathBuf;

/// Top-level CLI: scan one location for Go binaries and report where each
/// one came from.
#[derive(Debug, Parser)]
#[command(name = "binorigin")]
#[command(about = "binorigin: report where installed Go binaries came from", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub target: ScanTarget,
}

/// Exactly one scan location: an explicit path, or one of the well-known
/// Go binary directories.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct ScanTarget {
    /// File or directory to scan.
    pub path: Option<PathBuf>,

    /// Scan the current working directory.
    #[arg(long)]
    pub wd: bool,

    /// Scan the "$GOBIN" directory.
    #[arg(long)]
    pub gobin: bool,

    /// Scan the "$GOPATH/bin" directory.
    #[arg(long)]
    pub gopath: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let root = cli.scan_root()?;
        commands::run_scan(&root, &cfg)
    }

    /// Picks the scan root from the mutually-exclusive target options.
    pub fn scan_root(&self) -> Result<PathBuf> {
        if let Some(path) = &self.target.path {
            return Ok(path.clone());
        }
        if self.target.wd {
            return env::current_dir().context("couldn't get current working directory");
        }
        if self.target.gobin {
            let gobin = env::var("GOBIN").unwrap_or_default();
            if gobin.is_empty() {
                bail!("GOBIN environment variable is empty or not set");
            }
            return Ok(PathBuf::from(gobin));
        }
        gopath_bin()
    }
}

/// `$GOPATH/bin`, with the go tool's own fallbacks: an unset GOPATH means
/// `$HOME/go`, and a GOPATH holding a list uses its first entry.
fn gopath_bin() -> Result<PathBuf> {
    let gopath = env::var("GOPATH").unwrap_or_default();
    let first = if gopath.is_empty() {
        tracing::info!("GOPATH is not set, falling back to $HOME/go like the go tool does");
        let home = dirs_next::home_dir().context("couldn't determine home directory")?;
        home.join("go")
    } else {
        match first_path_entry(&gopath) {
            Some(dir) => dir,
            None => bail!("GOPATH is set but holds no usable path"),
        }
    };
    Ok(first.join("bin"))
}

/// First entry of a platform path list (colon-separated on Unix,
/// semicolon-separated on Windows).
fn first_path_entry(list: &str) -> Option<PathBuf> {
    env::split_paths(list).next()
}
