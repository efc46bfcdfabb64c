//! CLI parse tests.

use super::{first_path_entry, Cli};
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn parse_explicit_path() {
    let cli = parse(&["binorigin", "/usr/local/bin"]);
    assert_eq!(cli.target.path, Some(PathBuf::from("/usr/local/bin")));
    assert!(!cli.target.wd);
    assert!(!cli.target.gobin);
    assert!(!cli.target.gopath);
}

#[test]
fn parse_wd_flag() {
    let cli = parse(&["binorigin", "--wd"]);
    assert!(cli.target.wd);
    assert!(cli.target.path.is_none());
}

#[test]
fn parse_gobin_flag() {
    let cli = parse(&["binorigin", "--gobin"]);
    assert!(cli.target.gobin);
}

#[test]
fn parse_gopath_flag() {
    let cli = parse(&["binorigin", "--gopath"]);
    assert!(cli.target.gopath);
}

#[test]
fn exactly_one_target_is_required() {
    assert!(Cli::try_parse_from(["binorigin"]).is_err());
    assert!(Cli::try_parse_from(["binorigin", "--wd", "--gobin"]).is_err());
    assert!(Cli::try_parse_from(["binorigin", "/some/path", "--gopath"]).is_err());
}

#[test]
fn explicit_path_becomes_the_scan_root() {
    let cli = parse(&["binorigin", "/opt/tools"]);
    assert_eq!(cli.scan_root().unwrap(), PathBuf::from("/opt/tools"));
}

#[cfg(unix)]
#[test]
fn first_path_entry_takes_first_of_list() {
    assert_eq!(
        first_path_entry("/home/u/go:/mnt/extra/go"),
        Some(PathBuf::from("/home/u/go"))
    );
    assert_eq!(
        first_path_entry("/home/u/go"),
        Some(PathBuf::from("/home/u/go"))
    );
}
