//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Command-line interface

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;

use crate::config::{self, SNAP_INSTANCE_NAME_ENV};
use crate::engine::{Invocation, InvocationArgs};

/// Validate and prepare a confined snap invocation
#[derive(Parser, Debug, Clone)]
#[command(name = "snap-confine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Run with classic confinement
    #[arg(long)]
    pub classic: bool,

    /// Base snap providing the root filesystem (defaults to core)
    #[arg(long, value_name = "BASE")]
    pub base: Option<String>,

    /// Print the validated invocation as JSON
    #[arg(long)]
    pub print_invocation: bool,

    /// Security tag of the application or hook, e.g. snap.hello.app
    pub security_tag: String,

    /// Program to run inside the confinement
    pub executable: String,

    /// Arguments for the executable
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl InvocationArgs for Cli {
    fn security_tag(&self) -> Option<&str> {
        Some(&self.security_tag)
    }

    fn base_snap(&self) -> Option<&str> {
        self.base.as_deref()
    }

    fn executable(&self) -> Option<&str> {
        Some(&self.executable)
    }

    fn is_classic_confinement(&self) -> bool {
        self.classic
    }
}

#[derive(Serialize)]
struct InvocationReport<'a> {
    #[serde(flatten)]
    invocation: &'a Invocation,
    args: &'a [String],
}

pub fn run(cli: &Cli) -> Result<()> {
    // Non UTF-8 values become U+FFFD and are rejected by the name grammar.
    let snap_instance = std::env::var_os(SNAP_INSTANCE_NAME_ENV)
        .map(|value| value.to_string_lossy().into_owned());

    let invocation = prepare(cli, snap_instance.as_deref(), config::snap_mount_dir())?;

    tracing::info!(
        "invocation of {} ready, base snap {}",
        invocation.security_tag(),
        invocation.base_snap_name()
    );

    if cli.print_invocation {
        let report = InvocationReport {
            invocation: &invocation,
            args: &cli.args,
        };
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize invocation")?;
        println!("{}", json);
    }

    Ok(())
}

/// Build the invocation and resolve its base snap against `snap_mount_dir`.
pub fn prepare(
    cli: &Cli,
    snap_instance: Option<&str>,
    snap_mount_dir: &Path,
) -> Result<Invocation> {
    let mut invocation = Invocation::new(cli, snap_instance)?;
    invocation.apply_fallback(snap_mount_dir);
    Ok(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{base_snap_mount_point, InvocationError};
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("snap-confine").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_minimal() {
        let cli = parse(&["snap.hello.app", "/usr/lib/snapd/snap-exec"]);
        assert_eq!(cli.security_tag, "snap.hello.app");
        assert_eq!(cli.executable, "/usr/lib/snapd/snap-exec");
        assert_eq!(cli.base, None);
        assert!(!cli.classic);
        assert!(cli.args.is_empty());
    }

    #[test]
    fn test_parse_options_and_trailing_args() {
        let cli = parse(&[
            "--classic",
            "--base",
            "core22",
            "snap.hello.app",
            "snap-exec",
            "--flag",
            "value",
        ]);
        assert!(cli.classic);
        assert_eq!(cli.base.as_deref(), Some("core22"));
        assert_eq!(cli.args, vec!["--flag".to_string(), "value".to_string()]);
    }

    #[test]
    fn test_parse_requires_executable() {
        assert!(Cli::try_parse_from(["snap-confine", "snap.hello.app"]).is_err());
    }

    #[test]
    fn test_prepare_applies_fallback() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(base_snap_mount_point(dir.path(), "ubuntu-core")).unwrap();

        let cli = parse(&["snap.hello.app", "snap-exec"]);
        let invocation = prepare(&cli, Some("hello"), dir.path()).unwrap();
        assert_eq!(invocation.base_snap_name(), "ubuntu-core");
    }

    #[test]
    fn test_prepare_surfaces_validation_error() {
        let dir = TempDir::new().unwrap();
        let cli = parse(&["snap.other.app", "snap-exec"]);
        let err = prepare(&cli, Some("hello"), dir.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvocationError>(),
            Some(&InvocationError::SecurityTagNotAllowed(
                "snap.other.app".to_string()
            ))
        );
    }

    #[test]
    fn test_report_includes_args() {
        let cli = parse(&["snap.hello.app", "snap-exec", "one"]);
        let invocation = Invocation::new(&cli, Some("hello")).unwrap();
        let report = InvocationReport {
            invocation: &invocation,
            args: &cli.args,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["security_tag"], "snap.hello.app");
        assert_eq!(json["args"], serde_json::json!(["one"]));
    }
}
