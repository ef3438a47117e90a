//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Launcher configuration
//!
//! The launcher runs with elevated privileges, so paths are fixed at build
//! time and the runtime environment only influences diagnostics.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Root under which snaps are mounted.
pub const SNAP_MOUNT_DIR: &str = match option_env!("SNAP_MOUNT_DIR") {
    Some(dir) => dir,
    None => "/snap",
};

/// Environment variable carrying the instance name of the snap being started.
pub const SNAP_INSTANCE_NAME_ENV: &str = "SNAP_INSTANCE_NAME";

/// Environment variable enabling debug output.
pub const SNAP_CONFINE_DEBUG_ENV: &str = "SNAP_CONFINE_DEBUG";

const DEFAULT_LOG_FILTER: &str = "warn";

pub fn snap_mount_dir() -> &'static Path {
    Path::new(SNAP_MOUNT_DIR)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let debug = std::env::var(SNAP_CONFINE_DEBUG_ENV).ok();
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        Self::resolve(debug.as_deref(), rust_log.as_deref())
    }

    fn resolve(debug: Option<&str>, rust_log: Option<&str>) -> Self {
        let filter = match (debug, rust_log) {
            (Some(flag), _) if !flag.is_empty() && flag != "0" => "debug",
            (_, Some(directives)) if EnvFilter::try_new(directives).is_ok() => directives,
            _ => DEFAULT_LOG_FILTER,
        };
        Self {
            filter: filter.to_string(),
        }
    }

    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}
