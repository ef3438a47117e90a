//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Base snap fallback for systems migrating from ubuntu-core to core

use std::path::{Path, PathBuf};

use super::invocation::Invocation;

/// Base snap used when none is given on the command line.
pub const DEFAULT_BASE_SNAP: &str = "core";

/// Default base snap name and the legacy name it may degrade to.
pub const BASE_SNAP_FALLBACKS: &[(&str, &str)] = &[(DEFAULT_BASE_SNAP, "ubuntu-core")];

/// Directory where the current revision of a base snap is mounted.
pub fn base_snap_mount_point(snap_mount_dir: &Path, base_snap_name: &str) -> PathBuf {
    snap_mount_dir.join(base_snap_name).join("current/")
}

impl Invocation {
    /// Swap the base snap for its legacy name when only the legacy one is mounted.
    ///
    /// Nothing is reported if neither snap is present; mount setup fails
    /// later with a precise error in that case.
    pub fn apply_fallback(&mut self, snap_mount_dir: &Path) {
        if self.fallback_applied {
            return;
        }

        let Some(&(default, fallback)) = BASE_SNAP_FALLBACKS
            .iter()
            .find(|(default, _)| *default == self.base_snap_name())
        else {
            return;
        };

        if base_snap_mount_point(snap_mount_dir, default).exists() {
            return;
        }

        let fallback_mount_point = base_snap_mount_point(snap_mount_dir, fallback);
        if fallback_mount_point.exists() {
            self.set_base_snap_name(fallback);
            tracing::debug!(
                "falling back to {} instead of unavailable {} snap",
                fallback,
                default
            );
        } else {
            tracing::trace!(
                "neither {} nor {} is mounted under {}",
                default,
                fallback,
                snap_mount_dir.display()
            );
        }
    }
}
