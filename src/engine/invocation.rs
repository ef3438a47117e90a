//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Validated description of what the launcher is about to confine
//!
//! Every value that reaches [`Invocation`] comes from the environment or the
//! command line and is therefore attacker controlled. The record is only
//! constructed once all of it has been checked.

use serde::Serialize;
use thiserror::Error;

use super::fallback::DEFAULT_BASE_SNAP;
use super::validation::{
    snap_name_of, validate_instance_name, validate_snap_name, verify_security_tag,
    ValidationError,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("SNAP_INSTANCE_NAME is not set")]
    InstanceNameNotSet,
    #[error(transparent)]
    InvalidInstanceName(ValidationError),
    #[error("security tag {0} not allowed")]
    SecurityTagNotAllowed(String),
    #[error("invalid base snap name")]
    InvalidBaseSnapName(#[source] ValidationError),
    #[error("executable is not set")]
    ExecutableNotSet,
}

/// Parsed command line as seen by the invocation builder.
///
/// Syntax is the parser's business. Implementations only expose the values.
pub trait InvocationArgs {
    fn security_tag(&self) -> Option<&str>;
    fn base_snap(&self) -> Option<&str>;
    fn executable(&self) -> Option<&str>;
    fn is_classic_confinement(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    snap_instance: String,
    security_tag: String,
    base_snap_name: String,
    executable: String,
    classic_confinement: bool,
    #[serde(skip)]
    pub(super) fallback_applied: bool,
}

impl Invocation {
    /// Validate untrusted launcher input and assemble the invocation.
    ///
    /// `snap_instance` is the value of `SNAP_INSTANCE_NAME`, passed in by the
    /// caller so that nothing here touches process state.
    pub fn new<A>(args: &A, snap_instance: Option<&str>) -> Result<Self, InvocationError>
    where
        A: InvocationArgs + ?Sized,
    {
        let snap_instance = match snap_instance {
            Some(name) if !name.is_empty() => name,
            _ => return Err(InvocationError::InstanceNameNotSet),
        };
        validate_instance_name(snap_instance).map_err(InvocationError::InvalidInstanceName)?;

        let security_tag = args.security_tag().unwrap_or_default();
        if !verify_security_tag(security_tag, snap_instance) {
            return Err(InvocationError::SecurityTagNotAllowed(
                security_tag.to_string(),
            ));
        }

        let base_snap_name = args.base_snap().unwrap_or(DEFAULT_BASE_SNAP);
        validate_snap_name(base_snap_name).map_err(InvocationError::InvalidBaseSnapName)?;

        // Only presence is checked. Restricting this to snap-exec or to a known
        // set of debugging tools is left to the executor.
        let executable = match args.executable() {
            Some(exe) if !exe.is_empty() => exe,
            _ => return Err(InvocationError::ExecutableNotSet),
        };

        let invocation = Self {
            snap_instance: snap_instance.to_string(),
            security_tag: security_tag.to_string(),
            base_snap_name: base_snap_name.to_string(),
            executable: executable.to_string(),
            classic_confinement: args.is_classic_confinement(),
            fallback_applied: false,
        };

        tracing::debug!("security tag: {}", invocation.security_tag);
        tracing::debug!("executable:   {}", invocation.executable);
        tracing::debug!("confinement:  {}", invocation.confinement());
        tracing::debug!("base snap:    {}", invocation.base_snap_name);

        Ok(invocation)
    }

    pub fn snap_instance(&self) -> &str {
        &self.snap_instance
    }

    /// Snap name without the instance key.
    pub fn snap_name(&self) -> &str {
        snap_name_of(&self.snap_instance)
    }

    pub fn security_tag(&self) -> &str {
        &self.security_tag
    }

    pub fn base_snap_name(&self) -> &str {
        &self.base_snap_name
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn is_classic_confinement(&self) -> bool {
        self.classic_confinement
    }

    fn confinement(&self) -> &'static str {
        if self.classic_confinement {
            "classic"
        } else {
            "non-classic"
        }
    }

    pub(super) fn set_base_snap_name(&mut self, name: &str) {
        self.base_snap_name = name.to_string();
        self.fallback_applied = true;
    }
}
