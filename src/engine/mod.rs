//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Invocation validation core

pub mod fallback;
pub mod invocation;
pub mod validation;

pub use fallback::{base_snap_mount_point, BASE_SNAP_FALLBACKS, DEFAULT_BASE_SNAP};
pub use invocation::{Invocation, InvocationArgs, InvocationError};
pub use validation::{
    hook_security_tag_for, security_tag_for, snap_name_of, validate_instance_key,
    validate_instance_name, validate_snap_name, verify_security_tag, ValidationError,
};
