//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Name grammars for snaps, instances and security tags

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Longest permitted snap name.
pub const SNAP_NAME_MAX_LEN: usize = 40;
/// Longest permitted instance key.
pub const INSTANCE_KEY_MAX_LEN: usize = 10;
/// Longest permitted instance name (`<snap>_<key>`).
pub const INSTANCE_NAME_MAX_LEN: usize = SNAP_NAME_MAX_LEN + 1 + INSTANCE_KEY_MAX_LEN;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid snap name: {0}")]
    InvalidName(String),
    #[error("invalid instance key: {0}")]
    InvalidInstanceKey(String),
    #[error("invalid snap instance name: {0}")]
    InvalidInstanceName(String),
}

// The instance group is compared against the expected instance after matching.
static SECURITY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^snap\.([a-z0-9](?:-?[a-z0-9])*(?:_[a-z0-9]{1,10})?)\.(?:[a-zA-Z0-9](?:-?[a-zA-Z0-9])*|hook\.[a-z](?:-?[a-z0-9])*)$",
    )
    .expect("security tag pattern is valid")
});

/// Validate a snap name.
/// Names are 2 to 40 characters of lowercase letters, digits and single
/// hyphens, contain at least one letter and neither start nor end with a hyphen.
pub fn validate_snap_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::InvalidName(
            "snap name cannot be empty".to_string(),
        ));
    }

    if name.len() < 2 {
        return Err(ValidationError::InvalidName(
            "snap name must be longer than 1 character".to_string(),
        ));
    }

    if name.len() > SNAP_NAME_MAX_LEN {
        return Err(ValidationError::InvalidName(format!(
            "snap name must be shorter than {} characters",
            SNAP_NAME_MAX_LEN
        )));
    }

    for ch in name.chars() {
        if !ch.is_ascii_lowercase() && !ch.is_ascii_digit() && ch != '-' {
            return Err(ValidationError::InvalidName(format!(
                "snap name must use lower case letters, digits or dashes, found '{}'",
                ch.escape_default()
            )));
        }
    }

    if !name.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::InvalidName(
            "snap name must contain at least one letter".to_string(),
        ));
    }

    if name.starts_with('-') {
        return Err(ValidationError::InvalidName(
            "snap name cannot start with a dash".to_string(),
        ));
    }

    if name.ends_with('-') {
        return Err(ValidationError::InvalidName(
            "snap name cannot end with a dash".to_string(),
        ));
    }

    if name.contains("--") {
        return Err(ValidationError::InvalidName(
            "snap name cannot contain two consecutive dashes".to_string(),
        ));
    }

    Ok(())
}

/// Validate the instance key, the part of an instance name after `_`.
pub fn validate_instance_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::InvalidInstanceKey(
            "instance key cannot be empty".to_string(),
        ));
    }

    if key.len() > INSTANCE_KEY_MAX_LEN {
        return Err(ValidationError::InvalidInstanceKey(format!(
            "instance key must be shorter than {} characters",
            INSTANCE_KEY_MAX_LEN + 1
        )));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(ValidationError::InvalidInstanceKey(
            "instance key must use lower case letters or digits".to_string(),
        ));
    }

    Ok(())
}

/// Validate a snap instance name of the form `<snap>` or `<snap>_<key>`.
pub fn validate_instance_name(name: &str) -> Result<(), ValidationError> {
    if name.len() > INSTANCE_NAME_MAX_LEN {
        return Err(ValidationError::InvalidInstanceName(format!(
            "snap instance name can be at most {} characters long",
            INSTANCE_NAME_MAX_LEN
        )));
    }

    let mut parts = name.splitn(2, '_');
    let snap_name = parts.next().unwrap_or_default();
    let instance_key = parts.next();

    if instance_key.is_some_and(|key| key.contains('_')) {
        return Err(ValidationError::InvalidInstanceName(
            "snap instance name can contain only one underscore".to_string(),
        ));
    }

    validate_snap_name(snap_name)?;

    if let Some(key) = instance_key {
        validate_instance_key(key)?;
    }

    Ok(())
}

/// Return the snap part of an instance name.
pub fn snap_name_of(instance_name: &str) -> &str {
    instance_name
        .split_once('_')
        .map_or(instance_name, |(snap, _)| snap)
}

/// Check that `tag` is a well-formed security tag belonging to `instance_name`.
///
/// A tag belongs to an instance when it reads `snap.<instance>.<app>` or
/// `snap.<instance>.hook.<hook>`. A tag that is well formed but names another
/// instance is rejected.
pub fn verify_security_tag(tag: &str, instance_name: &str) -> bool {
    SECURITY_TAG_RE
        .captures(tag)
        .and_then(|caps| caps.get(1))
        .is_some_and(|m| m.as_str() == instance_name)
}

/// Security tag of an application of `instance_name`.
pub fn security_tag_for(instance_name: &str, app: &str) -> String {
    format!("snap.{}.{}", instance_name, app)
}

/// Security tag of a hook of `instance_name`.
pub fn hook_security_tag_for(instance_name: &str, hook: &str) -> String {
    format!("snap.{}.hook.{}", instance_name, hook)
}
