//! SPDX-License-Identifier: MIT OR AGPL-3.0-or-later
//! Snap Confine - validation of untrusted launcher input
//!
//! The launcher receives the snap instance name through the environment and
//! the security tag, base snap and executable on the command line. All of it
//! is checked here and turned into an [`engine::Invocation`] before any
//! namespace, mount or policy work happens.

pub mod cli;
pub mod config;
pub mod engine;
