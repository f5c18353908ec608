//! blobmirror CLI library
//!
//! This module exports the CLI components for use in integration tests.

pub mod exit_code;
pub mod pipeline;
