//! bm-core: Core library for the blobmirror CLI
//!
//! This crate provides the core functionality for blobmirror, including:
//! - Configuration loading and validation
//! - Object key parsing and folder-hierarchy reconstruction
//! - Report rendering (folder structure and blob inventory)
//! - The mirrored-download engine
//! - The ObjectStore trait for blob-storage operations
//!
//! This crate is designed to be independent of any specific storage SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod key;
pub mod mirror;
pub mod report;
pub mod traits;

pub use config::Settings;
pub use error::{Error, Result};
pub use hierarchy::{HierarchyIndex, build_index};
pub use key::{DELIMITER, split_key};
pub use mirror::{MirrorSummary, download_object, mirror_prefix};
pub use traits::{ObjectMeta, ObjectStore};
