//! ObjectStore trait definition
//!
//! This trait defines the interface the core needs from a blob store.
//! It allows the hierarchy and mirror logic to be decoupled from the
//! specific storage SDK implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata for one listed object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Flat object key; may contain `/` implying hierarchy
    pub key: String,

    /// Size in bytes
    pub size: u64,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// Content type reported by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ObjectMeta {
    /// Create a new ObjectMeta with only key and size populated
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified: None,
            content_type: None,
        }
    }
}

/// Trait for blob-storage operations
///
/// Implemented by the Azure adapter and mocked for testing. Listing is
/// expected to return the complete result set; callers hold it fully in
/// memory before any hierarchy or download work begins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List every object whose key starts with `prefix`
    ///
    /// An empty prefix lists the whole container.
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectMeta>>;

    /// Fetch the full content of one object
    async fn get_object(&self, key: &str) -> Result<Vec<u8>>;
}
