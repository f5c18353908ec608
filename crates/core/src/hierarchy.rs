//! Folder-hierarchy reconstruction
//!
//! Aggregates flat object keys into a mapping of folder path to the set
//! of immediate child names. BTree collections keep both folder paths
//! and child sets in lexicographic order, so report output is identical
//! for any permutation of the input listing.

use std::collections::{BTreeMap, BTreeSet};

use crate::key::{DELIMITER, split_key};
use crate::traits::ObjectMeta;

/// Mapping from folder path (segments joined by `/`) to immediate child names
pub type HierarchyIndex = BTreeMap<String, BTreeSet<String>>;

/// Build a hierarchy index from a full container (or prefix) listing
///
/// For every key, each proper prefix of its segments becomes a folder
/// entry whose child set contains the next deeper segment. Keys with
/// zero or one segment are top-level objects and contribute nothing.
/// An empty segment terminates hierarchy depth at that point: nothing
/// at or below a doubled delimiter becomes a folder.
pub fn build_index(objects: &[ObjectMeta]) -> HierarchyIndex {
    let mut index = HierarchyIndex::new();

    for object in objects {
        let segments = split_key(&object.key);
        if segments.len() < 2 {
            continue;
        }

        let mut folder = String::new();
        for i in 0..segments.len() - 1 {
            if segments[i].is_empty() {
                break;
            }
            if !folder.is_empty() {
                folder.push(DELIMITER);
            }
            folder.push_str(segments[i]);
            index
                .entry(folder.clone())
                .or_default()
                .insert(segments[i + 1].to_string());
        }
    }

    index
}
