//! Report rendering
//!
//! Pure text rendering over the hierarchy index and the object listing.
//! Both reports sort their input before rendering; output is identical
//! regardless of the order the store returned the listing in.

use crate::hierarchy::HierarchyIndex;
use crate::traits::ObjectMeta;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the folder-structure report
///
/// One line per folder in lexicographic order, with indented child
/// lines; empty child names (keys ending in a delimiter) are skipped.
pub fn folder_structure(container: &str, index: &HierarchyIndex) -> String {
    let mut out = format!("Folder structure for container '{container}':\n\n");

    if index.is_empty() {
        out.push_str("No folders found (flat structure).\n");
        return out;
    }

    for (folder, children) in index {
        out.push_str(&format!("- {folder}/\n"));
        for child in children {
            if child.is_empty() {
                continue;
            }
            out.push_str(&format!("  -- {child}\n"));
        }
    }

    out
}

/// Render the blob-inventory report
///
/// Entries are sorted lexicographically by key. Missing timestamps and
/// content types render as `unknown`.
pub fn blob_inventory(container: &str, objects: &[ObjectMeta]) -> String {
    let mut out = format!("Blob contents for container '{container}':\n\n");

    if objects.is_empty() {
        out.push_str("No blobs found in the container.\n");
        return out;
    }

    let mut sorted: Vec<&ObjectMeta> = objects.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));

    for object in sorted {
        let modified = object
            .last_modified
            .map(|ts| ts.strftime(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let content_type = object.content_type.as_deref().unwrap_or("unknown");

        out.push_str(&format!(
            "- {}\n  Size: {} bytes\n  Last Modified: {}\n  Content Type: {}\n\n",
            object.key, object.size, modified, content_type
        ));
    }

    out
}
