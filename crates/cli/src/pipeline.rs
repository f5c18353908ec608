//! The end-to-end mirroring pipeline
//!
//! A linear, fail-fast sequence: list the container once, build and
//! persist the folder-structure report, persist the blob inventory
//! while downloading every object into `blobs/`, then mirror the whole
//! container into a directory named after it. Fatal errors abort the
//! remaining steps; only per-object download failures are skipped.

use std::fs;

use bm_core::{
    DELIMITER, HierarchyIndex, ObjectMeta, ObjectStore, Result, Settings, hierarchy, mirror,
    report,
};
use tracing::{error, info};

/// Folder-structure report file name
pub const FOLDER_STRUCTURE_FILE: &str = "folder_structure.txt";

/// Blob-inventory report file name
pub const BLOB_CONTENTS_FILE: &str = "blob_contents.txt";

/// Subdirectory holding the inventory pass downloads
pub const BLOBS_DIR: &str = "blobs";

/// Run the full pipeline against an already-authenticated store
pub async fn run(store: &dyn ObjectStore, settings: &Settings) -> Result<()> {
    fs::create_dir_all(&settings.output_dir)?;

    info!("starting folder structure analysis");
    let objects = store.list_objects("").await?;
    let index = hierarchy::build_index(&objects);
    log_folder_structure(&index);

    let report_path = settings.output_dir.join(FOLDER_STRUCTURE_FILE);
    fs::write(&report_path, report::folder_structure(&settings.container_name, &index))?;
    info!(path = %report_path.display(), "folder structure saved");

    info!("starting blob content analysis and download");
    let blobs_dir = settings.output_dir.join(BLOBS_DIR);
    fs::create_dir_all(&blobs_dir)?;
    let mut failed = 0usize;
    for object in sorted_by_key(&objects) {
        // Folder placeholder blobs name directories, not content.
        if object.key.ends_with(DELIMITER) {
            fs::create_dir_all(mirror::local_path_for(&blobs_dir, &object.key))?;
            continue;
        }
        if let Err(err) = mirror::download_object(store, &object.key, &blobs_dir).await {
            error!(key = %object.key, error = %err, "skipping blob after failed download");
            failed += 1;
        }
    }

    let inventory_path = settings.output_dir.join(BLOB_CONTENTS_FILE);
    fs::write(
        &inventory_path,
        report::blob_inventory(&settings.container_name, &objects),
    )?;
    info!(
        path = %inventory_path.display(),
        blobs = objects.len(),
        failed,
        "blob inventory saved"
    );

    let container_dir = settings.output_dir.join(&settings.container_name);
    info!(
        container = %settings.container_name,
        path = %container_dir.display(),
        "downloading entire container"
    );
    let summary = mirror::mirror_prefix(store, "", &container_dir).await?;

    info!(
        downloaded = summary.files.len(),
        failed = summary.failed,
        "all operations completed"
    );
    Ok(())
}

fn sorted_by_key(objects: &[ObjectMeta]) -> Vec<&ObjectMeta> {
    let mut sorted: Vec<&ObjectMeta> = objects.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));
    sorted
}

fn log_folder_structure(index: &HierarchyIndex) {
    if index.is_empty() {
        info!("no folders found in the container (flat structure)");
        return;
    }

    info!(folders = index.len(), "folder structure:");
    for (folder, children) in index {
        info!("- {folder}/");
        for child in children.iter().filter(|c| !c.is_empty()) {
            info!("  -- {child}");
        }
    }
}
