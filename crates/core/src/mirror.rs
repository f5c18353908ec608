//! Mirrored-download engine
//!
//! Walks a container listing and materializes each object at a local path
//! mirroring the key's segment structure. A single object's failure is
//! logged and skipped; only container-level failures (listing) abort a
//! run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::Result;
use crate::key::{DELIMITER, split_key};
use crate::traits::ObjectStore;

/// Outcome of one mirror run
#[derive(Debug, Default)]
pub struct MirrorSummary {
    /// Local paths written, in download order
    pub files: Vec<PathBuf>,

    /// Number of objects skipped after a fetch or write failure
    pub failed: usize,
}

/// Map a key (or prefix-relative path) onto a local path under `root`
///
/// Each segment becomes one path component; empty segments collapse,
/// and `.`/`..` segments are dropped so a hostile listing cannot write
/// outside the destination root.
pub fn local_path_for(root: &Path, relative: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in split_key(relative) {
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        path.push(segment);
    }
    path
}

/// Download one object to `root`, mirroring its full key structure
///
/// Missing ancestor directories are created; an existing file is
/// overwritten unconditionally.
pub async fn download_object(
    store: &dyn ObjectStore,
    key: &str,
    root: &Path,
) -> Result<PathBuf> {
    download_relative(store, key, key, root).await
}

async fn download_relative(
    store: &dyn ObjectStore,
    key: &str,
    relative: &str,
    root: &Path,
) -> Result<PathBuf> {
    let path = local_path_for(root, relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let bytes = store.get_object(key).await?;
    fs::write(&path, &bytes)?;

    info!(
        key,
        path = %path.display(),
        size = %humansize::format_size(bytes.len() as u64, humansize::BINARY),
        "downloaded blob"
    );
    Ok(path)
}

/// Mirror every object under `prefix` into `root`
///
/// A non-empty prefix is normalized to end with the delimiter before
/// listing; the prefix is stripped from each key to form the local
/// relative path, and the prefix marker itself (empty relative path) is
/// skipped. A key ending in the delimiter is a folder placeholder, not
/// content: it materializes the directory it names and is never written
/// as a file. Per-object failures are logged and counted without
/// aborting the batch; a listing failure propagates before any file is
/// written.
pub async fn mirror_prefix(
    store: &dyn ObjectStore,
    prefix: &str,
    root: &Path,
) -> Result<MirrorSummary> {
    let prefix = normalize_prefix(prefix);
    fs::create_dir_all(root)?;

    let objects = store.list_objects(&prefix).await?;
    if objects.is_empty() {
        info!(prefix = %prefix, "no blobs found under prefix");
        return Ok(MirrorSummary::default());
    }

    let mut summary = MirrorSummary::default();
    for object in &objects {
        let relative = object.key.strip_prefix(prefix.as_str()).unwrap_or(&object.key);
        if relative.is_empty() {
            continue;
        }
        if relative.ends_with(DELIMITER) {
            fs::create_dir_all(local_path_for(root, relative))?;
            continue;
        }

        match download_relative(store, &object.key, relative, root).await {
            Ok(path) => summary.files.push(path),
            Err(err) => {
                error!(key = %object.key, error = %err, "skipping object after failed download");
                summary.failed += 1;
            }
        }
    }

    info!(
        downloaded = summary.files.len(),
        failed = summary.failed,
        prefix = %prefix,
        root = %root.display(),
        "mirror finished"
    );
    Ok(summary)
}

fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with(DELIMITER) {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::{MockObjectStore, ObjectMeta};
    use tempfile::TempDir;

    fn listing(keys: &[&str]) -> Vec<ObjectMeta> {
        keys.iter().map(|k| ObjectMeta::new(*k, 4)).collect()
    }

    fn store_with(keys: &'static [&'static str]) -> MockObjectStore {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(move |prefix| {
                Ok(listing(keys)
                    .into_iter()
                    .filter(|o| o.key.starts_with(prefix))
                    .collect())
            });
        store
            .expect_get_object()
            .returning(|key| Ok(format!("data:{key}").into_bytes()));
        store
    }

    #[test]
    fn test_local_path_for_maps_segments() {
        let path = local_path_for(Path::new("/tmp/out"), "a/b/file.txt");
        assert_eq!(path, PathBuf::from("/tmp/out/a/b/file.txt"));
    }

    #[test]
    fn test_local_path_for_collapses_empty_segments() {
        let path = local_path_for(Path::new("/tmp/out"), "a//file.txt");
        assert_eq!(path, PathBuf::from("/tmp/out/a/file.txt"));
    }

    #[test]
    fn test_local_path_for_ignores_parent_traversal() {
        let path = local_path_for(Path::new("/tmp/out"), "a/../../x");
        assert_eq!(path, PathBuf::from("/tmp/out/a/x"));

        let path = local_path_for(Path::new("/tmp/out"), "./a/file.txt");
        assert_eq!(path, PathBuf::from("/tmp/out/a/file.txt"));
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("a"), "a/");
        assert_eq!(normalize_prefix("a/"), "a/");
    }

    #[tokio::test]
    async fn test_mirror_whole_container() {
        let store = store_with(&["a/b/file1.txt", "a/c/file2.txt", "top.txt"]);
        let dir = TempDir::new().unwrap();

        let summary = mirror_prefix(&store, "", dir.path()).await.unwrap();

        assert_eq!(summary.files.len(), 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(
            fs::read(dir.path().join("a/b/file1.txt")).unwrap(),
            b"data:a/b/file1.txt"
        );
        assert!(dir.path().join("top.txt").is_file());
    }

    #[tokio::test]
    async fn test_mirror_prefix_strips_prefix_and_skips_marker() {
        let store = store_with(&["a/", "a/x.txt", "a/sub/y.txt", "b/z.txt"]);
        let dir = TempDir::new().unwrap();

        let summary = mirror_prefix(&store, "a", dir.path()).await.unwrap();

        // "a/" is the prefix marker; "b/z.txt" is outside the prefix.
        assert_eq!(summary.files.len(), 2);
        assert!(dir.path().join("x.txt").is_file());
        assert!(dir.path().join("sub/y.txt").is_file());
        assert!(!dir.path().join("a").exists());
        assert!(!dir.path().join("z.txt").exists());
    }

    #[tokio::test]
    async fn test_marker_blob_becomes_directory_not_file() {
        let store = store_with(&["a/", "a/x.txt"]);
        let dir = TempDir::new().unwrap();

        let summary = mirror_prefix(&store, "", dir.path()).await.unwrap();

        // The placeholder must not shadow the folder's contents.
        assert!(dir.path().join("a").is_dir());
        assert_eq!(
            fs::read(dir.path().join("a/x.txt")).unwrap(),
            b"data:a/x.txt"
        );
        assert_eq!(summary.files, vec![dir.path().join("a/x.txt")]);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_marker_blob_under_stripped_prefix() {
        let store = store_with(&["a/", "a/sub/", "a/sub/y.txt"]);
        let dir = TempDir::new().unwrap();

        let summary = mirror_prefix(&store, "a", dir.path()).await.unwrap();

        assert!(dir.path().join("sub").is_dir());
        assert!(dir.path().join("sub/y.txt").is_file());
        assert_eq!(summary.files.len(), 1);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_single_fetch_failure_does_not_abort_batch() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(|_| Ok(listing(&["a/1.txt", "a/2.txt", "a/3.txt"])));
        store.expect_get_object().returning(|key| {
            if key == "a/2.txt" {
                Err(Error::download(key, "connection reset"))
            } else {
                Ok(b"ok".to_vec())
            }
        });
        let dir = TempDir::new().unwrap();

        let summary = mirror_prefix(&store, "", dir.path()).await.unwrap();

        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.failed, 1);
        assert!(dir.path().join("a/1.txt").is_file());
        assert!(!dir.path().join("a/2.txt").exists());
        assert!(dir.path().join("a/3.txt").is_file());
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_before_any_write() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(|_| Err(Error::List("service unavailable".into())));
        let dir = TempDir::new().unwrap();

        let err = mirror_prefix(&store, "", dir.path()).await.unwrap_err();

        assert!(matches!(err, Error::List(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_listing_is_not_an_error() {
        let mut store = MockObjectStore::new();
        store.expect_list_objects().returning(|_| Ok(Vec::new()));
        let dir = TempDir::new().unwrap();

        let summary = mirror_prefix(&store, "missing", dir.path()).await.unwrap();
        assert!(summary.files.is_empty());
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_rerun_overwrites_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/x.txt"), b"stale").unwrap();

        let store = store_with(&["a/x.txt"]);
        mirror_prefix(&store, "", dir.path()).await.unwrap();

        assert_eq!(
            fs::read(dir.path().join("a/x.txt")).unwrap(),
            b"data:a/x.txt"
        );
    }
}
