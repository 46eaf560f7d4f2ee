//! Local filesystem snapshot storage
//!
//! The snapshot is written to a temporary sibling file and renamed over the
//! target, so a reader polling the path sees either the previous artifact or
//! the new one, never a partial write.

use super::{ModificationMarker, SnapshotStore, StorageError, StorageResult};
use crate::Snapshot;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::debug;

/// Local filesystem snapshot storage
pub struct LocalSnapshotStore {
    /// Artifact path
    path: PathBuf,
}

impl LocalSnapshotStore {
    /// Create storage for the given artifact path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory that receives the temporary sibling file
    fn staging_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

fn replace_atomically(dir: &Path, target: &Path, content: &[u8]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content)?;
    staged.flush()?;
    staged.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl SnapshotStore for LocalSnapshotStore {
    async fn save(&self, snapshot: &Snapshot) -> StorageResult<()> {
        let content = serde_json::to_vec(snapshot)?;
        let dir = self.staging_dir();
        let target = self.path.clone();

        tokio::task::spawn_blocking(move || replace_atomically(&dir, &target, &content))
            .await
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

        debug!("Saved snapshot with {} rows to {:?}", snapshot.rows(), self.path);
        Ok(())
    }

    async fn load(&self) -> StorageResult<Snapshot> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot = serde_json::from_slice(&content)?;
        if snapshot.e.len() != snapshot.de.len() {
            return Err(StorageError::InvalidData(format!(
                "matrix lengths differ: e has {} rows, de has {}",
                snapshot.e.len(),
                snapshot.de.len()
            )));
        }

        Ok(snapshot)
    }

    async fn marker(&self) -> StorageResult<Option<ModificationMarker>> {
        match fs::metadata(&self.path).await {
            Ok(metadata) => Ok(Some(ModificationMarker {
                modified: metadata.modified()?,
                len: metadata.len(),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self) -> StorageResult<bool> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Removed snapshot at {:?}", self.path);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pair;
    use tempfile::TempDir;

    fn create_test_storage() -> (LocalSnapshotStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalSnapshotStore::new(temp_dir.path().join("input_data.json"));
        (storage, temp_dir)
    }

    fn snapshot_with(rows: usize) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for i in 0..rows {
            snapshot.push(Pair(i as f64, 1.0), Pair(1.0, 0.0));
        }
        snapshot
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (storage, _temp) = create_test_storage();

        storage.save(&snapshot_with(3)).await.unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, snapshot_with(3));
        assert_eq!(storage.summary().await.unwrap().rows, 3);
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_artifact() {
        let (storage, temp) = create_test_storage();

        storage.save(&snapshot_with(5)).await.unwrap();
        storage.save(&snapshot_with(2)).await.unwrap();

        assert_eq!(storage.load().await.unwrap().rows(), 2);

        // Only the artifact remains; staged files are renamed away
        let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_marker_tracks_changes() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.marker().await.unwrap().is_none());

        storage.save(&snapshot_with(1)).await.unwrap();
        let first = storage.marker().await.unwrap().unwrap();

        storage.save(&snapshot_with(4)).await.unwrap();
        let second = storage.marker().await.unwrap().unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_not_found() {
        let (storage, _temp) = create_test_storage();

        let result = storage.load().await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_malformed_artifact() {
        let (storage, _temp) = create_test_storage();
        std::fs::write(storage.location(), b"{\"e\": [[1.0, 2.0]").unwrap();

        let result = storage.load().await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_clear() {
        let (storage, _temp) = create_test_storage();
        assert!(!storage.clear().await.unwrap());

        storage.save(&snapshot_with(1)).await.unwrap();
        assert!(storage.clear().await.unwrap());
        assert!(storage.marker().await.unwrap().is_none());
    }
}
