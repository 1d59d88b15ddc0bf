//! Implements SelectionPort using a plain text file: one entity id per line.

use crate::domain::DomainError;
use crate::ports::SelectionPort;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Keep-list file. Blank lines are ignored; unparsable lines are skipped with a warning.
pub struct SelectionFile {
    path: PathBuf,
}

impl SelectionFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn parse(&self, contents: &str) -> HashSet<i64> {
        let mut ids = HashSet::new();
        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<i64>() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(e) => warn!(
                    path = %self.path.display(),
                    line = lineno + 1,
                    error = %e,
                    "skipping invalid id in selection file"
                ),
            }
        }
        ids
    }
}

#[async_trait::async_trait]
impl SelectionPort for SelectionFile {
    async fn load(&self) -> HashSet<i64> {
        match fs::read_to_string(&self.path).await {
            Ok(s) => {
                let ids = self.parse(&s);
                debug!(path = %self.path.display(), count = ids.len(), "loaded keep-list");
                ids
            }
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not read keep-list; nothing pre-selected"
                );
                HashSet::new()
            }
        }
    }

    /// Write-replace: temp file, sync, rename over the target.
    async fn save(&self, ids: &HashSet<i64>) -> Result<(), DomainError> {
        let mut body = String::with_capacity(ids.len() * 12);
        for id in ids {
            body.push_str(&id.to_string());
            body.push('\n');
        }

        let temp_path = self.path.with_extension("tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Storage(format!("create temp file: {}", e)))?;
        f.write_all(body.as_bytes())
            .await
            .map_err(|e| DomainError::Storage(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Storage(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Storage(format!("replace {}: {}", self.path.display(), e)))?;
        debug!(path = %self.path.display(), count = ids.len(), "saved keep-list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SelectionFile::new(dir.path().join("groups_to_keep.txt"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SelectionFile::new(dir.path().join("groups_to_keep.txt"));
        let ids: HashSet<i64> = [1, -1001234567890, 42].into_iter().collect();
        store.save(&ids).await.unwrap();
        assert_eq!(store.load().await, ids);

        store.save(&HashSet::new()).await.unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn blank_and_garbage_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groups_to_keep.txt");
        std::fs::write(&path, "10\n\n  20  \nnot-an-id\n\n").unwrap();
        let ids = SelectionFile::new(&path).load().await;
        assert_eq!(ids, [10, 20].into_iter().collect());
    }

    #[tokio::test]
    async fn unreadable_storage_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let store = SelectionFile::new(dir.path());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn save_into_missing_directory_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SelectionFile::new(dir.path().join("nope").join("keep.txt"));
        let err = store.save(&[1].into_iter().collect()).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
