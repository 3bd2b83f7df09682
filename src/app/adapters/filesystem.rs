//! Local mirror of the object store layout

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Error, Result};

/// Directory whose relative paths match the object store's
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalMirror {
    root: PathBuf,
}

impl LocalMirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute file path of a dataset path
    pub fn path_for(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    /// Read a dataset file as UTF-8
    ///
    /// # Errors
    /// * Returns `Error::Io` if the file cannot be read
    pub async fn read_text(&self, path: &str) -> Result<String> {
        let file_path = self.path_for(path);
        debug!("Reading {}", file_path.display());

        tokio::fs::read_to_string(&file_path).await.map_err(|e| {
            Error::io(format!("Failed to read file {}", file_path.display()), e)
        })
    }

    /// Read a dataset file, returning `None` if it does not exist
    pub async fn read_optional_text(&self, path: &str) -> Result<Option<String>> {
        match self.read_text(path).await {
            Ok(text) => Ok(Some(text)),
            Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_for_strips_leading_slash() {
        let mirror = LocalMirror::new("/data/mirror");

        assert_eq!(
            mirror.path_for("/model/db/data.csv"),
            PathBuf::from("/data/mirror/model/db/data.csv")
        );
    }

    #[tokio::test]
    async fn test_read_text_and_missing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("model/db")).unwrap();
        std::fs::write(dir.path().join("model/db/data.csv"), "model,gph\n").unwrap();
        let mirror = LocalMirror::new(dir.path());

        assert_eq!(mirror.read_text("model/db/data.csv").await.unwrap(), "model,gph\n");
        assert!(mirror.read_optional_text("nope.json").await.unwrap().is_none());
        assert!(matches!(
            mirror.read_text("nope.json").await,
            Err(Error::Io { .. })
        ));
    }
}
