//! Data source adapters
//!
//! Datasets are addressed by paths relative to the object store root. The
//! same paths resolve against the HTTP store or a local mirror directory.

pub mod filesystem;
pub mod http;

use std::path::PathBuf;

pub use filesystem::LocalMirror;
pub use http::{HttpSource, RetryPolicy};

/// Where dataset files are read from
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Static object store reached over HTTP
    Remote(HttpSource),
    /// Directory holding a copy of the object store layout
    Local(LocalMirror),
}

impl DataSource {
    /// Create a local data source rooted at `root`
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::Local(LocalMirror::new(root))
    }

    /// Read the text content of a dataset file
    pub async fn fetch_text(&self, path: &str) -> crate::Result<String> {
        match self {
            Self::Remote(http) => http.fetch_text(path).await,
            Self::Local(mirror) => mirror.read_text(path).await,
        }
    }

    /// Read a dataset file, treating "not there" as `None`
    ///
    /// Over HTTP any non-2xx status counts as missing; locally a missing
    /// file does. Transport and other I/O failures still error.
    pub async fn fetch_optional_text(&self, path: &str) -> crate::Result<Option<String>> {
        match self {
            Self::Remote(http) => http.fetch_optional_text(path).await,
            Self::Local(mirror) => mirror.read_optional_text(path).await,
        }
    }

    /// Full location of a dataset path, for logs
    pub fn describe(&self, path: &str) -> String {
        match self {
            Self::Remote(http) => http.url_for(path),
            Self::Local(mirror) => mirror.path_for(path).display().to_string(),
        }
    }
}
