//! Asset error kinds.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// The path does not resolve to a regular file.
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("decode GIF {}: {source}", path.display())]
    Gif {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// The file decoded fine but held nothing usable (e.g. a GIF with no frames).
    #[error("no usable data in {}", .0.display())]
    Empty(PathBuf),
}

impl AssetError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
