use std::{io, path::PathBuf};

use image::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageProviderError {
    #[error("failed to open image `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode image `{path}`: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

impl ImageProviderError {
    /// Returns the path of the image that failed to load.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}
