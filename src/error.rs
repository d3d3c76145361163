use std::time::Duration;

use thiserror::Error;

/// Failure while turning one source into swatches. Contained to that source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported or corrupt image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image has no pixels")]
    EmptyImage,

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Reasons the pipeline falls back to the default theme.
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("no usable colors extracted")]
    NoUsableColors,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("pipeline panicked: {0}")]
    Panicked(String),
}
