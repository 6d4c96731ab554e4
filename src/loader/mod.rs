//! Descriptor loading.
//!
//! A [`DescriptorSource`] supplies the raw process list; [`load`] parses it into
//! [`LoadedDescriptors`]. Only a source that cannot be read is an error; individual bad
//! records are skipped (see [`parse`]).

pub mod error;
pub mod parse;

pub use error::*;
pub use parse::*;

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Where a process list comes from.
#[async_trait]
pub trait DescriptorSource: Send + Sync {
    /// Short description for logs (a path, or `inline`).
    fn describe(&self) -> String;

    async fn read_text(&self) -> Result<String, LoadError>;
}

/// A process list stored in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DescriptorSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_text(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// A process list held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    text: String,
}

impl InlineSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl DescriptorSource for InlineSource {
    fn describe(&self) -> String {
        "inline".to_string()
    }

    async fn read_text(&self) -> Result<String, LoadError> {
        Ok(self.text.clone())
    }
}

/// Reads and parses a process list.
#[instrument(skip(source), fields(source = %source.describe()))]
pub async fn load(source: &dyn DescriptorSource) -> Result<LoadedDescriptors, LoadError> {
    let text = source.read_text().await?;
    let loaded = parse_descriptors(&text);
    if !loaded.skipped.is_empty() {
        warn!(skipped = loaded.skipped.len(), "Some records were malformed and skipped");
    }
    info!(loaded = loaded.descriptors.len(), "Descriptors loaded");
    Ok(loaded)
}
