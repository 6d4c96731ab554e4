//! # Engine Errors

use tokio::sync::AcquireError;

/// Errors returned while waiting for admission to the shared resource.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The caller's cancellation token fired before admission completed.
    /// Nothing was acquired and the reader count is unchanged.
    #[error("Cancelled while waiting for the resource lock")]
    Cancelled,
    #[error("Resource lock closed")]
    Closed(#[from] AcquireError),
}

impl SyncError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SyncError::Cancelled)
    }
}
