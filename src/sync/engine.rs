//! # Shared Resource State
//!
//! The engine implements the classic readers-writers admission protocol on top of two
//! primitives:
//!
//! - a **resource lock** (`Semaphore` with one permit) that gates all writer access and
//!   reader-group entry/exit;
//! - a **count section** (`Mutex`) that protects the number of active readers together with
//!   the permit the group is holding.
//!
//! Readers use *first in turns the lock on, last out turns it off*: only the reader that
//! observes the count going 0→1 acquires the resource lock, and only the one that observes
//! 1→0 releases it. Readers never block each other; a writer is blocked by the presence of
//! any reader.
//!
//! ## Accepted behavior: writer starvation
//!
//! There is no writer preference. A writer waiting for the group to drain can be overtaken by
//! readers that arrive while the count is still positive, so a continuous stream of
//! overlapping readers delays a writer indefinitely.
//!
//! ## Scoped access
//!
//! Admission returns a guard ([`ReadAccess`] / [`WriteAccess`]). Calling `release` is the
//! normal exit path; dropping a guard without it still performs the exit, so the lock can
//! never leak out of an actor that was aborted mid-service.

use crate::model::Role;
use crate::sync::error::SyncError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

// =============================================================================
// 1. STATE
// =============================================================================

/// Reader count plus the resource permit held on behalf of the whole group.
///
/// Invariant: `permit.is_some() == (active > 0)`.
struct ReaderGroup {
    active: usize,
    permit: Option<OwnedSemaphorePermit>,
}

#[derive(Default)]
struct Counters {
    group_acquisitions: AtomicU64,
    group_releases: AtomicU64,
    writer_acquisitions: AtomicU64,
    writer_releases: AtomicU64,
    cancelled_entries: AtomicU64,
}

/// Snapshot of how often the resource lock changed hands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Reader entries that observed the count go 0→1 and took the lock.
    pub group_acquisitions: u64,
    /// Reader exits that observed the count go 1→0 and dropped the lock.
    pub group_releases: u64,
    pub writer_acquisitions: u64,
    pub writer_releases: u64,
    /// Entries (either role) abandoned because their token fired.
    pub cancelled_entries: u64,
}

impl EngineStats {
    /// True when every acquisition of the resource lock has a matching release.
    pub fn is_balanced(&self) -> bool {
        self.group_acquisitions == self.group_releases
            && self.writer_acquisitions == self.writer_releases
    }
}

/// The single shared resource that every process contends for.
///
/// Constructed once per simulation run and shared with every actor through an `Arc`.
pub struct SharedResourceState {
    resource: Arc<Semaphore>,
    readers: Mutex<ReaderGroup>,
    counters: Counters,
}

impl Default for SharedResourceState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// 2. ADMISSION PROTOCOL
// =============================================================================

impl SharedResourceState {
    pub fn new() -> Self {
        Self {
            resource: Arc::new(Semaphore::new(1)),
            readers: Mutex::new(ReaderGroup {
                active: 0,
                permit: None,
            }),
            counters: Counters::default(),
        }
    }

    /// Enters with the protocol that matches `role`.
    pub async fn enter(
        self: &Arc<Self>,
        role: Role,
        cancel: &CancellationToken,
    ) -> Result<Access, SyncError> {
        match role {
            Role::Reader => self.reader_enter(cancel).await.map(Access::Read),
            Role::Writer => self.writer_enter(cancel).await.map(Access::Write),
        }
    }

    /// Admits a reader.
    ///
    /// Under the count section: if no reader is active, waits for the resource lock and takes
    /// it for the group; then increments the count. Returns once the caller may read
    /// concurrently with other readers (and never with a writer).
    ///
    /// If `cancel` fires first the entry is abandoned: no lock is held and the count is not
    /// incremented.
    pub async fn reader_enter(
        self: &Arc<Self>,
        cancel: &CancellationToken,
    ) -> Result<ReadAccess, SyncError> {
        let active = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.counters.cancelled_entries.fetch_add(1, Ordering::Relaxed);
                debug!("Reader entry cancelled");
                return Err(SyncError::Cancelled);
            }
            admitted = self.admit_reader() => admitted?,
        };
        trace!(active, "Reader admitted");
        Ok(ReadAccess {
            state: Arc::clone(self),
            released: false,
        })
    }

    // Dropping this future at any await point leaves the group untouched: every mutation
    // happens after the last await.
    async fn admit_reader(&self) -> Result<usize, SyncError> {
        let mut group = self.readers.lock().await;
        if group.active == 0 {
            let permit = Arc::clone(&self.resource).acquire_owned().await?;
            group.permit = Some(permit);
            self.counters
                .group_acquisitions
                .fetch_add(1, Ordering::Relaxed);
            debug!("Reader group acquired resource lock");
        }
        group.active += 1;
        Ok(group.active)
    }

    async fn reader_exit(&self, on_lock_drop: impl FnOnce()) -> ReaderExit {
        let mut group = self.readers.lock().await;
        self.exit_locked(&mut group, on_lock_drop)
    }

    // `on_lock_drop` runs under the count section, before the permit is returned.
    fn exit_locked(&self, group: &mut ReaderGroup, on_lock_drop: impl FnOnce()) -> ReaderExit {
        debug_assert!(group.active > 0, "reader exit without a matching entry");
        group.active -= 1;
        if group.active > 0 {
            trace!(remaining = group.active, "Reader left");
            return ReaderExit::StillShared {
                remaining: group.active,
            };
        }
        on_lock_drop();
        group.permit.take();
        self.counters.group_releases.fetch_add(1, Ordering::Relaxed);
        debug!("Reader group released resource lock");
        ReaderExit::LastOut
    }

    /// Admits a writer once the resource lock is free.
    ///
    /// If `cancel` fires first nothing is held.
    pub async fn writer_enter(
        self: &Arc<Self>,
        cancel: &CancellationToken,
    ) -> Result<WriteAccess, SyncError> {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.counters.cancelled_entries.fetch_add(1, Ordering::Relaxed);
                debug!("Writer entry cancelled");
                return Err(SyncError::Cancelled);
            }
            permit = Arc::clone(&self.resource).acquire_owned() => permit?,
        };
        self.counters
            .writer_acquisitions
            .fetch_add(1, Ordering::Relaxed);
        debug!("Writer acquired resource lock");
        Ok(WriteAccess {
            state: Arc::clone(self),
            permit: Some(permit),
        })
    }

    // --- Introspection ---

    /// True when nobody (writer or reader group) holds the resource lock.
    pub fn is_resource_free(&self) -> bool {
        self.resource.available_permits() == 1
    }

    pub async fn active_readers(&self) -> usize {
        self.readers.lock().await.active
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            group_acquisitions: self.counters.group_acquisitions.load(Ordering::Relaxed),
            group_releases: self.counters.group_releases.load(Ordering::Relaxed),
            writer_acquisitions: self.counters.writer_acquisitions.load(Ordering::Relaxed),
            writer_releases: self.counters.writer_releases.load(Ordering::Relaxed),
            cancelled_entries: self.counters.cancelled_entries.load(Ordering::Relaxed),
        }
    }
}

// =============================================================================
// 3. SCOPED ACCESS
// =============================================================================

/// What a reader's exit did to the resource lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderExit {
    /// This reader was the last one out and released the lock.
    LastOut,
    StillShared { remaining: usize },
}

impl ReaderExit {
    pub fn released_lock(&self) -> bool {
        matches!(self, ReaderExit::LastOut)
    }
}

/// Shared access held by one reader.
#[must_use = "dropping ReadAccess gives up read access immediately"]
pub struct ReadAccess {
    state: Arc<SharedResourceState>,
    released: bool,
}

impl ReadAccess {
    /// Leaves the reader group, releasing the resource lock if this was the last reader.
    pub async fn release(self) -> ReaderExit {
        self.release_with(|| {}).await
    }

    /// Like [`release`](Self::release), but calls `on_lock_drop` when this reader is the
    /// last one out, before any waiter can take the lock.
    pub async fn release_with(mut self, on_lock_drop: impl FnOnce()) -> ReaderExit {
        let exit = self.state.reader_exit(on_lock_drop).await;
        self.released = true;
        exit
    }
}

impl Drop for ReadAccess {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Ok(mut group) = self.state.readers.try_lock() {
            self.state.exit_locked(&mut group, || {});
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let state = Arc::clone(&self.state);
                handle.spawn(async move {
                    state.reader_exit(|| {}).await;
                });
            }
            Err(_) => {
                debug!("Read access dropped outside the runtime; waiting for the count section");
                let mut group = self.state.readers.blocking_lock();
                self.state.exit_locked(&mut group, || {});
            }
        }
    }
}

/// Exclusive access held by one writer.
#[must_use = "dropping WriteAccess gives up write access immediately"]
pub struct WriteAccess {
    state: Arc<SharedResourceState>,
    permit: Option<OwnedSemaphorePermit>,
}

impl WriteAccess {
    pub fn release(self) {
        self.release_with(|| {});
    }

    /// Calls `on_lock_drop` and then returns the lock.
    pub fn release_with(mut self, on_lock_drop: impl FnOnce()) {
        self.finish(on_lock_drop);
    }

    fn finish(&mut self, on_lock_drop: impl FnOnce()) {
        if let Some(permit) = self.permit.take() {
            on_lock_drop();
            drop(permit);
            self.state
                .counters
                .writer_releases
                .fetch_add(1, Ordering::Relaxed);
            debug!("Writer released resource lock");
        }
    }
}

impl Drop for WriteAccess {
    fn drop(&mut self) {
        self.finish(|| {});
    }
}

/// Access granted to either role.
pub enum Access {
    Read(ReadAccess),
    Write(WriteAccess),
}

impl Access {
    /// Gives access back. Returns `true` when this call dropped the resource lock
    /// (always for a writer, only for the last reader out).
    pub async fn release(self) -> bool {
        self.release_with(|| {}).await
    }

    /// Gives access back, calling `on_lock_drop` just before the lock becomes available to
    /// waiters. Anything it records is ordered before the next holder's admission.
    pub async fn release_with(self, on_lock_drop: impl FnOnce()) -> bool {
        match self {
            Access::Read(access) => access.release_with(on_lock_drop).await.released_lock(),
            Access::Write(access) => {
                access.release_with(on_lock_drop);
                true
            }
        }
    }
}
