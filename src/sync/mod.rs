//! Readers-writers synchronization engine.
//!
//! # Main Components
//!
//! - [`SharedResourceState`] - The resource lock plus the reader group it gates
//! - [`ReadAccess`] / [`WriteAccess`] - Scoped proof of admission, released exactly once
//! - [`Access`] - Either of the above, chosen by [`Role`](crate::model::Role)
//! - [`SyncError`] - Cancellation and lock errors

pub mod engine;
pub mod error;

pub use engine::*;
pub use error::*;
