//! # rw-sim
//!
//! > **Readers and writers contending for one shared resource, simulated with Tokio.**
//!
//! Each simulated process arrives at a scheduled time, asks for access to a single shared
//! resource, uses it for a burst, and leaves. Any number of readers may use the resource at
//! once; a writer needs it alone.
//!
//! ## 🏗️ Design
//!
//! ### One task per process
//! Every process is a [`ProcessActor`](process_actor::ProcessActor): a plain value built
//! from its descriptor plus a handle to the shared state, whose `run()` future is spawned on
//! the multi-threaded runtime. Actors run in parallel and only meet inside the engine.
//!
//! ### Explicit shared state
//! There are no globals. The resource lock and the reader count live in one
//! [`SharedResourceState`](sync::SharedResourceState), created per run and shared through
//! an `Arc`.
//!
//! ### Scoped access
//! Admission hands back a guard. Releasing it is the normal path, and dropping it still
//! releases, so a lock can't outlive the actor that took it.
//!
//! ### Cooperative cancellation
//! Every suspension (arrival, admission, service) races a `CancellationToken`. Cancelling
//! one process never touches the others.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - descriptors, roles, phases and events (pure data)
//! - [`sync`] - the readers-writers engine
//! - [`process_actor`] - the per-process state machine
//! - [`lifecycle`] - the [`Simulation`](lifecycle::Simulation) driver, configuration and
//!   tracing setup
//! - [`loader`] - reading process lists
//! - [`reporting`] - event collection, rendering and exclusion checks
//! - [`clock`] - simulated time units
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! cargo run -- --input processes.txt --time-unit-ms 200
//! RUST_LOG=debug cargo run -- --input processes.txt
//! ```

pub mod clock;
pub mod lifecycle;
pub mod loader;
pub mod model;
pub mod process_actor;
pub mod reporting;
pub mod sync;
