//! # Simulation Lifecycle
//!
//! This module owns everything around a run: configuration, tracing setup, and the
//! [`Simulation`] driver that wires actors to the shared state and waits for them.
//!
//! ## The Driver Pattern
//!
//! ```rust,ignore
//! let simulation = Simulation::new(config, descriptors);
//! let running = simulation.start();      // one task per process, all in parallel
//! running.cancel(ProcessId(3));          // optional: interrupt a single process
//! let report = running.wait().await;     // joins every actor and the event collector
//! ```
//!
//! ## Shutdown
//!
//! The driver drops its own [`EventSender`](crate::reporting::EventSender) right after
//! spawning. Each actor drops its clone when it reaches a terminal phase, so the event
//! collector stops exactly when the last actor is done.

pub mod config;
pub mod simulation;
pub mod tracing;

pub use config::*;
pub use simulation::*;
pub use self::tracing::*;
