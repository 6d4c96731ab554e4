//! Pure data structures shared by every layer of the simulation.

pub mod event;
pub mod process;

pub use event::*;
pub use process::*;
