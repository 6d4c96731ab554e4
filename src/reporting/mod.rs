//! Reporting layer.
//!
//! Actors only hold an [`EventSender`]. The [`EventCollector`] task owns the receiving end,
//! renders each event as it arrives and hands the full ordered log back to the driver.
//!
//! - [`events`] - the event channel and collector task
//! - [`render`] - console rendering and the arrival table
//! - [`timeline`] - rebuilds service intervals from a log and checks mutual exclusion

pub mod events;
pub mod render;
pub mod timeline;

pub use events::*;
pub use render::*;
pub use timeline::*;
