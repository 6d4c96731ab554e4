//! Presentation of events and process lists.

use crate::model::{ProcessDescriptor, ProcessEvent};

/// Something that turns events into output as they happen.
pub trait EventRenderer: Send + 'static {
    fn render(&mut self, event: &ProcessEvent);
}

/// Prints `>>> [Reader 1] Acquired resource lock` lines to stdout.
pub struct ConsoleRenderer;

impl EventRenderer for ConsoleRenderer {
    fn render(&mut self, event: &ProcessEvent) {
        println!("{event}");
    }
}

/// Discards events; the collector still records them.
pub struct SilentRenderer;

impl EventRenderer for SilentRenderer {
    fn render(&mut self, _event: &ProcessEvent) {}
}

/// Formats the pre-run table of processes sorted by arrival (stable on ties).
pub fn arrival_table(descriptors: &[ProcessDescriptor]) -> String {
    let mut rows: Vec<&ProcessDescriptor> = descriptors.iter().collect();
    rows.sort_by_key(|d| d.arrival);

    let header = format!("{:>8} {:>6} {:>6}  {}\n", "Arrival", "PID", "Burst", "Role");
    rows.into_iter().fold(header, |mut out, d| {
        out.push_str(&format!(
            "{:>8} {:>6} {:>6}  {}\n",
            d.arrival,
            d.id,
            d.burst,
            d.role.code()
        ));
        out
    })
}
