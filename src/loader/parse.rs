//! Text format for process lists.
//!
//! ```text
//! PID  Arrival  Burst  Priority  Role
//! 1    0        3      1         R
//! 2    1        2      2         W
//! ```
//!
//! Columns are whitespace separated. The optional header (first line starting with `PID`)
//! is skipped. The priority column is part of the input format but plays no role in
//! admission, so it is not interpreted. Extra trailing columns are ignored.

use crate::loader::error::RecordError;
use crate::model::{ProcessDescriptor, ProcessId, Role};
use std::collections::HashSet;
use tracing::debug;

const MIN_COLUMNS: usize = 5;

/// A line that did not produce a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number in the source.
    pub line: usize,
    pub text: String,
    pub reason: RecordError,
}

/// Result of parsing a process list: the valid descriptors in input order plus every
/// skipped record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedDescriptors {
    pub descriptors: Vec<ProcessDescriptor>,
    pub skipped: Vec<SkippedRecord>,
}

/// Parses a whole process list. Never fails: bad records are skipped and reported.
pub fn parse_descriptors(text: &str) -> LoadedDescriptors {
    let mut loaded = LoadedDescriptors::default();
    let mut seen = HashSet::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || (index == 0 && is_header(line)) {
            continue;
        }

        let parsed = parse_record(line).and_then(|descriptor| {
            if seen.insert(descriptor.id) {
                Ok(descriptor)
            } else {
                Err(RecordError::DuplicateId(descriptor.id))
            }
        });

        match parsed {
            Ok(descriptor) => loaded.descriptors.push(descriptor),
            Err(reason) => {
                debug!(line = index + 1, %reason, "Skipping malformed record");
                loaded.skipped.push(SkippedRecord {
                    line: index + 1,
                    text: line.to_string(),
                    reason,
                });
            }
        }
    }
    loaded
}

/// Parses one `PID ARRIVAL BURST PRIORITY ROLE` record.
pub fn parse_record(line: &str) -> Result<ProcessDescriptor, RecordError> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() < MIN_COLUMNS {
        return Err(RecordError::TooFewColumns(columns.len()));
    }

    let id: u32 = number("pid", columns[0])?;
    if id == 0 {
        return Err(RecordError::ZeroId);
    }
    let arrival = number("arrival", columns[1])?;
    let burst = number("burst", columns[2])?;
    let role = columns[4]
        .chars()
        .next()
        .and_then(Role::from_code)
        .ok_or_else(|| RecordError::UnknownRole(columns[4].to_string()))?;

    Ok(ProcessDescriptor::new(ProcessId(id), arrival, burst, role))
}

fn is_header(line: &str) -> bool {
    line.get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("PID"))
}

fn number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
