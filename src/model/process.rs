use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for simulated processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessId(pub u32);

impl From<u32> for ProcessId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a process uses the shared resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Shares the resource with any number of other readers.
    Reader,
    /// Needs the resource exclusively.
    Writer,
}

impl Role {
    /// Parses the single-letter role code used in process lists (`R` or `W`).
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'R' => Some(Role::Reader),
            'W' => Some(Role::Writer),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Role::Reader => 'R',
            Role::Writer => 'W',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Reader => "Reader",
            Role::Writer => "Writer",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One simulated process as supplied by the loader.
///
/// `arrival` and `burst` are expressed in simulation time units; the driver's
/// [`SimClock`](crate::clock::SimClock) turns them into real durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub id: ProcessId,
    pub arrival: u64,
    pub burst: u64,
    pub role: Role,
}

impl ProcessDescriptor {
    /// Creates a new descriptor.
    ///
    /// # Arguments
    /// * `id` - Unique, positive process identifier
    /// * `arrival` - Time units to wait before requesting the resource
    /// * `burst` - Time units spent using the resource once admitted
    /// * `role` - Reader or writer
    pub fn new(id: impl Into<ProcessId>, arrival: u64, burst: u64, role: Role) -> Self {
        Self {
            id: id.into(),
            arrival,
            burst,
            role,
        }
    }

    pub fn reader(id: u32, arrival: u64, burst: u64) -> Self {
        Self::new(id, arrival, burst, Role::Reader)
    }

    pub fn writer(id: u32, arrival: u64, burst: u64) -> Self {
        Self::new(id, arrival, burst, Role::Writer)
    }

    /// Log label, e.g. `Reader 3`.
    pub fn label(&self) -> String {
        format!("{} {}", self.role, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_are_case_insensitive() {
        assert_eq!(Role::from_code('r'), Some(Role::Reader));
        assert_eq!(Role::from_code('W'), Some(Role::Writer));
        assert_eq!(Role::from_code('X'), None);
        assert_eq!(Role::Writer.code(), 'W');
    }

    #[test]
    fn label_matches_log_prefix() {
        assert_eq!(ProcessDescriptor::reader(7, 0, 1).label(), "Reader 7");
        assert_eq!(ProcessDescriptor::writer(2, 3, 4).label(), "Writer 2");
    }
}
