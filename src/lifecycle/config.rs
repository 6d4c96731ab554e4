use std::time::Duration;

/// Settings for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Real length of one simulated time unit.
    pub time_unit: Duration,
    /// Print the arrival table before starting.
    pub show_table: bool,
    /// Print every event line as it happens.
    pub echo_events: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_unit: Duration::from_secs(1),
            show_table: true,
            echo_events: true,
        }
    }
}

impl SimulationConfig {
    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// No table and no event lines; events are still collected into the report.
    pub fn quiet(mut self) -> Self {
        self.show_table = false;
        self.echo_events = false;
        self
    }
}
