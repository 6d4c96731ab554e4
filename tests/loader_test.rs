use rw_sim::lifecycle::{Simulation, SimulationConfig};
use rw_sim::loader::{load, FileSource, InlineSource, LoadError, RecordError};
use rw_sim::model::ProcessId;
use std::time::Duration;

/// A list with a header and a malformed line runs with only the valid processes.
#[tokio::test(start_paused = true)]
async fn test_header_and_malformed_line_do_not_abort_the_run() {
    let source = InlineSource::new(
        "PID  Arrival  Burst  Priority  Role\n\
         1    0        2      1         R\n\
         2    zero     1      1         W\n\
         3    1        1      2         W\n",
    );

    let loaded = load(&source).await.expect("inline source always loads");
    assert_eq!(loaded.descriptors.len(), 2);
    assert_eq!(loaded.skipped.len(), 1);
    assert_eq!(loaded.skipped[0].line, 3);
    assert_eq!(loaded.skipped[0].text, "2    zero     1      1         W");
    assert!(matches!(
        loaded.skipped[0].reason,
        RecordError::InvalidNumber { field: "arrival", .. }
    ));

    let config = SimulationConfig::default()
        .with_time_unit(Duration::from_secs(1))
        .quiet();
    let report = Simulation::new(config, loaded.descriptors).run().await;

    assert_eq!(report.finished_count(), 2);
    assert!(report.outcome(ProcessId(2)).is_none());
    assert!(report.timeline().is_exclusive());
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_unreadable_source_is_fatal() {
    let result = load(&FileSource::new("no/such/dir/processes.txt")).await;
    match result {
        Err(LoadError::Io { path, .. }) => assert!(path.ends_with("processes.txt")),
        Ok(_) => panic!("expected a load failure"),
    }
}
