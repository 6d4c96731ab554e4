use rw_sim::lifecycle::{Simulation, SimulationConfig};
use rw_sim::model::{EventKind, InterruptPoint, ProcessDescriptor, ProcessId};
use rw_sim::process_actor::ActorOutcome;
use std::time::Duration;

fn config() -> SimulationConfig {
    SimulationConfig::default()
        .with_time_unit(Duration::from_secs(1))
        .quiet()
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Two readers arriving together share the resource: the run takes 2 units, not 4.
#[tokio::test(start_paused = true)]
async fn test_concurrent_readers() {
    let report = Simulation::new(
        config(),
        vec![
            ProcessDescriptor::reader(1, 0, 2),
            ProcessDescriptor::reader(2, 0, 2),
        ],
    )
    .run()
    .await;

    assert!(report.elapsed >= secs(2));
    assert!(report.elapsed < secs(3), "readers were serialized: {:?}", report.elapsed);

    let timeline = report.timeline();
    assert!(timeline.is_exclusive());
    assert_eq!(timeline.peak_readers(), 2);

    // Only the last reader out logs the release, after the other reader finished service.
    let released: Vec<ProcessId> = report
        .events
        .iter()
        .filter(|e| e.kind == EventKind::Released)
        .map(|e| e.id)
        .collect();
    assert_eq!(released.len(), 1, "{released:?}");
    let last_out = released[0];
    let other = if last_out == ProcessId(1) {
        ProcessId(2)
    } else {
        ProcessId(1)
    };
    let released_at = report
        .position(last_out, |e| e.kind == EventKind::Released)
        .unwrap();
    let other_done = report
        .position(other, |e| e.kind == EventKind::ServiceDone)
        .unwrap();
    assert!(other_done < released_at);

    assert_eq!(report.finished_count(), 2);
    assert_eq!(report.stats.group_acquisitions, 1);
    assert!(report.is_clean());
}

/// A writer arriving with an active reader is admitted only after the reader releases.
#[tokio::test(start_paused = true)]
async fn test_writer_waits_for_reader_release() {
    let report = Simulation::new(
        config(),
        vec![
            ProcessDescriptor::reader(1, 0, 3),
            ProcessDescriptor::writer(2, 0, 1),
        ],
    )
    .run()
    .await;

    let reader_released = report
        .position(ProcessId(1), |e| e.kind == EventKind::Released)
        .expect("reader released the lock");
    let writer_acquired = report
        .position(ProcessId(2), |e| e.kind == EventKind::Acquired)
        .expect("writer acquired the lock");
    assert!(reader_released < writer_acquired);

    let writer = report.timeline().interval(ProcessId(2)).cloned().unwrap();
    assert!(writer.start >= secs(3));
    assert!(report.elapsed >= secs(4));
    assert!(report.timeline().is_exclusive());
    assert!(report.is_clean());
}

/// With real threads either process of a simultaneous arrival may win the lock; whoever
/// held it first must have its release logged before the other is admitted.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_release_logged_before_next_admission() {
    for round in 0..200 {
        let report = Simulation::new(
            config().with_time_unit(Duration::from_millis(1)),
            vec![
                ProcessDescriptor::reader(1, 0, 3),
                ProcessDescriptor::writer(2, 0, 1),
            ],
        )
        .run()
        .await;

        let acquired = |id| {
            report
                .position(id, |e| e.kind == EventKind::Acquired)
                .expect("every process is admitted")
        };
        let (first, second) = if acquired(ProcessId(1)) < acquired(ProcessId(2)) {
            (ProcessId(1), ProcessId(2))
        } else {
            (ProcessId(2), ProcessId(1))
        };
        let first_released = report
            .position(first, |e| e.kind == EventKind::Released)
            .expect("first holder released the lock");
        assert!(
            first_released < acquired(second),
            "round {round}: {first} released at {first_released}, {second} acquired at {}",
            acquired(second)
        );
        assert!(report.timeline().is_exclusive(), "round {round}");
        assert!(report.is_clean(), "round {round}");
    }
}

/// Two writers never overlap; total time is the sum of their bursts.
#[tokio::test(start_paused = true)]
async fn test_writers_are_serialized() {
    let report = Simulation::new(
        config(),
        vec![
            ProcessDescriptor::writer(1, 0, 1),
            ProcessDescriptor::writer(2, 0, 1),
        ],
    )
    .run()
    .await;

    assert!(report.timeline().is_exclusive());
    assert!(report.elapsed >= secs(2));
    assert!(report.elapsed < secs(3));
    assert_eq!(report.stats.writer_acquisitions, 2);
    assert!(report.is_clean());
}

/// Nobody enters service before its arrival time.
#[tokio::test(start_paused = true)]
async fn test_service_never_precedes_arrival() {
    let descriptors = vec![
        ProcessDescriptor::reader(1, 3, 1),
        ProcessDescriptor::writer(2, 1, 2),
        ProcessDescriptor::reader(3, 0, 4),
        ProcessDescriptor::reader(4, 5, 1),
    ];
    let report = Simulation::new(config(), descriptors.clone()).run().await;
    let timeline = report.timeline();

    for descriptor in &descriptors {
        let interval = timeline.interval(descriptor.id).expect("process was served");
        assert!(
            interval.start >= secs(descriptor.arrival),
            "{} served at {:?}",
            descriptor.label(),
            interval.start
        );
    }
    assert!(timeline.is_exclusive());
    assert!(report.is_clean());
}

/// Launch order follows arrival time and keeps input order on ties.
#[tokio::test(start_paused = true)]
async fn test_outcomes_in_launch_order() {
    let report = Simulation::new(
        config(),
        vec![
            ProcessDescriptor::writer(5, 2, 1),
            ProcessDescriptor::reader(3, 0, 1),
            ProcessDescriptor::reader(4, 2, 1),
            ProcessDescriptor::reader(1, 0, 1),
        ],
    )
    .run()
    .await;

    let ids: Vec<u32> = report.outcomes.iter().map(|o| o.descriptor.id.0).collect();
    assert_eq!(ids, vec![3, 1, 5, 4]);
}

/// A reader arriving while a writer waits on an active group still gets in first.
#[tokio::test(start_paused = true)]
async fn test_reader_preference_is_preserved() {
    let report = Simulation::new(
        config(),
        vec![
            ProcessDescriptor::reader(1, 0, 4),
            ProcessDescriptor::writer(2, 1, 1),
            ProcessDescriptor::reader(3, 2, 1),
        ],
    )
    .run()
    .await;

    let timeline = report.timeline();
    let late_reader = timeline.interval(ProcessId(3)).unwrap();
    let writer = timeline.interval(ProcessId(2)).unwrap();
    assert!(late_reader.start < secs(3));
    assert!(writer.start >= secs(4));
    assert!(timeline.is_exclusive());
    assert!(report.is_clean());
}

/// Cancelling a process that waits for the lock leaves the shared state untouched.
#[tokio::test(start_paused = true)]
async fn test_cancel_while_waiting_for_lock() {
    let running = Simulation::new(
        config(),
        vec![
            ProcessDescriptor::writer(1, 0, 5),
            ProcessDescriptor::reader(2, 1, 1),
            ProcessDescriptor::reader(3, 1, 1),
        ],
    )
    .start();

    tokio::time::sleep(secs(2)).await;
    assert!(!running.shared_state().is_resource_free());
    assert!(running.cancel(ProcessId(2)));
    assert!(!running.cancel(ProcessId(42)));
    let report = running.wait().await;

    assert_eq!(
        report.outcome(ProcessId(2)),
        Some(ActorOutcome::Cancelled {
            during: InterruptPoint::Acquire
        })
    );
    assert!(report
        .events_for(ProcessId(2))
        .all(|e| e.kind != EventKind::Acquired));

    // Reader 3 was queued behind the cancelled reader and still gets served.
    assert!(report.outcome(ProcessId(3)).unwrap().is_finished());
    assert!(report.timeline().interval(ProcessId(3)).unwrap().start >= secs(5));
    assert_eq!(report.stats.cancelled_entries, 1);
    assert!(report.is_clean());
}

/// Cancelling a process mid-service still returns its access.
#[tokio::test(start_paused = true)]
async fn test_cancel_during_service() {
    let running = Simulation::new(
        config(),
        vec![
            ProcessDescriptor::writer(1, 0, 10),
            ProcessDescriptor::reader(2, 1, 1),
        ],
    )
    .start();

    tokio::time::sleep(secs(2)).await;
    running.cancel(ProcessId(1));
    let report = running.wait().await;

    assert_eq!(
        report.outcome(ProcessId(1)),
        Some(ActorOutcome::Finished {
            service_interrupted: true
        })
    );
    assert!(report
        .events_for(ProcessId(1))
        .any(|e| e.kind == EventKind::Released));
    assert!(report.outcome(ProcessId(2)).unwrap().is_finished());
    assert!(report.elapsed < secs(10));
    assert!(report.timeline().is_exclusive());
    assert!(report.is_clean());
}

/// Cancelling everything before arrival ends every process without touching the lock.
#[tokio::test(start_paused = true)]
async fn test_cancel_all_before_arrival() {
    let running = Simulation::new(
        config(),
        vec![
            ProcessDescriptor::reader(1, 5, 1),
            ProcessDescriptor::writer(2, 6, 1),
        ],
    )
    .start();

    running.cancel_all();
    let report = running.wait().await;

    assert_eq!(report.cancelled_count(), 2);
    assert!(report
        .events
        .iter()
        .all(|e| e.kind == EventKind::Interrupted(InterruptPoint::Arrival)));
    assert_eq!(report.stats.group_acquisitions + report.stats.writer_acquisitions, 0);
    assert!(report.is_clean());
}

#[tokio::test(start_paused = true)]
async fn test_empty_process_list() {
    let report = Simulation::new(config(), Vec::new()).run().await;
    assert!(report.outcomes.is_empty());
    assert!(report.events.is_empty());
    assert!(report.is_clean());
}

/// Mixed workload on real worker threads: exclusion and lock pairing hold with true
/// parallelism, not just on a single-threaded paused clock.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mixed_workload_on_worker_threads() {
    let mut descriptors = Vec::new();
    for id in 1..=24u32 {
        let arrival = u64::from(id % 6);
        let burst = u64::from(id % 3) + 1;
        descriptors.push(if id % 4 == 0 {
            ProcessDescriptor::writer(id, arrival, burst)
        } else {
            ProcessDescriptor::reader(id, arrival, burst)
        });
    }

    let report = Simulation::new(
        config().with_time_unit(Duration::from_millis(5)),
        descriptors,
    )
    .run()
    .await;

    let timeline = report.timeline();
    assert!(timeline.is_exclusive(), "{:?}", timeline.violations());
    assert_eq!(timeline.intervals().len(), 24);
    assert_eq!(report.finished_count(), 24);
    assert_eq!(report.stats.writer_acquisitions, 6);
    assert!(report.is_clean());
}
