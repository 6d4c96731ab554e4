//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); every actor runs inside a
//! `process` span carrying its `id` and `role`, so lines read like:
//!
//! ```text
//! INFO process{id=2 role=Writer}: Process finished service_interrupted=false
//! ```
//!
//! ## Levels
//!
//! - `info`: run lifecycle, per-process completion or cancellation
//! - `debug`: lock hand-offs in the engine, skipped input records
//! - `trace`: every reader entry and exit with the current count
//!
//! ```bash
//! RUST_LOG=info cargo run -- --input processes.txt
//! RUST_LOG=rw_sim::sync=trace cargo run -- --input processes.txt
//! ```
//!
//! Tracing output goes to stderr, separate from the `>>> [Reader 1] ...` event lines, which
//! the reporting layer prints to stdout.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
