//! Helpers for exercising trees in tests.

/// A canvas that logs draw calls as text.
pub mod canvas;
/// A tree wrapper with key-based accessors.
pub mod harness;

/// Route `tracing` output to the test writer. Safe to call repeatedly.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init()
        .ok();
}
