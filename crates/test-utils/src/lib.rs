//! Shared helpers for texwatch integration tests.
//!
//! - [`builders`]: config builders.
//! - [`fakes`]: in-memory predictor, clipboard, notifier and change handler.

pub mod builders;
pub mod fakes;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for any single await in a test. Generous because subprocess
/// and watcher tests run against real `sh` and a real notify backend.
pub const TEST_DEADLINE: Duration = Duration::from_secs(5);

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Output is captured per test and only shown for failures (or with
/// `-- --nocapture`). Use `RUST_LOG=texwatch=debug cargo test` for detail.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, failing the test after [`TEST_DEADLINE`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(TEST_DEADLINE, f)
        .await
        .expect("test step did not finish within the deadline")
}

/// Poll `cond` every 10ms until it holds, failing the test after
/// [`TEST_DEADLINE`].
///
/// For state changed by a spawned runtime (e.g. handler calls recorded by a
/// fake) that the test cannot await directly.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    with_timeout(async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
}
