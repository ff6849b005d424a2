//! Shared fixtures for tdaemon's integration tests.
//!
//! - [`fake_runner::FakeRunner`]: a `CommandRunner` that records command
//!   lines instead of spawning processes.
//! - [`builders`]: `CliArgs` without clap, and a scripted `Confirm`.

pub mod builders;
pub mod fake_runner;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Upper bound for anything a test awaits on the polling loop.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Install a test-captured tracing subscriber once per test binary.
///
/// Output only shows for failing tests (or with `--nocapture`). Defaults to
/// `tdaemon=debug` so snapshot and tick decisions are visible; override with
/// e.g. `RUST_LOG=trace cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,tdaemon=debug"));

        fmt().with_env_filter(filter).with_test_writer().init();
    });
}

/// Await `f`, panicking if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .unwrap_or_else(|_| panic!("test timed out after {TEST_TIMEOUT:?}"))
}
