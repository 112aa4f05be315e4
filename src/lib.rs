pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod report;
pub mod runner;
pub mod seed;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Installs the `tracing` subscriber shared by the binaries.
///
/// `RUST_LOG` wins when set; otherwise this crate logs at `info` and the
/// driver is kept quiet.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,mongodb=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();
}
