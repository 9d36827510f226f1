//! Common test utilities shared across integration and E2E tests


// Re-export commonly used items
pub use oauth_source::*;

/// Setup logging for tests
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
