//! Test harness for integration testing.
//!
//! Each test gets its own mock upstream and a board registry wired to it,
//! so request counts never leak between tests.

use std::sync::Arc;

use jobsync_core::domains::boards::{
    http, Ashby, BambooHr, BoardRegistry, Greenhouse, Lever, Workable,
};
use test_context::AsyncTestContext;

use super::MockUpstream;

/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let jobs = ctx.registry().resolve("lever").unwrap().fetch("acme").await;
/// }
/// ```
pub struct TestHarness {
    pub upstream: MockUpstream,
    pub client: reqwest::Client,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            upstream: MockUpstream::start().await,
            client: http::build_client().expect("Failed to build HTTP client"),
        }
    }

    async fn teardown(self) {
        // Upstream task is aborted on drop
    }
}

impl TestHarness {
    pub fn base_url(&self) -> &str {
        &self.upstream.base_url
    }

    /// All five adapters pointed at the mock upstream.
    pub fn registry(&self) -> BoardRegistry {
        let base = self.base_url();
        BoardRegistry::empty()
            .with_adapter(Arc::new(Ashby::new(self.client.clone()).with_base_url(base)))
            .with_adapter(Arc::new(BambooHr::new(self.client.clone()).with_base_url(base)))
            .with_adapter(Arc::new(Greenhouse::new(self.client.clone()).with_base_url(base)))
            .with_adapter(Arc::new(Lever::new(self.client.clone()).with_base_url(base)))
            .with_adapter(Arc::new(Workable::new(self.client.clone()).with_base_url(base)))
    }
}
