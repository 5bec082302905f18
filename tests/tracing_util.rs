use tracing_subscriber::EnvFilter;

/// Installs a thread-default fmt subscriber for the lifetime of one test.
///
/// Output goes through the libtest capture writer, so logs only show up for
/// failing tests (or with `--nocapture`). Filter with `RUST_LOG` as usual.
pub struct TestTracing {
    _guard: tracing::subscriber::DefaultGuard,
}

impl TestTracing {
    pub fn init() -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        Self { _guard: guard }
    }
}
