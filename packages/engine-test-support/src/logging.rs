//! Tracing setup shared by the engine's unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static GUARD: OnceCell<()> = OnceCell::new();

/// Directives applied when no override variable is set. Tests stay quiet by
/// default; submission and undo spans only show up on request.
const DEFAULT_DIRECTIVES: &str = "warn";

/// Install the test subscriber once per process.
///
/// Filter directives come from `ENGINE_TEST_LOG` when set (matching the
/// `ENGINE_*` namespace the config layer reads), falling back to `RUST_LOG`,
/// then to [`DEFAULT_DIRECTIVES`]. Safe to call from every test and from
/// `ctor` hooks in parallel: later calls are no-ops, and so is losing the
/// global-subscriber race to another harness.
pub fn init() {
    init_with_default(DEFAULT_DIRECTIVES);
}

/// Like [`init`], but with caller-chosen fallback directives, for suites
/// that want engine debug output without exporting an environment variable.
pub fn init_with_default(directives: &str) {
    GUARD.get_or_init(|| {
        fmt()
            .with_env_filter(filter_from_env(directives))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

fn filter_from_env(fallback: &str) -> EnvFilter {
    ["ENGINE_TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(fallback))
}
