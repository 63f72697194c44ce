//! Optional `tracing` setup for binaries and tests using the client
//!
//! The client only emits `tracing` events: request lines at `debug`, the crumb
//! outcome at `info`, and a fatal crumb decision at `warn`. Applications that
//! already install a subscriber should skip this module. Small tools and
//! scripts can call [`init`] once at startup. `RUST_LOG` overrides the
//! default filter, for example `RUST_LOG=jenkins_rest=debug` shows every
//! request.

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str = "jenkins_rest=info,jenkins_rest_api=info";
pub const DEV_LOG_FILTER: &str = "jenkins_rest=debug,jenkins_rest_api=debug";

pub fn init() {
    init_with_default(DEFAULT_LOG_FILTER);
}

/// Installs the subscriber unless one is already set; calling it twice is
/// harmless.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .try_init();
}

/// Request-level logging for local debugging against a Jenkins instance.
pub fn init_dev() {
    init_with_default(DEV_LOG_FILTER);
}
