use tracing_subscriber::EnvFilter;

/// Filter applied when neither `RUST_LOG` nor a config override is present.
pub const DEFAULT_FILTER: &str = "info,kite_ui=debug";

pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `filter` when set. Installing twice is a no-op, so tests
/// may call this freely.
pub fn init_with_filter(filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_err()
    {
        tracing::trace!("global subscriber already installed");
    }
}
