/// Process-wide configuration for the Kite toolkit.
#[derive(Debug, Clone)]
pub struct Config {
    pub benchmark: BenchmarkMode,
    /// `tracing` env-filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Config {
    pub fn benchmark(mut self, mode: BenchmarkMode) -> Self {
        self.benchmark = mode;
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            benchmark: BenchmarkMode::Off,
            log_filter: crate::logging::DEFAULT_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BenchmarkMode {
    /// Profiling scopes are disabled
    #[default]
    Off,
    /// Profiling scopes are recorded in-process
    On,
    /// Profiling scopes are recorded and served to `puffin_viewer` over HTTP
    WithWebserver,
}
