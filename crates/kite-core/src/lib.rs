//! Kite Core
//!
//! Shared plumbing for the Kite widget toolkit: logging and profiling setup,
//! configuration, geometry primitives, hash collections and a small task pool.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
pub mod task_pool;

pub use config::{BenchmarkMode, Config};

/// Initialize logging and profiling from a [`Config`].
///
/// Call once at startup, before the frame loop begins.
pub fn init(config: &Config) {
    logging::init_with_filter(&config.log_filter);

    match config.benchmark {
        BenchmarkMode::Off => {}
        BenchmarkMode::On => puffin::set_scopes_on(true),
        BenchmarkMode::WithWebserver => {
            profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp)
        }
    }
}
