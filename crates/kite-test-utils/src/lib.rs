//! Test utilities for the Kite widget toolkit.
//!
//! [`RecordingSurface`] stands in for a real drawing target: every call is
//! recorded so tests can assert on what a draw pass did without inspecting
//! pixels.

pub mod recording_surface;

pub use recording_surface::{DrawCall, RecordingSurface};
