//! Vector math for positions and offsets.
//!
//! Kite works in window pixel coordinates with `f32` components. The SIMD
//! types from [`glam`] are re-exported so downstream crates don't pin their own
//! version.
//!
//! ```
//! use kite_core::math::Vec2;
//!
//! let cursor = Vec2::new(120.0, 48.0);
//! let origin = Vec2::new(100.0, 40.0);
//! assert_eq!(cursor - origin, Vec2::new(20.0, 8.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{IVec2, UVec2, Vec2, Vec4};
