//! Kite Render
//!
//! The drawing collaborators the UI core is written against: the [`Surface`]
//! trait, a CPU [`Image`] that implements it, [`Color`] and the built-in
//! bitmap [`Font`]. None of this is GPU accelerated; hosts with their own
//! renderer implement [`Surface`] instead.

pub mod color;
pub mod error;
pub mod font;
pub mod raster;
pub mod surface;

pub use color::Color;
pub use error::{RenderError, RenderResult};
pub use font::{DEFAULT_FONT_SIZE, Font};
pub use raster::Image;
pub use surface::Surface;
