//! Coordinate types shared between the engine and the rendering layer.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left of the rendering surface
//! - +X right, +Y down
//!
//! Angles elsewhere in the crate are clockwise from 12 o'clock, which in this
//! space is the `-Y` direction.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
