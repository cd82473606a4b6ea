use super::Vec2;

/// Share of the shorter viewport side covered by the clock face.
pub const FACE_FILL: f32 = 0.85;

/// Rendering surface size in logical pixels.
///
/// Supplied by the host on every resize. The engine only ever uses the derived
/// [`face_size`](Self::face_size) as the base unit for hand geometry.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Diameter of the clock face: `min(width, height) * 0.85`.
    ///
    /// Zero for degenerate viewports (minimized windows, NaN sizes).
    #[inline]
    pub fn face_size(self) -> f32 {
        if self.is_valid() {
            self.width.min(self.height) * FACE_FILL
        } else {
            0.0
        }
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}
