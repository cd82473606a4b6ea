use core::ops::{Add, Mul, Sub};

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing at `degrees` clockwise from 12 o'clock (`-Y`).
    #[inline]
    pub fn from_clock_angle(degrees: f64) -> Self {
        let r = degrees.to_radians();
        Self::new(r.sin() as f32, -r.cos() as f32)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-6
    }

    #[test]
    fn clock_angles_follow_screen_axes() {
        assert!(near(Vec2::from_clock_angle(0.0), Vec2::new(0.0, -1.0)));
        assert!(near(Vec2::from_clock_angle(90.0), Vec2::new(1.0, 0.0)));
        assert!(near(Vec2::from_clock_angle(180.0), Vec2::new(0.0, 1.0)));
        assert!(near(Vec2::from_clock_angle(270.0), Vec2::new(-1.0, 0.0)));
    }
}
