use super::Vec2;

/// Drawable size in physical pixels.
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

    /// Maps a pixel position (origin top-left, +Y down) to normalized device
    /// coordinates (origin centre, +Y up).
    ///
    /// A zero-sized viewport maps everything to the origin.
    pub fn to_ndc(self, px: f32, py: f32) -> Vec2 {
        if !self.is_valid() {
            return Vec2::zero();
        }
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        Vec2::new((px - half_w) / half_w, (half_h - py) / half_h)
    }

    /// Size of one pixel in NDC units along each axis.
    #[inline]
    pub fn ndc_per_pixel(self) -> Vec2 {
        Vec2::new(2.0 / self.width.max(1.0), 2.0 / self.height.max(1.0))
    }
}
