/// Straight-alpha RGBA fill colour, components nominally in `[0, 1]`.
///
/// Shapes store whatever the input layer gives them; clamping happens at the
/// edge (see [`Rgba::clamped`]), never during rendering.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::opaque(1.0, 1.0, 1.0);
    pub const RED: Self = Self::opaque(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::opaque(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::opaque(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Clamps every channel into `[0, 1]`. NaN channels become `0`.
    #[inline]
    pub fn clamped(self) -> Self {
        fn unit(v: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Self::new(unit(self.r), unit(self.g), unit(self.b), unit(self.a))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Converts to 8-bit channels, clamping first.
    #[inline]
    pub fn to_u8(self) -> [u8; 4] {
        let c = self.clamped();
        [c.r, c.g, c.b, c.a].map(|v| (v * 255.0).round() as u8)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl From<[f32; 4]> for Rgba {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for wgpu::Color {
    #[inline]
    fn from(c: Rgba) -> Self {
        wgpu::Color { r: c.r as f64, g: c.g as f64, b: c.b as f64, a: c.a as f64 }
    }
}
