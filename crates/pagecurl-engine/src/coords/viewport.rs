/// Pixel rectangle a view renders into.
///
/// Coordinates are physical pixels with the origin at the top-left corner of the
/// swap target.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole `width` x `height` surface.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, or `None` when the rectangle is empty.
    #[inline]
    pub fn aspect(self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.width as f64 / self.height as f64)
        }
    }

    /// Clips the rectangle to a `width` x `height` target.
    ///
    /// Returns `None` when nothing of the viewport remains visible.
    pub fn clamped_to(self, width: u32, height: u32) -> Option<Self> {
        if self.x >= width || self.y >= height {
            return None;
        }

        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        let clipped = Self::new(self.x, self.y, w, h);

        (!clipped.is_empty()).then_some(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_starts_at_origin() {
        assert_eq!(Viewport::full(1920, 1080), Viewport::new(0, 0, 1920, 1080));
    }

    #[test]
    fn aspect_of_empty_is_none() {
        assert_eq!(Viewport::full(0, 600).aspect(), None);
        assert_eq!(Viewport::full(800, 0).aspect(), None);
    }

    #[test]
    fn aspect_matches_ratio() {
        let aspect = Viewport::full(1920, 1080).aspect().unwrap();
        assert!((aspect - 1.7777).abs() < 1e-3);
    }

    // ── clamped_to ────────────────────────────────────────────────────────

    #[test]
    fn clamp_inside_is_identity() {
        let vp = Viewport::full(800, 600);
        assert_eq!(vp.clamped_to(800, 600), Some(vp));
    }

    #[test]
    fn clamp_shrinks_oversized() {
        let vp = Viewport::new(100, 50, 1000, 1000);
        assert_eq!(vp.clamped_to(800, 600), Some(Viewport::new(100, 50, 700, 550)));
    }

    #[test]
    fn clamp_outside_is_none() {
        assert_eq!(Viewport::new(900, 0, 10, 10).clamped_to(800, 600), None);
    }
}
