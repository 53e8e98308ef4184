/// Current drawable size in physical pixels.
///
/// Queried from the surface every frame so projection math always tracks the
/// live window size, including across resizes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width-over-height aspect ratio.
    ///
    /// Degenerate (zero) dimensions are treated as 1 px so the value stays
    /// finite while a window is minimized.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_tracks_dimensions() {
        assert_eq!(Viewport::new(800, 600).aspect(), 800.0 / 600.0);
        assert_eq!(Viewport::new(400, 300).aspect(), 400.0 / 300.0);
    }

    #[test]
    fn aspect_of_zero_size_is_finite() {
        assert!(Viewport::new(0, 0).aspect().is_finite());
        assert!(Viewport::new(800, 0).aspect().is_finite());
    }

    #[test]
    fn validity() {
        assert!(Viewport::new(1, 1).is_valid());
        assert!(!Viewport::new(0, 600).is_valid());
    }
}
