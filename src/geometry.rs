//! Geometry primitives: [`Size`] and [`Rect`].

use num_traits::ToPrimitive;

/// Round half away from zero, saturating into `u32` (NaN and negatives → 0).
pub(crate) fn round_u32(v: f64) -> u32 {
    let r = v.round();
    r.to_u32().unwrap_or(if r > 0.0 { u32::MAX } else { 0 })
}

/// Round half away from zero, saturating into `i32` (NaN → 0).
pub(crate) fn round_i32(v: f64) -> i32 {
    let r = v.round();
    r.to_i32().unwrap_or(if r.is_nan() {
        0
    } else if r > 0.0 {
        i32::MAX
    } else {
        i32::MIN
    })
}

/// Width × height in pixels (or vector user units).
///
/// A resolved size has both sides ≥ 1. Unset target dimensions are expressed
/// as `Option<u32>` at the call boundary, never as a zero side here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero.
    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Axis-aligned rectangle.
///
/// `x`/`y` are signed: a placement rectangle shifted left or up of the output
/// canvas has a negative origin. Rectangles inside an image (source regions,
/// viewBoxes) keep a non-negative origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering `size` at the origin.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Width and height as a [`Size`].
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Clamp this rect to fit within `(0, 0, bounds.width, bounds.height)`.
    /// Width and height are clamped to at least 1.
    pub fn clamp_to(self, bounds: Size) -> Self {
        let max_x = bounds.width.saturating_sub(1).min(i32::MAX as u32) as i32;
        let max_y = bounds.height.saturating_sub(1).min(i32::MAX as u32) as i32;
        let x = self.x.clamp(0, max_x);
        let y = self.y.clamp(0, max_y);
        let w = self
            .width
            .min(bounds.width.saturating_sub(x as u32))
            .max(1);
        let h = self
            .height
            .min(bounds.height.saturating_sub(y as u32))
            .max(1);
        Self {
            x,
            y,
            width: w,
            height: h,
        }
    }

    /// Whether this rect covers exactly the full `bounds`.
    pub fn is_full(&self, bounds: Size) -> bool {
        self.x == 0 && self.y == 0 && self.width == bounds.width && self.height == bounds.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_u32(2.5), 3);
        assert_eq!(round_u32(2.49), 2);
        assert_eq!(round_i32(-25.5), -26);
        assert_eq!(round_i32(-25.4), -25);
    }

    #[test]
    fn rounding_saturates() {
        assert_eq!(round_u32(-3.0), 0);
        assert_eq!(round_u32(f64::NAN), 0);
        assert_eq!(round_u32(1e20), u32::MAX);
        assert_eq!(round_i32(-1e20), i32::MIN);
        assert_eq!(round_i32(f64::NAN), 0);
    }

    #[test]
    fn degenerate_sizes() {
        assert!(Size::new(0, 10).is_degenerate());
        assert!(Size::new(10, 0).is_degenerate());
        assert!(!Size::new(1, 1).is_degenerate());
    }

    #[test]
    fn clamp_pulls_negative_origin_inside() {
        let r = Rect::new(-5, -10, 50, 50).clamp_to(Size::new(100, 100));
        assert_eq!(r, Rect::new(0, 0, 50, 50));
    }

    #[test]
    fn clamp_trims_overflow() {
        let r = Rect::new(80, 90, 50, 50).clamp_to(Size::new(100, 100));
        assert_eq!(r, Rect::new(80, 90, 20, 10));
    }

    #[test]
    fn clamp_keeps_at_least_one_pixel() {
        let r = Rect::new(200, 200, 0, 0).clamp_to(Size::new(100, 50));
        assert_eq!(r, Rect::new(99, 49, 1, 1));
    }

    #[test]
    fn rect_is_full() {
        let b = Size::new(100, 100);
        assert!(Rect::new(0, 0, 100, 100).is_full(b));
        assert!(!Rect::new(1, 0, 99, 100).is_full(b));
        assert!(!Rect::new(0, 0, 99, 100).is_full(b));
        assert!(Rect::from_size(b).is_full(b));
    }
}
