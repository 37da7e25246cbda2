//! Important part, zoom level, and the focal rectangle they produce.
//!
//! The important part is stored as percentages of the original so it stays
//! valid when the original is replaced by a differently sized file. Editing
//! UIs send slightly out-of-range values while dragging, so construction
//! clamps instead of failing. The zoom level is set programmatically and is
//! rejected when out of range.
//!
//! ```text
//!     zoom 0                 zoom 50                zoom 100
//!     ┌────────────┐         ┌────────────┐         ┌────────────┐
//!     │████████████│         │ ┌────────┐ │         │            │
//!     │████████████│         │ │████████│ │         │   ┌────┐   │
//!     │████████████│         │ │████████│ │         │   │████│   │
//!     │████████████│         │ └────────┘ │         │   └────┘   │
//!     └────────────┘         └────────────┘         └────────────┘
//!     full image             halfway                important part
//! ```

use num_traits::Float;

use crate::error::ResizeError;
use crate::geometry::{Rect, Size, round_i32, round_u32};

/// Focal rectangle as percentages (0–100) of the original image.
///
/// Always fully inside the image: `x + width ≤ 100`, `y + height ≤ 100`,
/// and each side is at least 1%.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "PartFields"))]
pub struct ImportantPart {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl ImportantPart {
    /// Create an important part, clamping every field into range.
    ///
    /// The size is clamped first, then the origin is pushed back so the
    /// rectangle fits: a part dragged past the right edge keeps its width.
    /// Non-finite fields fall back to the full-image value.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x, width) = clamp_axis(x, width);
        let (y, height) = clamp_axis(y, height);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Important part covering the whole image.
    pub const fn full() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }

    /// Convert an absolute pixel rectangle to percentages of `original`.
    pub fn from_pixels(rect: Rect, original: Size) -> Result<Self, ResizeError> {
        if original.is_degenerate() {
            return Err(ResizeError::DegenerateBox {
                width: original.width,
                height: original.height,
            });
        }
        let w = original.width as f64;
        let h = original.height as f64;
        Ok(Self::new(
            rect.x as f64 * 100.0 / w,
            rect.y as f64 * 100.0 / h,
            rect.width as f64 * 100.0 / w,
            rect.height as f64 * 100.0 / h,
        ))
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether this part covers the whole image.
    pub fn is_full(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.width == 100.0 && self.height == 100.0
    }

    /// Fractional pixel region of this part within `original`.
    pub fn to_pixels(&self, original: Size) -> Region {
        let w = original.width as f64;
        let h = original.height as f64;
        Region {
            x: self.x * w / 100.0,
            y: self.y * h / 100.0,
            width: self.width * w / 100.0,
            height: self.height * h / 100.0,
        }
    }
}

impl Default for ImportantPart {
    fn default() -> Self {
        Self::full()
    }
}

/// Clamp one axis: size into `1..=100`, then origin into `0..=100 - size`.
fn clamp_axis(origin: f64, size: f64) -> (f64, f64) {
    let size = if size.is_finite() { size } else { 100.0 };
    let origin = if origin.is_finite() { origin } else { 0.0 };
    let size = size.clamp(1.0, 100.0);
    // `+ 0.0` maps -0.0 to 0.0.
    let origin = origin.clamp(0.0, 100.0 - size) + 0.0;
    (origin, size)
}

/// Unvalidated important-part fields, as found in stored configuration.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PartFields {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[cfg(feature = "serde")]
impl From<PartFields> for ImportantPart {
    fn from(f: PartFields) -> Self {
        Self::new(f.x, f.y, f.width, f.height)
    }
}

/// How far to zoom into the important part, 0–100.
///
/// 0 ignores the important part; 100 crops tightly to it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    /// No zoom: the important part is ignored.
    pub const NONE: Self = Self(0);
    /// Full zoom: the focal rectangle is the important part.
    pub const MAX: Self = Self(100);

    /// Create a zoom level. Values above 100 are rejected.
    pub fn new(value: u32) -> Result<Self, ResizeError> {
        if value > 100 {
            return Err(ResizeError::InvalidZoom { value });
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u32 {
        self.0 as u32
    }

    /// Interpolation factor `value / 100`.
    pub fn fraction(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u32> for ZoomLevel {
    type Error = ResizeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZoomLevel> for u32 {
    fn from(zoom: ZoomLevel) -> Self {
        zoom.value()
    }
}

/// Rectangle in fractional pixel units of the original image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// Region covering all of `size`.
    pub fn full(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width as f64,
            height: size.height as f64,
        }
    }

    /// Whether this region is exactly the full `size` at the origin.
    pub fn is_full(&self, size: Size) -> bool {
        *self == Self::full(size)
    }

    /// Component-wise linear interpolation towards `to` by `t` (0–1).
    pub fn lerp(&self, to: &Region, t: f64) -> Region {
        Region {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            width: lerp(self.width, to.width, t),
            height: lerp(self.height, to.height, t),
        }
    }

    /// Round to whole pixels and clamp into `bounds`.
    pub fn to_rect(&self, bounds: Size) -> Rect {
        Rect::new(
            round_i32(self.x),
            round_i32(self.y),
            round_u32(self.width),
            round_u32(self.height),
        )
        .clamp_to(bounds)
    }
}

fn lerp<T: Float>(from: T, to: T, t: T) -> T {
    from + (to - from) * t
}

/// Focal rectangle for `original` given an optional important part and zoom.
///
/// The full image at zoom 0 (or without an important part), the important
/// part at zoom 100, linearly interpolated in between.
pub fn focus_region(original: Size, part: Option<&ImportantPart>, zoom: ZoomLevel) -> Region {
    let full = Region::full(original);
    match part {
        Some(part) if !zoom.is_zero() => {
            if zoom == ZoomLevel::MAX {
                part.to_pixels(original)
            } else {
                full.lerp(&part.to_pixels(original), zoom.fraction())
            }
        }
        _ => full,
    }
}
