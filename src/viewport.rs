//! Apply a [`ResizePlan`] to a vector image's root element.
//!
//! A vector image is resized by rewriting its root attributes rather than
//! resampling pixels. The internal coordinate system (the viewBox) never
//! changes. Only the outer size and the content placement do.
//!
//! The whole image is placed so that the plan's focal rectangle lands on
//! `plan.target`. Anything outside the canvas is clipped, which reproduces
//! the raster crop.
//!
//! ```text
//!     canvas_width × canvas_height            (outer document)
//!     ┌──────────────────────┐
//!  ┌──┼──────────────────────┼──┐  ← x, y, width, height (whole image,
//!  │  │                      │  │    focal part on plan.target)
//!  │  │                      │  │
//!  └──┼──────────────────────┼──┘
//!     └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use focalplan::{ResizeMode, ResizeRequest};
//! use focalplan::viewport::{VectorSource, ViewBox};
//!
//! let source = VectorSource::from_attributes(Some("0 0 200 100"), None, None).unwrap();
//! let original = source.intrinsic_size().unwrap();
//!
//! let plan = ResizeRequest::new(ResizeMode::Crop, 100, 100)
//!     .compute(original)
//!     .unwrap();
//! let result = source.adjust(&plan).unwrap();
//!
//! assert_eq!(result.viewbox, ViewBox::new(0.0, 0.0, 200.0, 100.0));
//! assert_eq!((result.x, result.width), (-50, 200));
//! assert!(result.needs_wrapper());
//! ```

use std::fmt;

use crate::calculator::ResizePlan;
use crate::error::ResizeError;
use crate::geometry::{Rect, Size, round_i32, round_u32};

/// A viewBox in the document's own user units.
///
/// Kept as declared: fractional values are never rounded.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the box has a positive, finite area.
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl From<Rect> for ViewBox {
    fn from(r: Rect) -> Self {
        Self::new(r.x as f64, r.y as f64, r.width as f64, r.height as f64)
    }
}

/// Four numbers separated by single spaces, in attribute form.
impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// Root element attributes after resizing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportResult {
    /// The source viewBox, unchanged (or synthesized from width/height).
    pub viewbox: ViewBox,
    /// Horizontal placement of the whole image in output units.
    pub x: i32,
    /// Vertical placement of the whole image in output units.
    pub y: i32,
    /// Rendered width of the whole image.
    pub width: u32,
    /// Rendered height of the whole image.
    pub height: u32,
    /// Output document width.
    pub canvas_width: u32,
    /// Output document height.
    pub canvas_height: u32,
}

impl ViewportResult {
    /// Whether the content overflows the canvas and must be nested inside an
    /// outer document of `canvas_width × canvas_height` to be clipped.
    pub fn needs_wrapper(&self) -> bool {
        self.x != 0
            || self.y != 0
            || self.width != self.canvas_width
            || self.height != self.canvas_height
    }

    /// Attributes for the content element, formatted for writing.
    ///
    /// `x` and `y` are only included when non-zero.
    pub fn root_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("viewBox", self.viewbox.to_string()),
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
        ];
        if self.x != 0 {
            attrs.push(("x", self.x.to_string()));
        }
        if self.y != 0 {
            attrs.push(("y", self.y.to_string()));
        }
        attrs
    }
}

/// Map `plan` onto a vector source's coordinate system.
///
/// A declared viewBox is kept verbatim; without one, a viewBox is
/// synthesized from the intrinsic `source_width`/`source_height`. With
/// neither the image cannot be resized this way and
/// [`ResizeError::NoIntrinsicSize`] is returned.
pub fn adjust(
    plan: &ResizePlan,
    source_viewbox: Option<ViewBox>,
    source_width: Option<f64>,
    source_height: Option<f64>,
) -> Result<ViewportResult, ResizeError> {
    let viewbox = match source_viewbox.filter(ViewBox::has_area) {
        Some(vb) => vb,
        None => match (positive(source_width), positive(source_height)) {
            (Some(w), Some(h)) => ViewBox::new(0.0, 0.0, w, h),
            _ => return Err(ResizeError::NoIntrinsicSize),
        },
    };
    let placed = place_whole_image(plan);
    Ok(ViewportResult {
        viewbox,
        x: placed.x,
        y: placed.y,
        width: placed.width,
        height: placed.height,
        canvas_width: plan.width,
        canvas_height: plan.height,
    })
}

/// Placement of the entire original such that `plan.focus` covers
/// `plan.target`.
fn place_whole_image(plan: &ResizePlan) -> Rect {
    let focus = plan.focus;
    let target = plan.target;
    if focus.is_full(plan.original) {
        return target;
    }
    let sx = target.width as f64 / focus.width as f64;
    let sy = target.height as f64 / focus.height as f64;
    Rect::new(
        target.x.saturating_sub(round_i32(focus.x as f64 * sx)),
        target.y.saturating_sub(round_i32(focus.y as f64 * sy)),
        round_u32(plan.original.width as f64 * sx).max(1),
        round_u32(plan.original.height as f64 * sy).max(1),
    )
}

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// Sizing attributes of a vector image's root element.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VectorSource {
    pub viewbox: Option<ViewBox>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl VectorSource {
    /// Parse raw `viewBox`, `width` and `height` attribute values.
    ///
    /// Lengths are plain numbers with an optional `px` suffix. Relative units
    /// (`%`, `em`, …) carry no intrinsic size and are treated as absent.
    pub fn from_attributes(
        viewbox: Option<&str>,
        width: Option<&str>,
        height: Option<&str>,
    ) -> Result<Self, ResizeError> {
        let viewbox = match viewbox.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(parse_viewbox(s)?),
            None => None,
        };
        Ok(Self {
            viewbox,
            width: width.and_then(parse_length),
            height: height.and_then(parse_length),
        })
    }

    /// Intrinsic size to hand to the calculator, rounded to whole units.
    ///
    /// Explicit width and height win. Otherwise the viewBox size is used, with
    /// a single explicit dimension scaling the other by the viewBox aspect.
    pub fn intrinsic_size(&self) -> Option<Size> {
        let w = positive(self.width);
        let h = positive(self.height);
        let vb = self.viewbox.filter(ViewBox::has_area);
        let (w, h) = match (w, h, vb) {
            (Some(w), Some(h), _) => (w, h),
            (Some(w), None, Some(vb)) => (w, w * vb.height / vb.width),
            (None, Some(h), Some(vb)) => (h * vb.width / vb.height, h),
            (None, None, Some(vb)) => (vb.width, vb.height),
            _ => return None,
        };
        Some(Size::new(round_u32(w).max(1), round_u32(h).max(1)))
    }

    /// See [`adjust`].
    pub fn adjust(&self, plan: &ResizePlan) -> Result<ViewportResult, ResizeError> {
        adjust(plan, self.viewbox, self.width, self.height)
    }
}

/// Parse a viewBox: four numbers separated by whitespace and/or commas.
pub fn parse_viewbox(s: &str) -> Result<ViewBox, ResizeError> {
    let invalid = || ResizeError::InvalidViewBox {
        value: s.to_string(),
    };
    let values = s
        .split(|c: char| c.is_ascii_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(invalid)?;
    let [x, y, w, h] = values[..] else {
        return Err(invalid());
    };
    if w < 0.0 || h < 0.0 {
        return Err(invalid());
    }
    Ok(ViewBox::new(x, y, w, h))
}

/// Parse an absolute length: a number with an optional `px` suffix.
fn parse_length(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s).trim_end();
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::ResizeRequest;
    use crate::focus::{ImportantPart, ZoomLevel};
    use crate::mode::ResizeMode;

    fn crop_plan() -> ResizePlan {
        ResizeRequest::new(ResizeMode::Crop, 100, 50)
            .compute(Size::new(100, 100))
            .unwrap()
    }

    fn square() -> Option<ViewBox> {
        Some(ViewBox::new(0.0, 0.0, 100.0, 100.0))
    }

    // ── adjust ──────────────────────────────────────────────────────────

    #[test]
    fn declared_viewbox_is_kept() {
        let vb = ViewBox::new(-10.0, 5.5, 400.25, 400.0);
        let r = adjust(&crop_plan(), Some(vb), Some(100.0), Some(100.0)).unwrap();
        assert_eq!(r.viewbox, vb);
    }

    #[test]
    fn crop_offsets_follow_plan_target() {
        let r = adjust(&crop_plan(), square(), None, None).unwrap();
        assert_eq!((r.x, r.y, r.width, r.height), (0, -25, 100, 100));
        assert_eq!((r.canvas_width, r.canvas_height), (100, 50));
        assert!(r.needs_wrapper());
    }

    #[test]
    fn contain_needs_no_wrapper() {
        let plan = ResizeRequest::new(ResizeMode::Box, 100, 10)
            .compute(Size::new(100, 50))
            .unwrap();
        let r = adjust(&plan, Some(ViewBox::new(0.0, 0.0, 100.0, 50.0)), None, None).unwrap();
        assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 20, 10));
        assert!(!r.needs_wrapper());
    }

    #[test]
    fn viewbox_synthesized_from_size() {
        let r = adjust(&crop_plan(), None, Some(99.6), Some(100.0)).unwrap();
        assert_eq!(r.viewbox, ViewBox::new(0.0, 0.0, 99.6, 100.0));
    }

    #[test]
    fn empty_viewbox_counts_as_absent() {
        let r = adjust(
            &crop_plan(),
            Some(ViewBox::new(0.0, 0.0, 0.0, 10.0)),
            Some(20.0),
            Some(10.0),
        )
        .unwrap();
        assert_eq!(r.viewbox, ViewBox::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn no_intrinsic_size() {
        let plan = crop_plan();
        assert_eq!(adjust(&plan, None, None, None), Err(ResizeError::NoIntrinsicSize));
        assert_eq!(
            adjust(&plan, None, Some(10.0), None),
            Err(ResizeError::NoIntrinsicSize)
        );
        assert_eq!(
            adjust(&plan, None, Some(0.0), Some(10.0)),
            Err(ResizeError::NoIntrinsicSize)
        );
    }

    // ── focal crop ──────────────────────────────────────────────────────

    #[test]
    fn zoomed_part_shifts_whole_image() {
        // Focus (20,20,60,60) lands on target (0,0,60,60) at scale 1.
        let plan = ResizeRequest::original_size(ResizeMode::Crop)
            .important_part(ImportantPart::new(20.0, 20.0, 60.0, 60.0))
            .zoom(ZoomLevel::MAX)
            .compute(Size::new(100, 100))
            .unwrap();
        let r = adjust(&plan, square(), None, None).unwrap();
        assert_eq!(r.viewbox, ViewBox::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!((r.x, r.y, r.width, r.height), (-20, -20, 100, 100));
        assert_eq!((r.canvas_width, r.canvas_height), (60, 60));
        assert!(r.needs_wrapper());
    }

    #[test]
    fn zoomed_part_scales_whole_image() {
        // Right half of 200×100 covering 50×50: scale 0.5.
        let plan = ResizeRequest::new(ResizeMode::Crop, 50, 50)
            .important_part(ImportantPart::new(50.0, 0.0, 50.0, 100.0))
            .zoom(ZoomLevel::MAX)
            .compute(Size::new(200, 100))
            .unwrap();
        assert_eq!(plan.focus, Rect::new(100, 0, 100, 100));
        assert_eq!(plan.target, Rect::new(0, 0, 50, 50));

        let r = adjust(&plan, Some(ViewBox::new(0.0, 0.0, 200.0, 100.0)), None, None).unwrap();
        assert_eq!((r.x, r.y, r.width, r.height), (-50, 0, 100, 50));
        assert_eq!((r.canvas_width, r.canvas_height), (50, 50));
    }

    // ── root attributes ─────────────────────────────────────────────────

    #[test]
    fn root_attributes_skip_zero_offsets() {
        let r = adjust(&crop_plan(), square(), None, None).unwrap();
        assert_eq!(
            r.root_attributes(),
            vec![
                ("viewBox", "0 0 100 100".to_string()),
                ("width", "100".to_string()),
                ("height", "100".to_string()),
                ("y", "-25".to_string()),
            ]
        );
    }

    #[test]
    fn fractional_viewbox_is_written_back_unchanged() {
        let s = VectorSource::from_attributes(Some("0 0 100.5 50.25"), None, None).unwrap();
        assert_eq!(s.intrinsic_size(), Some(Size::new(101, 50)));
        let plan = ResizeRequest::new(ResizeMode::Box, 50, 50)
            .compute(s.intrinsic_size().unwrap())
            .unwrap();
        let r = s.adjust(&plan).unwrap();
        assert_eq!(r.root_attributes()[0], ("viewBox", "0 0 100.5 50.25".to_string()));
    }

    // ── parsing ─────────────────────────────────────────────────────────

    #[test]
    fn parse_viewbox_separators() {
        let vb = ViewBox::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(parse_viewbox("0 0 200 100").unwrap(), vb);
        assert_eq!(parse_viewbox("0,0,200,100").unwrap(), vb);
        assert_eq!(
            parse_viewbox(" -5, 10  20.4 ,30.5 ").unwrap(),
            ViewBox::new(-5.0, 10.0, 20.4, 30.5)
        );
    }

    #[test]
    fn viewbox_from_whole_units() {
        let vb = ViewBox::from(Rect::new(-5, 10, 20, 30));
        assert_eq!(vb, ViewBox::new(-5.0, 10.0, 20.0, 30.0));
        assert_eq!(vb.to_string(), "-5 10 20 30");
        assert!(!ViewBox::new(0.0, 0.0, f64::INFINITY, 1.0).has_area());
    }

    #[test]
    fn parse_viewbox_rejects_malformed() {
        for bad in ["0 0 100", "0 0 100 100 5", "a b c d", "0 0 -1 10", "0 0 inf 10"] {
            assert!(
                matches!(parse_viewbox(bad), Err(ResizeError::InvalidViewBox { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn lengths_accept_px_only() {
        let s = VectorSource::from_attributes(None, Some("120px"), Some(" 80 ")).unwrap();
        assert_eq!((s.width, s.height), (Some(120.0), Some(80.0)));
        let s = VectorSource::from_attributes(None, Some("100%"), Some("2em")).unwrap();
        assert_eq!((s.width, s.height), (None, None));
    }

    #[test]
    fn intrinsic_size_prefers_explicit_dimensions() {
        let s = VectorSource::from_attributes(Some("0 0 10 10"), Some("300"), Some("150")).unwrap();
        assert_eq!(s.intrinsic_size(), Some(Size::new(300, 150)));
    }

    #[test]
    fn intrinsic_size_scales_single_dimension_by_viewbox() {
        let s = VectorSource::from_attributes(Some("0 0 200 100"), Some("50"), None).unwrap();
        assert_eq!(s.intrinsic_size(), Some(Size::new(50, 25)));
        let s = VectorSource::from_attributes(Some("0 0 200 100"), None, Some("50")).unwrap();
        assert_eq!(s.intrinsic_size(), Some(Size::new(100, 50)));
    }

    #[test]
    fn intrinsic_size_missing() {
        let s = VectorSource::from_attributes(None, Some("50%"), Some("10")).unwrap();
        assert_eq!(s.intrinsic_size(), None);
        assert_eq!(
            s.adjust(&crop_plan()),
            Err(ResizeError::NoIntrinsicSize)
        );
    }
}
