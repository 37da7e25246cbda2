//! Resize plan computation.
//!
//! Turns an original size, a requested box, a [`ResizeMode`], a zoom level
//! and an optional [`ImportantPart`] into a [`ResizePlan`]. Pure geometry:
//! no pixel operations, no I/O.
//!
//! # Example
//!
//! ```
//! use focalplan::{ResizeMode, ResizeRequest, Rect, Size};
//!
//! let plan = ResizeRequest::new(ResizeMode::Crop, 100, 50)
//!     .compute(Size::new(100, 100))
//!     .unwrap();
//!
//! // 100×100 covers the 100×50 box; 25px are cropped top and bottom.
//! assert_eq!(plan.canvas(), Size::new(100, 50));
//! assert_eq!(plan.target, Rect::new(0, -25, 100, 100));
//! ```

use tracing::{debug, trace};

use crate::error::ResizeError;
use crate::focus::{ImportantPart, Region, ZoomLevel, focus_region};
use crate::geometry::{Rect, Size, round_u32};
use crate::mode::{Fit, ResizeMode};

/// Computed plan for one resize request.
///
/// To render: crop [`focus`](Self::focus) out of the original, scale it to
/// `target.width × target.height`, and draw it at `(target.x, target.y)` on a
/// `width × height` canvas. Whatever falls outside the canvas is cropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResizePlan {
    /// Original image dimensions.
    pub original: Size,
    /// Output width.
    pub width: u32,
    /// Output height.
    pub height: u32,
    /// Scaled focal rectangle relative to the canvas's top-left corner.
    /// May exceed the canvas; `x`/`y` may be negative.
    pub target: Rect,
    /// Focal rectangle in original-image pixels.
    pub focus: Rect,
}

impl ResizePlan {
    /// Plan that leaves `original` untouched.
    pub const fn identity(original: Size) -> Self {
        Self {
            original,
            width: original.width,
            height: original.height,
            target: Rect::from_size(original),
            focus: Rect::from_size(original),
        }
    }

    /// Output dimensions.
    pub const fn canvas(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the output is the original, pixel for pixel.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity(self.original)
    }

    /// Whether any part of the original is cut away.
    pub fn needs_crop(&self) -> bool {
        !self.focus.is_full(self.original) || !self.target.is_full(self.canvas())
    }

    /// Whether resampling is needed.
    pub fn needs_resize(&self) -> bool {
        self.target.size() != self.focus.size()
    }
}

/// A resize request: mode, optional target dimensions, zoom and focal part.
///
/// # Example
///
/// ```
/// use focalplan::{ImportantPart, ResizeMode, ResizeRequest, Size, ZoomLevel};
///
/// let plan = ResizeRequest::original_size(ResizeMode::Crop)
///     .important_part(ImportantPart::new(20.0, 20.0, 60.0, 60.0))
///     .zoom(ZoomLevel::MAX)
///     .compute(Size::new(100, 100))
///     .unwrap();
///
/// assert_eq!(plan.canvas(), Size::new(60, 60));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ResizeRequest {
    pub mode: ResizeMode,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub zoom: ZoomLevel,
    pub important_part: Option<ImportantPart>,
}

impl ResizeRequest {
    /// Request with both target dimensions.
    pub fn new(mode: ResizeMode, width: u32, height: u32) -> Self {
        Self {
            mode,
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Constrain only width (height derived from the original's aspect ratio).
    pub fn width_only(mode: ResizeMode, width: u32) -> Self {
        Self {
            mode,
            width: Some(width),
            ..Self::default()
        }
    }

    /// Constrain only height (width derived from the original's aspect ratio).
    pub fn height_only(mode: ResizeMode, height: u32) -> Self {
        Self {
            mode,
            height: Some(height),
            ..Self::default()
        }
    }

    /// No target dimensions: output is the focal rectangle at its own size.
    pub fn original_size(mode: ResizeMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the zoom level.
    pub fn zoom(mut self, zoom: ZoomLevel) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the important part.
    pub fn important_part(mut self, part: ImportantPart) -> Self {
        self.important_part = Some(part);
        self
    }

    /// Compute the plan for an original of the given size.
    pub fn compute(&self, original: Size) -> Result<ResizePlan, ResizeError> {
        if original.is_degenerate() {
            return Err(ResizeError::DegenerateBox {
                width: original.width,
                height: original.height,
            });
        }

        // Step 1: Focal rectangle from important part and zoom.
        let focus = focus_region(original, self.important_part.as_ref(), self.zoom);
        let full_focus = focus.is_full(original);

        // Step 2: Resolve target dimensions.
        let target = self.resolve_target(original, &focus)?;

        // Step 2b: Nothing to do.
        if full_focus && target == original {
            trace!(
                width = original.width,
                height = original.height,
                "identity resize"
            );
            return Ok(ResizePlan::identity(original));
        }

        // Step 3: Fit the focal rectangle into the target box.
        let plan = fit_focus(original, &focus, target, self.mode.fit());
        debug!(
            original_width = original.width,
            original_height = original.height,
            mode = %self.mode,
            zoom = self.zoom.value(),
            width = plan.width,
            height = plan.height,
            target = ?plan.target,
            "computed resize plan"
        );
        Ok(plan)
    }

    /// Fill in missing target dimensions.
    ///
    /// One missing side is derived from the original's aspect ratio. Both
    /// missing means the focal rectangle's own size.
    fn resolve_target(&self, original: Size, focus: &Region) -> Result<Size, ResizeError> {
        let ow = original.width as f64;
        let oh = original.height as f64;
        let size = match (self.width, self.height) {
            (Some(w), Some(h)) => Size::new(w, h),
            (Some(w), None) => Size::new(w, round_u32(w as f64 * oh / ow)),
            (None, Some(h)) => Size::new(round_u32(h as f64 * ow / oh), h),
            (None, None) => Size::new(
                round_u32(focus.width).max(1),
                round_u32(focus.height).max(1),
            ),
        };
        if size.is_degenerate() {
            return Err(ResizeError::DegenerateBox {
                width: size.width,
                height: size.height,
            });
        }
        Ok(size)
    }
}

/// Compute a resize plan from explicit arguments.
///
/// Equivalent to building a [`ResizeRequest`] and calling
/// [`compute`](ResizeRequest::compute).
pub fn compute(
    original: Size,
    target_width: Option<u32>,
    target_height: Option<u32>,
    mode: ResizeMode,
    zoom: ZoomLevel,
    important_part: Option<ImportantPart>,
) -> Result<ResizePlan, ResizeError> {
    ResizeRequest {
        mode,
        width: target_width,
        height: target_height,
        zoom,
        important_part,
    }
    .compute(original)
}

// ============================================================================
// Internal geometry
// ============================================================================

/// Per-axis scale factors taking `focus` to `target`.
fn axis_scales(focus: &Region, target: Size) -> (f64, f64) {
    (
        target.width as f64 / focus.width,
        target.height as f64 / focus.height,
    )
}

/// Scale `focus` into `target` and place it according to `fit`.
///
/// Width and height are rounded independently from the unrounded scale.
fn fit_focus(original: Size, focus: &Region, target: Size, fit: Fit) -> ResizePlan {
    let (sx, sy) = axis_scales(focus, target);
    let scale = match fit {
        Fit::Cover { .. } | Fit::Expand => sx.max(sy),
        Fit::Contain => sx.min(sy),
    };
    let sw = round_u32(focus.width * scale).max(1);
    let sh = round_u32(focus.height * scale).max(1);

    let (canvas, placed) = match fit {
        Fit::Cover { h, v } => (
            target,
            Rect::new(h.offset(target.width, sw), v.offset(target.height, sh), sw, sh),
        ),
        Fit::Expand | Fit::Contain => (Size::new(sw, sh), Rect::new(0, 0, sw, sh)),
    };

    ResizePlan {
        original,
        width: canvas.width,
        height: canvas.height,
        target: placed,
        focus: focus.to_rect(original),
    }
}
