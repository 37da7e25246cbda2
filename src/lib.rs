//! Deterministic resize planning for images with a focal region.
//!
//! Given an original size, a requested box, a resize mode, a zoom level and
//! an optional important part, compute where the (zoomed) focal rectangle
//! lands on the output canvas. Pure geometry: no pixel operations, no I/O.
//!
//! # Modules
//!
//! - [`geometry`]: `Size` and `Rect`, integer pixel geometry
//! - [`focus`]: important part, zoom level, focal rectangle interpolation
//! - [`mode`]: the twelve resize modes and their fit strategies
//! - [`calculator`]: `ResizeRequest` → `ResizePlan`
//! - [`cache_key`]: deterministic cache paths for rendered outputs
//! - [`viewport`]: applying a plan to vector images through their root attributes
//! - [`config`]: serde-backed resize presets (feature `serde`)
//!
//! # Example
//!
//! ```
//! use focalplan::{ImportantPart, ResizeMode, ResizeRequest, Rect, Size, ZoomLevel};
//!
//! // Square thumbnail of a landscape photo, zoomed halfway toward a face.
//! let plan = ResizeRequest::new(ResizeMode::Crop, 200, 200)
//!     .important_part(ImportantPart::new(60.0, 10.0, 20.0, 40.0))
//!     .zoom(ZoomLevel::new(50).unwrap())
//!     .compute(Size::new(1600, 900))
//!     .unwrap();
//!
//! assert_eq!(plan.canvas(), Size::new(200, 200));
//! assert!(plan.needs_crop());
//! ```

#![forbid(unsafe_code)]

pub mod cache_key;
pub mod calculator;
#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod focus;
pub mod geometry;
pub mod mode;
pub mod viewport;

pub use cache_key::{CacheKey, CacheKeyInput};
pub use calculator::{ResizePlan, ResizeRequest, compute};
#[cfg(feature = "serde")]
pub use config::ResizeConfig;
pub use error::ResizeError;
pub use focus::{ImportantPart, Region, ZoomLevel, focus_region};
pub use geometry::{Rect, Size};
pub use mode::{Fit, HAnchor, ResizeMode, VAnchor};
pub use viewport::{VectorSource, ViewBox, ViewportResult, adjust};
