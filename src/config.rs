//! Stored resize presets.
//!
//! A [`ResizeConfig`] is what an application keeps in its settings or
//! database for a named image size. It deserializes from any serde format:
//!
//! ```toml
//! width = 800
//! height = 600
//! mode = "left_top"
//! zoom = 50
//!
//! [important_part]
//! x = 10.0
//! y = 20.0
//! width = 50.0
//! height = 40.0
//! ```
//!
//! Unknown keys, unknown modes and zoom levels above 100 are rejected.
//! Important-part values are clamped into range like everywhere else.

use serde::{Deserialize, Serialize};

use crate::cache_key::CacheKey;
use crate::calculator::{ResizePlan, ResizeRequest};
use crate::error::ResizeError;
use crate::focus::{ImportantPart, ZoomLevel};
use crate::geometry::Size;
use crate::mode::ResizeMode;

/// A stored resize preset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub mode: ResizeMode,
    pub zoom: ZoomLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important_part: Option<ImportantPart>,
}

impl ResizeConfig {
    /// The request this preset describes.
    pub fn to_request(&self) -> ResizeRequest {
        ResizeRequest {
            mode: self.mode,
            width: self.width,
            height: self.height,
            zoom: self.zoom,
            important_part: self.important_part,
        }
    }

    /// Compute the plan for an original of the given size.
    pub fn compute(&self, original: Size) -> Result<ResizePlan, ResizeError> {
        self.to_request().compute(original)
    }

    /// Cache key for this preset applied to `identity` at `mtime`.
    pub fn cache_key(&self, identity: &str, mtime: u64, target_override: Option<&str>) -> CacheKey {
        self.to_request().cache_key(identity, mtime, target_override)
    }
}

impl From<ResizeRequest> for ResizeConfig {
    fn from(r: ResizeRequest) -> Self {
        Self {
            width: r.width,
            height: r.height,
            mode: r.mode,
            zoom: r.zoom,
            important_part: r.important_part,
        }
    }
}
