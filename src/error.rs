//! Error type shared by every planner component.
//!
//! Only a handful of inputs are fatal. Everything an editing UI can get
//! slightly wrong (an important part dragged past the edge, unset target
//! dimensions, zoom 0) is normalized instead of reported here.

use thiserror::Error;

/// Resize planning error.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResizeError {
    /// Zoom level outside `0..=100`.
    #[error("zoom level {value} is out of range (expected 0-100)")]
    InvalidZoom { value: u32 },

    /// The original or the target box has a zero side.
    #[error("degenerate box {width}x{height}: both sides must be at least 1")]
    DegenerateBox { width: u32, height: u32 },

    /// A vector source declares neither a viewBox nor a width and height.
    #[error("vector image has no viewBox and no intrinsic width/height")]
    NoIntrinsicSize,

    /// A viewBox attribute that is not four numbers.
    #[error("invalid viewBox {value:?}")]
    InvalidViewBox { value: String },

    /// A resize mode tag that names no known mode.
    #[error("unknown resize mode {value:?}")]
    UnknownMode { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let e = ResizeError::InvalidZoom { value: 101 };
        assert_eq!(e.to_string(), "zoom level 101 is out of range (expected 0-100)");

        let e = ResizeError::DegenerateBox {
            width: 0,
            height: 20,
        };
        assert!(e.to_string().contains("0x20"));

        let e = ResizeError::UnknownMode {
            value: "stretch".into(),
        };
        assert_eq!(e.to_string(), "unknown resize mode \"stretch\"");
    }
}
