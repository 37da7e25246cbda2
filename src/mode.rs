//! Resize modes and how they map onto fit strategies.

use core::fmt;
use core::str::FromStr;

use crate::error::ResizeError;
use crate::geometry::round_i32;

/// How to fit the focal rectangle into the requested box.
///
/// `Proportional` and `Box` keep their historical names: `Proportional`
/// picks the *larger* per-axis scale (cover, without cropping) and `Box` the
/// *smaller* one (contain).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResizeMode {
    /// Cover the box exactly, cropping overflow around the center.
    #[default]
    Crop,
    /// Cover scale without cropping; may exceed the box on one axis.
    Proportional,
    /// Contain scale; never exceeds the box.
    Box,
    LeftTop,
    CenterTop,
    RightTop,
    LeftCenter,
    CenterCenter,
    RightCenter,
    LeftBottom,
    CenterBottom,
    RightBottom,
}

/// Horizontal anchor for cover crops.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HAnchor {
    Left,
    Center,
    Right,
}

/// Vertical anchor for cover crops.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VAnchor {
    Top,
    Center,
    Bottom,
}

/// Scale selection and placement derived from a [`ResizeMode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fit {
    /// Larger per-axis scale, output is the target box, overflow anchored.
    Cover { h: HAnchor, v: VAnchor },
    /// Larger per-axis scale, output is the whole scaled rectangle.
    Expand,
    /// Smaller per-axis scale, output is the whole scaled rectangle.
    Contain,
}

impl ResizeMode {
    /// Every mode, in tag order.
    pub const ALL: [Self; 12] = [
        Self::Crop,
        Self::Proportional,
        Self::Box,
        Self::LeftTop,
        Self::CenterTop,
        Self::RightTop,
        Self::LeftCenter,
        Self::CenterCenter,
        Self::RightCenter,
        Self::LeftBottom,
        Self::CenterBottom,
        Self::RightBottom,
    ];

    /// Build the anchored cover mode for a pair of anchors.
    pub const fn anchored(h: HAnchor, v: VAnchor) -> Self {
        use HAnchor as H;
        use VAnchor as V;
        match (h, v) {
            (H::Left, V::Top) => Self::LeftTop,
            (H::Center, V::Top) => Self::CenterTop,
            (H::Right, V::Top) => Self::RightTop,
            (H::Left, V::Center) => Self::LeftCenter,
            (H::Center, V::Center) => Self::CenterCenter,
            (H::Right, V::Center) => Self::RightCenter,
            (H::Left, V::Bottom) => Self::LeftBottom,
            (H::Center, V::Bottom) => Self::CenterBottom,
            (H::Right, V::Bottom) => Self::RightBottom,
        }
    }

    /// Fit strategy for this mode. Plain `Crop` is centered on both axes.
    pub const fn fit(self) -> Fit {
        use HAnchor as H;
        use VAnchor as V;
        let (h, v) = match self {
            Self::Proportional => return Fit::Expand,
            Self::Box => return Fit::Contain,
            Self::Crop | Self::CenterCenter => (H::Center, V::Center),
            Self::LeftTop => (H::Left, V::Top),
            Self::CenterTop => (H::Center, V::Top),
            Self::RightTop => (H::Right, V::Top),
            Self::LeftCenter => (H::Left, V::Center),
            Self::RightCenter => (H::Right, V::Center),
            Self::LeftBottom => (H::Left, V::Bottom),
            Self::CenterBottom => (H::Center, V::Bottom),
            Self::RightBottom => (H::Right, V::Bottom),
        };
        Fit::Cover { h, v }
    }

    /// Whether the output is exactly the requested box.
    pub const fn crops(self) -> bool {
        matches!(self.fit(), Fit::Cover { .. })
    }

    /// Stable tag used in configuration and cache keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crop => "crop",
            Self::Proportional => "proportional",
            Self::Box => "box",
            Self::LeftTop => "left_top",
            Self::CenterTop => "center_top",
            Self::RightTop => "right_top",
            Self::LeftCenter => "left_center",
            Self::CenterCenter => "center_center",
            Self::RightCenter => "right_center",
            Self::LeftBottom => "left_bottom",
            Self::CenterBottom => "center_bottom",
            Self::RightBottom => "right_bottom",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeMode {
    type Err = ResizeError;

    /// Case-insensitive; `-` is accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == tag)
            .ok_or_else(|| ResizeError::UnknownMode {
                value: s.to_string(),
            })
    }
}

impl HAnchor {
    /// Offset along the axis for content of size `content` in a box of
    /// size `space`. Negative when the content overflows.
    pub(crate) fn offset(self, space: u32, content: u32) -> i32 {
        let edge = match self {
            Self::Left => Edge::Near,
            Self::Center => Edge::Middle,
            Self::Right => Edge::Far,
        };
        edge.offset(space, content)
    }
}

impl VAnchor {
    /// See [`HAnchor::offset`].
    pub(crate) fn offset(self, space: u32, content: u32) -> i32 {
        let edge = match self {
            Self::Top => Edge::Near,
            Self::Center => Edge::Middle,
            Self::Bottom => Edge::Far,
        };
        edge.offset(space, content)
    }
}

#[derive(Copy, Clone)]
enum Edge {
    Near,
    Middle,
    Far,
}

impl Edge {
    fn offset(self, space: u32, content: u32) -> i32 {
        let free = space as f64 - content as f64;
        match self {
            Self::Near => 0,
            Self::Middle => round_i32(free / 2.0),
            Self::Far => round_i32(free),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_is_default_and_centered() {
        assert_eq!(ResizeMode::default(), ResizeMode::Crop);
        assert_eq!(ResizeMode::Crop.fit(), ResizeMode::CenterCenter.fit());
    }

    #[test]
    fn proportional_and_box_do_not_crop() {
        assert_eq!(ResizeMode::Proportional.fit(), Fit::Expand);
        assert_eq!(ResizeMode::Box.fit(), Fit::Contain);
        assert!(!ResizeMode::Box.crops());
        assert!(ResizeMode::RightBottom.crops());
    }

    #[test]
    fn anchored_matches_fit() {
        for h in [HAnchor::Left, HAnchor::Center, HAnchor::Right] {
            for v in [VAnchor::Top, VAnchor::Center, VAnchor::Bottom] {
                assert_eq!(ResizeMode::anchored(h, v).fit(), Fit::Cover { h, v });
            }
        }
    }

    #[test]
    fn tags_parse_back() {
        for mode in ResizeMode::ALL {
            assert_eq!(mode.as_str().parse::<ResizeMode>().unwrap(), mode);
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_dashes() {
        assert_eq!(" Left-Top ".parse::<ResizeMode>().unwrap(), ResizeMode::LeftTop);
        assert_eq!("BOX".parse::<ResizeMode>().unwrap(), ResizeMode::Box);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(
            "stretch".parse::<ResizeMode>(),
            Err(ResizeError::UnknownMode {
                value: "stretch".into()
            })
        );
    }

    #[test]
    fn anchor_offsets() {
        // 100px content in a 50px box
        assert_eq!(HAnchor::Left.offset(50, 100), 0);
        assert_eq!(HAnchor::Center.offset(50, 100), -25);
        assert_eq!(HAnchor::Right.offset(50, 100), -50);
        assert_eq!(VAnchor::Bottom.offset(50, 100), -50);
        // Odd overflow rounds half away from zero
        assert_eq!(VAnchor::Center.offset(50, 101), -26);
        assert_eq!(HAnchor::Center.offset(101, 50), 26);
    }

    #[test]
    fn anchor_offsets_saturate() {
        assert_eq!(HAnchor::Right.offset(0, u32::MAX), i32::MIN);
        assert_eq!(VAnchor::Bottom.offset(u32::MAX, 0), i32::MAX);
        assert_eq!(HAnchor::Center.offset(0, u32::MAX), i32::MIN);
    }
}
