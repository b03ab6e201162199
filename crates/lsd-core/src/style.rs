//! Level bar styles.
//!
//! Every level is drawn as a polyline whose shape is chosen by a
//! [`LevelStyle`]. A style computes, from the bar's center `x`, its display
//! `y`, its `width` and the height of its kinks, two things:
//!
//! - the polyline vertices ([`LevelGeometry::points`]), and
//! - where its labels go ([`LevelGeometry::labels`]).
//!
//! All coordinates are in data space (see [`crate::geometry`]): `y` grows
//! upward, so a positive `height` raises the outer segments of `IPlatform`.
//!
//! ```text
//! flat       ________
//! platform   __/----\__     (outer segments below the level)
//! iplatform  --\____/--     (outer segments above the level)
//! raised     ______/--
//! iraised    --\______
//! lowered    ------\__
//! ilowered   __/------
//! ```
//!
//! Styles whose outer segments sit *below* the level (`platform`, `lowered`,
//! `ilowered`) are scanned top-down when close levels are spread apart, see
//! [`LevelStyle::is_reversed`].

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::{geometry::Point, scheme::Level};

/// Error returned when a style name is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown level style `{0}`, valid values: {valid}", valid = LevelStyle::NAMES.join(", "))]
pub struct UnknownStyleError(pub String);

/// The closed set of level bar shapes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LevelStyle {
    #[default]
    Flat,
    Platform,
    IPlatform,
    Raised,
    IRaised,
    Lowered,
    ILowered,
}

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor and extends to the right
    Start,
    /// Text ends at the anchor
    End,
}

impl TextAnchor {
    /// Returns the SVG `text-anchor` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// What a label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelContent {
    /// Energy, then spin and parity, in one label
    NameSpinParity,
    /// Energy only
    Name,
    /// Spin and parity only
    SpinParity,
}

impl LabelContent {
    /// Renders the label text for a level.
    pub fn text(self, level: &Level) -> String {
        let name = level.name_label();
        let spin_parity = level.spin_parity_label();
        match self {
            Self::NameSpinParity if spin_parity.is_empty() => name,
            Self::NameSpinParity => format!("{name} {spin_parity}"),
            Self::Name => name,
            Self::SpinParity => spin_parity,
        }
    }
}

/// A label anchor produced by a style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    position: Point,
    anchor: TextAnchor,
    content: LabelContent,
}

impl LabelAnchor {
    fn new(position: Point, anchor: TextAnchor, content: LabelContent) -> Self {
        Self {
            position,
            anchor,
            content,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn content(&self) -> LabelContent {
        self.content
    }
}

/// The line and label anchors of one level bar.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelGeometry {
    points: Vec<Point>,
    labels: Vec<LabelAnchor>,
}

impl LevelGeometry {
    /// Polyline vertices, left to right
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn labels(&self) -> &[LabelAnchor] {
        &self.labels
    }
}

impl LevelStyle {
    /// Names accepted by [`FromStr`], in declaration order.
    pub const NAMES: [&'static str; 7] = [
        "flat",
        "platform",
        "iplatform",
        "raised",
        "iraised",
        "lowered",
        "ilowered",
    ];

    /// Returns the canonical lowercase name of this style
    pub fn name(self) -> &'static str {
        match self {
            Self::Flat => Self::NAMES[0],
            Self::Platform => Self::NAMES[1],
            Self::IPlatform => Self::NAMES[2],
            Self::Raised => Self::NAMES[3],
            Self::IRaised => Self::NAMES[4],
            Self::Lowered => Self::NAMES[5],
            Self::ILowered => Self::NAMES[6],
        }
    }

    /// Whether close levels drawn in this style are spread from the top down.
    ///
    /// True for the styles that hang their outer segments below the level.
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::Platform | Self::Lowered | Self::ILowered)
    }

    /// Computes the polyline and label anchors of a level bar.
    ///
    /// `x` is the bar's center, `width` its full width and `height` the
    /// vertical size of its kinks; `height` is ignored by [`LevelStyle::Flat`].
    pub fn geometry(self, x: f32, y: f32, width: f32, height: f32) -> LevelGeometry {
        let half = width / 2.0;
        let shift = half / 8.0;
        let left = x - half;
        let right = x + half;

        let (points, labels) = match self {
            Self::Flat => (
                vec![Point::new(left, y), Point::new(right, y)],
                vec![LabelAnchor::new(
                    Point::new(right, y),
                    TextAnchor::Start,
                    LabelContent::NameSpinParity,
                )],
            ),
            Self::Platform | Self::IPlatform => {
                let outer = if self == Self::Platform {
                    y - height
                } else {
                    y + height
                };
                (
                    vec![
                        Point::new(left, outer),
                        Point::new(left + shift, outer),
                        Point::new(left + 1.5 * shift, y),
                        Point::new(right - 1.5 * shift, y),
                        Point::new(right - shift, outer),
                        Point::new(right, outer),
                    ],
                    vec![
                        LabelAnchor::new(
                            Point::new(right, outer),
                            TextAnchor::Start,
                            LabelContent::Name,
                        ),
                        LabelAnchor::new(
                            Point::new(left, outer),
                            TextAnchor::End,
                            LabelContent::SpinParity,
                        ),
                    ],
                )
            }
            Self::Raised | Self::Lowered => {
                let outer = if self == Self::Raised {
                    y + height
                } else {
                    y - height
                };
                (
                    vec![
                        Point::new(left, y),
                        Point::new(right - 1.5 * shift, y),
                        Point::new(right - shift, outer),
                        Point::new(right, outer),
                    ],
                    vec![LabelAnchor::new(
                        Point::new(right, outer),
                        TextAnchor::Start,
                        LabelContent::NameSpinParity,
                    )],
                )
            }
            Self::IRaised | Self::ILowered => {
                let outer = if self == Self::IRaised {
                    y + height
                } else {
                    y - height
                };
                let anchor = if self == Self::IRaised {
                    TextAnchor::End
                } else {
                    TextAnchor::Start
                };
                (
                    vec![
                        Point::new(left, outer),
                        Point::new(left + shift, outer),
                        Point::new(left + 1.5 * shift, y),
                        Point::new(right, y),
                    ],
                    vec![LabelAnchor::new(
                        Point::new(left + shift, outer),
                        anchor,
                        LabelContent::NameSpinParity,
                    )],
                )
            }
        };

        LevelGeometry { points, labels }
    }
}

impl FromStr for LevelStyle {
    type Err = UnknownStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "platform" => Ok(Self::Platform),
            "iplatform" => Ok(Self::IPlatform),
            "raised" => Ok(Self::Raised),
            "iraised" => Ok(Self::IRaised),
            "lowered" => Ok(Self::Lowered),
            "ilowered" => Ok(Self::ILowered),
            _ => Err(UnknownStyleError(s.to_string())),
        }
    }
}

impl TryFrom<String> for LevelStyle {
    type Error = UnknownStyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for LevelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Platform".parse::<LevelStyle>(), Ok(LevelStyle::Platform));
        assert_eq!("ILOWERED".parse::<LevelStyle>(), Ok(LevelStyle::ILowered));

        let err = "zigzag".parse::<LevelStyle>().unwrap_err();
        assert!(err.to_string().contains("unknown level style `zigzag`"));
        assert!(err.to_string().contains("iplatform"));
    }

    #[test]
    fn test_names_round_trip() {
        for name in LevelStyle::NAMES {
            let style: LevelStyle = name.parse().unwrap();
            assert_eq!(style.name(), name);
            assert_eq!(style.to_string(), name);
        }
    }

    #[test]
    fn test_reversed_styles() {
        let reversed: Vec<_> = LevelStyle::NAMES
            .iter()
            .map(|name| name.parse::<LevelStyle>().unwrap())
            .filter(|style| style.is_reversed())
            .collect();

        assert_eq!(
            reversed,
            vec![
                LevelStyle::Platform,
                LevelStyle::Lowered,
                LevelStyle::ILowered
            ]
        );
    }

    #[test]
    fn test_flat_geometry() {
        let geometry = LevelStyle::Flat.geometry(0.5, 100.0, 0.8, 10.0);

        let points = geometry.points();
        assert_eq!(points.len(), 2);
        assert_approx_eq!(f32, points[0].x(), 0.1);
        assert_approx_eq!(f32, points[1].x(), 0.9);
        assert!(points.iter().all(|p| p.y() == 100.0));

        let labels = geometry.labels();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].anchor(), TextAnchor::Start);
        assert_approx_eq!(f32, labels[0].position().x(), 0.9);
    }

    #[test]
    fn test_platform_geometry_hangs_below() {
        let geometry = LevelStyle::Platform.geometry(0.5, 100.0, 1.0, 10.0);

        let ys: Vec<f32> = geometry.points().iter().map(|p| p.y()).collect();
        assert_eq!(ys, vec![90.0, 90.0, 100.0, 100.0, 90.0, 90.0]);

        // shift is half_width / 8
        assert_approx_eq!(f32, geometry.points()[1].x(), 0.0625);
        assert_approx_eq!(f32, geometry.points()[2].x(), 0.09375);

        let contents: Vec<_> = geometry.labels().iter().map(|l| l.content()).collect();
        assert_eq!(contents, vec![LabelContent::Name, LabelContent::SpinParity]);
    }

    #[test]
    fn test_iplatform_geometry_rises_above() {
        let geometry = LevelStyle::IPlatform.geometry(0.5, 100.0, 1.0, 10.0);
        assert_approx_eq!(f32, geometry.points()[0].y(), 110.0);
        assert_approx_eq!(f32, geometry.labels()[1].position().y(), 110.0);
    }

    #[test]
    fn test_iraised_label_is_right_aligned() {
        let geometry = LevelStyle::IRaised.geometry(0.5, 0.0, 1.0, 5.0);
        assert_eq!(geometry.points().len(), 4);
        assert_eq!(geometry.labels()[0].anchor(), TextAnchor::End);
        assert_approx_eq!(f32, geometry.labels()[0].position().y(), 5.0);
    }

    #[test]
    fn test_label_content_text() {
        let level = Level::new(1173.2).with_spin(4.0).with_parity(1.0);
        assert_eq!(LabelContent::NameSpinParity.text(&level), "1173.2 41");
        assert_eq!(LabelContent::Name.text(&level), "1173.2");
        assert_eq!(LabelContent::SpinParity.text(&level), "41");
        assert_eq!(
            LabelContent::NameSpinParity.text(&Level::new(0.0)),
            "0"
        );
    }

    #[test]
    fn test_deserialize_from_string() {
        use serde::de::{
            IntoDeserializer,
            value::{Error as ValueError, StringDeserializer},
        };

        let deserializer: StringDeserializer<ValueError> = "lowered".to_string().into_deserializer();
        assert_eq!(
            LevelStyle::deserialize(deserializer).unwrap(),
            LevelStyle::Lowered
        );

        let deserializer: StringDeserializer<ValueError> = "zigzag".to_string().into_deserializer();
        assert!(LevelStyle::deserialize(deserializer).is_err());
    }
}
