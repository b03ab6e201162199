//! Configuration types for level scheme layout and rendering.
//!
//! All types implement [`serde::Deserialize`]; every field is optional and
//! falls back to its [`Default`] value.
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Level spacing, lanes and transition routing.
//! - [`StyleConfig`] - Level shape, colors, widths and canvas size.
//!
//! # Example
//!
//! ```
//! # use lsd::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().spacing(), Some(100.0));
//! assert_eq!(config.layout().lanes().len(), 10);
//! assert!(config.style().level_color().is_ok());
//! ```

use serde::Deserialize;

use lsd_core::{color::Color, stroke::StrokeStyle, style::LevelStyle};

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the layout configuration for in-place overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the style configuration for in-place overrides.
    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }
}

/// Order in which transitions claim lanes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionOrder {
    /// Ascending parent level energy
    #[default]
    ParentEnergy,
    /// Order of the input file
    Input,
}

/// Level spacing and transition routing settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum visual distance between two levels, in energy units.
    spacing: f32,

    /// Whether close levels are spread apart at all.
    normalize: bool,

    /// Explicit lane positions; overrides the evenly spaced lanes below.
    lanes: Option<Vec<f32>>,

    lane_start: f32,
    lane_end: f32,
    lane_count: usize,

    transition_order: TransitionOrder,

    /// Search for free lanes; when disabled lanes are dealt out in turn.
    auto_route: bool,

    /// Keep levels at their true energy and stretch their kinks instead.
    proportional: bool,

    /// Widen arrows by their branching ratio.
    branching_widths: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 100.0,
            normalize: true,
            lanes: None,
            lane_start: 0.2,
            lane_end: 0.8,
            lane_count: 10,
            transition_order: TransitionOrder::default(),
            auto_route: true,
            proportional: false,
            branching_widths: false,
        }
    }
}

impl LayoutConfig {
    /// Returns the spacing threshold, or `None` when normalization is off.
    pub fn spacing(&self) -> Option<f32> {
        self.normalize.then_some(self.spacing)
    }

    /// Returns the lane x positions, in relative units.
    ///
    /// Without an explicit list, `lane_count` points are spread evenly over
    /// `[lane_start, lane_end]`, both ends included.
    ///
    /// ```
    /// # use lsd::config::LayoutConfig;
    /// let lanes = LayoutConfig::default().lanes();
    /// assert_eq!(lanes.first(), Some(&0.2));
    /// assert_eq!(lanes.last(), Some(&0.8));
    /// ```
    pub fn lanes(&self) -> Vec<f32> {
        if let Some(lanes) = &self.lanes {
            return lanes.clone();
        }

        match self.lane_count {
            0 => Vec::new(),
            1 => vec![self.lane_start],
            count => {
                let step = (self.lane_end - self.lane_start) / (count - 1) as f32;
                (0..count)
                    .map(|index| {
                        if index == count - 1 {
                            self.lane_end
                        } else {
                            self.lane_start + step * index as f32
                        }
                    })
                    .collect()
            }
        }
    }

    pub fn transition_order(&self) -> TransitionOrder {
        self.transition_order
    }

    pub fn auto_route(&self) -> bool {
        self.auto_route
    }

    pub fn proportional(&self) -> bool {
        self.proportional
    }

    pub fn branching_widths(&self) -> bool {
        self.branching_widths
    }

    /// Checks values that serde cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.normalize && !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(format!(
                "layout.spacing must be a positive number, got {}",
                self.spacing
            ));
        }
        Ok(())
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
    }

    pub fn set_normalize(&mut self, normalize: bool) {
        self.normalize = normalize;
    }

    pub fn set_lanes(&mut self, lanes: Vec<f32>) {
        self.lanes = Some(lanes);
    }

    pub fn set_transition_order(&mut self, order: TransitionOrder) {
        self.transition_order = order;
    }

    pub fn set_auto_route(&mut self, auto_route: bool) {
        self.auto_route = auto_route;
    }

    pub fn set_proportional(&mut self, proportional: bool) {
        self.proportional = proportional;
    }

    pub fn set_branching_widths(&mut self, branching_widths: bool) {
        self.branching_widths = branching_widths;
    }
}

/// Visual styling of levels, arrows and the canvas.
///
/// Colors are kept as strings and parsed on access so a bad value is
/// reported when the scheme is drawn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    level_style: LevelStyle,

    /// Center of the level bars, in relative units.
    level_x: f32,

    /// Full width of the level bars, in relative units.
    level_width: f32,

    /// Height of the level kinks, in energy units.
    level_height: f32,

    level_color: String,
    level_line_width: f32,

    arrow_color: String,
    arrow_width: f32,

    /// `solid`, `dashed`, `dotted` or an SVG dash pattern such as `"6,2"`.
    arrow_line_style: String,

    background_color: Option<String>,

    /// Canvas width in pixels.
    width: f32,

    /// Canvas height in pixels.
    height: f32,

    font_family: String,
    font_size: f32,

    /// Write the gamma energy next to each arrow.
    show_gamma: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            level_style: LevelStyle::default(),
            level_x: 0.5,
            level_width: 1.0,
            level_height: 10.0,
            level_color: "black".to_string(),
            level_line_width: 2.0,
            arrow_color: "black".to_string(),
            arrow_width: 1.5,
            arrow_line_style: "solid".to_string(),
            background_color: None,
            width: 800.0,
            height: 600.0,
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            show_gamma: false,
        }
    }
}

impl StyleConfig {
    pub fn level_style(&self) -> LevelStyle {
        self.level_style
    }

    pub fn level_x(&self) -> f32 {
        self.level_x
    }

    pub fn level_width(&self) -> f32 {
        self.level_width
    }

    pub fn level_height(&self) -> f32 {
        self.level_height
    }

    pub fn level_line_width(&self) -> f32 {
        self.level_line_width
    }

    pub fn arrow_width(&self) -> f32 {
        self.arrow_width
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn show_gamma(&self) -> bool {
        self.show_gamma
    }

    /// Returns the parsed level [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn level_color(&self) -> Result<Color, String> {
        Color::new(&self.level_color)
            .map_err(|err| format!("Invalid level color in config: {err}"))
    }

    /// Returns the parsed arrow [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn arrow_color(&self) -> Result<Color, String> {
        Color::new(&self.arrow_color)
            .map_err(|err| format!("Invalid arrow color in config: {err}"))
    }

    /// Returns the parsed arrow line pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty.
    pub fn arrow_line_style(&self) -> Result<StrokeStyle, String> {
        self.arrow_line_style
            .parse()
            .map_err(|err| format!("Invalid arrow line style in config: {err}"))
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn set_level_style(&mut self, style: LevelStyle) {
        self.level_style = style;
    }

    pub fn set_show_gamma(&mut self, show_gamma: bool) {
        self.show_gamma = show_gamma;
    }
}
