//! SVG rendering of level schemes.
//!
//! [`SvgBuilder`] validates a [`StyleConfig`] once and produces an [`Svg`]
//! exporter. The exporter maps the layout's data space (relative x, energy y)
//! onto the configured canvas and draws level bars, their labels and the
//! transition arrows on separate [`RenderLayer`]s.

use indexmap::IndexMap;
use log::{debug, info, trace};
use svg::{Document, node::element as svg_element};

use lsd_core::{
    apply_stroke,
    color::Color,
    geometry::{Bounds, Insets, Point},
    layer::{LayeredOutput, RenderLayer},
    stroke::StrokeDefinition,
    style::{LevelGeometry, TextAnchor},
};

use super::{ExportError, Exporter};
use crate::{
    config::StyleConfig,
    layout::{PositionedLevel, RoutedTransition, SchemeLayout},
};

/// Horizontal data range, the unit interval with a 5% margin.
const DATA_X_RANGE: (f32, f32) = (-0.05, 1.05);

/// Fraction of the energy range added above and below the content.
const DATA_Y_MARGIN: f32 = 0.05;

/// Pixel margins around the plot area, wide on the sides for labels.
const CANVAS_MARGIN: Insets = Insets::new(20.0, 80.0, 20.0, 80.0);

/// Pixel gap between a label and its anchor point.
const LABEL_OFFSET: f32 = 4.0;

/// Builder for [`Svg`] exporters.
///
/// ```
/// # use lsd::{config::StyleConfig, export::svg::SvgBuilder};
/// let style = StyleConfig::default();
/// let exporter = SvgBuilder::new().with_style(&style).build();
/// assert!(exporter.is_ok());
/// ```
#[derive(Debug, Default)]
pub struct SvgBuilder {
    style: StyleConfig,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style the exporter draws with.
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Validates the style and builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidWidth`] for a level width outside
    /// `[0, 1]`, [`ExportError::InvalidCanvas`] when the canvas leaves no room
    /// for the plot and [`ExportError::InvalidStyle`] for any other unusable
    /// value, such as an unparsable color.
    pub fn build(self) -> Result<Svg, ExportError> {
        let style = self.style;

        let level_width = style.level_width();
        if !(0.0..=1.0).contains(&level_width) {
            return Err(ExportError::InvalidWidth(level_width));
        }

        let (width, height) = (style.width(), style.height());
        if !(width.is_finite() && height.is_finite())
            || width <= CANVAS_MARGIN.horizontal_sum()
            || height <= CANVAS_MARGIN.vertical_sum()
        {
            return Err(ExportError::InvalidCanvas { width, height });
        }

        for (field, value) in [
            ("level_x", style.level_x()),
            ("level_height", style.level_height()),
        ] {
            if !value.is_finite() {
                return Err(invalid_style(field, format!("{value} is not a finite number")));
            }
        }
        for (field, value) in [
            ("level_line_width", style.level_line_width()),
            ("arrow_width", style.arrow_width()),
            ("font_size", style.font_size()),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid_style(field, format!("{value} is not a positive number")));
            }
        }

        let level_color = style
            .level_color()
            .map_err(|message| invalid_style("level_color", message))?;
        let arrow_color = style
            .arrow_color()
            .map_err(|message| invalid_style("arrow_color", message))?;
        let background = style
            .background_color()
            .map_err(|message| invalid_style("background_color", message))?;
        let arrow_line_style = style
            .arrow_line_style()
            .map_err(|message| invalid_style("arrow_line_style", message))?;

        let mut arrow_stroke = StrokeDefinition::new(arrow_color, style.arrow_width());
        arrow_stroke.set_style(arrow_line_style);

        debug!(style:? = style; "SVG exporter ready");

        Ok(Svg {
            level_stroke: StrokeDefinition::new(level_color, style.level_line_width()),
            arrow_stroke,
            background,
            markers: IndexMap::new(),
            style,
        })
    }
}

fn invalid_style(field: &'static str, message: String) -> ExportError {
    ExportError::InvalidStyle { field, message }
}

/// Maps data space onto the canvas.
///
/// Data y grows upward, canvas y downward.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    data: Bounds,
    canvas: Bounds,
}

impl Viewport {
    fn new(data: Bounds, canvas: Bounds) -> Self {
        Self { data, canvas }
    }

    fn to_canvas(self, point: Point) -> Point {
        let x = self.canvas.min_x()
            + (point.x() - self.data.min_x()) / self.data.width() * self.canvas.width();
        let y = self.canvas.min_y()
            + (self.data.max_y() - point.y()) / self.data.height() * self.canvas.height();
        Point::new(x, y)
    }
}

/// SVG exporter for scheme layouts.
#[derive(Debug)]
pub struct Svg {
    style: StyleConfig,
    level_stroke: StrokeDefinition,
    arrow_stroke: StrokeDefinition,
    background: Option<Color>,
    /// Arrow-head markers by id, one per arrow color.
    markers: IndexMap<String, Color>,
}

impl Svg {
    /// Renders a layout into an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidPosition`] for a non-finite coordinate
    /// or a transition lane outside `[0, 1]`.
    pub fn render_scheme(&mut self, layout: &SchemeLayout) -> Result<Document, ExportError> {
        self.validate_positions(layout)?;
        self.markers.clear();

        let viewport = self.viewport(layout);
        let (width, height) = (self.style.width(), self.style.height());
        info!(
            levels = layout.levels().len(),
            transitions = layout.transitions().len(),
            width,
            height;
            "Rendering SVG"
        );

        let mut output = LayeredOutput::new();
        if let Some(color) = self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        for level in layout.levels() {
            output.merge(self.render_level(level, viewport));
        }
        for transition in layout.transitions() {
            output.merge(self.render_transition(transition, viewport));
        }

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if !self.markers.is_empty() {
            doc = doc.add(self.draw_marker_definitions());
        }
        for node in output.render() {
            doc = doc.add(node);
        }

        debug!(markers = self.markers.len(); "SVG document rendered");
        Ok(doc)
    }

    fn validate_positions(&self, layout: &SchemeLayout) -> Result<(), ExportError> {
        let x = self.style.level_x();
        for level in layout.levels() {
            if !(level.y().is_finite() && level.height().is_finite()) {
                return Err(ExportError::InvalidPosition { x, y: level.y() });
            }
        }

        for transition in layout.transitions() {
            let x = transition.x();
            if !(0.0..=1.0).contains(&x) {
                return Err(ExportError::InvalidPosition {
                    x,
                    y: transition.parent_y(),
                });
            }
            for y in [transition.parent_y(), transition.daughter_y()] {
                if !Point::new(x, y).is_finite() {
                    return Err(ExportError::InvalidPosition { x, y });
                }
            }
        }
        Ok(())
    }

    /// Fits the energy extent of the layout into the canvas.
    fn viewport(&self, layout: &SchemeLayout) -> Viewport {
        let level_ys = layout.levels().iter().flat_map(|level| {
            self.level_geometry(level)
                .points()
                .iter()
                .map(|point| point.y())
                .collect::<Vec<_>>()
        });
        let arrow_ys = layout
            .transitions()
            .iter()
            .flat_map(|transition| [transition.parent_y(), transition.daughter_y()]);

        let (x_min, x_max) = DATA_X_RANGE;
        let content = Bounds::from_points(
            level_ys
                .chain(arrow_ys)
                .flat_map(|y| [Point::new(x_min, y), Point::new(x_max, y)]),
        )
        .unwrap_or_else(|| {
            Bounds::new_from_corners(Point::new(x_min, 0.0), Point::new(x_max, 0.0))
        });

        let pad = if content.height() > 0.0 {
            content.height() * DATA_Y_MARGIN
        } else {
            1.0
        };
        let data = content.add_padding(Insets::new(pad, 0.0, pad, 0.0));

        let canvas = Bounds::new_from_corners(
            Point::new(CANVAS_MARGIN.left(), CANVAS_MARGIN.top()),
            Point::new(
                self.style.width() - CANVAS_MARGIN.right(),
                self.style.height() - CANVAS_MARGIN.bottom(),
            ),
        );

        trace!(data:? = data, canvas:? = canvas; "Viewport");
        Viewport::new(data, canvas)
    }

    fn level_geometry(&self, level: &PositionedLevel) -> LevelGeometry {
        self.style.level_style().geometry(
            self.style.level_x(),
            level.y(),
            self.style.level_width(),
            level.height(),
        )
    }

    fn render_level(&self, level: &PositionedLevel, viewport: Viewport) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let geometry = self.level_geometry(level);

        let points = geometry
            .points()
            .iter()
            .map(|&point| {
                let point = viewport.to_canvas(point);
                format!("{},{}", point.x(), point.y())
            })
            .collect::<Vec<_>>()
            .join(" ");
        let polyline = svg_element::Polyline::new()
            .set("points", points)
            .set("fill", "none");
        let polyline = apply_stroke!(polyline, &self.level_stroke);
        output.add_to_layer(RenderLayer::Level, Box::new(polyline));

        for label in geometry.labels() {
            let content = label.content().text(level.level());
            if content.is_empty() {
                continue;
            }
            let text = self.draw_text(
                content,
                viewport.to_canvas(label.position()),
                label.anchor(),
                self.level_stroke.color(),
            );
            output.add_to_layer(RenderLayer::Text, Box::new(text));
        }

        output
    }

    fn render_transition(
        &mut self,
        transition: &RoutedTransition,
        viewport: Viewport,
    ) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let start = viewport.to_canvas(Point::new(transition.x(), transition.parent_y()));
        let end = viewport.to_canvas(Point::new(transition.x(), transition.daughter_y()));
        let stroke = self.arrow_stroke.scaled(transition.width_scale());

        let marker_id = Self::marker_id(stroke.color());
        let line = svg_element::Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("marker-end", format!("url(#{marker_id})"));
        let line = apply_stroke!(line, &stroke);
        self.markers.insert(marker_id, stroke.color());
        output.add_to_layer(RenderLayer::Arrow, Box::new(line));

        if let Some(gamma) = transition
            .transition()
            .gamma()
            .filter(|_| self.style.show_gamma())
        {
            let middle = Point::new(start.x(), (start.y() + end.y()) / 2.0);
            let text = self.draw_text(gamma.to_string(), middle, TextAnchor::Start, stroke.color());
            output.add_to_layer(RenderLayer::Text, Box::new(text));
        }

        output
    }

    fn draw_text(
        &self,
        content: String,
        position: Point,
        anchor: TextAnchor,
        color: Color,
    ) -> svg_element::Text {
        let dx = match anchor {
            TextAnchor::Start => LABEL_OFFSET,
            TextAnchor::End => -LABEL_OFFSET,
        };
        svg_element::Text::new(content)
            .set("x", position.x())
            .set("y", position.y())
            .set("dx", dx)
            .set("text-anchor", anchor.to_svg_value())
            .set("dominant-baseline", "middle")
            .set("font-family", self.style.font_family())
            .set("font-size", self.style.font_size())
            .set("fill", color.to_string())
    }

    fn marker_id(color: Color) -> String {
        format!("arrow-right-{}", color.to_id_safe_string())
    }

    fn draw_marker_definitions(&self) -> svg_element::Definitions {
        self.markers
            .iter()
            .fold(svg_element::Definitions::new(), |defs, (id, color)| {
                defs.add(
                    svg_element::Marker::new()
                        .set("id", id.as_str())
                        .set("viewBox", "0 0 10 10")
                        .set("refX", 9)
                        .set("refY", 5)
                        .set("markerWidth", 6)
                        .set("markerHeight", 6)
                        .set("orient", "auto")
                        .add(
                            svg_element::Path::new()
                                .set("d", "M 0 0 L 10 5 L 0 10 z")
                                .set("fill", color.to_string())
                                .set("fill-opacity", color.alpha()),
                        ),
                )
            })
    }
}

impl Exporter for Svg {
    fn export_scheme_layout(&mut self, layout: &SchemeLayout) -> Result<String, ExportError> {
        let doc = self.render_scheme(layout)?;
        Ok(doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use lsd_core::scheme::{Level, LevelScheme, Transition};

    use super::*;
    use crate::config::LayoutConfig;

    fn cobalt() -> LevelScheme {
        let mut scheme = LevelScheme::new();
        let upper = scheme
            .add_level(Level::new(2505.7).with_spin(4.0).with_parity(1.0))
            .unwrap();
        let middle = scheme
            .add_level(Level::new(1332.5).with_spin(2.0).with_parity(1.0))
            .unwrap();
        let ground = scheme.add_level(Level::new(0.0)).unwrap();
        scheme.add_transition(Transition::new(upper, middle).with_gamma(1173.2));
        scheme.add_transition(Transition::new(middle, ground).with_gamma(1332.5));
        scheme
    }

    fn style(toml: &str) -> StyleConfig {
        toml::from_str(toml).unwrap()
    }

    fn render(layout_config: &LayoutConfig, style: &StyleConfig) -> Result<String, ExportError> {
        let layout = SchemeLayout::compute(&cobalt(), layout_config, style).unwrap();
        SvgBuilder::new()
            .with_style(style)
            .build()?
            .export_scheme_layout(&layout)
    }

    #[test]
    fn test_build_rejects_bad_styles() {
        assert_eq!(
            SvgBuilder::new()
                .with_style(&style("level_width = 1.5"))
                .build()
                .unwrap_err(),
            ExportError::InvalidWidth(1.5)
        );
        assert!(matches!(
            SvgBuilder::new().with_style(&style("width = 100")).build(),
            Err(ExportError::InvalidCanvas { .. })
        ));
        assert!(matches!(
            SvgBuilder::new().with_style(&style("arrow_color = \"nope\"")).build(),
            Err(ExportError::InvalidStyle {
                field: "arrow_color",
                ..
            })
        ));
        assert!(matches!(
            SvgBuilder::new().with_style(&style("font_size = 0")).build(),
            Err(ExportError::InvalidStyle {
                field: "font_size",
                ..
            })
        ));
    }

    #[test]
    fn test_viewport_flips_y() {
        let viewport = Viewport::new(
            Bounds::new_from_corners(Point::new(0.0, 0.0), Point::new(1.0, 100.0)),
            Bounds::new_from_corners(Point::new(10.0, 10.0), Point::new(110.0, 210.0)),
        );

        let top_left = viewport.to_canvas(Point::new(0.0, 100.0));
        assert_approx_eq!(f32, top_left.x(), 10.0);
        assert_approx_eq!(f32, top_left.y(), 10.0);

        let bottom_right = viewport.to_canvas(Point::new(1.0, 0.0));
        assert_approx_eq!(f32, bottom_right.x(), 110.0);
        assert_approx_eq!(f32, bottom_right.y(), 210.0);
    }

    #[test]
    fn test_render_draws_every_element() {
        let svg = render(&LayoutConfig::default(), &StyleConfig::default()).unwrap();

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<polyline").count(), 3);
        assert_eq!(svg.matches("<line").count(), 2);
        assert_eq!(svg.matches("<marker").count(), 1);
        assert!(svg.contains("marker-end=\"url(#arrow-right-"));
        assert_eq!(svg.matches("<text").count(), 3);
        assert!(svg.contains("2505.7 41"));
        assert!(!svg.contains("data-layer=\"background\""));
    }

    #[test]
    fn test_layers_are_ordered() {
        let svg = render(&LayoutConfig::default(), &style("background_color = \"white\"")).unwrap();

        let position = |layer: &str| svg.find(&format!("data-layer=\"{layer}\"")).unwrap();
        assert!(position("background") < position("level"));
        assert!(position("level") < position("arrow"));
        assert!(position("arrow") < position("text"));
    }

    #[test]
    fn test_gamma_labels() {
        let svg = render(&LayoutConfig::default(), &style("show_gamma = true")).unwrap();

        assert_eq!(svg.matches("<text").count(), 5);
        assert!(svg.contains("1173.2"));
    }

    #[test]
    fn test_dashed_arrows() {
        let svg = render(&LayoutConfig::default(), &style("arrow_line_style = \"dashed\"")).unwrap();

        assert_eq!(svg.matches("stroke-dasharray=\"5,5\"").count(), 2);
    }

    #[test]
    fn test_platform_labels_are_split() {
        let svg = render(&LayoutConfig::default(), &style("level_style = \"platform\"")).unwrap();

        // The ground state has no spin-parity label
        assert_eq!(svg.matches("<text").count(), 5);
        assert!(svg.contains("text-anchor=\"end\""));
    }

    #[test]
    fn test_lane_outside_unit_interval_is_rejected() {
        let mut config = LayoutConfig::default();
        config.set_lanes(vec![1.5]);

        assert!(matches!(
            render(&config, &StyleConfig::default()),
            Err(ExportError::InvalidPosition { x, .. }) if x == 1.5
        ));
    }
}
