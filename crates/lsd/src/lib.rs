//! LSD - Level Scheme Drawer
//!
//! This library reads nuclear level schemes written as one transition per
//! line, lays them out so that close levels stay readable and arrows do not
//! overlap, and renders them to SVG.

pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use lsd_core::{color, geometry, scheme, style};

pub use error::LsdError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use layout::SchemeLayout;
use scheme::LevelScheme;

/// Builder for parsing and rendering level schemes.
///
/// # Examples
///
/// ```rust
/// use lsd::{SchemeBuilder, config::AppConfig};
///
/// let source = "1332.5,2,1 > 1332.5 > 0,0,1";
///
/// let builder = SchemeBuilder::new(AppConfig::default());
///
/// // Parse source to the level scheme
/// let scheme = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render the scheme to SVG
/// let svg = builder.render_svg(&scheme)
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
///
/// // Or use default config
/// let builder = SchemeBuilder::default();
/// ```
#[derive(Default)]
pub struct SchemeBuilder {
    config: AppConfig,
}

impl SchemeBuilder {
    /// Create a new scheme builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse source text into a level scheme.
    ///
    /// # Errors
    ///
    /// Returns [`LsdError::Parse`] with every diagnostic found in the source.
    pub fn parse(&self, source: &str) -> Result<LevelScheme, LsdError> {
        info!("Parsing level scheme");
        let scheme =
            lsd_parser::parse(source).map_err(|err| LsdError::new_parse_error(err, source))?;
        debug!(
            levels = scheme.levels().len(),
            transitions = scheme.transitions().len();
            "Scheme parsed successfully"
        );
        trace!(scheme:?; "Parsed scheme");
        Ok(scheme)
    }

    /// Compute the positions of every level and transition.
    ///
    /// # Errors
    ///
    /// Returns [`LsdError::Config`] for invalid layout settings and
    /// [`LsdError::Layout`] when the scheme cannot be laid out.
    pub fn layout(&self, scheme: &LevelScheme) -> Result<SchemeLayout, LsdError> {
        self.config.layout().validate().map_err(LsdError::Config)?;
        let layout = SchemeLayout::compute(scheme, self.config.layout(), self.config.style())?;
        info!(
            levels = layout.levels().len(),
            transitions = layout.transitions().len();
            "Layout calculated"
        );
        Ok(layout)
    }

    /// Render a level scheme to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`LsdError`] for layout or rendering errors.
    pub fn render_svg(&self, scheme: &LevelScheme) -> Result<String, LsdError> {
        let layout = self.layout(scheme)?;

        let mut exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let svg = exporter.export_scheme_layout(&layout)?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
