//! Seat Layout - table and seat geometry for seating charts
//!
//! This library computes where the seats around a table go, walks a table
//! through an interactive preview/placement session, and renders venues to SVG.
//!
//! # Example
//!
//! ```rust
//! use seat_layout::render;
//!
//! let svg = render(r#"
//! [[table]]
//! shape = "round"
//! seats = 4
//! width = 80
//! "#).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod error;
pub mod layout;
pub mod renderer;
pub mod session;
pub mod stylesheet;
pub mod venue;

pub use error::DocumentError;
pub use layout::{
    compute_seat_positions, LayoutConfig, LayoutError, LintWarning, PlacedTable, Placement, Point,
    Seat, TableLayout, TableShape, TableSpec,
};
pub use renderer::{render_table_svg, render_venue_svg, SvgConfig};
pub use session::{PlacementSession, SessionError, SessionState};
pub use stylesheet::Stylesheet;
pub use venue::VenueDocument;

use thiserror::Error;

/// Why a venue or a single table could not be rendered
#[derive(Debug, Error)]
pub enum RenderError {
    /// The venue file is malformed or one of its tables is invalid
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A table spec failed validation
    #[error("invalid table: {0}")]
    Layout(#[from] LayoutError),
}

/// Everything the `render*` functions need besides the source text
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Seat clearance, seat limit and table spacing
    pub layout: LayoutConfig,
    pub svg: SvgConfig,
    /// Palette and per-category seat colours
    pub stylesheet: Stylesheet,
    /// Debug mode: outline table footprints and log the computed layout
    pub debug: bool,
    /// Run the seating lint after layout
    pub lint: bool,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_svg(mut self, svg: SvgConfig) -> Self {
        self.svg = svg;
        self
    }

    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Outline table footprints and log the computed layout at debug level
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Collect crowding, clearance and overlap warnings
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

/// Render a TOML venue document to SVG with default configuration
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render a TOML venue document to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use seat_layout::{render_with_config, LayoutConfig, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_layout(LayoutConfig::default().with_seat_radius(16.0))
///     .with_svg(SvgConfig::default().with_padding(50.0));
///
/// let svg = render_with_config(r#"
/// [[table]]
/// shape = "square"
/// seats = 8
/// width = 100
/// "#, config).unwrap();
/// assert!(svg.contains("sl-table-square"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    render_with_lint(source, config).map(|(svg, _)| svg)
}

/// Render a venue and return the lint findings alongside the SVG
///
/// Warnings are only computed when `config.lint` is set.
pub fn render_with_lint(
    source: &str,
    config: RenderConfig,
) -> Result<(String, Vec<LintWarning>), RenderError> {
    let venue = VenueDocument::from_str(source, &config.layout)?;

    if config.debug {
        tracing::debug!(
            name = venue.name.as_deref().unwrap_or("<unnamed>"),
            tables = venue.tables.len(),
            seats = venue.seat_count(),
            "venue layout"
        );
        for (i, table) in venue.tables.iter().enumerate() {
            let b = table.bounds(config.layout.seat_draw_radius);
            tracing::debug!(
                "[{}] {} x={:.1} y={:.1} w={:.1} h={:.1}",
                table.layout.spec.label.as_deref().unwrap_or("<anon>"),
                i + 1,
                b.x,
                b.y,
                b.width,
                b.height
            );
            for seat in &table.seats {
                tracing::debug!(
                    "  {} ({:.1}, {:.1})",
                    seat.label,
                    seat.position.x,
                    seat.position.y
                );
            }
        }
    }

    let warnings = if config.lint {
        venue.lint(&config.layout)
    } else {
        Vec::new()
    };
    let svg_config = config.svg.clone().with_debug_bounds(config.debug);
    let svg = render_venue_svg(&venue, &config.layout, &svg_config, &config.stylesheet);
    Ok((svg, warnings))
}

/// Lay out a single table and render it in its local coordinates
///
/// # Example
///
/// ```rust
/// use seat_layout::{render_table, RenderConfig, TableShape, TableSpec};
///
/// let spec = TableSpec::new(TableShape::SemiCircle, 3, 100.0, 50.0);
/// let svg = render_table(&spec, &RenderConfig::default()).unwrap();
/// assert_eq!(svg.matches(r#"class="sl-seat""#).count(), 3);
/// ```
pub fn render_table(spec: &TableSpec, config: &RenderConfig) -> Result<String, RenderError> {
    let layout = TableLayout::compute(spec, &config.layout)?;
    Ok(render_table_svg(
        &layout,
        &config.layout,
        &config.svg,
        &config.stylesheet,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_table() {
        let svg = render(
            r#"
[[table]]
shape = "round"
seats = 4
width = 80
label = "Head"
"#,
        )
        .unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains(r#"id="table-head""#));
        assert!(svg.contains("Head"));
    }

    #[test]
    fn test_render_multiple_tables() {
        let svg = render(
            r#"
[[table]]
shape = "round"
seats = 4
width = 80

[[table]]
shape = "triangle"
seats = 6
width = 90
height = 78
"#,
        )
        .unwrap();
        assert!(svg.contains(r#"id="table-1""#));
        assert!(svg.contains(r#"id="table-2""#));
        assert!(svg.contains("<polygon"));
    }

    #[test]
    fn test_render_error_is_document_error() {
        let err = render("[[table]]\nshape = \"oval\"\nseats = 4\nwidth = 80\n").unwrap_err();
        assert!(matches!(err, RenderError::Document(_)));
        assert!(err.to_string().contains("unknown table shape 'oval'"));
    }

    #[test]
    fn test_render_table_rejects_zero_seats() {
        let spec = TableSpec::new(TableShape::Round, 0, 80.0, 80.0);
        let err = render_table(&spec, &RenderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Layout(LayoutError::InvalidSeatCount { count: 0, .. })
        ));
    }

    #[test]
    fn test_debug_draws_bounds() {
        let source = "[[table]]\nshape = \"square\"\nseats = 4\nwidth = 80\n";
        let svg = render_with_config(source, RenderConfig::new().with_debug(true)).unwrap();
        assert!(svg.contains("sl-debug-bounds"));
    }

    #[test]
    fn test_render_with_lint_reports_overlap() {
        let (_, warnings) = render_with_lint(
            r#"
[[table]]
shape = "round"
seats = 4
width = 80
x = 100
y = 100

[[table]]
shape = "round"
seats = 4
width = 80
x = 120
y = 100
"#,
            RenderConfig::new().with_lint(true),
        )
        .unwrap();
        assert!(warnings
            .iter()
            .any(|w| w.category == layout::LintCategory::Overlap));
    }
}
