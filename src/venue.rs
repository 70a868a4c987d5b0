//! Venue documents: a TOML list of tables placed on one canvas
//!
//! ```toml
//! [venue]
//! name = "Grand Hall"
//!
//! [[table]]
//! label = "T1"
//! shape = "round"
//! seats = 8
//! width = 120
//! x = 150
//! y = 150
//! rotation = 15
//! scale = 1.2
//! category = "vip"
//! ```
//!
//! `height` defaults to `width`. Tables without `x` are flowed left to right;
//! tables without `y` are aligned to the top of the canvas.

use std::path::Path;

use serde::Deserialize;
use toml::Spanned;

use crate::error::DocumentError;
use crate::layout::{
    lint, LayoutConfig, LayoutError, LintWarning, PlacedTable, Placement, Point, TableLayout,
    TableShape, TableSpec,
};
use crate::session::{normalize_rotation, MAX_SCALE, MIN_SCALE};

/// Gap between tables flowed automatically along the x axis
const FLOW_GAP: f64 = 40.0;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    venue: Option<RawVenue>,
    #[serde(default, rename = "table")]
    tables: Vec<RawTable>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVenue {
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    shape: Spanned<String>,
    seats: Spanned<i64>,
    width: Spanned<f64>,
    height: Option<Spanned<f64>>,
    label: Option<String>,
    category: Option<String>,
    x: Option<Spanned<f64>>,
    y: Option<Spanned<f64>>,
    rotation: Option<Spanned<f64>>,
    scale: Option<Spanned<f64>>,
}

/// A parsed and laid out venue
#[derive(Debug, Clone, PartialEq)]
pub struct VenueDocument {
    pub name: Option<String>,
    pub tables: Vec<PlacedTable>,
}

impl VenueDocument {
    /// Load a venue from a TOML file
    pub fn from_file(path: &Path, config: &LayoutConfig) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content, config)
    }

    /// Parse a venue from TOML source and lay out every table
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(source: &str, config: &LayoutConfig) -> Result<Self, DocumentError> {
        let raw: RawDocument = toml::from_str(source)?;
        let mut tables = Vec::with_capacity(raw.tables.len());
        let mut cursor_x = 0.0;

        for table in raw.tables {
            let placed = place_table(table, config, &mut cursor_x)?;
            tracing::debug!(
                label = placed.layout.spec.label.as_deref().unwrap_or("<anon>"),
                shape = %placed.layout.spec.shape,
                seats = placed.seats.len(),
                x = placed.placement.position.x,
                y = placed.placement.position.y,
                "placed table"
            );
            tables.push(placed);
        }

        Ok(Self {
            name: raw.venue.and_then(|v| v.name),
            tables,
        })
    }

    /// Total number of seats across all tables
    pub fn seat_count(&self) -> usize {
        self.tables.iter().map(|t| t.seats.len()).sum()
    }

    /// Run the seating lint over every table
    pub fn lint(&self, config: &LayoutConfig) -> Vec<LintWarning> {
        lint::check_venue(&self.tables, config)
    }
}

fn place_table(
    raw: RawTable,
    config: &LayoutConfig,
    cursor_x: &mut f64,
) -> Result<PlacedTable, DocumentError> {
    let shape = raw
        .shape
        .get_ref()
        .parse::<TableShape>()
        .map_err(|e| DocumentError::layout(e, raw.shape.span()))?;

    let seats_span = raw.seats.span();
    let seat_count = u32::try_from(*raw.seats.get_ref()).map_err(|_| {
        DocumentError::layout(
            LayoutError::InvalidSeatCount {
                count: *raw.seats.get_ref(),
                max: config.max_seat_count,
            },
            seats_span.clone(),
        )
    })?;

    let width_span = raw.width.span();
    let height_span = raw
        .height
        .as_ref()
        .map(|h| h.span())
        .unwrap_or_else(|| width_span.clone());
    let width = *raw.width.get_ref();
    let height = raw.height.as_ref().map(|h| *h.get_ref()).unwrap_or(width);

    let mut spec = TableSpec::new(shape, seat_count, width, height);
    spec.label = raw.label;
    spec.category = raw.category;

    let layout = TableLayout::compute(&spec, config).map_err(|e| {
        let span = match &e {
            LayoutError::InvalidSeatCount { .. } => seats_span.clone(),
            LayoutError::InvalidDimension { field: "height", .. } => height_span.clone(),
            _ => width_span.clone(),
        };
        DocumentError::layout(e, span)
    })?;

    let rotation = match &raw.rotation {
        Some(r) => normalize_rotation(finite(r, "rotation")?),
        None => 0.0,
    };
    let scale = match &raw.scale {
        Some(s) => {
            let value = finite(s, "scale")?;
            if !(MIN_SCALE..=MAX_SCALE).contains(&value) {
                return Err(DocumentError::invalid_value(
                    format!("scale {value} is out of range (expected {MIN_SCALE}..={MAX_SCALE})"),
                    s.span(),
                ));
            }
            value
        }
        None => 1.0,
    };
    let x = raw.x.as_ref().map(|x| finite(x, "x")).transpose()?;
    let y = raw.y.as_ref().map(|y| finite(y, "y")).transpose()?;

    let placement = Placement::at(Point::default())
        .with_rotation(rotation)
        .with_scale(scale);

    // Footprint relative to the table center decides where flowed tables go
    let footprint = PlacedTable::new(layout.clone(), placement).bounds(config.seat_draw_radius);
    let position = Point::new(
        x.unwrap_or(*cursor_x - footprint.x),
        y.unwrap_or(-footprint.y),
    );
    if x.is_none() {
        *cursor_x += footprint.width + FLOW_GAP;
    }

    Ok(PlacedTable::new(
        layout,
        Placement {
            position,
            ..placement
        },
    ))
}

fn finite(value: &Spanned<f64>, field: &str) -> Result<f64, DocumentError> {
    let v = *value.get_ref();
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DocumentError::invalid_value(
            format!("{field} must be a finite number"),
            value.span(),
        ))
    }
}
