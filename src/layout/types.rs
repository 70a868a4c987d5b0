//! Core types for table and seat layout

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::seats::compute_seat_positions_with_clearance;

/// A 2D point in the coordinate system (y axis pointing down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A bounding box representing the spatial extent of a table or seat group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box intersects another
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Expand this bounding box to include a point
    pub fn expand_to_include(&self, point: Point) -> BoundingBox {
        let x = self.x.min(point.x);
        let y = self.y.min(point.y);
        let right = self.right().max(point.x);
        let bottom = self.bottom().max(point.y);
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Grow the box by `margin` on every side
    pub fn inflate(&self, margin: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// The closed set of supported table outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableShape {
    Round,
    Square,
    Rectangle,
    Triangle,
    SemiCircle,
}

impl TableShape {
    pub const ALL: [TableShape; 5] = [
        TableShape::Round,
        TableShape::Square,
        TableShape::Rectangle,
        TableShape::Triangle,
        TableShape::SemiCircle,
    ];

    /// Canonical kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            TableShape::Round => "round",
            TableShape::Square => "square",
            TableShape::Rectangle => "rectangle",
            TableShape::Triangle => "triangle",
            TableShape::SemiCircle => "semi-circle",
        }
    }

    /// Canonical names of every shape, in declaration order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableShape {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "round" => Ok(TableShape::Round),
            "square" => Ok(TableShape::Square),
            "rectangle" => Ok(TableShape::Rectangle),
            "triangle" => Ok(TableShape::Triangle),
            "semi-circle" | "semicircle" | "semi_circle" => Ok(TableShape::SemiCircle),
            _ => Err(LayoutError::unknown_shape(
                s,
                super::find_similar(&Self::names(), &normalized, 3),
            )),
        }
    }
}

/// Table dimensions in layout units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSize {
    pub width: f64,
    pub height: f64,
}

impl TableSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Everything needed to lay out one table and its seats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub shape: TableShape,
    pub seat_count: u32,
    pub size: TableSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Opaque seat category reference, attached to every seat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TableSpec {
    pub fn new(shape: TableShape, seat_count: u32, width: f64, height: f64) -> Self {
        Self {
            shape,
            seat_count,
            size: TableSize::new(width, height),
            label: None,
            category: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Check the seat count and dimensions against the configured limits
    pub fn validate(&self, config: &LayoutConfig) -> Result<(), LayoutError> {
        if self.seat_count < 1 || self.seat_count > config.max_seat_count {
            return Err(LayoutError::InvalidSeatCount {
                count: i64::from(self.seat_count),
                max: config.max_seat_count,
            });
        }
        for (field, value) in [("width", self.size.width), ("height", self.size.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidDimension { field, value });
            }
        }
        Ok(())
    }

    /// True when the two specs would produce different seat geometry
    pub fn geometry_differs(&self, other: &TableSpec) -> bool {
        self.shape != other.shape || self.seat_count != other.seat_count || self.size != other.size
    }
}

impl Default for TableSpec {
    fn default() -> Self {
        Self::new(TableShape::Round, 4, 80.0, 80.0)
    }
}

/// A single computed seat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    /// Position in generation order (0-based)
    pub index: usize,
    pub position: Point,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Seat {
    pub fn new(index: usize, position: Point, category: Option<String>) -> Self {
        Self {
            index,
            position,
            label: format!("Seat {}", index + 1),
            category,
        }
    }
}

/// A table and its seats in table-local coordinates
///
/// The table outline occupies `[0, width] x [0, height]`; seats sit outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub spec: TableSpec,
    pub seats: Vec<Seat>,
}

impl TableLayout {
    /// Compute seats for a validated spec
    pub fn compute(spec: &TableSpec, config: &LayoutConfig) -> Result<Self, LayoutError> {
        spec.validate(config)?;
        let positions = compute_seat_positions_with_clearance(
            spec.shape,
            spec.seat_count as usize,
            spec.size.width,
            spec.size.height,
            config.seat_radius,
        );
        Ok(Self::from_positions(spec.clone(), &positions))
    }

    /// Attach labels and the category to precomputed seat positions
    pub fn from_positions(spec: TableSpec, positions: &[Point]) -> Self {
        let seats = positions
            .iter()
            .enumerate()
            .map(|(i, p)| Seat::new(i, *p, spec.category.clone()))
            .collect();
        Self { spec, seats }
    }

    /// Bounding box of the table outline
    pub fn outline_bounds(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.spec.size.width, self.spec.size.height)
    }

    /// Geometric center of the outline bounding box
    pub fn center(&self) -> Point {
        self.outline_bounds().center()
    }

    /// Bounding box of the outline and every seat center
    pub fn bounds(&self) -> BoundingBox {
        self.seats
            .iter()
            .fold(self.outline_bounds(), |b, s| b.expand_to_include(s.position))
    }

    pub fn positions(&self) -> Vec<Point> {
        self.seats.iter().map(|s| s.position).collect()
    }
}
