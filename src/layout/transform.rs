//! Placement transforms for tables on the venue canvas.
//!
//! Seat geometry is computed once in table-local coordinates. Moving, rotating
//! and scaling a table on the canvas is a pure affine transform of those
//! points, so the placement layer never recomputes geometry for it.
//!
//! A local point `p` maps to
//!
//! ```text
//! p' = position + scale * R(angle) * (p - center)
//! ```
//!
//! where `center` is the center of the table's outline bounding box and
//! `position` is where that center lands on the canvas.
//!
//! ## Rotation Convention
//!
//! Rotation uses the SVG convention: clockwise positive angles, in degrees.
//! - 0° = no rotation
//! - 90° = rotated clockwise (right becomes down)
//! - 180° = upside down
//! - 270° = rotated counter-clockwise (right becomes up)

use serde::{Deserialize, Serialize};

use super::types::{BoundingBox, Point, Seat, TableLayout};

/// Rotation, scale and canvas position of a placed table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Canvas position of the table center
    pub position: Point,
    /// Rotation angle in degrees (clockwise positive, per SVG convention)
    pub rotation: f64,
    /// Uniform scale factor
    pub scale: f64,
}

impl Placement {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Bind this placement to a table whose outline is centered at `center`
    pub fn transform_for(&self, center: Point) -> PlacementTransform {
        PlacementTransform {
            angle_degrees: self.rotation,
            scale: self.scale,
            center,
            position: self.position,
        }
    }

    /// Apply the placement to every seat of a table-local layout
    pub fn apply(&self, layout: &TableLayout) -> Vec<Seat> {
        let transform = self.transform_for(layout.center());
        layout
            .seats
            .iter()
            .map(|seat| Seat {
                position: transform.transform_point(seat.position),
                ..seat.clone()
            })
            .collect()
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::at(Point::default())
    }
}

/// A 2D rotate-scale-translate transformation around a center point.
#[derive(Debug, Clone, Copy)]
pub struct PlacementTransform {
    /// Rotation angle in degrees (clockwise positive, per SVG convention)
    pub angle_degrees: f64,
    /// Uniform scale factor applied around the center
    pub scale: f64,
    /// Center of rotation and scaling in local coordinates
    pub center: Point,
    /// Canvas point the center is moved to
    pub position: Point,
}

impl PlacementTransform {
    /// Check if this is effectively a no-op.
    ///
    /// Returns true if the transform keeps every point where it is.
    pub fn is_identity(&self) -> bool {
        self.angle_degrees.rem_euclid(360.0).abs() < f64::EPSILON
            && (self.scale - 1.0).abs() < f64::EPSILON
            && (self.position.x - self.center.x).abs() < f64::EPSILON
            && (self.position.y - self.center.y).abs() < f64::EPSILON
    }

    /// Transform a point using the rotation matrix, scale and translation.
    ///
    /// In SVG's coordinate system (Y-down), clockwise rotation uses:
    /// ```text
    /// x' = px + s * ((x - cx) * cos(θ) - (y - cy) * sin(θ))
    /// y' = py + s * ((x - cx) * sin(θ) + (y - cy) * cos(θ))
    /// ```
    pub fn transform_point(&self, point: Point) -> Point {
        let radians = self.angle_degrees.to_radians();
        let cos_a = radians.cos();
        let sin_a = radians.sin();

        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;

        Point {
            x: self.position.x + self.scale * (dx * cos_a - dy * sin_a),
            y: self.position.y + self.scale * (dx * sin_a + dy * cos_a),
        }
    }

    /// Transform a bounding box using the "loose bounds" algorithm.
    ///
    /// The 4 corners of the original AABB are transformed and the AABB of the
    /// results is returned. This matches CSS/SVG transform behavior.
    pub fn transform_bounds(&self, bounds: &BoundingBox) -> BoundingBox {
        let corners = [
            Point::new(bounds.x, bounds.y),
            Point::new(bounds.right(), bounds.y),
            Point::new(bounds.x, bounds.bottom()),
            Point::new(bounds.right(), bounds.bottom()),
        ];

        let rotated: Vec<Point> = corners.iter().map(|p| self.transform_point(*p)).collect();

        let min_x = rotated.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = rotated
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_y = rotated.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = rotated
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);

        BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// SVG `transform` attribute equivalent to this transform
    pub fn to_svg_attribute(&self) -> String {
        format!(
            "translate({:.2} {:.2}) rotate({:.2}) scale({:.2}) translate({:.2} {:.2})",
            self.position.x,
            self.position.y,
            self.angle_degrees,
            self.scale,
            -self.center.x,
            -self.center.y
        )
    }
}

/// A table committed to the canvas with its transformed seats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTable {
    /// Table-local layout the seats were derived from
    pub layout: TableLayout,
    pub placement: Placement,
    /// Seats in canvas coordinates
    pub seats: Vec<Seat>,
}

impl PlacedTable {
    pub fn new(layout: TableLayout, placement: Placement) -> Self {
        let seats = placement.apply(&layout);
        Self {
            layout,
            placement,
            seats,
        }
    }

    pub fn transform(&self) -> PlacementTransform {
        self.placement.transform_for(self.layout.center())
    }

    /// Loose canvas bounds of the outline plus every drawn seat circle
    pub fn bounds(&self, seat_draw_radius: f64) -> BoundingBox {
        let margin = seat_draw_radius * self.placement.scale.abs();
        self.seats.iter().fold(
            self.transform().transform_bounds(&self.layout.outline_bounds()),
            |b, seat| {
                b.union(&BoundingBox::new(
                    seat.position.x - margin,
                    seat.position.y - margin,
                    2.0 * margin,
                    2.0 * margin,
                ))
            },
        )
    }
}
