//! Lint engine for detecting seating defects.
//!
//! Runs after seats are computed and tables placed, checking for mechanical
//! issues: seats drawn on top of each other, seats inside a table outline,
//! and placed tables whose footprints collide.

use std::fmt;

use super::config::LayoutConfig;
use super::seats::{rectangle_outline, semi_circle_geometry, triangle_outline};
use super::transform::PlacedTable;
use super::types::{Point, TableLayout, TableShape};

const EPSILON: f64 = 1e-6;

/// A lint warning about a seating defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Crowding,
    Clearance,
    Overlap,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Crowding => write!(f, "crowding"),
            LintCategory::Clearance => write!(f, "clearance"),
            LintCategory::Overlap => write!(f, "overlap"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Run the per-table checks on a table-local layout.
pub fn check_table(layout: &TableLayout, config: &LayoutConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let name = table_display_name(layout, None);
    check_crowding(layout, &name, config, &mut warnings);
    check_clearance(layout, &name, &mut warnings);
    warnings
}

/// Run all checks on a set of placed tables.
pub fn check_venue(tables: &[PlacedTable], config: &LayoutConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for (i, table) in tables.iter().enumerate() {
        let name = table_display_name(&table.layout, Some(i));
        check_crowding(&table.layout, &name, config, &mut warnings);
        check_clearance(&table.layout, &name, &mut warnings);
    }
    check_overlaps(tables, config, &mut warnings);
    for w in &warnings {
        tracing::warn!(category = %w.category, "{}", w.message);
    }
    warnings
}

/// Display name for a table: its label if set, or its position in the venue.
fn table_display_name(layout: &TableLayout, index: Option<usize>) -> String {
    match (&layout.spec.label, index) {
        (Some(label), _) => format!("\"{}\"", label),
        (None, Some(i)) => format!("<table #{}>", i + 1),
        (None, None) => "<table>".to_string(),
    }
}

fn check_crowding(
    layout: &TableLayout,
    name: &str,
    config: &LayoutConfig,
    warnings: &mut Vec<LintWarning>,
) {
    let min_distance = 2.0 * config.seat_draw_radius;
    for (i, a) in layout.seats.iter().enumerate() {
        for b in &layout.seats[i + 1..] {
            let distance = a.position.distance_to(b.position);
            if distance + EPSILON < min_distance {
                warnings.push(LintWarning {
                    category: LintCategory::Crowding,
                    message: format!(
                        "{} and {} of {} are {:.1} apart (seats need {:.1})",
                        a.label, b.label, name, distance, min_distance
                    ),
                });
            }
        }
    }
}

fn check_clearance(layout: &TableLayout, name: &str, warnings: &mut Vec<LintWarning>) {
    for seat in &layout.seats {
        if outline_contains(layout, seat.position) {
            warnings.push(LintWarning {
                category: LintCategory::Clearance,
                message: format!(
                    "{} of {} sits inside the {} outline",
                    seat.label, name, layout.spec.shape
                ),
            });
        }
    }
}

fn check_overlaps(tables: &[PlacedTable], config: &LayoutConfig, warnings: &mut Vec<LintWarning>) {
    let footprints: Vec<_> = tables
        .iter()
        .map(|t| {
            t.bounds(config.seat_draw_radius)
                .inflate(config.table_spacing / 2.0)
        })
        .collect();

    for i in 0..tables.len() {
        for j in (i + 1)..tables.len() {
            if footprints[i].intersects(&footprints[j]) {
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    message: format!(
                        "{} overlaps {}",
                        table_display_name(&tables[i].layout, Some(i)),
                        table_display_name(&tables[j].layout, Some(j))
                    ),
                });
            }
        }
    }
}

/// Strict interior test for a point in table-local coordinates
pub fn outline_contains(layout: &TableLayout, p: Point) -> bool {
    let (w, h) = (layout.spec.size.width, layout.spec.size.height);
    match layout.spec.shape {
        TableShape::Round => {
            let radius = w.min(h) / 2.0;
            p.distance_to(Point::new(w / 2.0, h / 2.0)) + EPSILON < radius
        }
        TableShape::Square | TableShape::Rectangle => {
            polygon_contains(&rectangle_outline(w, h), p)
        }
        TableShape::Triangle => polygon_contains(&triangle_outline(w, h), p),
        TableShape::SemiCircle => {
            let (center, radius) = semi_circle_geometry(w, h);
            p.y + EPSILON < center.y && p.distance_to(center) + EPSILON < radius
        }
    }
}

/// Convex polygon interior test: the point is on the same side of every edge
fn polygon_contains(corners: &[Point], p: Point) -> bool {
    let mut sign = 0.0_f64;
    for (i, a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross.abs() < EPSILON {
            return false;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::transform::Placement;
    use crate::layout::TableSpec;

    fn layout(shape: TableShape, seats: u32, w: f64, h: f64) -> TableLayout {
        TableLayout::compute(&TableSpec::new(shape, seats, w, h), &LayoutConfig::default())
            .unwrap()
    }

    #[test]
    fn test_polygon_contains() {
        let square = rectangle_outline(10.0, 10.0);
        assert!(polygon_contains(&square, Point::new(5.0, 5.0)));
        assert!(!polygon_contains(&square, Point::new(5.0, -1.0)));
        assert!(!polygon_contains(&square, Point::new(10.0, 5.0)));
    }

    #[test]
    fn test_no_clearance_warnings_for_generated_seats() {
        for shape in TableShape::ALL {
            let warnings = check_table(&layout(shape, 8, 120.0, 80.0), &LayoutConfig::default());
            assert!(
                warnings.iter().all(|w| w.category != LintCategory::Clearance),
                "{shape}: {warnings:?}"
            );
        }
    }

    #[test]
    fn test_clearance_warning_for_seat_inside() {
        let mut table = layout(TableShape::Square, 4, 80.0, 80.0);
        table.seats[0].position = Point::new(40.0, 40.0);
        let warnings = check_table(&table, &LayoutConfig::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Clearance);
        assert!(warnings[0].message.contains("Seat 1"));
    }

    #[test]
    fn test_crowding_on_small_round_table() {
        // 20 seats on a circle of radius 22 are ~6.9 apart
        let warnings = check_table(
            &layout(TableShape::Round, 20, 20.0, 20.0),
            &LayoutConfig::default(),
        );
        assert!(warnings.iter().any(|w| w.category == LintCategory::Crowding));
    }

    #[test]
    fn test_overlapping_tables() {
        let config = LayoutConfig::default();
        let a = PlacedTable::new(
            layout(TableShape::Round, 4, 80.0, 80.0),
            Placement::at(Point::new(100.0, 100.0)),
        );
        let b = PlacedTable::new(
            layout(TableShape::Round, 4, 80.0, 80.0),
            Placement::at(Point::new(150.0, 100.0)),
        );
        let c = PlacedTable::new(
            layout(TableShape::Round, 4, 80.0, 80.0),
            Placement::at(Point::new(500.0, 100.0)),
        );

        let warnings = check_venue(&[a, b, c], &config);
        let overlaps: Vec<_> = warnings
            .iter()
            .filter(|w| w.category == LintCategory::Overlap)
            .collect();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].message, "<table #1> overlaps <table #2>");
    }

    #[test]
    fn test_warning_display() {
        let w = LintWarning {
            category: LintCategory::Overlap,
            message: "a overlaps b".to_string(),
        };
        assert_eq!(w.to_string(), "overlap: a overlaps b");
    }
}
