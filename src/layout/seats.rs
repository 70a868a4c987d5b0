//! Seat position generation around table outlines.
//!
//! Every shape maps `(seat_count, width, height, clearance)` to an ordered
//! list of seat centers in table-local coordinates, with the outline's
//! bounding box at `[0, width] x [0, height]` and the y axis pointing down.
//!
//! ## Ordering
//!
//! Seat 0 is always the first position of the shape's walk. Every walk runs
//! clockwise on screen except the triangle's:
//! - round: starts due north
//! - square / rectangle: top edge, right, bottom, left
//! - triangle: left edge (apex to base), base, right edge, which is
//!   counter-clockwise on screen
//! - semi-circle: left end of the diameter, over the apex, to the right end
//!
//! ## Polygon distribution
//!
//! For polygonal outlines the seats are apportioned to edges in proportion to
//! edge length (largest remainder, ties resolved in walk order) and spaced
//! evenly inside each edge's share, so a lone seat on an edge lands on its
//! midpoint. Each seat is pushed off its edge by the clearance along the
//! edge's outward normal.

use std::f64::consts::{PI, TAU};

use super::types::{Point, TableShape};

/// Distance between a table's outline and its seat centers
pub const SEAT_RADIUS: f64 = 12.0;

/// Compute seat positions using the fixed [`SEAT_RADIUS`] clearance.
///
/// ```rust
/// use seat_layout::layout::{compute_seat_positions, TableShape};
///
/// let seats = compute_seat_positions(TableShape::Round, 4, 80.0, 80.0);
/// assert_eq!(seats.len(), 4);
/// // Seat 0 sits due north of the table
/// assert!((seats[0].x - 40.0).abs() < 1e-9);
/// assert!((seats[0].y + 12.0).abs() < 1e-9);
/// ```
pub fn compute_seat_positions(
    shape: TableShape,
    seat_count: usize,
    width: f64,
    height: f64,
) -> Vec<Point> {
    compute_seat_positions_with_clearance(shape, seat_count, width, height, SEAT_RADIUS)
}

/// Compute seat positions with an explicit outline clearance
pub fn compute_seat_positions_with_clearance(
    shape: TableShape,
    seat_count: usize,
    width: f64,
    height: f64,
    clearance: f64,
) -> Vec<Point> {
    if seat_count == 0 {
        return Vec::new();
    }

    match shape {
        TableShape::Round => round_seats(seat_count, width, height, clearance),
        TableShape::Square | TableShape::Rectangle => {
            polygon_seats(&rectangle_outline(width, height), seat_count, clearance)
        }
        TableShape::Triangle => {
            polygon_seats(&triangle_outline(width, height), seat_count, clearance)
        }
        TableShape::SemiCircle => semi_circle_seats(seat_count, width, height, clearance),
    }
}

/// Corners of the rectangle outline in walk order (clockwise from top-left)
pub fn rectangle_outline(width: f64, height: f64) -> [Point; 4] {
    [
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ]
}

/// Corners of the isosceles triangle outline in walk order (apex first)
pub fn triangle_outline(width: f64, height: f64) -> [Point; 3] {
    [
        Point::new(width / 2.0, 0.0),
        Point::new(0.0, height),
        Point::new(width, height),
    ]
}

/// Center and radius of the semi-circle outline: flat base on `y = height`
pub fn semi_circle_geometry(width: f64, height: f64) -> (Point, f64) {
    let radius = (width / 2.0).min(height);
    (Point::new(width / 2.0, height), radius)
}

fn round_seats(seat_count: usize, width: f64, height: f64, clearance: f64) -> Vec<Point> {
    let radius = width.min(height) / 2.0 + clearance;
    let cx = width / 2.0;
    let cy = height / 2.0;

    (0..seat_count)
        .map(|i| {
            let angle = TAU * i as f64 / seat_count as f64 - PI / 2.0;
            Point::new(cx + angle.cos() * radius, cy + angle.sin() * radius)
        })
        .collect()
}

fn semi_circle_seats(seat_count: usize, width: f64, height: f64, clearance: f64) -> Vec<Point> {
    let (center, radius) = semi_circle_geometry(width, height);
    let radius = radius + clearance;

    (0..seat_count)
        .map(|i| {
            // Sweep from the left end (pi) to the right end (0)
            let angle = if seat_count == 1 {
                PI / 2.0
            } else {
                PI - PI * i as f64 / (seat_count - 1) as f64
            };
            // Arc bulges upward, so y decreases with sin
            Point::new(
                center.x + angle.cos() * radius,
                center.y - angle.sin() * radius,
            )
        })
        .collect()
}

/// Distribute seats along a closed convex outline given in walk order
fn polygon_seats(corners: &[Point], seat_count: usize, clearance: f64) -> Vec<Point> {
    let centroid = centroid(corners);
    let edges: Vec<(Point, Point)> = corners
        .iter()
        .enumerate()
        .map(|(i, a)| (*a, corners[(i + 1) % corners.len()]))
        .collect();
    let lengths: Vec<f64> = edges.iter().map(|(a, b)| a.distance_to(*b)).collect();
    let shares = apportion(&lengths, seat_count);

    let mut seats = Vec::with_capacity(seat_count);
    for ((a, b), share) in edges.iter().zip(shares) {
        if share == 0 {
            continue;
        }
        let normal = outward_normal(*a, *b, centroid);
        for j in 0..share {
            let t = (j as f64 + 0.5) / share as f64;
            seats.push(Point::new(
                a.x + (b.x - a.x) * t + normal.x * clearance,
                a.y + (b.y - a.y) * t + normal.y * clearance,
            ));
        }
    }
    seats
}

/// Largest-remainder apportionment of `total` seats by edge length.
///
/// Ties go to the earlier edge so the result is stable for symmetric shapes.
fn apportion(lengths: &[f64], total: usize) -> Vec<usize> {
    let perimeter: f64 = lengths.iter().sum();
    if perimeter <= 0.0 {
        let mut shares = vec![0; lengths.len()];
        if let Some(first) = shares.first_mut() {
            *first = total;
        }
        return shares;
    }

    let quotas: Vec<f64> = lengths
        .iter()
        .map(|len| total as f64 * len / perimeter)
        .collect();
    let mut shares: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();
    let assigned: usize = shares.iter().sum();

    let mut order: Vec<usize> = (0..lengths.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = quotas[a] - quotas[a].floor();
        let rb = quotas[b] - quotas[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });

    for &edge in order.iter().cycle().take(total.saturating_sub(assigned)) {
        shares[edge] += 1;
    }
    shares
}

fn centroid(corners: &[Point]) -> Point {
    let n = corners.len() as f64;
    let (sx, sy) = corners
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Unit normal of edge `a -> b` pointing away from `inside`
fn outward_normal(a: Point, b: Point, inside: Point) -> Point {
    let len = a.distance_to(b);
    if len == 0.0 {
        return Point::new(0.0, 0.0);
    }
    let mut normal = Point::new((b.y - a.y) / len, -(b.x - a.x) / len);
    let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    if normal.x * (mid.x - inside.x) + normal.y * (mid.y - inside.y) < 0.0 {
        normal = Point::new(-normal.x, -normal.y);
    }
    normal
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_zero_seats_is_empty() {
        for shape in TableShape::ALL {
            assert!(compute_seat_positions(shape, 0, 80.0, 80.0).is_empty());
        }
    }

    #[test]
    fn test_apportion_square() {
        assert_eq!(apportion(&[80.0, 80.0, 80.0, 80.0], 4), vec![1, 1, 1, 1]);
        assert_eq!(apportion(&[80.0, 80.0, 80.0, 80.0], 1), vec![1, 0, 0, 0]);
        assert_eq!(apportion(&[80.0, 80.0, 80.0, 80.0], 6), vec![2, 2, 1, 1]);
    }

    #[test]
    fn test_apportion_long_rectangle() {
        // 120 x 60: quotas 1.33, 0.67, 1.33, 0.67
        assert_eq!(apportion(&[120.0, 60.0, 120.0, 60.0], 4), vec![1, 1, 1, 1]);
        // quotas 4, 2, 4, 2
        assert_eq!(apportion(&[120.0, 60.0, 120.0, 60.0], 12), vec![4, 2, 4, 2]);
    }

    #[test]
    fn test_apportion_always_sums_to_total() {
        let lengths = [90.05, 90.0, 90.05];
        for total in 1..=20 {
            assert_eq!(apportion(&lengths, total).iter().sum::<usize>(), total);
        }
    }

    #[test]
    fn test_outward_normal_rectangle_edges() {
        let inside = Point::new(40.0, 40.0);
        let top = outward_normal(Point::new(0.0, 0.0), Point::new(80.0, 0.0), inside);
        assert!(approx_eq(top.x, 0.0) && approx_eq(top.y, -1.0));
        let right = outward_normal(Point::new(80.0, 0.0), Point::new(80.0, 80.0), inside);
        assert!(approx_eq(right.x, 1.0) && approx_eq(right.y, 0.0));
    }

    #[test]
    fn test_outward_normal_flips_for_counter_clockwise_edge() {
        // Triangle left edge runs apex -> bottom-left, counter-clockwise on screen
        let inside = Point::new(45.0, 52.0);
        let n = outward_normal(Point::new(45.0, 0.0), Point::new(0.0, 78.0), inside);
        assert!(n.x < 0.0, "left edge normal should point left, got {n:?}");
        assert!(n.y < 0.0, "left edge normal should point up, got {n:?}");
    }

    #[test]
    fn test_rectangle_single_seat_on_top_edge() {
        let seats = compute_seat_positions(TableShape::Square, 1, 80.0, 80.0);
        assert_eq!(seats.len(), 1);
        assert!(approx_eq(seats[0].y, -SEAT_RADIUS));
        assert!(seats[0].x >= 0.0 && seats[0].x <= 80.0);
    }

    #[test]
    fn test_semi_circle_radius_bounded_by_height() {
        let (center, radius) = semi_circle_geometry(200.0, 40.0);
        assert!(approx_eq(radius, 40.0));
        assert!(approx_eq(center.x, 100.0));
        assert!(approx_eq(center.y, 40.0));
    }

    #[test]
    fn test_semi_circle_single_seat_at_apex() {
        let seats = compute_seat_positions(TableShape::SemiCircle, 1, 100.0, 50.0);
        assert!(approx_eq(seats[0].x, 50.0));
        assert!(approx_eq(seats[0].y, 50.0 - 50.0 - SEAT_RADIUS));
    }

    #[test]
    fn test_custom_clearance() {
        let seats =
            compute_seat_positions_with_clearance(TableShape::Rectangle, 4, 120.0, 60.0, 20.0);
        assert!(approx_eq(seats[0].y, -20.0));
        assert!(approx_eq(seats[1].x, 140.0));
        assert!(approx_eq(seats[2].y, 80.0));
        assert!(approx_eq(seats[3].x, -20.0));
    }
}
