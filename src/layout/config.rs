//! Configuration for the seat layout engine

use serde::{Deserialize, Serialize};

use super::seats::SEAT_RADIUS;

/// Configuration options for seat layout computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between the table outline and seat centers
    pub seat_radius: f64,

    /// Radius of the circle drawn for each seat
    pub seat_draw_radius: f64,

    /// Largest seat count a single table accepts
    pub max_seat_count: u32,

    /// Minimum gap kept between placed tables before the lint reports overlap
    pub table_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seat_radius: SEAT_RADIUS,
            seat_draw_radius: 8.0,
            max_seat_count: 20,
            table_spacing: 0.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outline-to-seat clearance
    pub fn with_seat_radius(mut self, radius: f64) -> Self {
        self.seat_radius = radius;
        self
    }

    /// Set the drawn seat radius
    pub fn with_seat_draw_radius(mut self, radius: f64) -> Self {
        self.seat_draw_radius = radius;
        self
    }

    /// Set the per-table seat cap
    pub fn with_max_seat_count(mut self, max: u32) -> Self {
        self.max_seat_count = max;
        self
    }

    /// Set the minimum gap between placed tables
    pub fn with_table_spacing(mut self, spacing: f64) -> Self {
        self.table_spacing = spacing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.seat_radius, 12.0);
        assert_eq!(config.seat_draw_radius, 8.0);
        assert_eq!(config.max_seat_count, 20);
        assert_eq!(config.table_spacing, 0.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_seat_radius(16.0)
            .with_max_seat_count(40)
            .with_table_spacing(10.0);

        assert_eq!(config.seat_radius, 16.0);
        assert_eq!(config.max_seat_count, 40);
        assert_eq!(config.table_spacing, 10.0);
    }
}
