//! SVG renderer for seating charts
//!
//! This module takes table layouts and placed tables and produces an SVG
//! string with CSS classes and custom properties for styling.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_table_svg, render_tables_svg, render_venue_svg};
