//! Output options for seating chart SVG

/// What the SVG renderer draws and how it formats the document
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Margin added around the drawn tables and seats
    pub padding: f64,

    /// Emit the `<?xml ...?>` declaration before the root element
    pub xml_declaration: bool,

    /// One element per line, indented by group depth
    pub pretty_print: bool,

    /// Prefix for CSS class names ("sl-" gives "sl-seat")
    pub class_prefix: Option<String>,

    /// Number seats from 1 inside their circles
    pub seat_numbers: bool,

    /// Draw each table's label at its center
    pub table_labels: bool,

    /// Outline every table's footprint
    pub debug_bounds: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            xml_declaration: true,
            pretty_print: true,
            class_prefix: Some("sl-".to_string()),
            seat_numbers: true,
            table_labels: true,
            debug_bounds: false,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Everything on a single line
    pub fn compact(mut self) -> Self {
        self.pretty_print = false;
        self
    }

    /// Drop the XML declaration so the SVG can be inlined into HTML
    pub fn fragment(mut self) -> Self {
        self.xml_declaration = false;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn without_seat_numbers(mut self) -> Self {
        self.seat_numbers = false;
        self
    }

    pub fn without_table_labels(mut self) -> Self {
        self.table_labels = false;
        self
    }

    pub fn with_debug_bounds(mut self, debug: bool) -> Self {
        self.debug_bounds = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_draw_everything() {
        let config = SvgConfig::default();
        assert_eq!(config.padding, 20.0);
        assert!(config.xml_declaration && config.pretty_print);
        assert!(config.seat_numbers && config.table_labels);
        assert!(!config.debug_bounds);
        assert_eq!(config.class_prefix.as_deref(), Some("sl-"));
    }

    #[test]
    fn test_inline_fragment() {
        let config = SvgConfig::new()
            .with_padding(4.0)
            .compact()
            .fragment()
            .without_seat_numbers()
            .without_class_prefix();

        assert_eq!(
            config,
            SvgConfig {
                padding: 4.0,
                xml_declaration: false,
                pretty_print: false,
                class_prefix: None,
                seat_numbers: false,
                table_labels: true,
                debug_bounds: false,
            }
        );
    }
}
