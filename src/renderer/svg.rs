//! SVG generation for tables and seats

use std::collections::HashSet;

use crate::layout::seats::{semi_circle_geometry, triangle_outline};
use crate::layout::{
    BoundingBox, LayoutConfig, PlacedTable, Placement, Point, Seat, TableLayout, TableShape,
};
use crate::stylesheet::Stylesheet;
use crate::venue::VenueDocument;

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties and class rules from a stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let prefix = self.prefix();
        let mut lines = vec![":root {".to_string()];
        for (token, value) in stylesheet.resolved_tokens() {
            lines.push(format!("    --{}: {};", token, value));
        }
        for (category, value) in &stylesheet.categories {
            lines.push(format!("    --category-{}: {};", css_ident(category), value));
        }
        lines.push("  }".to_string());
        lines.push(format!(
            "  .{prefix}table {{ fill: var(--table-fill); stroke: var(--table-stroke); stroke-width: 2; }}"
        ));
        lines.push(format!(
            "  .{prefix}seat {{ fill: var(--seat-fill); stroke: var(--seat-stroke); stroke-width: 1.5; }}"
        ));
        lines.push(format!(
            "  .{prefix}seat-number {{ fill: var(--seat-text); font-size: 9px; }}"
        ));
        lines.push(format!(
            "  .{prefix}label {{ fill: var(--label-text); font-size: 12px; }}"
        ));
        let separator = if self.config.pretty_print { "\n" } else { " " };
        self.styles.push(lines.join(separator));
    }

    pub fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn class_list(&self, kind: &str, classes: &[String]) -> String {
        let prefix = self.prefix();
        std::iter::once(format!("{}{}", prefix, kind))
            .chain(classes.iter().map(|c| format!("{}{}", prefix, c)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn push(&mut self, element: String) {
        let line = format!("{}{}", self.indent_str(), element);
        self.elements.push(line);
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, bounds: &BoundingBox, kind: &str, classes: &[String], styles: &str) {
        let class_list = self.class_list(kind, classes);
        self.push(format!(
            r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            class_list,
            num(bounds.x),
            num(bounds.y),
            num(bounds.width),
            num(bounds.height),
            styles
        ));
    }

    /// Add a circle element
    pub fn add_circle(
        &mut self,
        id: Option<&str>,
        center: Point,
        r: f64,
        kind: &str,
        classes: &[String],
        styles: &str,
    ) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_list = self.class_list(kind, classes);
        self.push(format!(
            r#"<circle{} class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            id_attr,
            class_list,
            num(center.x),
            num(center.y),
            num(r),
            styles
        ));
    }

    /// Add a polygon element
    pub fn add_polygon(&mut self, points: &[Point], kind: &str, classes: &[String]) {
        let class_list = self.class_list(kind, classes);
        let points_str = points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        self.push(format!(
            r#"<polygon class="{}" points="{}"/>"#,
            class_list, points_str
        ));
    }

    /// Add a path element from a prebuilt `d` attribute
    pub fn add_path(&mut self, d: &str, kind: &str, classes: &[String]) {
        let class_list = self.class_list(kind, classes);
        self.push(format!(r#"<path class="{}" d="{}"/>"#, class_list, d));
    }

    /// Add a centered text element
    pub fn add_text(&mut self, text: &str, at: Point, kind: &str, styles: &str) {
        let class_list = self.class_list(kind, &[]);
        self.push(format!(
            r#"<text class="{}" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle"{}>{}</text>"#,
            class_list,
            num(at.x),
            num(at.y),
            styles,
            escape_xml(text)
        ));
    }

    /// Open a group element with optional ID, classes and transform
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String], transform: Option<&str>) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, self.class_list(&classes[0], &classes[1..]))
        };
        let transform_attr = transform
            .map(|t| format!(r#" transform="{}""#, t))
            .unwrap_or_default();

        self.push(format!("<g{}{}{}>", id_attr, class_attr, transform_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.push("</g>".to_string());
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: BoundingBox) -> String {
        let padding = self.config.padding;
        let vb = viewbox.inflate(padding);
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.xml_declaration {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            num(vb.x),
            num(vb.y),
            num(vb.width),
            num(vb.height)
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a single table in its local coordinates (the inline preview)
pub fn render_table_svg(
    layout: &TableLayout,
    layout_config: &LayoutConfig,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let placed = PlacedTable::new(layout.clone(), Placement::at(layout.center()));
    render_tables_svg(&[placed], layout_config, config, stylesheet)
}

/// Render a set of placed tables onto one canvas
pub fn render_tables_svg(
    tables: &[PlacedTable],
    layout_config: &LayoutConfig,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    let mut bounds: Option<BoundingBox> = None;
    let mut used_ids = HashSet::new();
    for (i, table) in tables.iter().enumerate() {
        let table_bounds = table.bounds(layout_config.seat_draw_radius);
        let id = unique_table_id(table, i, &mut used_ids);
        render_table(table, &id, layout_config, stylesheet, &mut builder);
        if config.debug_bounds {
            builder.add_rect(
                &table_bounds,
                "debug-bounds",
                &[],
                r#" fill="none" stroke="red" stroke-dasharray="4,2""#,
            );
        }
        bounds = Some(match bounds {
            Some(b) => b.union(&table_bounds),
            None => table_bounds,
        });
    }

    builder.build(bounds.unwrap_or_default())
}

/// Render every table of a venue document
pub fn render_venue_svg(
    venue: &VenueDocument,
    layout_config: &LayoutConfig,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    render_tables_svg(&venue.tables, layout_config, config, stylesheet)
}

fn render_table(
    table: &PlacedTable,
    id: &str,
    layout_config: &LayoutConfig,
    stylesheet: &Stylesheet,
    builder: &mut SvgBuilder,
) {
    let shape_class = format!("table-{}", table.layout.spec.shape);
    builder.start_group(Some(id), &["table-group".to_string()], None);

    let transform = table.transform();
    let transform_attr = (!transform.is_identity()).then(|| transform.to_svg_attribute());
    builder.start_group(None, &[], transform_attr.as_deref());
    render_outline(&table.layout, &shape_class, builder);
    builder.end_group();

    let seat_r = layout_config.seat_draw_radius * table.placement.scale.abs();
    for seat in &table.seats {
        render_seat(seat, id, seat_r, stylesheet, builder);
    }

    if let Some(label) = table
        .layout
        .spec
        .label
        .as_ref()
        .filter(|_| builder.config.table_labels)
    {
        let center = transform.transform_point(table.layout.center());
        builder.add_text(label, center, "label", "");
    }

    builder.end_group();
}

fn render_outline(layout: &TableLayout, shape_class: &str, builder: &mut SvgBuilder) {
    let (w, h) = (layout.spec.size.width, layout.spec.size.height);
    let classes = [shape_class.to_string()];
    match layout.spec.shape {
        TableShape::Round => {
            builder.add_circle(
                None,
                Point::new(w / 2.0, h / 2.0),
                w.min(h) / 2.0,
                "table",
                &classes,
                "",
            );
        }
        TableShape::Square | TableShape::Rectangle => {
            builder.add_rect(&layout.outline_bounds(), "table", &classes, "");
        }
        TableShape::Triangle => {
            builder.add_polygon(&triangle_outline(w, h), "table", &classes);
        }
        TableShape::SemiCircle => {
            let (center, r) = semi_circle_geometry(w, h);
            // Sweep clockwise from the left end over the top to the right end
            let d = format!(
                "M{} {} A{} {} 0 0 1 {} {} Z",
                num(center.x - r),
                num(center.y),
                num(r),
                num(r),
                num(center.x + r),
                num(center.y)
            );
            builder.add_path(&d, "table", &classes);
        }
    }
}

fn render_seat(
    seat: &Seat,
    table_id: &str,
    radius: f64,
    stylesheet: &Stylesheet,
    builder: &mut SvgBuilder,
) {
    let id = format!("{}-seat-{}", table_id, seat.index + 1);
    let (classes, styles) = match seat.category.as_deref() {
        Some(category) => {
            let class = vec![format!("category-{}", css_ident(category))];
            let fill = stylesheet
                .category_color(category)
                .map(|_| format!(r#" style="fill: var(--category-{})""#, css_ident(category)))
                .unwrap_or_default();
            (class, fill)
        }
        None => (vec![], String::new()),
    };
    builder.add_circle(Some(&id), seat.position, radius, "seat", &classes, &styles);
    if builder.config.seat_numbers {
        builder.add_text(
            &(seat.index + 1).to_string(),
            seat.position,
            "seat-number",
            "",
        );
    }
}

/// Id for a table group, suffixed with a counter when the label's id is taken.
///
/// Seat ids derive from the table id, so they are reserved along with it.
fn unique_table_id(table: &PlacedTable, index: usize, used: &mut HashSet<String>) -> String {
    let base = match &table.layout.spec.label {
        Some(label) if !css_ident(label).is_empty() => format!("table-{}", css_ident(label)),
        _ => format!("table-{}", index + 1),
    };
    let seat_ids = |id: &str| -> Vec<String> {
        (1..=table.seats.len())
            .map(|n| format!("{id}-seat-{n}"))
            .collect()
    };

    let mut id = base.clone();
    let mut suffix = 2;
    while used.contains(&id) || seat_ids(&id).iter().any(|s| used.contains(s)) {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }
    used.extend(seat_ids(&id));
    used.insert(id.clone());
    id
}

/// Lowercase a name into something usable as an id or CSS identifier
fn css_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if (c == '-' || c == '_' || c.is_whitespace()) && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// Format a coordinate with at most two decimals and no trailing zeros
fn num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
