//! Stylesheet system for seating chart colors
//!
//! Rendered tables and seats reference symbolic color tokens through CSS
//! custom properties. A stylesheet supplies the concrete values, and can map
//! seat categories to their own fill color.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// A stylesheet file that could not be loaded
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("cannot read stylesheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid stylesheet: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Color mappings: token name -> CSS color
    pub colors: BTreeMap<String, String>,
    /// Seat fill per category id
    pub categories: BTreeMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
    #[serde(default)]
    categories: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Default palette - light tables, dark outlines, blue seats
const DEFAULT_PALETTE: &str = r##"
[colors]
table-fill = "#f5f0e6"
table-stroke = "#5d4037"
seat-fill = "#90caf9"
seat-stroke = "#1565c0"
seat-text = "#0d47a1"
label-text = "#333333"
background = "#ffffff"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.and_then(|m| m.name),
            colors: parsed.colors,
            categories: parsed.categories,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a color token with fallback to the default palette
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        if token.starts_with("seat") {
            return "#90caf9".to_string();
        }
        if token.starts_with("table") {
            return "#f5f0e6".to_string();
        }

        "#333333".to_string()
    }

    /// Fill color for seats of the given category, if the stylesheet maps it
    pub fn category_color(&self, category: &str) -> Option<&str> {
        self.categories.get(category).map(|s| s.as_str())
    }

    /// Every token the renderer emits, with its resolved value
    pub fn resolved_tokens(&self) -> BTreeMap<String, String> {
        let mut tokens: BTreeMap<String, String> = Self::default().colors;
        tokens.extend(self.colors.clone());
        tokens
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        let parsed: TomlStylesheet =
            toml::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML");
        Stylesheet {
            name: Some("default".to_string()),
            colors: parsed.colors,
            categories: parsed.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert!(stylesheet.colors.contains_key("table-fill"));
        assert!(stylesheet.colors.contains_key("seat-fill"));
        assert!(stylesheet.categories.is_empty());
    }

    #[test]
    fn test_resolve_missing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("nonexistent"), None);
    }

    #[test]
    fn test_resolve_or_default_fallback() {
        let empty = Stylesheet {
            name: None,
            colors: BTreeMap::new(),
            categories: BTreeMap::new(),
        };
        assert_eq!(empty.resolve_or_default("table-stroke"), "#5d4037");
        assert_eq!(empty.resolve_or_default("seat-custom"), "#90caf9");
        assert_eq!(empty.resolve_or_default("unknown"), "#333333");
    }

    #[test]
    fn test_parse_toml_with_categories() {
        let toml_str = r##"
[metadata]
name = "Gala"

[colors]
table-fill = "#000000"

[categories]
vip = "#ffd700"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Gala".to_string()));
        assert_eq!(stylesheet.resolve("table-fill"), Some("#000000"));
        assert_eq!(stylesheet.category_color("vip"), Some("#ffd700"));
        assert_eq!(stylesheet.category_color("standard"), None);

        let tokens = stylesheet.resolved_tokens();
        assert_eq!(tokens["table-fill"], "#000000");
        assert_eq!(tokens["seat-fill"], "#90caf9");
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Stylesheet::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(StylesheetError::Parse(_))));
    }
}
