//! Error types for venue documents

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::layout::LayoutError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while reading a venue document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read venue file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML or a field of the wrong type
    #[error("invalid venue document: {message}")]
    Syntax { message: String, span: Option<Span> },

    /// A table that cannot be laid out
    #[error("{error}")]
    Layout { error: LayoutError, span: Span },

    /// A placement value outside its allowed range
    #[error("{message}")]
    InvalidValue { message: String, span: Span },
}

impl DocumentError {
    pub fn layout(error: LayoutError, span: Span) -> Self {
        Self::Layout { error, span }
    }

    pub fn invalid_value(message: impl Into<String>, span: Span) -> Self {
        Self::InvalidValue {
            message: message.into(),
            span,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Io(_) => None,
            Self::Syntax { span, .. } => span.as_ref(),
            Self::Layout { span, .. } | Self::InvalidValue { span, .. } => Some(span),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span().cloned() else {
            return format!("Error: {}", self);
        };

        let help = match self {
            Self::Layout { error, .. } => error
                .suggestions()
                .filter(|s| !s.is_empty())
                .map(|s| format!("did you mean {}?", s.join(", "))),
            _ => None,
        };

        let mut report = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.headline())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.to_string())
                    .with_color(Color::Red),
            );
        if let Some(help) = help {
            report = report.with_help(help);
        }

        let mut buf = Vec::new();
        if report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .is_err()
        {
            return format!("Error: {}", self);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn headline(&self) -> &'static str {
        match self {
            Self::Io(_) => "cannot read venue",
            Self::Syntax { .. } => "invalid venue document",
            Self::Layout { .. } => "invalid table",
            Self::InvalidValue { .. } => "invalid placement",
        }
    }
}

impl From<toml::de::Error> for DocumentError {
    fn from(err: toml::de::Error) -> Self {
        DocumentError::Syntax {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}
