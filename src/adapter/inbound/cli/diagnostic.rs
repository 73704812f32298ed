//! Miette-based error diagnostics for CLI error presentation.
//!
//! Errors with a location in user input are rendered with the offending
//! source line and a label under the token; everything else gets a plain
//! diagnostic with an optional help line.

use miette::{
    Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, Report, SourceSpan,
};
use thiserror::Error;

use crate::error::{ConfigError, Error, InputError, ModelError};

/// Graph file error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(colorpath::input),
    help("graph files hold three lines: node colors, `(a,b,w);...` edges, then `s t`")
)]
pub struct InputDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// The graph file.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the offending token.
    #[label("here")]
    pub span: SourceSpan,
}

impl InputDiagnostic {
    /// Attach the file name and contents to a parse error.
    #[must_use]
    pub fn new(name: impl AsRef<str>, src: impl Into<String>, error: &InputError) -> Self {
        Self {
            message: format!("line {}: {}", error.line, error.message),
            src: NamedSource::new(name, src.into()),
            span: (error.offset, error.len).into(),
        }
    }
}

/// Any other failure, with a code per error family.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(colorpath::error))]
pub struct CommandError {
    /// Human-readable error message.
    pub message: String,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl CommandError {
    /// Create a new error without help text.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Render a report with source snippets and help, colored when `color` is set.
///
/// Falls back to the plain message if the graphical handler fails.
#[must_use]
pub fn render(report: &Report, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let mut out = String::new();
    match GraphicalReportHandler::new_themed(theme).render_report(&mut out, &**report) {
        Ok(()) => out,
        Err(_) => report.to_string(),
    }
}

impl From<&Error> for CommandError {
    fn from(error: &Error) -> Self {
        let base = Self::new(error.to_string());
        match error {
            Error::Model(ModelError::BigMTooSmall { node_count, .. }) => base.with_help(format!(
                "use `--big-m nodes` or a value of at least {node_count}"
            )),
            Error::Model(ModelError::SourceIsTarget { .. }) => {
                base.with_help("a path needs distinct source and target nodes")
            }
            Error::Model(ModelError::EmptyColor { .. }) => {
                base.with_help("every palette color must label at least one node")
            }
            Error::Config(ConfigError::Parse(_) | ConfigError::InvalidValue { .. }) => {
                base.with_help("run `colorpath config show` to see the accepted layout")
            }
            _ => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::Color;

    #[test]
    fn input_span_matches_error() {
        let error = InputError::new(2, 10, 3, "invalid weight");
        let diagnostic = InputDiagnostic::new("g.txt", "0 1\n(0,1,abc)\n0 1\n", &error);
        assert_eq!(diagnostic.span.offset(), 10);
        assert_eq!(diagnostic.span.len(), 3);
        assert_eq!(diagnostic.to_string(), "line 2: invalid weight");
    }

    #[test]
    fn big_m_error_suggests_fix() {
        let error = Error::Model(ModelError::BigMTooSmall {
            big_m: 2,
            node_count: 5,
        });
        let diagnostic = CommandError::from(&error);
        assert!(diagnostic.help.unwrap().contains("at least 5"));
    }

    #[test]
    fn render_points_at_token_without_color() {
        let error = InputError::new(2, 9, 3, "invalid weight");
        let source = "0 1\n(0,1,abc)\n0 1\n";
        let report = Report::new(InputDiagnostic::new("g.txt", source, &error));
        let text = render(&report, false);
        assert!(text.contains("line 2: invalid weight"));
        assert!(text.contains("g.txt"));
        assert!(text.contains("here"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn render_includes_help() {
        let error = Error::Model(ModelError::BigMTooSmall {
            big_m: 2,
            node_count: 5,
        });
        let text = render(&Report::new(CommandError::from(&error)), false);
        assert!(text.contains("at least 5"));
    }

    #[test]
    fn empty_color_has_help() {
        let error = Error::Model(ModelError::EmptyColor {
            color: Color::new(9),
        });
        assert!(CommandError::from(&error).help.is_some());
    }
}
