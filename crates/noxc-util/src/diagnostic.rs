//! Diagnostic rendering.
//!
//! The compiler fails on the first error of each phase, and each phase has
//! its own typed error (`LexError`, `ParseError`, `SemanticError`). This
//! module is the common presentation layer: every phase error converts
//! into a [`Diagnostic`], and a driver renders that against the source
//! buffer to produce the familiar
//!
//! ```text
//! error: Expected ';' after expression
//!  --> 3:14
//!   |
//! 3 |     return a + b
//!   |              ^
//! ```

use std::fmt;

use crate::Span;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Aborts compilation.
    Error,
    /// Does not abort compilation.
    Warning,
    /// Supplementary information attached to another diagnostic.
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => f.write_str("error"),
            Level::Warning => f.write_str("warning"),
            Level::Note => f.write_str("note"),
        }
    }
}

/// A diagnostic message anchored to a source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Renders the diagnostic against the source it refers to.
    ///
    /// Produces the header line, the location line and, when the span
    /// points at a real location, the offending source line with a caret
    /// underneath. Synthesized spans ([`Span::DUMMY`]) render without a
    /// snippet.
    pub fn render(&self, source: &str) -> String {
        let mut out = format!("{}: {}\n", self.level, self.message);

        if self.span == Span::DUMMY || self.span.line == 0 {
            return out;
        }

        out.push_str(&format!(" --> {}\n", self.span));

        let line_no = self.span.line as usize;
        let Some(line_text) = source.lines().nth(line_no - 1) else {
            return out;
        };

        let gutter_width = line_no.to_string().len();
        let gutter = " ".repeat(gutter_width);
        out.push_str(&format!("{} |\n", gutter));
        out.push_str(&format!("{} | {}\n", line_no, line_text));

        let caret_col = (self.span.column as usize).saturating_sub(1);
        let caret_len = self
            .span
            .len()
            .clamp(1, line_text.len().saturating_sub(caret_col).max(1));
        out.push_str(&format!(
            "{} | {}{}\n",
            gutter,
            " ".repeat(caret_col),
            "^".repeat(caret_len)
        ));

        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_source() {
        let diag = Diagnostic::error("Expected expression", Span::new(0, 1, 1, 1));
        assert_eq!(diag.to_string(), "error: Expected expression");
    }

    #[test]
    fn test_render_points_at_offending_column() {
        let source = "fn main() {\n    return a + b\n}\n";
        let diag = Diagnostic::error(
            "Expected ';' after expression",
            Span::new(28, 29, 2, 17),
        );
        let rendered = diag.render(source);
        assert!(rendered.starts_with("error: Expected ';' after expression\n"));
        assert!(rendered.contains(" --> 2:17\n"));
        assert!(rendered.contains("2 |     return a + b\n"));
        let caret_line = rendered.lines().last().unwrap();
        assert_eq!(caret_line.find('^'), Some(2 + 2 + 16));
    }

    #[test]
    fn test_render_dummy_span_has_no_snippet() {
        let diag = Diagnostic::error("broken", Span::DUMMY);
        let rendered = diag.render("let x = 1;");
        assert_eq!(rendered, "error: broken\n");
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Error.to_string(), "error");
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(Level::Note.to_string(), "note");
    }
}
