//! Source-level diagnostics.
//!
//! Every user-facing failure carries the source span involved, a
//! human-readable message, and a machine-distinguishable kind. Internal
//! configuration defects (bad operator tables, unconstructible keyword
//! mappings) are *not* diagnostics; they have their own error types in
//! [`crate::operators`] and [`crate::extension`] and surface when the
//! configuration value is built, never mid-parse.

use crate::token::Span;
use serde::Serialize;
use std::fmt;

/// The failure stage a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Lex,
    Parse,
    Scope,
    Type,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Lex => "lex",
            ErrorKind::Parse => "parse",
            ErrorKind::Scope => "scope",
            ErrorKind::Type => "type",
        }
    }
}

/// A diagnostic: kind, source span, message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn lex(span: Span, message: impl Into<String>) -> Self {
        Diagnostic::new(ErrorKind::Lex, span, message)
    }

    pub fn parse(span: Span, message: impl Into<String>) -> Self {
        Diagnostic::new(ErrorKind::Parse, span, message)
    }

    pub fn scope(span: Span, message: impl Into<String>) -> Self {
        Diagnostic::new(ErrorKind::Scope, span, message)
    }

    pub fn type_error(span: Span, message: impl Into<String>) -> Self {
        Diagnostic::new(ErrorKind::Type, span, message)
    }

    /// Serialize to a JSON value with a fixed field layout, for embedding
    /// applications that ship diagnostics over a machine boundary.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind":       self.kind.as_str(),
            "start_line": self.span.start_line,
            "start_col":  self.span.start_col,
            "end_line":   self.span.end_line,
            "end_col":    self.span.end_col,
            "message":    self.message,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error at {}: {}",
            self.kind.as_str(),
            self.span,
            self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_span() {
        let d = Diagnostic::parse(Span::new(1, 3, 1, 5), "unknown operator '**'");
        assert_eq!(d.to_string(), "parse error at 1:3-1:5: unknown operator '**'");
    }

    #[test]
    fn json_value_has_flat_layout() {
        let d = Diagnostic::scope(Span::new(2, 1, 2, 4), "unknown task 'TR1'");
        let v = d.to_json_value();
        assert_eq!(v["kind"], "scope");
        assert_eq!(v["start_line"], 2);
        assert_eq!(v["message"], "unknown task 'TR1'");
    }
}
