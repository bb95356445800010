//! Tokens and source spans shared by every Veris front end.
//!
//! Tokens are immutable once created: reclassification (see
//! [`crate::extension`]) builds a *new* token with the same text and span
//! but a different kind, it never edits one in place.

use serde::Serialize;
use std::fmt;

/// A source region: 1-based start/end line and column.
///
/// `end_col` points one past the last character of the region, so a
/// single-character token at line 1, column 3 spans `1:3-1:4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Span {
        Span {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// The smallest span covering both `self` and `other`.
    ///
    /// Used during AST construction so every node covers the union of its
    /// children plus its own keywords and punctuation.
    pub fn union(self, other: Span) -> Span {
        let (start_line, start_col) =
            if (other.start_line, other.start_col) < (self.start_line, self.start_col) {
                (other.start_line, other.start_col)
            } else {
                (self.start_line, self.start_col)
            };
        let (end_line, end_col) = if (other.end_line, other.end_col) > (self.end_line, self.end_col)
        {
            (other.end_line, other.end_col)
        } else {
            (self.end_line, self.end_col)
        };
        Span {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

/// Token kinds. A closed set: the scanner produces the base kinds, and
/// grammar extensions may reclassify `Ident` tokens into the `Kw*` kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Identifier or word-shaped operator (`or`, `mod`, `not`).
    Ident,
    /// Integer literal; the token text holds the digits.
    IntLit,
    /// Symbolic operator; the token text holds the symbol.
    Operator,
    LParen,
    RParen,
    Comma,
    /// End of input. Always the last token of a stream.
    Eof,
    // Contextual keywords of the rules sub-language. Never produced by the
    // scanner directly -- only by reclassification through an extension.
    KwRule,
    KwConstraint,
    KwComputation,
    KwDefine,
    KwExpect,
    KwCounterexample,
    KwActivation,
    KwErrorType,
    KwClassification,
    KwRuleid,
}

impl TokenKind {
    /// Whether this kind is a contextual keyword introduced by a grammar
    /// extension (as opposed to a base kind the scanner can emit).
    pub fn is_contextual_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwRule
                | TokenKind::KwConstraint
                | TokenKind::KwComputation
                | TokenKind::KwDefine
                | TokenKind::KwExpect
                | TokenKind::KwCounterexample
                | TokenKind::KwActivation
                | TokenKind::KwErrorType
                | TokenKind::KwClassification
                | TokenKind::KwRuleid
        )
    }
}

/// A lexical unit: kind tag, literal text, and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Token {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_takes_extremes_across_lines() {
        let a = Span::new(2, 5, 2, 9);
        let b = Span::new(1, 30, 1, 34);
        let u = a.union(b);
        assert_eq!(u, Span::new(1, 30, 2, 9));
    }

    #[test]
    fn union_is_commutative() {
        let a = Span::new(3, 1, 3, 4);
        let b = Span::new(3, 2, 4, 1);
        assert_eq!(a.union(b), b.union(a));
    }

    #[test]
    fn span_displays_as_range() {
        assert_eq!(Span::new(1, 3, 1, 4).to_string(), "1:3-1:4");
    }
}
