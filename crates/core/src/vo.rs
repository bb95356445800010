//! The verification-objective language: a small boolean/sequencing
//! formula over named verification tasks, used to express composite
//! verification plans (`"(MC1 & MC2);TR1"`).
//!
//! Parsing reuses the shared scanner and the precedence-climbing scheme
//! over [`crate::operators::verification_objectives`]; `or` and `not` are
//! word-shaped connectives.

use crate::error::Diagnostic;
use crate::lexer;
use crate::operators::{self, Assoc, OperatorTable};
use crate::token::{Span, Token, TokenKind};

/// A verification-objective formula.
#[derive(Debug, Clone, PartialEq)]
pub enum VoFormula {
    /// Atomic reference to a registered verification task.
    Task { id: String, span: Span },
    Not {
        operand: Box<VoFormula>,
        span: Span,
    },
    And {
        lhs: Box<VoFormula>,
        rhs: Box<VoFormula>,
        span: Span,
    },
    Or {
        lhs: Box<VoFormula>,
        rhs: Box<VoFormula>,
        span: Span,
    },
    Implies {
        lhs: Box<VoFormula>,
        rhs: Box<VoFormula>,
        span: Span,
    },
    Equiv {
        lhs: Box<VoFormula>,
        rhs: Box<VoFormula>,
        span: Span,
    },
    /// Sequential composition: run the left plan, then the right.
    Seq {
        lhs: Box<VoFormula>,
        rhs: Box<VoFormula>,
        span: Span,
    },
}

impl VoFormula {
    pub fn span(&self) -> Span {
        match self {
            VoFormula::Task { span, .. }
            | VoFormula::Not { span, .. }
            | VoFormula::And { span, .. }
            | VoFormula::Or { span, .. }
            | VoFormula::Implies { span, .. }
            | VoFormula::Equiv { span, .. }
            | VoFormula::Seq { span, .. } => *span,
        }
    }
}

/// Parse a verification-objective formula from source text.
pub fn parse(src: &str) -> Result<VoFormula, Diagnostic> {
    let tokens = lexer::lex(src)?;
    let table = operators::verification_objectives();
    let mut parser = VoParser {
        tokens: &tokens,
        pos: 0,
        table: &table,
    };
    let formula = parser.parse_formula(0)?;
    parser.expect_eof()?;
    Ok(formula)
}

struct VoParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    table: &'a OperatorTable,
}

impl<'a> VoParser<'a> {
    fn cur(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn err(&self, msg: impl Into<String>) -> Diagnostic {
        Diagnostic::parse(self.cur().span, msg)
    }

    fn expect_eof(&mut self) -> Result<(), Diagnostic> {
        if self.cur().kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.err(format!("unexpected trailing input '{}'", self.cur().text)))
        }
    }

    /// The next connective occurrence: symbolic operators always,
    /// identifier-shaped words only when the table knows them (`or`).
    fn peek_connective(&self) -> Option<(&'a str, Span)> {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        match t.kind {
            TokenKind::Operator => Some((t.text.as_str(), t.span)),
            TokenKind::Ident if self.table.contains(&t.text) => Some((t.text.as_str(), t.span)),
            _ => None,
        }
    }

    fn parse_formula(&mut self, min_prio: u32) -> Result<VoFormula, Diagnostic> {
        let mut left = self.parse_primary()?;
        loop {
            let Some((sym, sym_span)) = self.peek_connective() else {
                break;
            };
            let Some(spec) = self.table.lookup(sym) else {
                return Err(Diagnostic::parse(
                    sym_span,
                    format!("unknown operator '{}'", sym),
                ));
            };
            if spec.priority < min_prio {
                break;
            }
            let next_min = match spec.assoc {
                Assoc::Left => spec.priority + 1,
                Assoc::Right => spec.priority,
            };
            let sym = sym.to_owned();
            self.advance();
            let right = self.parse_formula(next_min)?;
            left = vo_binary(&sym, left, right);
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<VoFormula, Diagnostic> {
        let tok = self.cur().clone();
        match tok.kind {
            TokenKind::Ident if tok.text == "not" => {
                self.advance();
                let operand = self.parse_primary()?;
                let span = tok.span.union(operand.span());
                Ok(VoFormula::Not {
                    operand: Box::new(operand),
                    span,
                })
            }
            TokenKind::Ident => {
                self.advance();
                Ok(VoFormula::Task {
                    id: tok.text,
                    span: tok.span,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_formula(0)?;
                if self.cur().kind != TokenKind::RParen {
                    return Err(self.err(format!("expected ')', got '{}'", self.cur().text)));
                }
                self.advance();
                Ok(inner)
            }
            _ => Err(self.err(format!(
                "expected task reference, 'not' or '(', got '{}'",
                self.cur().text
            ))),
        }
    }
}

fn vo_binary(sym: &str, lhs: VoFormula, rhs: VoFormula) -> VoFormula {
    let span = lhs.span().union(rhs.span());
    let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
    match sym {
        "&" => VoFormula::And { lhs, rhs, span },
        "or" => VoFormula::Or { lhs, rhs, span },
        "=>" => VoFormula::Implies { lhs, rhs, span },
        "<=>" => VoFormula::Equiv { lhs, rhs, span },
        ";" => VoFormula::Seq { lhs, rhs, span },
        other => unreachable!("'{}' is not a verification-objective connective", other),
    }
}
