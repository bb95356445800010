//! Predicate and expression parsing by precedence climbing.
//!
//! The grammar of operators lives in an [`OperatorTable`]; the parser only
//! knows the climbing algorithm. For each infix occurrence it looks the
//! symbol up, stops when the priority falls below the current threshold,
//! and recurses with the threshold raised by one for left-associative
//! operators (kept equal for right-associative ones). Equal-priority
//! left-associative operators therefore chain left-deep,
//! right-associative ones right-deep.
//!
//! [`ExpressionBuilder`] applies the same algorithm to a pre-split infix
//! region (operand slice + operator occurrence slice), for callers whose
//! raw parse stage has already isolated the operands.

use crate::ast::{Expr, Pred};
use crate::error::Diagnostic;
use crate::extension::GrammarExtension;
use crate::lexer;
use crate::operators::{Assoc, OperatorTable};
use crate::token::{Span, Token, TokenKind};

/// Symbols that combine predicates rather than expressions.
const PRED_CONNECTIVES: &[&str] = &["&", "or", "=>", "<=>"];

/// Relational symbols forming comparison atoms between two expressions.
const RELATIONAL: &[&str] = &["=", "/=", "<", "<=", ">", ">=", ":"];

/// Parse an expression from source text, reclassifying identifiers through
/// `ext` first.
pub fn parse_expression(
    src: &str,
    ext: &GrammarExtension,
    table: &OperatorTable,
) -> Result<Expr, Diagnostic> {
    let tokens = ext.classify_all(lexer::lex(src)?);
    let mut parser = Parser::new(&tokens, table);
    let expr = parser.parse_expr(0)?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Parse a predicate from source text, reclassifying identifiers through
/// `ext` first.
pub fn parse_predicate(
    src: &str,
    ext: &GrammarExtension,
    table: &OperatorTable,
) -> Result<Pred, Diagnostic> {
    let tokens = ext.classify_all(lexer::lex(src)?);
    let mut parser = Parser::new(&tokens, table);
    let pred = parser.parse_pred(0)?;
    parser.expect_eof()?;
    Ok(pred)
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    table: &'a OperatorTable,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], table: &'a OperatorTable) -> Self {
        Parser {
            tokens,
            pos: 0,
            table,
        }
    }

    fn cur(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn cur_span(&self) -> Span {
        self.cur().span
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn err(&self, msg: impl Into<String>) -> Diagnostic {
        Diagnostic::parse(self.cur_span(), msg)
    }

    fn is_word(&self, w: &str) -> bool {
        let t = self.cur();
        t.kind == TokenKind::Ident && t.text == w
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Span, Diagnostic> {
        if self.cur().kind == kind {
            let span = self.cur_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.err(format!("expected {}, got '{}'", what, self.cur().text)))
        }
    }

    fn expect_eof(&mut self) -> Result<(), Diagnostic> {
        if self.cur().kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.err(format!("unexpected trailing input '{}'", self.cur().text)))
        }
    }

    /// The next infix operator occurrence, if the current token can be one:
    /// symbolic operators always, identifier-shaped words only when the
    /// table knows them.
    fn peek_infix(&self) -> Option<(&'a str, Span)> {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        match t.kind {
            TokenKind::Operator => Some((t.text.as_str(), t.span)),
            TokenKind::Ident if self.table.contains(&t.text) => Some((t.text.as_str(), t.span)),
            _ => None,
        }
    }

    // -- Predicates ----------------------------------------------

    fn parse_pred(&mut self, min_prio: u32) -> Result<Pred, Diagnostic> {
        let mut left = self.parse_pred_primary()?;
        loop {
            let Some((sym, sym_span)) = self.peek_infix() else {
                break;
            };
            if !PRED_CONNECTIVES.contains(&sym) {
                break;
            }
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
            let right = self.parse_pred(next_min)?;
            left = pred_binary(&sym, left, right);
        }
        Ok(left)
    }

    fn parse_pred_primary(&mut self) -> Result<Pred, Diagnostic> {
        if self.is_word("not") {
            let start = self.cur_span();
            self.advance();
            self.expect(TokenKind::LParen, "'(' after 'not'")?;
            let operand = self.parse_pred(0)?;
            let end = self.expect(TokenKind::RParen, "')'")?;
            return Ok(Pred::Negation {
                operand: Box::new(operand),
                span: start.union(end),
            });
        }
        if self.cur().kind == TokenKind::LParen {
            // A '(' opens either a parenthesized predicate or the left
            // expression of a comparison; try the comparison reading first
            // and rewind if it does not fit.
            let save = self.pos;
            match self.parse_comparison() {
                Ok(p) => return Ok(p),
                Err(_) => self.pos = save,
            }
            self.advance();
            let inner = self.parse_pred(0)?;
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(inner);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Pred, Diagnostic> {
        let lhs = self.parse_expr(0)?;
        let Some((sym, _)) = self.peek_infix() else {
            return Err(self.err("expected comparison operator"));
        };
        if !RELATIONAL.contains(&sym) {
            return Err(self.err(format!("expected comparison operator, got '{}'", sym)));
        }
        let op = sym.to_owned();
        self.advance();
        let rhs = self.parse_expr(0)?;
        let span = lhs.span().union(rhs.span());
        Ok(Pred::Comparison { op, lhs, rhs, span })
    }

    // -- Expressions ---------------------------------------------

    fn parse_expr(&mut self, min_prio: u32) -> Result<Expr, Diagnostic> {
        let mut left = self.parse_expr_primary()?;
        loop {
            let Some((sym, sym_span)) = self.peek_infix() else {
                break;
            };
            if PRED_CONNECTIVES.contains(&sym) || RELATIONAL.contains(&sym) {
                break;
            }
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
            let right = self.parse_expr(next_min)?;
            left = Expr::binary(sym, left, right);
        }
        Ok(left)
    }

    fn parse_expr_primary(&mut self) -> Result<Expr, Diagnostic> {
        let tok = self.cur().clone();
        match tok.kind {
            TokenKind::Ident => {
                self.advance();
                Ok(Expr::Ident {
                    name: tok.text,
                    span: tok.span,
                })
            }
            TokenKind::IntLit => {
                let value: i64 = tok
                    .text
                    .parse()
                    .map_err(|_| Diagnostic::parse(tok.span, "integer literal out of range"))?;
                self.advance();
                Ok(Expr::IntLit {
                    value,
                    span: tok.span,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Operator if tok.text == "-" => {
                self.advance();
                let operand = self.parse_expr_primary()?;
                let span = tok.span.union(operand.span());
                Ok(Expr::Unary {
                    op: "-".to_owned(),
                    operand: Box::new(operand),
                    span,
                })
            }
            kind if kind.is_contextual_keyword() => {
                Err(self.err(format!("unexpected keyword '{}'", tok.text)))
            }
            _ => Err(self.err(format!("expected expression, got '{}'", tok.text))),
        }
    }
}

fn pred_binary(sym: &str, lhs: Pred, rhs: Pred) -> Pred {
    let span = lhs.span().union(rhs.span());
    let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
    match sym {
        "&" => Pred::Conjunction { lhs, rhs, span },
        "or" => Pred::Disjunction { lhs, rhs, span },
        "=>" => Pred::Implication { lhs, rhs, span },
        "<=>" => Pred::Equivalence { lhs, rhs, span },
        other => unreachable!("'{}' is not a predicate connective", other),
    }
}

// ──────────────────────────────────────────────
// ExpressionBuilder
// ──────────────────────────────────────────────

/// Shapes a pre-split infix region into a binary-operator tree.
///
/// Used when the raw parse stage delivers a flat operand/operator chain
/// instead of a token stream -- the operand sequence must have exactly one
/// more element than the operator sequence.
pub struct ExpressionBuilder<'a> {
    table: &'a OperatorTable,
}

impl<'a> ExpressionBuilder<'a> {
    pub fn new(table: &'a OperatorTable) -> Self {
        ExpressionBuilder { table }
    }

    /// Combine `operands` under `operators` according to the table.
    ///
    /// An unknown operator symbol is a parse failure carrying its span.
    /// A malformed sequence length is an internal defect and panics.
    pub fn shape(
        &self,
        operands: &[Expr],
        operators: &[(String, Span)],
    ) -> Result<Expr, Diagnostic> {
        assert_eq!(
            operands.len(),
            operators.len() + 1,
            "infix chain needs one more operand than operators"
        );
        let mut cursor = 0usize;
        let expr = self.climb(&mut cursor, operands, operators, 0)?;
        debug_assert_eq!(cursor, operands.len());
        Ok(expr)
    }

    fn climb(
        &self,
        cursor: &mut usize,
        operands: &[Expr],
        operators: &[(String, Span)],
        min_prio: u32,
    ) -> Result<Expr, Diagnostic> {
        let mut left = operands[*cursor].clone();
        *cursor += 1;
        while *cursor - 1 < operators.len() {
            let (sym, sym_span) = &operators[*cursor - 1];
            let Some(spec) = self.table.lookup(sym) else {
                return Err(Diagnostic::parse(
                    *sym_span,
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
            let right = self.climb(cursor, operands, operators, next_min)?;
            left = Expr::binary(sym.clone(), left, right);
        }
        Ok(left)
    }
}
