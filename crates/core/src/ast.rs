//! AST types shared by the front ends.
//!
//! One closed enum per syntactic category -- expressions, predicates,
//! machine clauses -- with the machine and event structs around them.
//! Every node owns its children exclusively (strict tree) and carries a
//! span covering the union of its children's spans plus its own keywords.
//! Nodes are built once and read-only afterward; adding a node kind makes
//! every exhaustive `match` in the traversal framework fail to compile
//! until the new kind is handled.

use crate::token::Span;

// ──────────────────────────────────────────────
// Expressions
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident {
        name: String,
        span: Span,
    },
    IntLit {
        value: i64,
        span: Span,
    },
    /// Binary operator application, tagged with the operator symbol.
    Binary {
        op: String,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    /// Prefix operator application (unary minus).
    Unary {
        op: String,
        operand: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident { span, .. }
            | Expr::IntLit { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. } => *span,
        }
    }

    /// Build a binary node whose span is the union of its operands'.
    pub fn binary(op: impl Into<String>, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span().union(rhs.span());
        Expr::Binary {
            op: op.into(),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        }
    }
}

// ──────────────────────────────────────────────
// Predicates
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Pred {
    /// The canonical chain node: long uniform `&` chains are common in
    /// generated machines, so traversal treats this kind specially.
    Conjunction {
        lhs: Box<Pred>,
        rhs: Box<Pred>,
        span: Span,
    },
    Disjunction {
        lhs: Box<Pred>,
        rhs: Box<Pred>,
        span: Span,
    },
    Implication {
        lhs: Box<Pred>,
        rhs: Box<Pred>,
        span: Span,
    },
    Equivalence {
        lhs: Box<Pred>,
        rhs: Box<Pred>,
        span: Span,
    },
    Negation {
        operand: Box<Pred>,
        span: Span,
    },
    /// Relational atom between two expressions, tagged with the operator.
    Comparison {
        op: String,
        lhs: Expr,
        rhs: Expr,
        span: Span,
    },
}

impl Pred {
    pub fn span(&self) -> Span {
        match self {
            Pred::Conjunction { span, .. }
            | Pred::Disjunction { span, .. }
            | Pred::Implication { span, .. }
            | Pred::Equivalence { span, .. }
            | Pred::Negation { span, .. }
            | Pred::Comparison { span, .. } => *span,
        }
    }

    pub fn is_conjunction(&self) -> bool {
        matches!(self, Pred::Conjunction { .. })
    }

    /// Build a conjunction whose span is the union of its operands'.
    pub fn conj(lhs: Pred, rhs: Pred) -> Pred {
        let span = lhs.span().union(rhs.span());
        Pred::Conjunction {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        }
    }
}

// ──────────────────────────────────────────────
// Machines, clauses, events
// ──────────────────────────────────────────────

/// A machine: name plus its top-level clauses, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    pub name: String,
    pub clauses: Vec<Clause>,
    pub span: Span,
}

/// Top-level machine sections.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Sets { names: Vec<String>, span: Span },
    Constants { names: Vec<String>, span: Span },
    Variables { names: Vec<String>, span: Span },
    Properties { predicate: Pred, span: Span },
    Invariant { predicate: Pred, span: Span },
    Initialisation { assignments: Vec<(String, Expr)>, span: Span },
    Operations { events: Vec<Event>, span: Span },
}

impl Clause {
    pub fn span(&self) -> Span {
        match self {
            Clause::Sets { span, .. }
            | Clause::Constants { span, .. }
            | Clause::Variables { span, .. }
            | Clause::Properties { span, .. }
            | Clause::Invariant { span, .. }
            | Clause::Initialisation { span, .. }
            | Clause::Operations { span, .. } => *span,
        }
    }
}

/// An event: optional guard, then assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub guard: Option<Pred>,
    pub assignments: Vec<(String, Expr)>,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_span_covers_both_operands() {
        let a = Expr::Ident {
            name: "a".to_owned(),
            span: Span::new(1, 1, 1, 2),
        };
        let b = Expr::Ident {
            name: "b".to_owned(),
            span: Span::new(1, 5, 1, 6),
        };
        let e = Expr::binary("+", a, b);
        assert_eq!(e.span(), Span::new(1, 1, 1, 6));
    }

    #[test]
    fn conj_span_covers_both_operands() {
        let lhs = Pred::Comparison {
            op: "<".to_owned(),
            lhs: Expr::Ident {
                name: "x".to_owned(),
                span: Span::new(1, 1, 1, 2),
            },
            rhs: Expr::IntLit {
                value: 1,
                span: Span::new(1, 5, 1, 6),
            },
            span: Span::new(1, 1, 1, 6),
        };
        let rhs = lhs.clone();
        let p = Pred::conj(lhs, rhs);
        assert!(p.is_conjunction());
        assert_eq!(p.span(), Span::new(1, 1, 1, 6));
    }
}
