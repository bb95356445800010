//! Generic AST traversal.
//!
//! [`AstVisitor`] has one hook per node kind; every default recurses into
//! the node's children and does nothing else, so a pass overrides only the
//! hooks it cares about. Dispatch is an exhaustive `match` in the free
//! `walk_*` functions -- adding a node kind breaks compilation here until
//! it is handled.
//!
//! Two traversal strategies exist for predicates:
//!
//! - **Ordered** ([`walk_pred`]): plain left-to-right depth-first
//!   recursion. Stack depth grows with tree depth, so a conjunction chain
//!   of a hundred thousand operands will overflow the call stack.
//! - **Flattened** ([`walk_pred_flattened`]): iterates along conjunction
//!   spines, visiting non-chain subtrees as encountered and firing
//!   [`AstVisitor::visit_chain_link`] once per chain node. Stack depth is
//!   bounded by the nesting of non-chain subtrees, independent of chain
//!   length. The price: when only the *left* child continues the chain,
//!   the right subtree is visited first, so traversal order is not
//!   left-to-right for conjunctions. A pass choosing this strategy must be
//!   order-insensitive for conjunction nodes (counting, set accumulation);
//!   order-sensitive passes (pretty-printing) must use [`walk_pred`].
//!
//! Traversal itself cannot fail; anything a hook raises (panics) is not
//! caught here.
//!
//! [`ClauseVisitor`] is the selective variant: one override point per
//! top-level clause kind, each defaulting to a no-op that does *not*
//! descend, so a pass interested in two clause kinds never walks the rest
//! of the machine.

use crate::ast::{Clause, Event, Expr, Machine, Pred};
use crate::token::Span;

// ──────────────────────────────────────────────
// Full visitor
// ──────────────────────────────────────────────

pub trait AstVisitor {
    fn visit_machine(&mut self, m: &Machine) {
        walk_machine(self, m)
    }
    fn visit_clause(&mut self, c: &Clause) {
        walk_clause(self, c)
    }
    fn visit_event(&mut self, e: &Event) {
        walk_event(self, e)
    }

    /// Dispatch a predicate to its kind hook.
    fn visit_pred(&mut self, p: &Pred) {
        walk_pred(self, p)
    }
    fn visit_conjunction(&mut self, p: &Pred) {
        walk_conjunction(self, p)
    }
    fn visit_disjunction(&mut self, p: &Pred) {
        walk_binary_pred(self, p)
    }
    fn visit_implication(&mut self, p: &Pred) {
        walk_binary_pred(self, p)
    }
    fn visit_equivalence(&mut self, p: &Pred) {
        walk_binary_pred(self, p)
    }
    fn visit_negation(&mut self, p: &Pred) {
        walk_negation(self, p)
    }
    fn visit_comparison(&mut self, p: &Pred) {
        walk_comparison(self, p)
    }

    /// Fired once per conjunction node by the flattened strategy, which
    /// never calls [`AstVisitor::visit_conjunction`]. Default: no-op.
    fn visit_chain_link(&mut self, _p: &Pred) {}

    /// Dispatch an expression to its kind hook.
    fn visit_expr(&mut self, e: &Expr) {
        walk_expr(self, e)
    }
    fn visit_ident(&mut self, _name: &str, _span: Span) {}
    fn visit_int_lit(&mut self, _value: i64, _span: Span) {}
    fn visit_binary_expr(&mut self, e: &Expr) {
        walk_binary_expr(self, e)
    }
    fn visit_unary_expr(&mut self, e: &Expr) {
        walk_unary_expr(self, e)
    }
}

pub fn walk_machine<V: AstVisitor + ?Sized>(v: &mut V, m: &Machine) {
    for c in &m.clauses {
        v.visit_clause(c);
    }
}

pub fn walk_clause<V: AstVisitor + ?Sized>(v: &mut V, c: &Clause) {
    match c {
        Clause::Sets { .. } | Clause::Constants { .. } | Clause::Variables { .. } => {}
        Clause::Properties { predicate, .. } | Clause::Invariant { predicate, .. } => {
            v.visit_pred(predicate)
        }
        Clause::Initialisation { assignments, .. } => {
            for (_, rhs) in assignments {
                v.visit_expr(rhs);
            }
        }
        Clause::Operations { events, .. } => {
            for e in events {
                v.visit_event(e);
            }
        }
    }
}

pub fn walk_event<V: AstVisitor + ?Sized>(v: &mut V, e: &Event) {
    if let Some(guard) = &e.guard {
        v.visit_pred(guard);
    }
    for (_, rhs) in &e.assignments {
        v.visit_expr(rhs);
    }
}

/// Ordered predicate dispatch: left-to-right depth-first.
pub fn walk_pred<V: AstVisitor + ?Sized>(v: &mut V, p: &Pred) {
    match p {
        Pred::Conjunction { .. } => v.visit_conjunction(p),
        Pred::Disjunction { .. } => v.visit_disjunction(p),
        Pred::Implication { .. } => v.visit_implication(p),
        Pred::Equivalence { .. } => v.visit_equivalence(p),
        Pred::Negation { .. } => v.visit_negation(p),
        Pred::Comparison { .. } => v.visit_comparison(p),
    }
}

pub fn walk_conjunction<V: AstVisitor + ?Sized>(v: &mut V, p: &Pred) {
    if let Pred::Conjunction { lhs, rhs, .. } = p {
        v.visit_pred(lhs);
        v.visit_pred(rhs);
    }
}

pub fn walk_binary_pred<V: AstVisitor + ?Sized>(v: &mut V, p: &Pred) {
    match p {
        Pred::Disjunction { lhs, rhs, .. }
        | Pred::Implication { lhs, rhs, .. }
        | Pred::Equivalence { lhs, rhs, .. } => {
            v.visit_pred(lhs);
            v.visit_pred(rhs);
        }
        _ => {}
    }
}

fn walk_negation<V: AstVisitor + ?Sized>(v: &mut V, p: &Pred) {
    if let Pred::Negation { operand, .. } = p {
        v.visit_pred(operand);
    }
}

fn walk_comparison<V: AstVisitor + ?Sized>(v: &mut V, p: &Pred) {
    if let Pred::Comparison { lhs, rhs, .. } = p {
        v.visit_expr(lhs);
        v.visit_expr(rhs);
    }
}

pub fn walk_expr<V: AstVisitor + ?Sized>(v: &mut V, e: &Expr) {
    match e {
        Expr::Ident { name, span } => v.visit_ident(name, *span),
        Expr::IntLit { value, span } => v.visit_int_lit(*value, *span),
        Expr::Binary { .. } => v.visit_binary_expr(e),
        Expr::Unary { .. } => v.visit_unary_expr(e),
    }
}

pub fn walk_binary_expr<V: AstVisitor + ?Sized>(v: &mut V, e: &Expr) {
    if let Expr::Binary { lhs, rhs, .. } = e {
        v.visit_expr(lhs);
        v.visit_expr(rhs);
    }
}

pub fn walk_unary_expr<V: AstVisitor + ?Sized>(v: &mut V, e: &Expr) {
    if let Expr::Unary { operand, .. } = e {
        v.visit_expr(operand);
    }
}

// ──────────────────────────────────────────────
// Flattened strategy for conjunction chains
// ──────────────────────────────────────────────

/// Stack-safe traversal of a predicate whose conjunctions may form long
/// chains. See the module docs for the order caveat.
pub fn walk_pred_flattened<V: AstVisitor + ?Sized>(v: &mut V, root: &Pred) {
    let mut node = root;
    loop {
        let Pred::Conjunction { lhs, rhs, .. } = node else {
            v.visit_pred(node);
            return;
        };
        v.visit_chain_link(node);
        let left_chain = lhs.is_conjunction();
        let right_chain = rhs.is_conjunction();
        if right_chain {
            // Continue along the right spine; the left subtree is visited
            // now, flattening its own spine if it is also a chain.
            if left_chain {
                walk_pred_flattened(v, lhs);
            } else {
                v.visit_pred(lhs);
            }
            node = rhs;
        } else if left_chain {
            // Only the left child continues the chain: visit the right
            // subtree immediately (out of source order) and keep walking.
            v.visit_pred(rhs);
            node = lhs;
        } else {
            v.visit_pred(lhs);
            v.visit_pred(rhs);
            return;
        }
    }
}

// ──────────────────────────────────────────────
// Selective clause traversal
// ──────────────────────────────────────────────

/// One override point per clause kind; every default is a no-op that does
/// not descend. A pass that wants to recurse into a clause it overrides
/// re-invokes the [`AstVisitor`] machinery on the clause's children
/// itself.
pub trait ClauseVisitor {
    fn visit_sets(&mut self, _names: &[String], _span: Span) {}
    fn visit_constants(&mut self, _names: &[String], _span: Span) {}
    fn visit_variables(&mut self, _names: &[String], _span: Span) {}
    fn visit_properties(&mut self, _predicate: &Pred, _span: Span) {}
    fn visit_invariant(&mut self, _predicate: &Pred, _span: Span) {}
    fn visit_initialisation(&mut self, _assignments: &[(String, Expr)], _span: Span) {}
    fn visit_operations(&mut self, _events: &[Event], _span: Span) {}
}

/// Dispatch each top-level clause to its [`ClauseVisitor`] hook.
pub fn walk_clauses<V: ClauseVisitor + ?Sized>(v: &mut V, m: &Machine) {
    for c in &m.clauses {
        match c {
            Clause::Sets { names, span } => v.visit_sets(names, *span),
            Clause::Constants { names, span } => v.visit_constants(names, *span),
            Clause::Variables { names, span } => v.visit_variables(names, *span),
            Clause::Properties { predicate, span } => v.visit_properties(predicate, *span),
            Clause::Invariant { predicate, span } => v.visit_invariant(predicate, *span),
            Clause::Initialisation { assignments, span } => {
                v.visit_initialisation(assignments, *span)
            }
            Clause::Operations { events, span } => v.visit_operations(events, *span),
        }
    }
}
