//! Structured term output for the logic-programming backend.
//!
//! AST nodes map one-to-one onto nested terms (functor + ordered
//! arguments, atoms, integers, lists). [`TermBuilder`] is the visitor
//! doing the mapping: an explicit result builder whose stack holds the
//! terms of already-visited subtrees, popped and recombined as each parent
//! hook completes. `Display` renders Prolog-readable text with atom
//! quoting.

use crate::ast::{Clause, Event, Expr, Machine, Pred};
use crate::token::Span;
use crate::vo::VoFormula;
use crate::walk::{self, AstVisitor};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Term {
    Atom(String),
    Int(i64),
    Functor { name: String, args: Vec<Term> },
    List(Vec<Term>),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Term {
        Term::Atom(name.into())
    }

    pub fn functor(name: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Functor {
            name: name.into(),
            args,
        }
    }
}

/// Whether `name` can be printed unquoted.
fn is_plain_atom(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_atom(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_atom(name) {
        f.write_str(name)
    } else {
        write!(f, "'")?;
        for c in name.chars() {
            match c {
                '\'' => write!(f, "\\'")?,
                '\\' => write!(f, "\\\\")?,
                _ => write!(f, "{}", c)?,
            }
        }
        write!(f, "'")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => write_atom(f, name),
            Term::Int(n) => write!(f, "{}", n),
            Term::Functor { name, args } => {
                write_atom(f, name)?;
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Term::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

// ──────────────────────────────────────────────
// AST -> Term
// ──────────────────────────────────────────────

/// Visitor mapping AST nodes to terms via a result stack.
pub struct TermBuilder {
    stack: Vec<Term>,
}

impl TermBuilder {
    fn new() -> Self {
        TermBuilder { stack: Vec::new() }
    }

    /// Map an expression to its term.
    pub fn expr_term(e: &Expr) -> Term {
        let mut b = TermBuilder::new();
        b.visit_expr(e);
        b.finish()
    }

    /// Map a predicate to its term.
    pub fn pred_term(p: &Pred) -> Term {
        let mut b = TermBuilder::new();
        b.visit_pred(p);
        b.finish()
    }

    /// Map a whole machine to its term.
    pub fn machine_term(m: &Machine) -> Term {
        let mut b = TermBuilder::new();
        b.visit_machine(m);
        Term::functor(
            "machine",
            vec![Term::atom(m.name.clone()), Term::List(b.stack)],
        )
    }

    fn finish(mut self) -> Term {
        let term = self.pop();
        debug_assert!(self.stack.is_empty(), "one term per visited root");
        term
    }

    fn pop(&mut self) -> Term {
        self.stack
            .pop()
            .expect("every visited child pushes exactly one term")
    }

    fn pop2(&mut self) -> (Term, Term) {
        let rhs = self.pop();
        let lhs = self.pop();
        (lhs, rhs)
    }

    fn push_binary(&mut self, name: &str) {
        let (lhs, rhs) = self.pop2();
        self.stack.push(Term::functor(name, vec![lhs, rhs]));
    }

    fn assignment_terms(&mut self, assignments: &[(String, Expr)]) -> Term {
        let mut items = Vec::with_capacity(assignments.len());
        for (target, rhs) in assignments {
            self.visit_expr(rhs);
            let value = self.pop();
            items.push(Term::functor(
                "assign",
                vec![Term::atom(target.clone()), value],
            ));
        }
        Term::List(items)
    }
}

impl AstVisitor for TermBuilder {
    fn visit_clause(&mut self, c: &Clause) {
        let term = match c {
            Clause::Sets { names, .. } => Term::functor("sets", vec![name_list(names)]),
            Clause::Constants { names, .. } => Term::functor("constants", vec![name_list(names)]),
            Clause::Variables { names, .. } => Term::functor("variables", vec![name_list(names)]),
            Clause::Properties { predicate, .. } => {
                self.visit_pred(predicate);
                let p = self.pop();
                Term::functor("properties", vec![p])
            }
            Clause::Invariant { predicate, .. } => {
                self.visit_pred(predicate);
                let p = self.pop();
                Term::functor("invariant", vec![p])
            }
            Clause::Initialisation { assignments, .. } => {
                let list = self.assignment_terms(assignments);
                Term::functor("initialisation", vec![list])
            }
            Clause::Operations { events, .. } => {
                let mut items = Vec::with_capacity(events.len());
                for e in events {
                    self.visit_event(e);
                    items.push(self.pop());
                }
                Term::functor("operations", vec![Term::List(items)])
            }
        };
        self.stack.push(term);
    }

    fn visit_event(&mut self, e: &Event) {
        let guard = match &e.guard {
            Some(g) => {
                self.visit_pred(g);
                self.pop()
            }
            None => Term::atom("truth"),
        };
        let assignments = self.assignment_terms(&e.assignments);
        self.stack.push(Term::functor(
            "event",
            vec![Term::atom(e.name.clone()), guard, assignments],
        ));
    }

    fn visit_conjunction(&mut self, p: &Pred) {
        walk::walk_conjunction(self, p);
        self.push_binary("conjunct");
    }
    fn visit_disjunction(&mut self, p: &Pred) {
        walk::walk_binary_pred(self, p);
        self.push_binary("disjunct");
    }
    fn visit_implication(&mut self, p: &Pred) {
        walk::walk_binary_pred(self, p);
        self.push_binary("implication");
    }
    fn visit_equivalence(&mut self, p: &Pred) {
        walk::walk_binary_pred(self, p);
        self.push_binary("equivalence");
    }
    fn visit_negation(&mut self, p: &Pred) {
        if let Pred::Negation { operand, .. } = p {
            self.visit_pred(operand);
            let inner = self.pop();
            self.stack.push(Term::functor("negation", vec![inner]));
        }
    }
    fn visit_comparison(&mut self, p: &Pred) {
        if let Pred::Comparison { op, lhs, rhs, .. } = p {
            self.visit_expr(lhs);
            self.visit_expr(rhs);
            let (l, r) = self.pop2();
            self.stack.push(Term::functor(op.clone(), vec![l, r]));
        }
    }

    fn visit_ident(&mut self, name: &str, _span: Span) {
        self.stack
            .push(Term::functor("identifier", vec![Term::atom(name)]));
    }
    fn visit_int_lit(&mut self, value: i64, _span: Span) {
        self.stack
            .push(Term::functor("integer", vec![Term::Int(value)]));
    }
    fn visit_binary_expr(&mut self, e: &Expr) {
        if let Expr::Binary { op, .. } = e {
            walk::walk_binary_expr(self, e);
            let (l, r) = self.pop2();
            self.stack.push(Term::functor(op.clone(), vec![l, r]));
        }
    }
    fn visit_unary_expr(&mut self, e: &Expr) {
        if let Expr::Unary { op, .. } = e {
            walk::walk_unary_expr(self, e);
            let inner = self.pop();
            self.stack.push(Term::functor(op.clone(), vec![inner]));
        }
    }
}

/// Map a verification-objective formula to its term.
pub fn vo_term(f: &VoFormula) -> Term {
    match f {
        VoFormula::Task { id, .. } => Term::functor("task", vec![Term::atom(id.clone())]),
        VoFormula::Not { operand, .. } => Term::functor("negation", vec![vo_term(operand)]),
        VoFormula::And { lhs, rhs, .. } => {
            Term::functor("conjunct", vec![vo_term(lhs), vo_term(rhs)])
        }
        VoFormula::Or { lhs, rhs, .. } => {
            Term::functor("disjunct", vec![vo_term(lhs), vo_term(rhs)])
        }
        VoFormula::Implies { lhs, rhs, .. } => {
            Term::functor("implication", vec![vo_term(lhs), vo_term(rhs)])
        }
        VoFormula::Equiv { lhs, rhs, .. } => {
            Term::functor("equivalence", vec![vo_term(lhs), vo_term(rhs)])
        }
        VoFormula::Seq { lhs, rhs, .. } => {
            Term::functor("sequential", vec![vo_term(lhs), vo_term(rhs)])
        }
    }
}

fn name_list(names: &[String]) -> Term {
    Term::List(names.iter().map(|n| Term::atom(n.clone())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::GrammarExtension;
    use crate::operators;
    use crate::parser;

    fn pred(src: &str) -> Pred {
        parser::parse_predicate(src, &GrammarExtension::default(), &operators::classical_b())
            .unwrap()
    }

    #[test]
    fn atoms_quote_only_when_needed() {
        assert_eq!(Term::atom("abc_1").to_string(), "abc_1");
        assert_eq!(Term::atom("Machine").to_string(), "'Machine'");
        assert_eq!(Term::atom("don't").to_string(), "'don\\'t'");
    }

    #[test]
    fn comparison_renders_with_operator_functor() {
        let t = TermBuilder::pred_term(&pred("x < 1"));
        assert_eq!(t.to_string(), "'<'(identifier(x),integer(1))");
    }

    #[test]
    fn conjunction_maps_to_nested_conjunct_functors() {
        let t = TermBuilder::pred_term(&pred("x < 1 & y < 2 & z < 3"));
        assert_eq!(
            t.to_string(),
            "conjunct(conjunct('<'(identifier(x),integer(1)),\
             '<'(identifier(y),integer(2))),'<'(identifier(z),integer(3)))"
        );
    }

    #[test]
    fn expression_operators_become_functors() {
        let e = parser::parse_expression(
            "a + b * 2",
            &GrammarExtension::default(),
            &operators::classical_b(),
        )
        .unwrap();
        let t = TermBuilder::expr_term(&e);
        assert_eq!(
            t.to_string(),
            "'+'(identifier(a),'*'(identifier(b),integer(2)))"
        );
    }

    #[test]
    fn machine_term_lists_clauses_in_order() {
        let m = Machine {
            name: "Counter".to_owned(),
            clauses: vec![
                Clause::Variables {
                    names: vec!["x".to_owned()],
                    span: Span::new(1, 1, 1, 2),
                },
                Clause::Invariant {
                    predicate: pred("x >= 0"),
                    span: Span::new(2, 1, 2, 7),
                },
            ],
            span: Span::new(1, 1, 2, 7),
        };
        let t = TermBuilder::machine_term(&m);
        assert_eq!(
            t.to_string(),
            "machine('Counter',[variables([x]),\
             invariant('>='(identifier(x),integer(0)))])"
        );
    }

    #[test]
    fn vo_formula_maps_one_to_one() {
        let f = crate::vo::parse("(MC1 & MC2);TR1").unwrap();
        assert_eq!(
            vo_term(&f).to_string(),
            "sequential(conjunct(task('MC1'),task('MC2')),task('TR1'))"
        );
    }
}
