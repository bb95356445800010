//! veris-core: parsing and analysis core for the Veris family of
//! formal-modelling front ends.
//!
//! The pipeline: source text is scanned into a token stream
//! ([`lexer`]), identifiers are reclassified through the active
//! [`extension::GrammarExtension`], expression and predicate regions are
//! shaped by precedence climbing over an [`operators::OperatorTable`]
//! ([`parser`]), and downstream passes walk the resulting AST through the
//! traversal framework ([`walk`]) -- producing structured terms
//! ([`terms`]) or diagnostics ([`error::Diagnostic`]).
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`Token`], [`TokenKind`], [`Span`] -- the token-stream interface
//! - [`GrammarExtension`] -- contextual-keyword reclassification
//! - [`OperatorTable`], [`OperatorSpec`], [`Assoc`] -- operator data
//! - [`Expr`], [`Pred`], [`Clause`], [`Machine`], [`Event`],
//!   [`VoFormula`] -- the AST categories
//! - [`AstVisitor`], [`ClauseVisitor`] -- traversal
//! - [`Term`] -- structured term output
//! - [`Diagnostic`], [`ErrorKind`] -- failures with spans
//!
//! Everything here is synchronous and performs no I/O; concurrent parses
//! are safe as long as each uses its own AST, while extensions and
//! operator tables are read-only after construction and freely shared.

pub mod ast;
pub mod error;
pub mod extension;
pub mod lexer;
pub mod operators;
pub mod parser;
pub mod terms;
pub mod token;
pub mod vo;
pub mod walk;

pub use ast::{Clause, Event, Expr, Machine, Pred};
pub use error::{Diagnostic, ErrorKind};
pub use extension::{ExtensionError, GrammarExtension};
pub use operators::{Assoc, OperatorSpec, OperatorTable, OperatorTableError};
pub use parser::{parse_expression, parse_predicate, ExpressionBuilder};
pub use terms::{Term, TermBuilder};
pub use token::{Span, Token, TokenKind};
pub use vo::VoFormula;
pub use walk::{AstVisitor, ClauseVisitor};
