//! veris-vo: semantic analysis for verification-objective formulas.
//!
//! A verification objective composes named verification tasks
//! (model-checking runs, trace replays, ...) with boolean and sequencing
//! connectives. The analyzer runs two read-only passes over the formula:
//!
//! 1. **Scope** ([`scope::check_scope`]): every referenced task id must
//!    be present in the embedding application's [`TaskRegistry`].
//! 2. **Type** ([`typecheck::check_types`]): every sequential composition
//!    must order compatibly-typed plans.
//!
//! [`analyze`] is the combined entry point: it completes the scope pass
//! before the type pass and short-circuits on a scope failure, so each
//! call reports at most one terminal [`Diagnostic`]. A reference to an
//! unregistered task has no type, which is why the order is fixed.

pub mod registry;
pub mod scope;
pub mod typecheck;

pub use registry::{TaskRegistry, TaskType};
pub use typecheck::{may_follow, Classification};

use veris_core::error::Diagnostic;
use veris_core::vo::VoFormula;

/// Scope-check then type-check `formula` against `registry`.
pub fn analyze(formula: &VoFormula, registry: &TaskRegistry) -> Result<(), Diagnostic> {
    scope::check_scope(formula, registry)?;
    typecheck::check_types(formula, registry)
}

/// Parse `src` as a verification-objective formula and analyze it.
pub fn analyze_source(src: &str, registry: &TaskRegistry) -> Result<(), Diagnostic> {
    let formula = veris_core::vo::parse(src)?;
    analyze(&formula, registry)
}
