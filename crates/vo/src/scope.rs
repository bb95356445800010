//! Scope pass: every atomic task reference must name a registered task.
//!
//! The walk visits the whole formula and threads its finding explicitly;
//! the first unregistered reference (in left-to-right order) becomes the
//! single terminal scope diagnostic for the analysis.

use crate::registry::TaskRegistry;
use veris_core::error::Diagnostic;
use veris_core::token::Span;
use veris_core::vo::VoFormula;

/// Check that every task referenced by `formula` is registered.
pub fn check_scope(formula: &VoFormula, registry: &TaskRegistry) -> Result<(), Diagnostic> {
    let mut first_unknown: Option<(String, Span)> = None;
    scan(formula, registry, &mut first_unknown);
    match first_unknown {
        Some((id, span)) => Err(Diagnostic::scope(
            span,
            format!("unknown task '{}': not registered", id),
        )),
        None => Ok(()),
    }
}

fn scan(formula: &VoFormula, registry: &TaskRegistry, acc: &mut Option<(String, Span)>) {
    match formula {
        VoFormula::Task { id, span } => {
            if !registry.contains(id) && acc.is_none() {
                *acc = Some((id.clone(), *span));
            }
        }
        VoFormula::Not { operand, .. } => scan(operand, registry, acc),
        VoFormula::And { lhs, rhs, .. }
        | VoFormula::Or { lhs, rhs, .. }
        | VoFormula::Implies { lhs, rhs, .. }
        | VoFormula::Equiv { lhs, rhs, .. }
        | VoFormula::Seq { lhs, rhs, .. } => {
            scan(lhs, registry, acc);
            scan(rhs, registry, acc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TaskType;
    use veris_core::error::ErrorKind;

    fn registry() -> TaskRegistry {
        let mut reg = TaskRegistry::new();
        reg.register("MC1", TaskType::ModelCheckingGoal);
        reg.register("MC2", TaskType::InvariantCheck);
        reg
    }

    #[test]
    fn registered_reference_passes() {
        let f = veris_core::vo::parse("MC1").unwrap();
        assert!(check_scope(&f, &registry()).is_ok());
    }

    #[test]
    fn unregistered_reference_fails_with_scope_error() {
        let f = veris_core::vo::parse("MC1;TR1").unwrap();
        let err = check_scope(&f, &registry()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Scope);
        assert!(err.message.contains("'TR1'"));
    }

    #[test]
    fn first_unknown_reference_wins() {
        let f = veris_core::vo::parse("A & MC1 & B").unwrap();
        let err = check_scope(&f, &registry()).unwrap_err();
        assert!(err.message.contains("'A'"));
    }

    #[test]
    fn diagnostic_carries_the_reference_span() {
        let f = veris_core::vo::parse("MC1;TR1").unwrap();
        let err = check_scope(&f, &registry()).unwrap_err();
        assert_eq!(err.span, Span::new(1, 5, 1, 8));
    }
}
