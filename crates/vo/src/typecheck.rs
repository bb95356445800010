//! Type pass: sequential compositions must order compatibly-typed plans.
//!
//! A formula's classification is inferred bottom-up: a task reference has
//! its registered type, boolean combinations of uniformly-typed operands
//! keep that type, and anything else is `Mixed`. Each sequential
//! composition checks its sides against the compatibility table; the
//! first incompatible pair becomes the single terminal type diagnostic.
//!
//! The compatibility relation itself is domain data, kept in
//! [`may_follow`]; the pass only implements the mechanism.

use crate::registry::{TaskRegistry, TaskType};
use veris_core::error::Diagnostic;
use veris_core::vo::VoFormula;

/// Inferred classification of a sub-formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Uniform(TaskType),
    /// Operands of differing types; sequencing against it is accepted
    /// since no single type describes the plan.
    Mixed,
}

/// Whether a task of type `second` may run sequentially after `first`.
///
/// Domain data: trace replay depends on explored state, so it may only
/// follow coverage or another trace replay; everything else composes
/// freely.
pub fn may_follow(first: TaskType, second: TaskType) -> bool {
    match first {
        TaskType::ModelCheckingGoal | TaskType::InvariantCheck | TaskType::LtlCheck => {
            !matches!(second, TaskType::TraceReplay)
        }
        TaskType::Coverage | TaskType::TraceReplay => true,
    }
}

/// Check every sequential composition in `formula`.
///
/// Meaningful only after the scope pass succeeded: an unregistered
/// reference has no type.
pub fn check_types(formula: &VoFormula, registry: &TaskRegistry) -> Result<(), Diagnostic> {
    classify(formula, registry).map(|_| ())
}

/// Infer the classification of `formula`, checking nested sequential
/// compositions along the way.
pub fn classify(
    formula: &VoFormula,
    registry: &TaskRegistry,
) -> Result<Classification, Diagnostic> {
    match formula {
        VoFormula::Task { id, span } => match registry.get(id) {
            Some(ty) => Ok(Classification::Uniform(ty)),
            None => Err(Diagnostic::type_error(
                *span,
                format!("task '{}' has no registered type", id),
            )),
        },
        VoFormula::Not { operand, .. } => classify(operand, registry),
        VoFormula::And { lhs, rhs, .. }
        | VoFormula::Or { lhs, rhs, .. }
        | VoFormula::Implies { lhs, rhs, .. }
        | VoFormula::Equiv { lhs, rhs, .. } => {
            let left = classify(lhs, registry)?;
            let right = classify(rhs, registry)?;
            Ok(combine(left, right))
        }
        VoFormula::Seq { lhs, rhs, span } => {
            let left = classify(lhs, registry)?;
            let right = classify(rhs, registry)?;
            if let (Classification::Uniform(first), Classification::Uniform(second)) =
                (left, right)
            {
                if !may_follow(first, second) {
                    return Err(Diagnostic::type_error(
                        *span,
                        format!("a {} may not be followed by a {}", first, second),
                    ));
                }
            }
            // The plan ends in its right side.
            Ok(right)
        }
    }
}

fn combine(left: Classification, right: Classification) -> Classification {
    match (left, right) {
        (Classification::Uniform(a), Classification::Uniform(b)) if a == b => {
            Classification::Uniform(a)
        }
        _ => Classification::Mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veris_core::error::ErrorKind;

    fn registry() -> TaskRegistry {
        let mut reg = TaskRegistry::new();
        reg.register("MC1", TaskType::ModelCheckingGoal);
        reg.register("MC2", TaskType::ModelCheckingGoal);
        reg.register("INV1", TaskType::InvariantCheck);
        reg.register("TR1", TaskType::TraceReplay);
        reg.register("COV1", TaskType::Coverage);
        reg
    }

    fn check(src: &str) -> Result<(), Diagnostic> {
        let f = veris_core::vo::parse(src).unwrap();
        check_types(&f, &registry())
    }

    #[test]
    fn goal_then_invariant_is_compatible() {
        assert!(check("MC1;INV1").is_ok());
    }

    #[test]
    fn goal_then_trace_replay_is_a_type_error() {
        let err = check("MC1;TR1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert!(err.message.contains("trace replay"));
    }

    #[test]
    fn uniform_conjunction_keeps_its_operand_type() {
        // Both goals: the conjunction is goal-typed, so sequencing a trace
        // replay after it is rejected.
        let err = check("(MC1 & MC2);TR1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn mixed_conjunction_is_accepted_before_trace_replay() {
        assert!(check("(MC1 & COV1);TR1").is_ok());
    }

    #[test]
    fn coverage_then_trace_replay_is_compatible() {
        assert!(check("COV1;TR1").is_ok());
    }

    #[test]
    fn nested_sequences_are_checked() {
        let err = check("COV1;(MC1;TR1)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn sequence_classification_is_its_right_side() {
        let f = veris_core::vo::parse("MC1;COV1").unwrap();
        assert_eq!(
            classify(&f, &registry()).unwrap(),
            Classification::Uniform(TaskType::Coverage)
        );
    }

    #[test]
    fn negation_is_transparent() {
        assert!(check("not MC1;INV1").is_ok());
    }
}
