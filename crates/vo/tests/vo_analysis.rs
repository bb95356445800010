//! End-to-end verification-objective analysis scenarios: parse real
//! formula text, run the combined scope + type analysis, and verify the
//! reported diagnostic kinds.

use veris_core::error::ErrorKind;
use veris_vo::{analyze_source, TaskRegistry, TaskType};

#[test]
fn registered_task_checks_out() {
    let mut reg = TaskRegistry::new();
    reg.register("MC1", TaskType::ModelCheckingGoal);
    assert!(analyze_source("MC1", &reg).is_ok());
}

#[test]
fn unregistered_task_is_a_scope_error() {
    let mut reg = TaskRegistry::new();
    reg.register("MC1", TaskType::ModelCheckingGoal);
    let err = analyze_source("MC1;TR1", &reg).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Scope);
    assert!(err.message.contains("'TR1'"));
}

#[test]
fn compatible_sequence_checks_out() {
    let mut reg = TaskRegistry::new();
    reg.register("MC1", TaskType::ModelCheckingGoal);
    reg.register("MC2", TaskType::InvariantCheck);
    assert!(analyze_source("MC1;MC2", &reg).is_ok());
}

#[test]
fn incompatible_sequence_is_a_type_error() {
    let mut reg = TaskRegistry::new();
    reg.register("MC1", TaskType::ModelCheckingGoal);
    reg.register("MC2", TaskType::ModelCheckingGoal);
    reg.register("TR1", TaskType::TraceReplay);
    let err = analyze_source("(MC1 & MC2);TR1", &reg).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
}

#[test]
fn scope_failure_short_circuits_the_type_pass() {
    // "MC1;TR1" has both problems: TR1 is unregistered *and* a trace
    // replay may not follow a goal. Only the scope failure is reported.
    let mut reg = TaskRegistry::new();
    reg.register("MC1", TaskType::ModelCheckingGoal);
    let err = analyze_source("MC1;TR1", &reg).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Scope);
}

#[test]
fn deregistering_between_analyses_changes_the_outcome() {
    let mut reg = TaskRegistry::new();
    reg.register("MC1", TaskType::ModelCheckingGoal);
    assert!(analyze_source("MC1", &reg).is_ok());
    reg.deregister("MC1");
    let err = analyze_source("MC1", &reg).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Scope);
}

#[test]
fn parse_failures_surface_before_any_pass() {
    let reg = TaskRegistry::new();
    let err = analyze_source("MC1;;TR1", &reg).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);
}

#[test]
fn boolean_only_formulas_never_type_fail() {
    // Without sequencing there is nothing for the type pass to reject,
    // whatever the mix of task types.
    let mut reg = TaskRegistry::new();
    reg.register("MC1", TaskType::ModelCheckingGoal);
    reg.register("TR1", TaskType::TraceReplay);
    reg.register("LTL1", TaskType::LtlCheck);
    assert!(analyze_source("MC1 & TR1 or not LTL1", &reg).is_ok());
}
