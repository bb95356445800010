//! Task registry: the external mapping from task identifier to task-type
//! classification consulted by the scope and type passes.
//!
//! The registry is owned by the embedding application. Registration and
//! deregistration are plain map operations between analyses; a single
//! analysis call observes a frozen snapshot (it borrows the registry
//! immutably and never mutates it). No internal locking is provided --
//! not mutating the registry mid-analysis is the caller's discipline.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Classification of a verification task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskType {
    /// Model-checking run towards a goal predicate.
    ModelCheckingGoal,
    /// Invariant preservation check.
    InvariantCheck,
    /// Replay of a recorded trace.
    TraceReplay,
    /// Linear-temporal-logic formula check.
    LtlCheck,
    /// Coverage measurement over explored states.
    Coverage,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskType::ModelCheckingGoal => "model-checking goal",
            TaskType::InvariantCheck => "invariant check",
            TaskType::TraceReplay => "trace replay",
            TaskType::LtlCheck => "LTL check",
            TaskType::Coverage => "coverage",
        };
        f.write_str(name)
    }
}

/// Mapping from task id to task type.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, TaskType>,
}

impl TaskRegistry {
    pub fn new() -> TaskRegistry {
        TaskRegistry::default()
    }

    /// Register a task, returning the previous type if the id was already
    /// registered.
    pub fn register(&mut self, id: &str, task_type: TaskType) -> Option<TaskType> {
        self.tasks.insert(id.to_owned(), task_type)
    }

    /// Remove a task, returning its type if it was registered.
    pub fn deregister(&mut self, id: &str) -> Option<TaskType> {
        self.tasks.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<TaskType> {
        self.tasks.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Serialize the registry with sorted ids, for embedding applications
    /// that surface the task list over a machine boundary.
    pub fn to_json_value(&self) -> serde_json::Value {
        let sorted: BTreeMap<&str, &TaskType> = self
            .tasks
            .iter()
            .map(|(id, ty)| (id.as_str(), ty))
            .collect();
        serde_json::to_value(sorted).unwrap_or(serde_json::Value::Null)
    }
}
