//! Operator tables: symbol, priority, associativity.
//!
//! The full operator set of a language is static configuration data. A
//! table is validated when it is built -- duplicate symbols and
//! equal-priority operators that disagree on associativity are
//! configuration defects caught here, never at parse time.

use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Assoc {
    Left,
    Right,
}

/// One binary operator: textual symbol, numeric priority (higher binds
/// tighter), associativity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorSpec {
    pub symbol: String,
    pub priority: u32,
    pub assoc: Assoc,
}

/// Configuration defects detected while building an [`OperatorTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperatorTableError {
    #[error("duplicate operator symbol '{0}'")]
    DuplicateSymbol(String),

    #[error(
        "operators '{first}' and '{second}' share priority {priority} but disagree on associativity"
    )]
    MixedAssociativity {
        first: String,
        second: String,
        priority: u32,
    },
}

/// Lookup by symbol over a validated operator set.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    by_symbol: HashMap<String, OperatorSpec>,
}

impl OperatorTable {
    pub fn new(specs: Vec<OperatorSpec>) -> Result<OperatorTable, OperatorTableError> {
        let mut by_symbol: HashMap<String, OperatorSpec> = HashMap::new();
        let mut assoc_by_priority: HashMap<u32, (String, Assoc)> = HashMap::new();
        for spec in specs {
            match assoc_by_priority.get(&spec.priority) {
                Some((first, assoc)) if *assoc != spec.assoc => {
                    return Err(OperatorTableError::MixedAssociativity {
                        first: first.clone(),
                        second: spec.symbol,
                        priority: spec.priority,
                    });
                }
                Some(_) => {}
                None => {
                    assoc_by_priority.insert(spec.priority, (spec.symbol.clone(), spec.assoc));
                }
            }
            let symbol = spec.symbol.clone();
            if by_symbol.insert(symbol.clone(), spec).is_some() {
                return Err(OperatorTableError::DuplicateSymbol(symbol));
            }
        }
        Ok(OperatorTable { by_symbol })
    }

    pub fn lookup(&self, symbol: &str) -> Option<&OperatorSpec> {
        self.by_symbol.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

fn op(symbol: &str, priority: u32, assoc: Assoc) -> OperatorSpec {
    OperatorSpec {
        symbol: symbol.to_owned(),
        priority,
        assoc,
    }
}

/// The classical machine language's operator set.
///
/// `;` (relational composition) and `||` (parallel product) share the
/// lowest priority; whether that tie is intentional is a domain question,
/// so it stays data here -- nothing below hard-codes it.
pub fn classical_b() -> OperatorTable {
    OperatorTable::new(vec![
        op(";", 20, Assoc::Left),
        op("||", 20, Assoc::Left),
        op("<=>", 30, Assoc::Left),
        op("=>", 30, Assoc::Left),
        op("&", 40, Assoc::Left),
        op("or", 40, Assoc::Left),
        op("=", 160, Assoc::Left),
        op("/=", 160, Assoc::Left),
        op("<", 160, Assoc::Left),
        op("<=", 160, Assoc::Left),
        op(">", 160, Assoc::Left),
        op(">=", 160, Assoc::Left),
        op(":", 160, Assoc::Left),
        op("..", 170, Assoc::Left),
        op("+", 180, Assoc::Left),
        op("-", 180, Assoc::Left),
        op("*", 190, Assoc::Left),
        op("/", 190, Assoc::Left),
        op("mod", 190, Assoc::Left),
        op("**", 200, Assoc::Right),
    ])
    .expect("classical operator table is well-formed")
}

/// Connectives of the verification-objective language. Sequential
/// composition binds loosest, matching the machine language's sequencing
/// priority; conjunction binds tighter than disjunction.
pub fn verification_objectives() -> OperatorTable {
    OperatorTable::new(vec![
        op(";", 20, Assoc::Left),
        op("<=>", 30, Assoc::Left),
        op("=>", 30, Assoc::Left),
        op("or", 40, Assoc::Left),
        op("&", 50, Assoc::Left),
    ])
    .expect("verification-objective operator table is well-formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_specs_by_symbol() {
        let table = classical_b();
        let mul = table.lookup("*").unwrap();
        assert_eq!(mul.priority, 190);
        assert_eq!(mul.assoc, Assoc::Left);
        let pow = table.lookup("**").unwrap();
        assert_eq!(pow.priority, 200);
        assert_eq!(pow.assoc, Assoc::Right);
        assert!(table.lookup("oops").is_none());
    }

    #[test]
    fn duplicate_symbol_is_a_construction_error() {
        let err = OperatorTable::new(vec![
            op("+", 180, Assoc::Left),
            op("+", 190, Assoc::Left),
        ])
        .unwrap_err();
        assert_eq!(err, OperatorTableError::DuplicateSymbol("+".to_owned()));
    }

    #[test]
    fn mixed_associativity_at_equal_priority_is_a_construction_error() {
        let err = OperatorTable::new(vec![
            op("+", 180, Assoc::Left),
            op("-", 180, Assoc::Right),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            OperatorTableError::MixedAssociativity {
                first: "+".to_owned(),
                second: "-".to_owned(),
                priority: 180,
            }
        );
    }

    #[test]
    fn equal_priority_same_associativity_is_fine() {
        let table = OperatorTable::new(vec![
            op("+", 180, Assoc::Left),
            op("-", 180, Assoc::Left),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
    }
}
