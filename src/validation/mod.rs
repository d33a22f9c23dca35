//! Static checks over a finished state table using Validation.
//!
//! Every check runs and every issue is reported; nothing stops at the first
//! problem. Running a machine does not require validation, since targets
//! are still resolved lazily when a transition is attempted.

use crate::core::{StateDefinition, StateName, StateRole, StateTable};
use crate::graph::bfs;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod issues;

pub use issues::{Severity, TableIssue};

/// Result of validating a table.
pub type TableValidation = Validation<(), NonEmptyVec<TableIssue>>;

impl<S: StateName, D, F> StateTable<S, D, F> {
    /// Check the whole table, accumulating ALL issues.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cogwork::builder::MachineBuilder;
    /// use stillwater::validation::Validation;
    ///
    /// let table = MachineBuilder::<&str, ()>::new()
    ///     .initial("a")
    ///     .add_state("a")
    ///     .add_state("island")
    ///     .always("a", "ghost")
    ///     .build_table()
    ///     .unwrap();
    ///
    /// match table.validate() {
    ///     Validation::Failure(issues) => assert_eq!(issues.len(), 2),
    ///     Validation::Success(_) => panic!("expected issues"),
    /// }
    /// ```
    pub fn validate(&self) -> TableValidation {
        let mut checks: Vec<TableValidation> = Vec::new();

        for definition in self.states() {
            checks.extend(self.check_targets(definition));
            checks.push(check_role(definition));
        }
        checks.extend(self.check_reachability());

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_targets(&self, definition: &StateDefinition<S, D, F>) -> Vec<TableValidation> {
        let mut checks: Vec<TableValidation> = definition
            .transitions()
            .iter()
            .filter(|t| !self.contains(t.target()))
            .map(|t| {
                Validation::fail(TableIssue::UnknownTarget {
                    from: definition.name().to_string(),
                    target: t.target().to_string(),
                })
            })
            .collect();

        if let StateRole::Push { resume } = definition.role() {
            if !self.contains(resume) {
                checks.push(Validation::fail(TableIssue::UnknownResume {
                    state: definition.name().to_string(),
                    resume: resume.to_string(),
                }));
            }
        }
        checks
    }

    fn check_reachability(&self) -> Vec<TableValidation> {
        let graph = self.to_graph();
        let reachable: HashSet<S> = match bfs(&graph, self.initial()) {
            Ok(order) => order.into_iter().collect(),
            // An unknown initial state leaves nothing reachable.
            Err(_) => HashSet::new(),
        };

        self.states()
            .filter(|d| !reachable.contains(d.name()))
            .map(|d| {
                Validation::fail(TableIssue::Unreachable {
                    state: d.name().to_string(),
                })
            })
            .collect()
    }
}

fn check_role<S: StateName, D, F>(definition: &StateDefinition<S, D, F>) -> TableValidation {
    let count = definition.transitions().len();
    match definition.role() {
        StateRole::Pop if count > 0 => Validation::fail(TableIssue::PopWithTransitions {
            state: definition.name().to_string(),
            count,
        }),
        StateRole::Push { .. } if count == 0 => {
            Validation::fail(TableIssue::PushWithoutTransitions {
                state: definition.name().to_string(),
            })
        }
        _ => Validation::success(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{MachineBuilder, StateBuilder};

    #[test]
    fn well_formed_table_validates() {
        let table = MachineBuilder::<&str, ()>::new()
            .initial("scan")
            .state(StateBuilder::new("scan").to("(").to("end"))
            .state(StateBuilder::new("(").push("scan").to("scan"))
            .state(StateBuilder::new(")").pop())
            .always("scan", ")")
            .add_state("end")
            .build_table()
            .unwrap();

        assert!(table.validate().is_success());
    }

    #[test]
    fn validation_accumulates_all_issues() {
        let table = MachineBuilder::<&str, ()>::new()
            .initial("a")
            .state(StateBuilder::new("a").to("ghost").to("push"))
            .state(StateBuilder::new("push").push("nowhere"))
            .state(StateBuilder::new("pop").pop().to("a"))
            .build_table()
            .unwrap();

        match table.validate() {
            Validation::Failure(issues) => {
                assert_eq!(issues.len(), 5);
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, TableIssue::UnknownTarget { target, .. } if target == "ghost")));
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, TableIssue::UnknownResume { .. })));
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, TableIssue::PushWithoutTransitions { .. })));
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, TableIssue::PopWithTransitions { count: 1, .. })));
                assert!(issues
                    .iter()
                    .any(|i| matches!(i, TableIssue::Unreachable { state } if state == "pop")));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn severity_separates_errors_from_warnings() {
        let unreachable = TableIssue::Unreachable {
            state: "x".to_string(),
        };
        let dangling = TableIssue::UnknownTarget {
            from: "a".to_string(),
            target: "b".to_string(),
        };
        assert_eq!(unreachable.severity(), Severity::Warning);
        assert_eq!(dangling.severity(), Severity::Error);
    }
}
