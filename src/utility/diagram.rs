//! Graphviz export of a state table.

use crate::core::{StateName, StateRole, StateTable};
use std::collections::HashMap;
use std::fmt::Write;

/// Render `table` as a Graphviz `digraph`.
///
/// States are numbered in declaration order (`s0`, `s1`, ...). Accepting
/// states are double circles, edges out of push states get a double
/// arrowhead, and every pop state gets an edge to an invisible `popN` node.
/// Transitions to unknown states are left out.
///
/// # Example
///
/// ```rust
/// use cogwork::builder::{MachineBuilder, StateBuilder};
/// use cogwork::utility::render_dot;
///
/// let table = MachineBuilder::<&str, ()>::new()
///     .initial("p")
///     .state(StateBuilder::new("p").to("q"))
///     .state(StateBuilder::new("q").accepting())
///     .build_table()
///     .unwrap();
///
/// let dot = render_dot(&table);
/// assert!(dot.contains("s1 [label=\"q\", shape=\"doublecircle\"];"));
/// assert!(dot.contains("start->s0;"));
/// ```
pub fn render_dot<S: StateName, D, F>(table: &StateTable<S, D, F>) -> String {
    let ids: HashMap<&S, usize> = table
        .states()
        .enumerate()
        .map(|(ord, def)| (def.name(), ord))
        .collect();

    let mut out = String::from("digraph state\n{\n");
    out.push_str("\trankdir=\"LR\";\n");
    out.push_str("\tstart [label=\"\", shape=\"none\"];\n");

    for (ord, def) in table.states().enumerate() {
        let shape = if def.is_accepting() {
            "doublecircle"
        } else {
            "circle"
        };
        let _ = writeln!(
            out,
            "\ts{ord} [label=\"{}\", shape=\"{shape}\"];",
            escape(&def.name().to_string())
        );
        if def.role().is_pop() {
            let _ = writeln!(out, "\tpop{ord} [label=\"\", shape=\"none\"];");
        }
    }

    if let Some(initial) = ids.get(table.initial()) {
        let _ = writeln!(out, "\tstart->s{initial};");
    }

    for (ord, def) in table.states().enumerate() {
        let arrowhead = match def.role() {
            StateRole::Push { .. } => ", arrowhead=\"normalnormal\"",
            _ => "",
        };
        for transition in def.transitions() {
            let Some(target) = ids.get(transition.target()) else {
                continue;
            };
            let label = escape(transition.label().unwrap_or_default());
            let _ = writeln!(out, "\ts{ord}->s{target} [label=\"{label}\"{arrowhead}];");
        }
        if def.role().is_pop() {
            let _ = writeln!(out, "\ts{ord}->pop{ord};");
        }
    }

    out.push_str("}\n");
    out
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
