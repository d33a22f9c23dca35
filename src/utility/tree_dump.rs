//! Render a tree as indented text with a pushdown machine.
//!
//! Each visited node pushes a frame holding its remaining children, so the
//! frame stack mirrors the path from the root and decides the connectors
//! drawn in front of every line.

use crate::builder::{BuildError, MachineBuilder, StateBuilder};
use crate::core::{Outcome, Rejection, Signal};
use crate::engine::{EngineError, Hooks, Scope};
use crate::graph::{is_tree, GraphProtocol};
use crate::state_names;
use std::collections::{HashMap, VecDeque};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TreeDumpError {
    #[error("Graph is not a tree")]
    NotATree,

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Tree dump rejected: {0}")]
    Rejected(Rejection),
}

state_names! {
    enum Dump {
        Write => "write",
        Children => "children",
        Next => "next",
        Pop => "pop",
        Final => "final",
    }
}

type DumpScope<V> = Scope<Dump, NodeFrame<V>>;

struct NodeFrame<V> {
    node: Option<V>,
    children: VecDeque<V>,
}

impl<V> Default for NodeFrame<V> {
    fn default() -> Self {
        Self {
            node: None,
            children: VecDeque::new(),
        }
    }
}

struct Dumper<V> {
    root: V,
    children: HashMap<V, Vec<V>>,
    lines: Vec<String>,
}

impl<V: Clone> Hooks<Dump, NodeFrame<V>> for Dumper<V> {
    fn on_init_frame(&mut self, scope: &mut DumpScope<V>) {
        if scope.stack_empty() {
            scope.active_frame_mut().data.node = Some(self.root.clone());
        }
    }
}

impl<V: Display> Dumper<V> {
    fn connectors(scope: &DumpScope<V>) -> String {
        let suspended = scope.frames().suspended();
        let mut prefix = String::new();
        for (index, frame) in suspended.iter().enumerate() {
            let top = index + 1 == suspended.len();
            let more = !frame.data.children.is_empty();
            prefix.push_str(match (top, more) {
                (true, true) => "|--",
                (true, false) => "`--",
                (false, true) => "|  ",
                (false, false) => "   ",
            });
        }
        prefix
    }
}

/// Render the tree stored in `graph`, one node per line.
///
/// # Example
///
/// ```rust
/// use cogwork::graph::{Graph, GraphProtocol};
/// use cogwork::utility::tree_dump;
///
/// let mut graph = Graph::new();
/// for v in ["+", "1", "*", "2", "3"] {
///     graph.add(v);
/// }
/// graph.connect(&"+", &"1").unwrap();
/// graph.connect(&"+", &"*").unwrap();
/// graph.connect(&"*", &"2").unwrap();
/// graph.connect(&"*", &"3").unwrap();
///
/// assert_eq!(
///     tree_dump(&graph).unwrap(),
///     "+\n|--1\n`--*\n   |--2\n   `--3\n"
/// );
/// ```
pub fn tree_dump<V, G>(graph: &G) -> Result<String, TreeDumpError>
where
    V: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static,
    G: GraphProtocol<V> + ?Sized,
{
    let root = is_tree(graph).ok_or(TreeDumpError::NotATree)?;
    let mut children = HashMap::new();
    for v in graph.vertices() {
        let succ = graph
            .succ(&v)
            .map_err(|_| TreeDumpError::NotATree)?;
        children.insert(v, succ);
    }
    debug!(root = %root, nodes = children.len(), "tree dump");

    let dumper = Dumper {
        root,
        children,
        lines: Vec::new(),
    };
    let mut machine = MachineBuilder::<Dump, Dumper<V>, NodeFrame<V>>::framed()
        .initial(Dump::Write)
        .state(
            StateBuilder::new(Dump::Write)
                .activity(|d: &mut Dumper<V>, scope: &mut DumpScope<V>| {
                    if let Some(node) = &scope.active_frame().data.node {
                        d.lines
                            .push(format!("{}{}", Dumper::connectors(scope), node));
                    }
                    Signal::Continue
                })
                .to(Dump::Children),
        )
        .state(
            StateBuilder::new(Dump::Children)
                .push(Dump::Next)
                .activity(|d: &mut Dumper<V>, scope: &mut DumpScope<V>| {
                    let parent = scope.top_frame().and_then(|f| f.data.node.clone());
                    let kids = parent
                        .and_then(|p| d.children.get(&p).cloned())
                        .unwrap_or_default();
                    if let Some(top) = scope.top_frame_mut() {
                        top.data.children = kids.into();
                    }
                    Signal::Continue
                })
                .to(Dump::Next),
        )
        .state(
            StateBuilder::new(Dump::Next)
                .activity(|_: &mut Dumper<V>, scope: &mut DumpScope<V>| {
                    let next = scope
                        .top_frame_mut()
                        .and_then(|top| top.data.children.pop_front());
                    scope.active_frame_mut().data.node = next;
                    Signal::Continue
                })
                .when(Dump::Write, |_, scope: &DumpScope<V>, _, _| {
                    scope.active_frame().data.node.is_some()
                })
                .when(Dump::Final, |_, scope, _, _| scope.stack_empty())
                .to(Dump::Pop),
        )
        .state(StateBuilder::new(Dump::Pop).pop())
        .state(
            StateBuilder::new(Dump::Final)
                .accepting()
                .activity(|_, _| Signal::Accept),
        )
        .build(dumper)?;

    match machine.run()? {
        Outcome::Accepted => {
            let mut out = machine.into_data().lines.join("\n");
            out.push('\n');
            Ok(out)
        }
        Outcome::Rejected(rejection) => Err(TreeDumpError::Rejected(rejection)),
    }
}
