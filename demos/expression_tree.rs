//! Expression Tree
//!
//! This example parses a prefix expression such as `+(1,*(2,3))` into a
//! graph with a pushdown machine, then dumps the graph as a tree.
//!
//! Key concepts:
//! - Each parenthesis pushes a frame that knows its parent node
//! - The closing parenthesis pops back to the parent's argument list
//! - The resulting graph is printed with the tree dump utility
//!
//! Run with: cargo run --example expression_tree -- "max(a, -(b, c), 7)"

use cogwork::builder::{MachineBuilder, StateBuilder};
use cogwork::core::{Outcome, Signal};
use cogwork::engine::{Hooks, Machine, Scope};
use cogwork::graph::{Graph, GraphProtocol};
use cogwork::state_names;
use cogwork::tape::InputTape;
use cogwork::utility::{render_dot, tree_dump};
use std::fmt;
use tracing_subscriber::EnvFilter;

state_names! {
    enum Parse {
        Operand => "operand",
        Open => "(",
        Comma => ",",
        Close => ")",
        After => "after",
        Done => "done",
    }
}

/// A vertex; `id` keeps repeated labels apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Node {
    id: usize,
    label: String,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Default)]
struct Arguments {
    parent: Option<Node>,
}

type ParseScope = Scope<Parse, Arguments>;

#[derive(Default)]
struct TreeParser {
    tape: InputTape,
    graph: Graph<Node>,
    last: Option<Node>,
}

impl Hooks<Parse, Arguments> for TreeParser {
    fn on_no_transition(&mut self, _scope: &ParseScope, state: &Parse) -> Signal {
        match self.tape.symbol() {
            Some(c) => Signal::reject(format!(
                "unexpected '{c}' after {state} at position {}",
                self.tape.pos()
            )),
            None => Signal::reject(format!("unexpected end of input after {state}")),
        }
    }
}

fn operand(d: &mut TreeParser, scope: &mut ParseScope) -> Signal {
    let mut label = String::new();
    while let Some(c) = d.tape.symbol().filter(|c| !"(),".contains(*c)) {
        label.push(c);
        d.tape.advance();
    }
    if label.is_empty() {
        return Signal::reject(format!("expected operand at position {}", d.tape.pos()));
    }

    let node = Node {
        id: d.graph.num_vertices(),
        label,
    };
    d.graph.add(node.clone());
    if let Some(parent) = &scope.active_frame().data.parent {
        if d.graph.connect(parent, &node).is_err() {
            return Signal::reject("parent vanished from graph");
        }
    }
    d.last = Some(node);
    Signal::Continue
}

fn skip(d: &mut TreeParser, _scope: &mut ParseScope) -> Signal {
    d.tape.advance();
    Signal::Continue
}

fn at(c: char) -> impl Fn(&TreeParser, &ParseScope, &Parse, &Parse) -> bool + Send + Sync + 'static {
    move |d: &TreeParser, _: &ParseScope, _: &Parse, _: &Parse| d.tape.is(c)
}

fn closes(d: &TreeParser, scope: &ParseScope, _: &Parse, _: &Parse) -> bool {
    d.tape.is(')') && !scope.stack_empty()
}

fn at_end(d: &TreeParser, _: &ParseScope, _: &Parse, _: &Parse) -> bool {
    d.tape.is_at_end()
}

fn parser(input: &str) -> Machine<Parse, TreeParser, Arguments> {
    let tokens: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    MachineBuilder::<Parse, TreeParser, Arguments>::framed()
        .initial(Parse::Operand)
        .state(
            StateBuilder::new(Parse::Operand)
                .activity(operand)
                .when(Parse::Open, at('('))
                .when(Parse::Comma, at(','))
                .when(Parse::Close, closes)
                .when(Parse::Done, at_end),
        )
        .state(
            StateBuilder::new(Parse::Open)
                .push(Parse::After)
                .activity(|d: &mut TreeParser, scope: &mut ParseScope| {
                    d.tape.advance();
                    scope.active_frame_mut().data.parent = d.last.clone();
                    Signal::Continue
                })
                .to(Parse::Operand),
        )
        .state(
            StateBuilder::new(Parse::Comma)
                .guard(|_: &TreeParser, scope: &ParseScope| !scope.stack_empty())
                .activity(skip)
                .to(Parse::Operand),
        )
        .state(StateBuilder::new(Parse::Close).pop().activity(skip))
        .state(
            StateBuilder::new(Parse::After)
                .when(Parse::Comma, at(','))
                .when(Parse::Close, closes)
                .when(Parse::Done, at_end),
        )
        .state(
            StateBuilder::new(Parse::Done)
                .accepting()
                .activity(|_: &mut TreeParser, scope: &mut ParseScope| {
                    if scope.accept_test() {
                        Signal::Accept
                    } else {
                        Signal::reject("unclosed parenthesis")
                    }
                }),
        )
        .build(TreeParser {
            tape: InputTape::new(&tokens),
            ..TreeParser::default()
        })
        .unwrap()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "+(1, *(2, 3), -(4))".to_string());

    println!("=== Expression Tree ===\n");
    println!("{input}\n");

    let mut machine = parser(&input);
    match machine.run() {
        Ok(Outcome::Accepted) => {}
        Ok(Outcome::Rejected(rejection)) => {
            println!("Parse failed: {rejection}");
            return;
        }
        Err(err) => {
            eprintln!("Engine error: {err}");
            return;
        }
    }

    match tree_dump(&machine.data().graph) {
        Ok(dump) => print!("{dump}"),
        Err(err) => println!("Cannot dump: {err}"),
    }

    println!("\n=== Parser diagram (DOT) ===\n");
    print!("{}", render_dot(machine.table()));
}
