//! Eight Queens
//!
//! This example places eight queens with a backtracking machine.
//!
//! Key concepts:
//! - One state per board square, named by its coordinates
//! - Transition tests reject squares attacked by earlier queens
//! - The backtrack hook lifts the queen of every discarded square
//!
//! Run with: cargo run --example eight_queens
//! Set RUST_LOG=cogwork=debug to see every backtrack.

use cogwork::backtrack::{BacktrackCause, StateOccurrence};
use cogwork::builder::{MachineBuilder, StateBuilder};
use cogwork::core::{Outcome, Signal, StepKind};
use cogwork::engine::{Hooks, Scope};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing_subscriber::EnvFilter;

const N: u8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
enum Square {
    Init,
    At(u8, u8),
    Final,
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::At(row, col) => write!(f, "({row}, {col})"),
            Self::Final => f.write_str("final"),
        }
    }
}

#[derive(Default)]
struct Board {
    queens: HashSet<(u8, u8)>,
}

impl Board {
    fn safe(&self, row: u8, col: u8) -> bool {
        self.queens
            .iter()
            .filter(|&&(_, c)| c < col)
            .all(|&(r, c)| r != row && r.abs_diff(row) != col - c)
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..N {
            for col in 0..N {
                out.push_str(if self.queens.contains(&(row, col)) { " Q" } else { " ." });
            }
            out.push('\n');
        }
        out
    }
}

impl Hooks<Square> for Board {
    fn on_backtrack(
        &mut self,
        _scope: &Scope<Square, ()>,
        occurrence: &StateOccurrence<Square>,
        _cause: BacktrackCause,
    ) {
        if let Square::At(row, col) = *occurrence.state() {
            self.queens.remove(&(row, col));
        }
    }

    fn on_exhausted(&mut self, _scope: &Scope<Square, ()>) -> Signal {
        Signal::reject("No solution found!")
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut builder = MachineBuilder::new()
        .initial(Square::Init)
        .add_state(Square::Init)
        .state(
            StateBuilder::new(Square::Final)
                .accepting()
                .activity(|_, _| Signal::Accept),
        )
        .backtracking()
        .record_history();

    for row in 0..N {
        for col in 0..N {
            builder = builder.state(StateBuilder::new(Square::At(row, col)).activity(
                |board: &mut Board, scope| {
                    if let Square::At(r, c) = *scope.current() {
                        board.queens.insert((r, c));
                    }
                    Signal::Continue
                },
            ));
        }
    }
    for row in 0..N {
        builder = builder
            .always(Square::Init, Square::At(row, 0))
            .always(Square::At(row, N - 1), Square::Final);
        for col in 0..N - 1 {
            for next in 0..N {
                builder = builder.add_transition(
                    Square::At(row, col),
                    Square::At(next, col + 1),
                    |board: &Board, _, _, to| match *to {
                        Square::At(r, c) => board.safe(r, c),
                        _ => false,
                    },
                );
            }
        }
    }

    let mut machine = match builder.build(Board::default()) {
        Ok(machine) => machine,
        Err(err) => {
            eprintln!("Failed to build machine: {err}");
            return;
        }
    };

    println!("=== Eight Queens ===\n");
    match machine.run() {
        Ok(Outcome::Accepted) => {
            print!("{}", machine.data().render());
            let history = machine.history();
            println!(
                "\n{} steps, {} replayed after backtracking",
                history.len(),
                history.count(StepKind::Backtrack)
            );
        }
        Ok(Outcome::Rejected(rejection)) => println!("{rejection}"),
        Err(err) => eprintln!("Engine error: {err}"),
    }
}
