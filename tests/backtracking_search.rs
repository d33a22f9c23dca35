//! Searches driven by chronological backtracking: eight queens, minimal
//! change, and the order in which alternatives are tried.

use cogwork::backtrack::{BacktrackCause, StateOccurrence};
use cogwork::builder::{MachineBuilder, StateBuilder};
use cogwork::core::{Outcome, Rejection, Signal, StepKind};
use cogwork::engine::{Hooks, Scope};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

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
struct Queens {
    placed: HashSet<(u8, u8)>,
    removed: usize,
}

impl Hooks<Square> for Queens {
    fn on_backtrack(
        &mut self,
        _scope: &Scope<Square, ()>,
        occurrence: &StateOccurrence<Square>,
        _cause: BacktrackCause,
    ) {
        if let Square::At(row, col) = occurrence.state() {
            assert!(self.placed.remove(&(*row, *col)), "queen was not placed");
            self.removed += 1;
        }
    }

    fn on_exhausted(&mut self, _scope: &Scope<Square, ()>) -> Signal {
        Signal::reject("No solution found!")
    }
}

/// Row and both diagonals to the left of `to` are free.
fn safe(queens: &Queens, to: &Square) -> bool {
    let Square::At(row, col) = *to else {
        return true;
    };
    queens.placed.iter().all(|&(r, c)| {
        c >= col || (r != row && (row as i16 - r as i16).abs() != (col as i16 - c as i16))
    })
}

#[test]
fn eight_queens_finds_first_solution() {
    let mut builder = MachineBuilder::new()
        .initial(Square::Init)
        .add_state(Square::Init)
        .state(StateBuilder::new(Square::Final).accepting().activity(|_, _| Signal::Accept))
        .backtracking()
        .record_history();

    for row in 0..8 {
        for col in 0..8 {
            builder = builder.state(StateBuilder::new(Square::At(row, col)).activity(
                |q: &mut Queens, scope| {
                    if let Square::At(r, c) = *scope.current() {
                        q.placed.insert((r, c));
                    }
                    Signal::Continue
                },
            ));
        }
    }
    for row in 0..8u8 {
        if row < 4 {
            builder = builder.always(Square::Init, Square::At(row, 0));
        }
        builder = builder.always(Square::At(row, 7), Square::Final);
        for col in 0..7 {
            for next in 0..8u8 {
                if next.abs_diff(row) <= 1 {
                    continue;
                }
                builder = builder.add_transition(
                    Square::At(row, col),
                    Square::At(next, col + 1),
                    |q: &Queens, _, _, to| safe(q, to),
                );
            }
        }
    }

    let mut machine = builder.build(Queens::default()).unwrap();
    assert_eq!(machine.run().unwrap(), Outcome::Accepted);

    let mut solution: Vec<_> = machine.data().placed.iter().copied().collect();
    solution.sort_by_key(|&(_, col)| col);
    let rows: Vec<u8> = solution.iter().map(|&(row, _)| row).collect();
    assert_eq!(rows, vec![0, 4, 7, 5, 2, 6, 1, 3]);

    assert!(machine.data().removed > 0);
    assert!(machine.history().count(StepKind::Backtrack) > 0);
    // init + eight squares + final
    assert_eq!(machine.track().unwrap().len(), 10);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
enum Coin {
    Init,
    Value(u32),
    Final,
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Final => f.write_str("final"),
        }
    }
}

struct MinChange {
    amount: u32,
    accumulated: u32,
    num_coins: u32,
    fewest: u32,
    coins: BTreeMap<u32, u32>,
    best: BTreeMap<u32, u32>,
}

impl Hooks<Coin> for MinChange {
    fn on_backtrack(
        &mut self,
        _scope: &Scope<Coin, ()>,
        occurrence: &StateOccurrence<Coin>,
        _cause: BacktrackCause,
    ) {
        if let Coin::Value(v) = occurrence.state() {
            self.accumulated -= v;
            self.num_coins -= 1;
            *self.coins.entry(*v).or_default() -= 1;
        }
    }
}

fn fits(d: &MinChange, _: &Scope<Coin, ()>, _: &Coin, to: &Coin) -> bool {
    match to {
        Coin::Value(v) => *v <= d.amount - d.accumulated,
        _ => false,
    }
}

fn done(d: &MinChange, _: &Scope<Coin, ()>, _: &Coin, _: &Coin) -> bool {
    d.accumulated == d.amount
}

#[test]
fn minimal_change_explores_every_combination() {
    let amount = 35;
    let mut values = vec![1, 3, 5, 7, 11, 13];
    values.sort_unstable_by(|a, b| b.cmp(a));

    let mut builder = MachineBuilder::new()
        .initial(Coin::Init)
        .add_state(Coin::Init)
        .state(StateBuilder::new(Coin::Final).activity(|d: &mut MinChange, _| {
            if d.num_coins < d.fewest {
                d.fewest = d.num_coins;
                d.best = d.coins.clone();
            }
            Signal::Backtrack
        }))
        .add_transition(Coin::Init, Coin::Final, done)
        .backtracking();

    for &value in &values {
        builder = builder
            .state(
                StateBuilder::new(Coin::Value(value)).activity(|d: &mut MinChange, scope| {
                    if let Coin::Value(v) = *scope.current() {
                        d.num_coins += 1;
                        d.accumulated += v;
                        *d.coins.entry(v).or_default() += 1;
                    }
                    if d.num_coins == d.fewest {
                        Signal::Backtrack
                    } else {
                        Signal::Continue
                    }
                }),
            )
            .add_transition(Coin::Init, Coin::Value(value), fits);
    }
    while let Some(&smallest) = values.last() {
        builder = builder.add_transition(Coin::Value(smallest), Coin::Final, done);
        for &value in &values {
            builder = builder.add_transition(Coin::Value(value), Coin::Value(smallest), fits);
        }
        values.pop();
    }

    let mut machine = builder
        .build(MinChange {
            amount,
            accumulated: 0,
            num_coins: 0,
            fewest: amount,
            coins: BTreeMap::new(),
            best: BTreeMap::new(),
        })
        .unwrap();

    assert_eq!(
        machine.run().unwrap(),
        Outcome::Rejected(Rejection::Exhausted)
    );
    let data = machine.data();
    assert_eq!(data.fewest, 3);
    assert_eq!(data.best.get(&11), Some(&2));
    assert_eq!(data.best.get(&13), Some(&1));
    assert_eq!(data.accumulated, 0);
    assert_eq!(data.num_coins, 0);
    assert!(machine.track().unwrap().is_empty());
}

#[derive(Default)]
struct Visits {
    entered: Vec<&'static str>,
    discarded: Vec<(&'static str, BacktrackCause)>,
}

impl Hooks<&'static str> for Visits {
    fn on_enter_state(&mut self, _scope: &Scope<&'static str, ()>, state: &&'static str) {
        self.entered.push(state);
    }

    fn on_backtrack(
        &mut self,
        _scope: &Scope<&'static str, ()>,
        occurrence: &StateOccurrence<&'static str>,
        cause: BacktrackCause,
    ) {
        self.discarded.push((occurrence.state(), cause));
    }
}

#[test]
fn each_eligible_transition_is_tried_once_in_order() {
    let mut machine = MachineBuilder::new()
        .initial("start")
        .state(StateBuilder::new("start").to("a").to("b").to("c"))
        .add_state("a")
        .state(StateBuilder::new("b").activity(|_, _| Signal::Backtrack))
        .add_state("c")
        .backtracking()
        .build(Visits::default())
        .unwrap();

    assert_eq!(
        machine.run().unwrap(),
        Outcome::Rejected(Rejection::Exhausted)
    );
    let data = machine.data();
    assert_eq!(data.entered, vec!["start", "a", "b", "c"]);
    assert_eq!(
        data.discarded,
        vec![
            ("a", BacktrackCause::DeadEnd),
            ("b", BacktrackCause::Requested),
            ("c", BacktrackCause::DeadEnd),
            ("start", BacktrackCause::DeadEnd),
        ]
    );
}

#[test]
fn no_transition_hook_can_request_backtrack() {
    struct Retry;
    impl Hooks<&'static str> for Retry {
        fn on_no_transition(&mut self, _scope: &Scope<&'static str, ()>, state: &&'static str) -> Signal {
            if *state == "trap" {
                Signal::Backtrack
            } else {
                Signal::Continue
            }
        }
    }

    let mut machine = MachineBuilder::new()
        .initial("start")
        .state(StateBuilder::new("start").to("trap").to("goal"))
        .add_state("trap")
        .state(StateBuilder::new("goal").activity(|_, _| Signal::Accept))
        .backtracking()
        .build(Retry)
        .unwrap();

    assert_eq!(machine.run().unwrap(), Outcome::Accepted);
    assert_eq!(machine.current_state(), &"goal");
}

#[test]
fn bounded_track_forgets_older_alternatives() {
    let build = |limit: Option<usize>| {
        let builder = MachineBuilder::new()
            .initial("start")
            .state(StateBuilder::new("start").to("a").to("b"))
            .add_state("a")
            .state(StateBuilder::new("b").activity(|_, _| Signal::Accept))
            .backtracking();
        let builder = match limit {
            Some(limit) => builder.track_limit(limit),
            None => builder,
        };
        builder.build(()).unwrap()
    };

    assert_eq!(build(None).run().unwrap(), Outcome::Accepted);
    assert_eq!(build(Some(2)).run().unwrap(), Outcome::Accepted);
    assert_eq!(
        build(Some(1)).run().unwrap(),
        Outcome::Rejected(Rejection::Exhausted)
    );
}

#[test]
fn exhausted_hook_can_accept() {
    struct Lenient;
    impl Hooks<&'static str> for Lenient {
        fn on_exhausted(&mut self, _scope: &Scope<&'static str, ()>) -> Signal {
            Signal::Accept
        }
    }

    let mut machine = MachineBuilder::new()
        .initial("only")
        .add_state("only")
        .backtracking()
        .build(Lenient)
        .unwrap();

    assert_eq!(machine.run().unwrap(), Outcome::Accepted);
}
