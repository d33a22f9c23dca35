//! Check Parens
//!
//! This example matches brackets with a pushdown machine.
//!
//! Key concepts:
//! - Push states open a frame and remember where the opener was
//! - Pop states close the frame and compare it with the closer
//! - Hooks turn dead ends into readable errors
//!
//! Run with: cargo run --example check_parens -- "(([] {}) ())" "(]"
//! Set RUST_LOG=cogwork=trace to follow every step.

use cogwork::builder::{MachineBuilder, StateBuilder};
use cogwork::core::{Outcome, Rejection, Signal};
use cogwork::engine::{Hooks, Machine, Scope};
use cogwork::state_names;
use cogwork::tape::InputTape;
use tracing_subscriber::EnvFilter;

state_names! {
    enum Symbol {
        Scan => "scan",
        OpenParen => "(",
        CloseParen => ")",
        OpenBracket => "[",
        CloseBracket => "]",
        OpenBrace => "{",
        CloseBrace => "}",
    }
}

const PAIRS: [(Symbol, Symbol); 3] = [
    (Symbol::OpenParen, Symbol::CloseParen),
    (Symbol::OpenBracket, Symbol::CloseBracket),
    (Symbol::OpenBrace, Symbol::CloseBrace),
];

fn glyph(symbol: Symbol) -> char {
    symbol.label().chars().next().unwrap_or_default()
}

#[derive(Default)]
struct Opener {
    pos: usize,
}

type ParenScope = Scope<Symbol, Opener>;

struct ParenChecker {
    tape: InputTape,
    error: Option<String>,
}

impl Hooks<Symbol, Opener> for ParenChecker {
    fn on_suspend(&mut self, scope: &mut ParenScope, _state: &Symbol) {
        scope.active_frame_mut().data.pos = self.tape.pos();
    }

    fn on_no_transition(&mut self, scope: &ParenScope, _state: &Symbol) -> Signal {
        if self.tape.is_at_end() && scope.accept_test() {
            return Signal::Accept;
        }
        match scope.top_frame() {
            Some(top) => Signal::reject(format!(
                "'{}' unmatched at position {}.",
                top.pushed_by().map(Symbol::label).unwrap_or_default(),
                top.data.pos
            )),
            None => Signal::reject("unexpected input"),
        }
    }

    fn on_reject(&mut self, _scope: &ParenScope, rejection: &Rejection) {
        self.error = Some(rejection.to_string());
    }
}

fn checker(input: &str) -> Machine<Symbol, ParenChecker, Opener> {
    let mut scan = StateBuilder::new(Symbol::Scan).activity(|d: &mut ParenChecker, _| {
        while let Some(c) = d.tape.symbol() {
            if "()[]{}".contains(c) {
                break;
            }
            d.tape.advance();
        }
        Signal::Continue
    });
    for (open, close) in PAIRS {
        scan = scan.to(open).to(close);
    }

    let mut builder = MachineBuilder::<Symbol, ParenChecker, Opener>::framed()
        .initial(Symbol::Scan)
        .state(scan);

    for (open, close) in PAIRS {
        builder = builder
            .state(
                StateBuilder::new(open)
                    .push(Symbol::Scan)
                    .guard(move |d: &ParenChecker, _| d.tape.is(glyph(open)))
                    .activity(|d: &mut ParenChecker, _| {
                        d.tape.advance();
                        Signal::Continue
                    })
                    .to(Symbol::Scan),
            )
            .state(
                StateBuilder::new(close)
                    .pop()
                    .guard(move |d: &ParenChecker, _| d.tape.is(glyph(close)))
                    .activity(move |d: &mut ParenChecker, scope: &mut ParenScope| {
                        let pos = d.tape.pos();
                        d.tape.advance();
                        match scope.top_frame() {
                            None => Signal::reject(format!("'{close}' unmatched at position {pos}.")),
                            Some(top) if top.pushed_by() != Some(&open) => Signal::reject(format!(
                                "'{}' at position {} matched with '{close}' at position {pos}.",
                                top.pushed_by().map(Symbol::label).unwrap_or_default(),
                                top.data.pos
                            )),
                            Some(_) => Signal::Continue,
                        }
                    }),
            );
    }

    builder
        .build(ParenChecker {
            tape: InputTape::new(input),
            error: None,
        })
        .unwrap()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs = if args.is_empty() {
        ["( )", "(([] {}) ())", "(([] { ())", "(()", "())"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        args
    };

    println!("=== Check Parens ===\n");
    for input in &inputs {
        let mut machine = checker(input);
        match machine.run() {
            Ok(Outcome::Accepted) => println!("{input:<16} ok"),
            Ok(Outcome::Rejected(_)) => println!(
                "{input:<16} {}",
                machine.data().error.as_deref().unwrap_or("rejected")
            ),
            Err(err) => println!("{input:<16} engine error: {err}"),
        }
    }
}
