//! Character input tape for grammars that consume text.
//!
//! The tape is plain caller data: grammars keep one in their automaton data,
//! test [`symbol`](InputTape::symbol) in transition tests and call
//! [`advance`](InputTape::advance) from activities.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTape {
    symbols: Vec<char>,
    pos: usize,
}

impl InputTape {
    pub fn new(input: &str) -> Self {
        Self {
            symbols: input.chars().collect(),
            pos: 0,
        }
    }

    /// Symbol under the head, `None` past the end.
    pub fn symbol(&self) -> Option<char> {
        self.symbols.get(self.pos).copied()
    }

    /// Whether the head is on `c`.
    pub fn is(&self, c: char) -> bool {
        self.symbol() == Some(c)
    }

    /// Move one symbol forward and return the new head symbol.
    pub fn advance(&mut self) -> Option<char> {
        if self.pos < self.symbols.len() {
            self.pos += 1;
        }
        self.symbol()
    }

    /// Zero-based position of the head.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.symbols.len()
    }

    /// Symbols not consumed yet.
    pub fn rest(&self) -> String {
        self.symbols
            .get(self.pos..)
            .unwrap_or_default()
            .iter()
            .collect()
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}
