//! Splitting text into symbols.
//!
//! Both modes always take the longest match at the current position, so the
//! same text always yields the same symbols. Counting and encoding must use
//! the same mode or the encoder will meet symbols the model never saw.

use std::fmt;
use std::str::FromStr;

/// Symbol granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One character per symbol, with runs of control characters kept together.
    #[default]
    Char,
    /// Runs of ASCII letters per symbol, everything else as in [`Mode::Char`].
    Word,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Char => f.write_str("char"),
            Mode::Word => f.write_str("word"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "char" => Ok(Mode::Char),
            "word" => Ok(Mode::Word),
            other => Err(format!("unknown symbol model {other:?}")),
        }
    }
}

fn is_control(c: char) -> bool {
    matches!(c, '\n' | '\t' | '\0' | '\r')
}

/// Lazy symbol iterator over a borrowed text.
///
/// Cloning gives an independent iterator from the same position, which is how
/// the stream is replayed for encoding after it has been counted.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
    mode: Mode,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str, mode: Mode) -> Self {
        Self { rest: text, mode }
    }

    /// Byte length of the longest run at the start of `rest` whose chars satisfy `pred`.
    fn run_len(&self, pred: impl Fn(char) -> bool) -> usize {
        self.rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest.len(), |(i, _)| i)
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;

        let len = if self.mode == Mode::Word && first.is_ascii_alphabetic() {
            self.run_len(|c| c.is_ascii_alphabetic())
        } else if is_control(first) {
            self.run_len(is_control)
        } else {
            first.len_utf8()
        };

        let (sym, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(sym)
    }
}

/// Tokenize `text` under `mode`.
pub fn tokenize(text: &str, mode: Mode) -> Tokens<'_> {
    Tokens::new(text, mode)
}
