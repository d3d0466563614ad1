//! Phrase tree for svara notation.
//!
//! A song is a list of lines; each line pairs a list of svaras with an equally
//! long list of gamakas.

use super::token::CONTINUATION;

/// A complete song.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Song {
    pub lines: Vec<Line>,
}

/// One phrase: svaras and the gamakas that follow each of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub svaras: Vec<Svara>,
    pub gamakas: Vec<Gamaka>,
    pub line: usize,
    pub col: usize,
}

/// A pitch symbol held for `duration` units.
#[derive(Debug, Clone, PartialEq)]
pub struct Svara {
    pub name: String,
    pub duration: u32,
    pub line: usize,
    pub col: usize,
}

/// A named ornament curve leading from one svara to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Gamaka {
    pub name: String,
    pub line: usize,
    pub col: usize,
}

impl Song {
    /// Every svara, in phrase order.
    pub fn svaras(&self) -> impl Iterator<Item = &Svara> {
        self.lines.iter().flat_map(|l| l.svaras.iter())
    }

    /// Every gamaka, in phrase order.
    pub fn gamakas(&self) -> impl Iterator<Item = &Gamaka> {
        self.lines.iter().flat_map(|l| l.gamakas.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.svaras.is_empty())
    }
}

impl Svara {
    /// True for a `,` svara that repeats the previous pitch.
    pub fn is_continuation(&self) -> bool {
        self.name == CONTINUATION
    }
}
