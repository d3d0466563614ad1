//! Token types for the svara notation lexer.

use std::fmt;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub col: usize,
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    ListStart,    // {
    ListEnd,      // }
    PitchName,    // `,` or a letter-leading word: sa, ri2, pa+
    OrnamentName, // a `:`-leading word: `:`, `:/`
}

/// The lexeme of a continuation marker.
pub const CONTINUATION: &str = ",";

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            col,
        }
    }

    /// A `,` pitch name: holds the previous svara or repeats the previous pitch.
    pub fn is_continuation(&self) -> bool {
        self.kind == TokenKind::PitchName && self.lexeme == CONTINUATION
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::ListStart => "'{'",
            TokenKind::ListEnd => "'}'",
            TokenKind::PitchName => "svara name",
            TokenKind::OrnamentName => "gamaka name",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({:?}, line={}, col={})",
            self.kind, self.lexeme, self.line, self.col
        )
    }
}
