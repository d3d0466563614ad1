//! Lexer for svara notation.
//!
//! Splits source text on whitespace and classifies each word as a [`Token`].
//! Tokens are produced lazily; the lexer stops after the first error.

use super::error::CompileError;
use super::token::{Token, TokenKind, CONTINUATION};

pub struct Lexer<'a> {
    chars: std::str::Chars<'a>,
    line: usize,
    col: usize,
    lexeme: String,
    start: (usize, usize),
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            line: 1,
            col: 0,
            lexeme: String::new(),
            start: (1, 1),
            finished: false,
        }
    }

    /// Lex the whole input, failing on the first invalid word.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompileError> {
        self.by_ref().collect()
    }

    /// Line and column of the last character consumed.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    fn flush(&mut self) -> Option<Result<Token, CompileError>> {
        if self.lexeme.is_empty() {
            return None;
        }
        let lexeme = std::mem::take(&mut self.lexeme);
        let (line, col) = self.start;
        let result = classify(lexeme, line, col);
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(ch) = self.chars.next() else {
                // End of input ends the pending word.
                let last = self.flush();
                self.finished = true;
                return last;
            };
            self.col += 1;

            if ch.is_whitespace() {
                let token = self.flush();
                if ch == '\n' {
                    self.line += 1;
                    self.col = 0;
                }
                if token.is_some() {
                    return token;
                }
            } else {
                if self.lexeme.is_empty() {
                    self.start = (self.line, self.col);
                }
                self.lexeme.push(ch);
            }
        }
    }
}

/// Match a complete word against the token patterns, in priority order.
fn classify(lexeme: String, line: usize, col: usize) -> Result<Token, CompileError> {
    let kind = if lexeme == "{" {
        TokenKind::ListStart
    } else if lexeme == "}" {
        TokenKind::ListEnd
    } else if lexeme == CONTINUATION || lexeme.starts_with(|c: char| c.is_ascii_alphabetic()) {
        TokenKind::PitchName
    } else if lexeme.starts_with(':') {
        TokenKind::OrnamentName
    } else {
        return Err(CompileError::token(&lexeme, line, col));
    };
    Ok(Token::new(kind, lexeme, line, col))
}
