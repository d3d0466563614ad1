//! Error types for the svara compiler.

use std::fmt;

/// An error that occurred while compiling svara notation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub message: String,
    pub line: usize,
    pub col: usize,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// A lexeme that matches no token pattern.
    TokenError,
    /// The next token is not what the grammar requires.
    ParseError,
    /// A line whose svara and gamaka lists differ in length.
    ArityMismatch { svaras: usize, gamakas: usize },
    /// An unknown svara or gamaka, or a pitch that cannot be played.
    MusicError,
}

impl CompileError {
    pub fn token(lexeme: &str, line: usize, col: usize) -> Self {
        Self {
            message: format!("invalid token: {lexeme}"),
            line,
            col,
            kind: ErrorKind::TokenError,
        }
    }

    pub fn parse(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
            kind: ErrorKind::ParseError,
        }
    }

    pub fn arity(svaras: usize, gamakas: usize, line: usize, col: usize) -> Self {
        Self {
            message: format!(
                "expected equal numbers of svaras and gamakas, got {svaras} svaras and {gamakas} gamakas"
            ),
            line,
            col,
            kind: ErrorKind::ArityMismatch { svaras, gamakas },
        }
    }

    pub fn music(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
            kind: ErrorKind::MusicError,
        }
    }

    /// True for grammar errors, including arity mismatches.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ParseError | ErrorKind::ArityMismatch { .. }
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TokenError => f.write_str("token error"),
            ErrorKind::ParseError | ErrorKind::ArityMismatch { .. } => f.write_str("parse error"),
            ErrorKind::MusicError => f.write_str("music error"),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}: {}", self.line, self.col, self.kind, self.message)
    }
}

impl std::error::Error for CompileError {}
