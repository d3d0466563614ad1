//! Parser for svara notation.
//!
//! Recursive descent over the token stream with one token of lookahead:
//!
//! ```text
//! Song       := Line*
//! Line       := SvaraList GamakaList
//! SvaraList  := '{' Svara* '}'
//! Svara      := PitchName ','*
//! GamakaList := '{' Gamaka* '}'
//! Gamaka     := OrnamentName
//! ```

use super::ast::*;
use super::error::CompileError;
use super::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(&mut self) -> Result<Song, CompileError> {
        let mut lines = Vec::new();
        while !self.is_at_end() {
            lines.push(self.parse_line()?);
        }
        Ok(Song { lines })
    }

    fn parse_line(&mut self) -> Result<Line, CompileError> {
        let (line, col) = self.position();
        let svaras = self.parse_list(Self::parse_svara)?;
        let gamakas = self.parse_list(Self::parse_gamaka)?;

        if svaras.len() != gamakas.len() {
            return Err(CompileError::arity(svaras.len(), gamakas.len(), line, col));
        }

        Ok(Line {
            svaras,
            gamakas,
            line,
            col,
        })
    }

    /// Parse `'{' elem* '}'`.
    fn parse_list<T>(
        &mut self,
        mut elem: impl FnMut(&mut Self) -> Result<T, CompileError>,
    ) -> Result<Vec<T>, CompileError> {
        self.expect(TokenKind::ListStart)?;
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some(t) if t.kind == TokenKind::ListEnd => {
                    self.advance();
                    return Ok(items);
                }
                Some(_) => items.push(elem(self)?),
                None => return Err(self.unexpected(&TokenKind::ListEnd.to_string())),
            }
        }
    }

    /// A svara name plus any `,` holds that follow it.
    fn parse_svara(&mut self) -> Result<Svara, CompileError> {
        let t = self.expect(TokenKind::PitchName)?;
        let (name, line, col) = (t.lexeme.clone(), t.line, t.col);

        let mut duration = 1;
        while self.peek().is_some_and(Token::is_continuation) {
            self.advance();
            duration += 1;
        }

        Ok(Svara {
            name,
            duration,
            line,
            col,
        })
    }

    fn parse_gamaka(&mut self) -> Result<Gamaka, CompileError> {
        let t = self.expect(TokenKind::OrnamentName)?;
        Ok(Gamaka {
            name: t.lexeme.clone(),
            line: t.line,
            col: t.col,
        })
    }

    // --- Utility methods ---

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Position of the next token, or of the last one at end of input.
    fn position(&self) -> (usize, usize) {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or((1, 1), |t| (t.line, t.col))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token, CompileError> {
        if self.peek().is_some_and(|t| t.kind == kind) {
            let idx = self.pos;
            self.pos += 1;
            Ok(&self.tokens[idx])
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        let (line, col) = self.position();
        let found = match self.peek() {
            Some(t) => format!("'{}'", t.lexeme),
            None => "end of input".to_string(),
        };
        CompileError::parse(format!("expected {expected}, found {found}"), line, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::error::ErrorKind;
    use crate::dsl::lexer::Lexer;

    fn parse(src: &str) -> Result<Song, CompileError> {
        let tokens = Lexer::new(src).tokenize()?;
        Parser::new(tokens).parse()
    }

    #[test]
    fn parse_empty_song() {
        let song = parse("").unwrap();
        assert!(song.lines.is_empty());
        assert!(song.is_empty());
    }

    #[test]
    fn parse_single_line() {
        let song = parse("{ sa ri2 } { :/ : }").unwrap();
        assert_eq!(song.lines.len(), 1);
        let line = &song.lines[0];
        assert_eq!((line.line, line.col), (1, 1));
        assert_eq!(line.svaras[0].name, "sa");
        assert_eq!(line.svaras[1].name, "ri2");
        assert_eq!(line.svaras[1].col, 6);
        assert_eq!(line.gamakas[0].name, ":/");
        assert_eq!(line.gamakas[1].name, ":");
    }

    #[test]
    fn parse_holds_extend_duration() {
        let song = parse("{ sa , , ri2 , pa } { : : : }").unwrap();
        let durations: Vec<u32> = song.svaras().map(|s| s.duration).collect();
        assert_eq!(durations, vec![3, 2, 1]);
    }

    #[test]
    fn parse_leading_comma_is_a_svara() {
        let song = parse("{ sa } { : }\n{ , , ri1 } { : : }").unwrap();
        let second = &song.lines[1];
        assert!(second.svaras[0].is_continuation());
        assert_eq!(second.svaras[0].duration, 2);
        assert_eq!((second.svaras[0].line, second.svaras[0].col), (2, 3));
        assert_eq!(second.svaras[1].name, "ri1");
    }

    #[test]
    fn parse_multiple_lines_in_order() {
        let song = parse("{ sa } { : }\n{ ri1 ga1 } { :/ : }\n").unwrap();
        assert_eq!(song.lines.len(), 2);
        let names: Vec<&str> = song.svaras().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["sa", "ri1", "ga1"]);
        assert_eq!(song.gamakas().count(), 3);
        assert_eq!(song.lines[1].line, 2);
    }

    #[test]
    fn parse_empty_lists() {
        let song = parse("{ } { }").unwrap();
        assert_eq!(song.lines.len(), 1);
        assert!(song.is_empty());
    }

    #[test]
    fn parse_arity_mismatch_reports_counts() {
        let err = parse("{ sa ri2 } { : }").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::ArityMismatch {
                svaras: 2,
                gamakas: 1
            }
        );
        assert!(err.is_parse_error());
        assert_eq!((err.line, err.col), (1, 1));
        assert!(err.message.contains("2 svaras"));
        assert!(err.message.contains("1 gamakas"));
    }

    #[test]
    fn parse_arity_reports_line_start() {
        let err = parse("{ sa } { : }\n  { sa } { }").unwrap_err();
        assert_eq!((err.line, err.col), (2, 3));
    }

    #[test]
    fn parse_error_gamaka_in_svara_list() {
        let err = parse("{ sa : } { : }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError);
        assert_eq!((err.line, err.col), (1, 6));
        assert!(err.message.contains("expected svara name"));
        assert!(err.message.contains("':'"));
    }

    #[test]
    fn parse_error_svara_in_gamaka_list() {
        let err = parse("{ sa } { sa }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError);
        assert!(err.message.contains("expected gamaka name"));
    }

    #[test]
    fn parse_error_missing_list_start() {
        let err = parse("sa { : }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError);
        assert_eq!((err.line, err.col), (1, 1));
        assert!(err.message.contains("expected '{'"));
    }

    #[test]
    fn parse_error_missing_gamaka_list() {
        let err = parse("{ sa }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError);
        assert!(err.message.contains("end of input"));
        assert_eq!((err.line, err.col), (1, 6));
    }

    #[test]
    fn parse_error_unterminated_list() {
        let err = parse("{ sa ri1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError);
        assert!(err.message.contains("expected '}'"));
    }

    #[test]
    fn parse_error_stray_list_end() {
        let err = parse("} { }").unwrap_err();
        assert!(err.message.contains("found '}'"));
    }

    #[test]
    fn parse_fails_fast_on_first_line() {
        // The second line is also malformed; only the first error is reported.
        let err = parse("{ sa } { }\n{ : } { sa }").unwrap_err();
        assert_eq!(err.line, 1);
    }
}
