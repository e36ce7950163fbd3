use crate::lexer::{Token, TokenKind};
use crate::parser::{InnerParseError, Result};

/// Forward-only cursor over the token stream. One token of lookahead is
/// enough for the whole grammar, so there is no backtracking support.
#[derive(Debug)]
pub struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    position: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Kind of the current token; the stream always ends with [`TokenKind::Eof`],
    /// which is never consumed, so running past the end reads as end of file.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.position)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Source spelling of the current token.
    pub fn peek_text(&self) -> &'a str {
        self.tokens.get(self.position).map_or("", |t| t.text)
    }

    /// Line of the current token, for diagnostics.
    pub fn get_line(&self) -> u32 {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map_or(0, |t| t.line)
    }

    pub fn bump(&mut self) {
        self.position += 1;
    }

    pub fn bump_if(&mut self, kind: TokenKind) -> bool {
        let condition = self.peek_kind() == kind;
        if condition {
            self.bump();
        }
        condition
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<()> {
        let next = self.peek_kind();
        if next == kind {
            self.bump();
            Ok(())
        } else {
            Err(InnerParseError::ExpectedButGot(kind, next).set_line(self.get_line()))
        }
    }

    pub fn at_eof(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }
}
