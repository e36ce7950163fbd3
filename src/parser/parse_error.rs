use crate::lexer::TokenKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum InnerParseError {
    #[error("expected token {0:?}, but got {1:?}")]
    ExpectedButGot(TokenKind, TokenKind),
    #[error("expected an expression, but got {0:?}")]
    BadPrimary(TokenKind),
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("line {ln}: {inner}")]
pub struct ParseError {
    pub inner: InnerParseError,
    pub ln: u32,
}

impl ParseError {
    pub fn get_ln(&self) -> u32 {
        self.ln
    }
}

impl InnerParseError {
    pub fn set_line(self, ln: u32) -> ParseError {
        ParseError { inner: self, ln }
    }
}
