use thiserror::Error;

pub type Result<T> = std::result::Result<T, LexError>;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum InnerLexError {
    #[error("cannot tokenize: unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("integer constant {0} is out of range")]
    BadConstant(String),
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("line {ln}: {inner}")]
pub struct LexError {
    pub inner: InnerLexError,
    pub ln: u32,
}

impl LexError {
    pub fn get_ln(&self) -> u32 {
        self.ln
    }
}

impl InnerLexError {
    pub(super) fn set_line(self, ln: u32) -> LexError {
        LexError { inner: self, ln }
    }
}
