use crate::ast::Identifier;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum CodegenError {
    #[error("left side of assignment is not a variable")]
    NotAnLvalue,
    #[error("call to {0} passes {1} arguments, but at most 8 fit in argument registers")]
    TooManyArguments(Identifier, usize),
}
