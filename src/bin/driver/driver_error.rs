use a64cc::codegen::CodegenError;
use a64cc::lexer::LexError;
use a64cc::parser::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("file {0} does not exist")]
    InputFileDoesNotExist(String),
    #[error("lex error: {0}")]
    Lexer(#[from] LexError),
    #[error("parse error: {0}")]
    Parser(#[from] ParseError),
    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to run assembler")]
    AssemblerFailed,
}
