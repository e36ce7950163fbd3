use clap::Parser;
use std::path::PathBuf;

/// Compiles a source file to AArch64 assembly and hands the result to the
/// system `cc` for assembling and linking.
#[derive(Debug, Parser)]
#[command(name = "a64cc", version, about, long_about = None)]
pub struct Args {
    /// Source file to compile
    pub input: PathBuf,

    /// Stop after lexing and dump the token stream
    #[cfg(feature = "lexer")]
    #[arg(long)]
    pub lex: bool,

    /// Stop after parsing and dump the AST
    #[cfg(feature = "parser")]
    #[arg(long)]
    pub parse: bool,

    /// Stop after code generation and dump the assembly AST
    #[cfg(feature = "codegen")]
    #[arg(long)]
    pub codegen: bool,

    /// Compile only; do not assemble or link (keep the assembly file)
    #[cfg(feature = "emission")]
    #[arg(short = 'S', long)]
    pub no_assemble: bool,

    /// Compile and assemble, but do not link (object file output)
    #[cfg(feature = "emission")]
    #[arg(short = 'c', long)]
    pub no_link: bool,

    /// Path of the final artifact; defaults next to the input
    #[cfg(feature = "emission")]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Libraries to link with (passed through to the linker)
    #[cfg(feature = "emission")]
    #[arg(short = 'l', value_name = "LIB")]
    pub libs: Vec<String>,
}
