mod args;
mod driver_error;

use args::Args;
use clap::Parser;
use driver_error::DriverError;

use std::fs;
use std::process::Command;

use tracing::debug;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "lexer")]
fn tokenize<'a>(source: &'a str, args: &Args) -> Result<a64cc::lexer::Tokens<'a>, DriverError> {
    let tokens = a64cc::lexer::lex(source)?;
    debug!(tokens = tokens.len(), "lexing done");

    if args.lex {
        dbg!(&tokens);
    }
    Ok(tokens)
}

#[cfg(feature = "parser")]
fn parse(tokens: &[a64cc::lexer::Token], args: &Args) -> Result<a64cc::ast::Ast, DriverError> {
    let ast = a64cc::parser::parse(tokens)?;
    debug!(
        items = ast.items.len(),
        frame_size = ast.frame_size,
        "parsing done"
    );

    if args.parse {
        dbg!(&ast);
    }
    Ok(ast)
}

#[cfg(feature = "codegen")]
fn gen_asm(ast: &a64cc::ast::Ast, args: &Args) -> Result<a64cc::codegen::AsmAst, DriverError> {
    let asm_ast = a64cc::codegen::codegen(ast)?;
    debug!("code generation done");

    if args.codegen {
        dbg!(&asm_ast);
    }
    Ok(asm_ast)
}

#[cfg(feature = "emission")]
fn emit_asm(asm_ast: &a64cc::codegen::AsmAst, args: &Args) -> Result<(), DriverError> {
    let mut asm_file = args.input.clone();
    asm_file.set_extension("s");
    fs::write(&asm_file, asm_ast.to_string())?;
    debug!(path = %asm_file.display(), "wrote assembly");

    if args.no_assemble {
        return Ok(());
    }

    let out_file = match (&args.output, args.no_link) {
        (Some(path), _) => path.clone(),
        (None, true) => args.input.with_extension("o"),
        (None, false) => args.input.with_extension(""),
    };

    let mut command = Command::new("cc");
    command.arg(&asm_file);
    if args.no_link {
        command.arg("-c");
    }
    for lib in &args.libs {
        command.arg(format!("-l{lib}"));
    }
    let status = command.arg("-o").arg(&out_file).status()?;

    if !status.success() {
        return Err(DriverError::AssemblerFailed);
    }
    fs::remove_file(asm_file)?;
    debug!(path = %out_file.display(), "toolchain done");

    Ok(())
}

fn main() -> Result<(), DriverError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if !args.input.exists() {
        let filename = args.input.to_string_lossy().to_string();
        return Err(DriverError::InputFileDoesNotExist(filename));
    }
    let source = fs::read_to_string(&args.input)?;

    #[cfg(feature = "lexer")]
    let tokens = tokenize(&source, &args)?;

    #[cfg(feature = "lexer")]
    if args.lex {
        return Ok(());
    }

    #[cfg(feature = "parser")]
    let ast = parse(&tokens, &args)?;

    #[cfg(feature = "parser")]
    if args.parse {
        return Ok(());
    }

    #[cfg(feature = "codegen")]
    let asm_ast = gen_asm(&ast, &args)?;

    #[cfg(feature = "codegen")]
    if args.codegen {
        return Ok(());
    }

    #[cfg(feature = "emission")]
    emit_asm(&asm_ast, &args)?;

    Ok(())
}
