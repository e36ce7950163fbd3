pub mod asm_ast;
mod codegen_error;
mod gen;
mod labels;

#[cfg(test)]
mod codegen_tests;

use crate::ast::{Ast, Identifier};

pub use asm_ast::*;
pub use codegen_error::{CodegenError, Result};
pub use labels::LabelAllocator;

use gen::gen_statement;

/// Name of the single emitted function; the emitter marks it global so the
/// external toolchain can use it as the entry point.
pub const ENTRY_SYMBOL: &str = "main";

pub fn codegen(ast: &Ast) -> Result<AsmAst> {
    let mut labels = LabelAllocator::new();
    let mut body = AsmInstructions::new();

    for item in &ast.items {
        gen_statement(item, &mut body, &mut labels)?;
    }

    // fall-off-the-end path for programs without a trailing return
    body.push(AsmInstruction::Mov(Register::X0, Operand::Imm(0)));
    body.push(AsmInstruction::Ret);

    let externs = collect_externs(&body);
    let function = AsmFunction {
        name: ENTRY_SYMBOL.to_owned(),
        global: true,
        frame_size: ast.frame_size,
        body,
        externs,
    };

    Ok(AsmAst {
        functions: vec![function],
    })
}

fn collect_externs(body: &AsmInstructions) -> Vec<Identifier> {
    let mut externs = Vec::new();
    for instruction in body {
        if let AsmInstruction::Call(name) = instruction {
            if !externs.contains(name) {
                externs.push(name.clone());
            }
        }
    }
    externs
}
