use super::asm_ast::*;
use super::codegen_error::{CodegenError, Result};
use super::labels::LabelAllocator;
use crate::ast::*;

use AsmInstruction::*;
use Register::*;

pub(super) fn gen_statement(
    statement: &AstStatement,
    instructions: &mut AsmInstructions,
    labels: &mut LabelAllocator,
) -> Result<()> {
    match statement {
        AstStatement::Exp(exp) => {
            gen_exp(exp, instructions)?;
            // discard the residual value so loop bodies keep the operand
            // stack flat across iterations
            instructions.push(Pop(X0));
            Ok(())
        }
        AstStatement::Return(exp) => {
            gen_exp(exp, instructions)?;
            instructions.push(Pop(X0));
            instructions.push(Ret);
            Ok(())
        }
        AstStatement::Compound(block) => {
            for item in &block.items {
                gen_statement(item, instructions, labels)?;
            }
            Ok(())
        }
        AstStatement::If {
            condition,
            then,
            els,
        } => gen_if(condition, then, els.as_deref(), instructions, labels),
        AstStatement::While { condition, body } => gen_while(condition, body, instructions, labels),
        AstStatement::For {
            init,
            condition,
            post,
            body,
        } => gen_for(
            init.as_ref(),
            condition.as_ref(),
            post.as_ref(),
            body,
            instructions,
            labels,
        ),
    }
}

fn gen_if(
    condition: &AstExp,
    then: &AstStatement,
    els: Option<&AstStatement>,
    instructions: &mut AsmInstructions,
    labels: &mut LabelAllocator,
) -> Result<()> {
    gen_exp(condition, instructions)?;
    instructions.push(Pop(X0));
    instructions.push(Cmp(X0, Operand::Imm(0)));

    if let Some(els) = els {
        let else_label = labels.fresh("else");
        let end_label = labels.fresh("end");
        instructions.push(JmpEq(else_label.clone()));
        gen_statement(then, instructions, labels)?;
        instructions.push(Jmp(end_label.clone()));
        instructions.push(Label(else_label));
        gen_statement(els, instructions, labels)?;
        instructions.push(Label(end_label));
    } else {
        let end_label = labels.fresh("end");
        instructions.push(JmpEq(end_label.clone()));
        gen_statement(then, instructions, labels)?;
        instructions.push(Label(end_label));
    }

    Ok(())
}

fn gen_while(
    condition: &AstExp,
    body: &AstStatement,
    instructions: &mut AsmInstructions,
    labels: &mut LabelAllocator,
) -> Result<()> {
    let begin_label = labels.fresh("begin");
    let end_label = labels.fresh("end");

    instructions.push(Label(begin_label.clone()));
    gen_exp(condition, instructions)?;
    instructions.push(Pop(X0));
    instructions.push(Cmp(X0, Operand::Imm(0)));
    instructions.push(JmpEq(end_label.clone()));
    gen_statement(body, instructions, labels)?;
    instructions.push(Jmp(begin_label));
    instructions.push(Label(end_label));

    Ok(())
}

fn gen_for(
    init: Option<&AstExp>,
    condition: Option<&AstExp>,
    post: Option<&AstExp>,
    body: &AstStatement,
    instructions: &mut AsmInstructions,
    labels: &mut LabelAllocator,
) -> Result<()> {
    let begin_label = labels.fresh("begin");
    // an absent condition loops unconditionally: no test, no end label
    let end_label = condition.is_some().then(|| labels.fresh("end"));

    if let Some(init) = init {
        gen_exp(init, instructions)?;
        instructions.push(Pop(X0));
    }
    instructions.push(Label(begin_label.clone()));
    if let (Some(condition), Some(end_label)) = (condition, &end_label) {
        gen_exp(condition, instructions)?;
        instructions.push(Pop(X0));
        instructions.push(Cmp(X0, Operand::Imm(0)));
        instructions.push(JmpEq(end_label.clone()));
    }
    gen_statement(body, instructions, labels)?;
    if let Some(post) = post {
        gen_exp(post, instructions)?;
        instructions.push(Pop(X0));
    }
    instructions.push(Jmp(begin_label));
    if let Some(end_label) = end_label {
        instructions.push(Label(end_label));
    }

    Ok(())
}

/// Emits code leaving exactly one value on the operand stack.
pub(super) fn gen_exp(exp: &AstExp, instructions: &mut AsmInstructions) -> Result<()> {
    match exp {
        AstExp::Constant(value) => {
            instructions.push(Mov(X0, Operand::Imm(*value)));
            instructions.push(Push(X0));
            Ok(())
        }
        AstExp::Var { .. } => {
            gen_lval_address(exp, instructions)?;
            instructions.push(Pop(X0));
            instructions.push(Load(X0, X0));
            instructions.push(Push(X0));
            Ok(())
        }
        AstExp::Assignment(lhs, rhs) => {
            gen_lval_address(lhs, instructions)?;
            gen_exp(rhs, instructions)?;
            instructions.push(Pop(X1));
            instructions.push(Pop(X0));
            instructions.push(Store(X1, X0));
            // an assignment is itself an expression yielding its right-hand
            // value
            instructions.push(Push(X1));
            Ok(())
        }
        AstExp::FunCall { name, args } => gen_call(name, args, instructions),
        AstExp::Binary(op, lhs, rhs) => {
            gen_exp(lhs, instructions)?;
            gen_exp(rhs, instructions)?;
            instructions.push(Pop(X1));
            instructions.push(Pop(X0));
            if op.is_comparison() {
                instructions.push(Cmp(X0, Operand::Reg(X1)));
                instructions.push(SetCC(Condition::from(*op), X0));
            } else {
                instructions.push(Binary(AsmBinaryOp::from(*op), X0, X0, Operand::Reg(X1)));
            }
            instructions.push(Push(X0));
            Ok(())
        }
    }
}

fn gen_lval_address(exp: &AstExp, instructions: &mut AsmInstructions) -> Result<()> {
    let AstExp::Var { offset, .. } = exp else {
        return Err(CodegenError::NotAnLvalue);
    };

    instructions.push(Mov(X0, Operand::Reg(X29)));
    instructions.push(Binary(AsmBinaryOp::Sub, X0, X0, Operand::Imm(*offset)));
    instructions.push(Push(X0));
    Ok(())
}

fn gen_call(
    name: &Identifier,
    args: &[AstExp],
    instructions: &mut AsmInstructions,
) -> Result<()> {
    if args.len() > ARG_REGISTERS.len() {
        return Err(CodegenError::TooManyArguments(name.clone(), args.len()));
    }

    // arguments are pushed last-to-first so that popping in forward order
    // fills the positional registers
    for arg in args.iter().rev() {
        gen_exp(arg, instructions)?;
    }
    for reg in ARG_REGISTERS.iter().take(args.len()) {
        instructions.push(Pop(*reg));
    }
    instructions.push(Call(name.clone()));
    instructions.push(Push(X0));
    Ok(())
}
