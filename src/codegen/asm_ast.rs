use crate::ast::{AstBinaryOp, Identifier};

#[derive(Debug)]
pub struct AsmAst {
    pub functions: Vec<AsmFunction>,
}

pub type AsmInstructions = Vec<AsmInstruction>;

#[derive(Debug)]
pub struct AsmFunction {
    pub name: Identifier,
    pub global: bool,
    /// bytes reserved below the frame pointer for locals
    pub frame_size: i64,
    pub body: AsmInstructions,
    /// externally linked routines referenced by `Call`, in first-call order
    pub externs: Vec<Identifier>,
}

/// The subset of AArch64 the stack machine needs. `Push`, `Pop` and `Ret`
/// are emitted as their multi-instruction sequences; everything else maps
/// to a single instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmInstruction {
    /// mov dst, src
    Mov(Register, Operand),
    /// op dst, src1, src2
    Binary(AsmBinaryOp, Register, Register, Operand),
    /// cmp lhs, rhs
    Cmp(Register, Operand),
    /// cset dst, cond
    SetCC(Condition, Register),
    /// ldr dst, [addr]
    Load(Register, Register),
    /// str src, [addr]
    Store(Register, Register),
    /// reserve one 16-byte stack slot and store the register there
    Push(Register),
    /// load the register from the top slot and release it
    Pop(Register),
    /// b label
    Jmp(Identifier),
    /// b.eq label, taken when the last Cmp operands were equal
    JmpEq(Identifier),
    /// bl symbol
    Call(Identifier),
    Label(Identifier),
    /// epilogue: restore sp and the frame pointer, then return
    Ret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Imm(i64),
    Reg(Register),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmBinaryOp {
    Add,
    Sub,
    Mul,
    Sdiv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Eq,
    Ne,
    Lt,
    Le,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    X0,
    X1,
    X2,
    X3,
    X4,
    X5,
    X6,
    X7,
    /// frame pointer
    X29,
    Sp,
}

/// Integer argument registers in positional order; calls with more
/// arguments than this are rejected during code generation.
pub const ARG_REGISTERS: [Register; 8] = [
    Register::X0,
    Register::X1,
    Register::X2,
    Register::X3,
    Register::X4,
    Register::X5,
    Register::X6,
    Register::X7,
];

impl From<AstBinaryOp> for AsmBinaryOp {
    fn from(value: AstBinaryOp) -> Self {
        match value {
            AstBinaryOp::Add => Self::Add,
            AstBinaryOp::Substract => Self::Sub,
            AstBinaryOp::Multiply => Self::Mul,
            AstBinaryOp::Div => Self::Sdiv,
            _ => unreachable!(),
        }
    }
}

impl From<AstBinaryOp> for Condition {
    fn from(value: AstBinaryOp) -> Self {
        match value {
            AstBinaryOp::IsEqual => Self::Eq,
            AstBinaryOp::IsNotEqual => Self::Ne,
            AstBinaryOp::LessThan => Self::Lt,
            AstBinaryOp::LessOrEqual => Self::Le,
            _ => unreachable!(),
        }
    }
}
