//! Code emission using [Display]
//!
//! Dummy module containing implementation of [Display] for
//! [AsmAst](crate::codegen) which allows to use [to_string] method or as a
//! formatting arg in any formatting context(e.g. [format!], [write!],
//! [println!], ..)
//!
//! Symbols follow the Mach-O convention: globals and call targets get a
//! leading underscore.
//!
//! [Display]: https://doc.rust-lang.org/std/fmt/trait.Display.html
//! [to_string]: https://doc.rust-lang.org/std/string/trait.ToString.html#tymethod.to_string
//! [format!]: https://doc.rust-lang.org/std/macro.format.html
//! [write!]: https://doc.rust-lang.org/std/macro.write.html
//! [println!]: https://doc.rust-lang.org/std/macro.println.html

use crate::codegen::*;

use std::fmt;


impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::X0 => write!(f, "x0"),
            Self::X1 => write!(f, "x1"),
            Self::X2 => write!(f, "x2"),
            Self::X3 => write!(f, "x3"),
            Self::X4 => write!(f, "x4"),
            Self::X5 => write!(f, "x5"),
            Self::X6 => write!(f, "x6"),
            Self::X7 => write!(f, "x7"),
            Self::X29 => write!(f, "x29"),
            Self::Sp => write!(f, "sp"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Imm(i) => write!(f, "#{i}"),
            Self::Reg(r) => write!(f, "{r}"),
        }
    }
}

impl fmt::Display for AsmBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Sub => write!(f, "sub"),
            Self::Mul => write!(f, "mul"),
            Self::Sdiv => write!(f, "sdiv"),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "eq"),
            Self::Ne => write!(f, "ne"),
            Self::Lt => write!(f, "lt"),
            Self::Le => write!(f, "le"),
        }
    }
}

impl fmt::Display for AsmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Mov(dst, src) => write!(f, "mov {dst}, {src}"),
            Self::Binary(op, dst, src1, src2) => write!(f, "{op} {dst}, {src1}, {src2}"),
            Self::Cmp(lhs, rhs) => write!(f, "cmp {lhs}, {rhs}"),
            Self::SetCC(cond, dst) => write!(f, "cset {dst}, {cond}"),
            Self::Load(dst, addr) => write!(f, "ldr {dst}, [{addr}]"),
            Self::Store(src, addr) => write!(f, "str {src}, [{addr}]"),
            Self::Push(r) => write!(f, "sub sp, sp, #16\n\tstr {r}, [sp]"),
            Self::Pop(r) => write!(f, "ldr {r}, [sp]\n\tadd sp, sp, #16"),
            Self::Jmp(label) => write!(f, "b {label}"),
            Self::JmpEq(label) => write!(f, "b.eq {label}"),
            Self::Call(name) => write!(f, "bl _{name}"),
            Self::Label(label) => write!(f, "{label}:"),
            Self::Ret => write!(f, "mov sp, x29\n\tldr x29, [sp]\n\tadd sp, sp, #16\n\tret"),
        }
    }
}

impl fmt::Display for AsmFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for name in &self.externs {
            writeln!(f, "\t.extern _{name}")?;
        }
        writeln!(f, "\t.text")?;
        if self.global {
            writeln!(f, "\t.global _{}", self.name)?;
        }
        writeln!(f, "_{}:", self.name)?;
        //Prologue:
        writeln!(f, "\tsub sp, sp, #16")?;
        writeln!(f, "\tstr x29, [sp]")?;
        writeln!(f, "\tmov x29, sp")?;
        if self.frame_size > 0 {
            writeln!(f, "\tsub sp, sp, #{}", self.frame_size)?;
        }
        for instruction in &self.body {
            writeln!(f, "\t{instruction}")?;
        }

        Ok(())
    }
}

impl fmt::Display for AsmAst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for function in &self.functions {
            write!(f, "{function}")?;
        }
        Ok(())
    }
}
