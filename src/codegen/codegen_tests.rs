use super::*;
use crate::lexer;
use crate::parser;
use pretty_assertions::assert_eq;
use std::collections::{HashMap, HashSet};

fn compile(source: &str) -> Result<AsmAst> {
    let tokens = lexer::lex(source).unwrap();
    let ast = parser::parse(&tokens).unwrap();
    codegen(&ast)
}

/// Frame-pointer value handed to the interpreted function; locals live at
/// addresses below it.
const FRAME_BASE: i64 = 0x1000;

/// Interprets the asm AST as the stack machine it describes: registers, an
/// operand stack, a byte-addressed store for locals and the flags of the
/// last cmp. `Call` dispatches to registered builtins reading `x0..x7`.
struct Machine {
    regs: [i64; 32],
    stack: Vec<i64>,
    memory: HashMap<i64, i64>,
    cmp: (i64, i64),
    builtins: HashMap<&'static str, fn(&[i64]) -> i64>,
}

fn reg_index(r: Register) -> usize {
    match r {
        Register::X0 => 0,
        Register::X1 => 1,
        Register::X2 => 2,
        Register::X3 => 3,
        Register::X4 => 4,
        Register::X5 => 5,
        Register::X6 => 6,
        Register::X7 => 7,
        Register::X29 => 29,
        Register::Sp => 31,
    }
}

impl Machine {
    fn new() -> Self {
        let mut regs = [0; 32];
        regs[reg_index(Register::X29)] = FRAME_BASE;
        Self {
            regs,
            stack: Vec::new(),
            memory: HashMap::new(),
            cmp: (0, 0),
            builtins: HashMap::new(),
        }
    }

    fn get(&self, r: Register) -> i64 {
        self.regs[reg_index(r)]
    }

    fn set(&mut self, r: Register, value: i64) {
        self.regs[reg_index(r)] = value;
    }

    fn operand(&self, op: Operand) -> i64 {
        match op {
            Operand::Imm(i) => i,
            Operand::Reg(r) => self.get(r),
        }
    }

    fn run(&mut self, body: &AsmInstructions) -> i64 {
        let labels: HashMap<&str, usize> = body
            .iter()
            .enumerate()
            .filter_map(|(i, instruction)| match instruction {
                AsmInstruction::Label(label) => Some((label.as_str(), i)),
                _ => None,
            })
            .collect();

        let mut pc = 0;
        loop {
            match &body[pc] {
                AsmInstruction::Mov(dst, src) => self.set(*dst, self.operand(*src)),
                AsmInstruction::Binary(op, dst, src1, src2) => {
                    let a = self.get(*src1);
                    let b = self.operand(*src2);
                    let value = match op {
                        AsmBinaryOp::Add => a + b,
                        AsmBinaryOp::Sub => a - b,
                        AsmBinaryOp::Mul => a * b,
                        AsmBinaryOp::Sdiv => a / b,
                    };
                    self.set(*dst, value);
                }
                AsmInstruction::Cmp(lhs, rhs) => {
                    self.cmp = (self.get(*lhs), self.operand(*rhs));
                }
                AsmInstruction::SetCC(cond, dst) => {
                    let (a, b) = self.cmp;
                    let value = match cond {
                        Condition::Eq => a == b,
                        Condition::Ne => a != b,
                        Condition::Lt => a < b,
                        Condition::Le => a <= b,
                    };
                    self.set(*dst, i64::from(value));
                }
                AsmInstruction::Load(dst, addr) => {
                    let value = *self.memory.get(&self.get(*addr)).unwrap_or(&0);
                    self.set(*dst, value);
                }
                AsmInstruction::Store(src, addr) => {
                    self.memory.insert(self.get(*addr), self.get(*src));
                }
                AsmInstruction::Push(r) => self.stack.push(self.get(*r)),
                AsmInstruction::Pop(r) => {
                    let value = self.stack.pop().expect("pop from empty operand stack");
                    self.set(*r, value);
                }
                AsmInstruction::Jmp(label) => pc = labels[label.as_str()],
                AsmInstruction::JmpEq(label) => {
                    if self.cmp.0 == self.cmp.1 {
                        pc = labels[label.as_str()];
                    }
                }
                AsmInstruction::Call(name) => {
                    let f = self.builtins[name.as_str()];
                    let args = self.regs[0..8].to_vec();
                    let result = f(&args);
                    self.set(Register::X0, result);
                }
                AsmInstruction::Label(_) => {}
                AsmInstruction::Ret => return self.get(Register::X0),
            }
            pc += 1;
        }
    }
}

fn eval(source: &str) -> i64 {
    let asm = compile(source).unwrap();
    Machine::new().run(&asm.functions[0].body)
}

#[test]
fn test_return_constant() {
    assert_eq!(42, eval("return 42;"));
}

#[test]
fn test_precedence() {
    assert_eq!(7, eval("return 1 + 2 * 3;"));
}

#[test]
fn test_unary_and_parentheses() {
    assert_eq!(15, eval("return -5 * (3 + 2) + 40;"));
}

#[test]
fn test_division_is_left_associative() {
    assert_eq!(1, eval("return 20 / 4 / 5;"));
}

#[test]
fn test_comparison_yields_zero_or_one() {
    assert_eq!(1, eval("return (3 == 3) + (2 < 1);"));
    assert_eq!(1, eval("return 2 > 1;"));
    assert_eq!(0, eval("return 1 != 1;"));
}

#[test]
fn test_variables_round_trip() {
    assert_eq!(6, eval("a = 2; b = 3; return a * b;"));
}

#[test]
fn test_assignment_is_an_expression() {
    assert_eq!(6, eval("a = 0; b = (a = 5) + 1; return b;"));
}

#[test]
fn test_if_takes_then_branch() {
    assert_eq!(10, eval("if (1 < 2) return 10; else return 20;"));
}

#[test]
fn test_if_takes_else_branch() {
    assert_eq!(20, eval("if (2 < 1) return 10; else return 20;"));
}

#[test]
fn test_while_loop() {
    assert_eq!(3, eval("a = 0; while (a < 3) a = a + 1; return a;"));
}

#[test]
fn test_for_loop() {
    assert_eq!(10, eval("b = 0; for (i = 0; i < 5; i = i + 1) b = b + i; return b;"));
}

#[test]
fn test_for_without_condition_loops_until_return() {
    assert_eq!(4, eval("a = 0; for (;;) { a = a + 1; if (a == 4) return a; }"));
}

#[test]
fn test_nested_loops() {
    let source = "
        s = 0; i = 0;
        while (i < 3) {
            j = 0;
            while (j < 3) { s = s + 1; j = j + 1; }
            i = i + 1;
        }
        return s;
    ";
    assert_eq!(9, eval(source));
}

#[test]
fn test_fall_off_the_end_returns_zero() {
    assert_eq!(0, eval("a = 5;"));
}

#[test]
fn test_relational_swap_generates_identical_shape() {
    let gt = compile("1 > 2;").unwrap();
    let lt = compile("2 < 1;").unwrap();
    assert_eq!(lt.functions[0].body, gt.functions[0].body);
}

#[test]
fn test_operand_stack_balances() {
    let source = "
        a = 1;
        b = a + 2;
        b * 3;
        for (i = 0; i < 10; i = i + 1) b = b + i;
        if (b < 100) b = b + 1;
        return b;
    ";
    let asm = compile(source).unwrap();
    let mut machine = Machine::new();
    machine.run(&asm.functions[0].body);
    assert_eq!(Vec::<i64>::new(), machine.stack);
}

#[test]
fn test_labels_are_unique() {
    let asm = compile("while (1) if (2) 3; for (;1;) 4; if (5) 6; else 7;").unwrap();
    let defined: Vec<&str> = asm.functions[0]
        .body
        .iter()
        .filter_map(|instruction| match instruction {
            AsmInstruction::Label(label) => Some(label.as_str()),
            _ => None,
        })
        .collect();
    let distinct: HashSet<&str> = defined.iter().copied().collect();
    assert_eq!(7, defined.len());
    assert_eq!(defined.len(), distinct.len());
}

#[test]
fn test_each_label_branched_to_once() {
    let asm = compile("while (a < 3) if (a) a = a + 1; else a = a + 2;").unwrap();
    let mut uses: HashMap<&str, usize> = HashMap::new();
    for instruction in &asm.functions[0].body {
        if let AsmInstruction::Jmp(label) | AsmInstruction::JmpEq(label) = instruction {
            *uses.entry(label.as_str()).or_default() += 1;
        }
    }
    for (label, count) in uses {
        assert_eq!(1, count, "label {label} branched to {count} times");
    }
}

#[test]
fn test_call_arguments_land_in_positional_registers() {
    let asm = compile("return probe(1, 2, 3);").unwrap();
    let mut machine = Machine::new();
    machine
        .builtins
        .insert("probe", |args| args[0] * 100 + args[1] * 10 + args[2]);
    assert_eq!(123, machine.run(&asm.functions[0].body));
}

#[test]
fn test_call_arguments_may_be_expressions() {
    let asm = compile("a = 4; return probe(a * 2, a - 1);").unwrap();
    let mut machine = Machine::new();
    machine.builtins.insert("probe", |args| args[0] * 10 + args[1]);
    assert_eq!(83, machine.run(&asm.functions[0].body));
}

#[test]
fn test_call_result_is_an_expression() {
    let asm = compile("return twice(7) + 1;").unwrap();
    let mut machine = Machine::new();
    machine.builtins.insert("twice", |args| args[0] * 2);
    assert_eq!(15, machine.run(&asm.functions[0].body));
}

#[test]
fn test_too_many_arguments_fail() {
    let result = compile("f(1, 2, 3, 4, 5, 6, 7, 8, 9);");
    assert_eq!(
        CodegenError::TooManyArguments("f".to_owned(), 9),
        result.unwrap_err()
    );
}

#[test]
fn test_eight_arguments_are_accepted() {
    let asm = compile("return sum8(1, 2, 3, 4, 5, 6, 7, 8);").unwrap();
    let mut machine = Machine::new();
    machine.builtins.insert("sum8", |args| args.iter().take(8).sum());
    assert_eq!(36, machine.run(&asm.functions[0].body));
}

#[test]
fn test_assignment_target_must_be_variable() {
    assert_eq!(CodegenError::NotAnLvalue, compile("1 = 2;").unwrap_err());
    assert_eq!(CodegenError::NotAnLvalue, compile("(a + 1) = 2;").unwrap_err());
}

#[test]
fn test_externs_collected_in_first_call_order() {
    let asm = compile("foo(); bar(); foo();").unwrap();
    assert_eq!(
        vec!["foo".to_owned(), "bar".to_owned()],
        asm.functions[0].externs
    );
}

#[test]
fn test_frame_size_recorded() {
    let asm = compile("a = 1; b = 2; return a + b;").unwrap();
    assert_eq!(32, asm.functions[0].frame_size);
    assert_eq!(ENTRY_SYMBOL, asm.functions[0].name);
    assert!(asm.functions[0].global);
}
