use crate::ast::Identifier;

/// Unique branch-target labels for control-flow lowering.
///
/// A plain monotonic counter: a label is never handed out twice within one
/// compilation unit, and each one ends up in the output exactly twice, as a
/// branch operand and as a definition.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    counter: u64,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self, prefix: &str) -> Identifier {
        let n = self.counter;
        self.counter += 1;
        format!(".L{prefix}_{n}")
    }
}
