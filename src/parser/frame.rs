use crate::ast::Identifier;

/// Byte size of one local-variable slot. Locals are addressed as
/// `frame pointer - offset`; a 16-byte slot keeps the AArch64 stack
/// pointer aligned.
pub const SLOT_SIZE: i64 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEntry {
    pub name: Identifier,
    pub offset: i64,
}

/// Append-only map from identifier to frame offset.
///
/// The first occurrence of a name allocates the next slot; later lookups
/// reuse it, so offsets are strictly increasing in first-appearance order.
/// There is no per-block scoping: every identifier in the compilation unit
/// shares one flat frame.
#[derive(Debug, Default)]
pub struct FrameAllocator {
    entries: Vec<FrameEntry>,
}

impl FrameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset for `name`, allocating the next slot on first sight.
    pub fn resolve(&mut self, name: &str) -> i64 {
        if let Some(entry) = self.entries.iter().find(|entry| entry.name == name) {
            return entry.offset;
        }

        let offset = SLOT_SIZE * (self.entries.len() as i64 + 1);
        self.entries.push(FrameEntry {
            name: name.to_owned(),
            offset,
        });
        offset
    }

    /// Largest offset handed out so far; the prologue reserves this many
    /// bytes below the frame pointer.
    pub fn frame_size(&self) -> i64 {
        SLOT_SIZE * self.entries.len() as i64
    }
}
