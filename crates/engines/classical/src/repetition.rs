use chess_core::Move;

/// The last few root moves the engine chose, oldest overwritten first.
///
/// Capacity never changes after construction. Empty slots hold no move and
/// never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepetitionMemory {
    slots: Vec<Option<Move>>,
    /// Slot the next push overwrites
    next: usize,
}

impl RepetitionMemory {
    pub const DEFAULT_CAPACITY: usize = 8;

    /// A capacity of zero is rounded up to one slot.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            next: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a move.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn push(&mut self, mv: Move) {
        self.slots[self.next] = Some(mv);
        self.next = (self.next + 1) % self.slots.len();
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.slots.iter().flatten().any(|m| m == mv)
    }

    /// Remembered moves, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        let (newer, older) = self.slots.split_at(self.next);
        older.iter().chain(newer).flatten().copied()
    }
}

impl Default for RepetitionMemory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
#[path = "repetition_tests.rs"]
mod repetition_tests;
