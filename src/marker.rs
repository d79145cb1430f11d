//! Marker arena: opaque, generational handles onto positions inside a [`GapBuffer`](crate::gap_buffer::GapBuffer).
//!
//! The buffer does not hand callers a pointer into its own marker storage —
//! that would couple the marker's lifetime to the buffer's in a way Rust's
//! borrow checker can't express without the buffer staying borrowed for as
//! long as every marker lives. Instead, registering a marker returns a
//! [`MarkerId`]: an index into an arena plus a generation counter. The arena
//! recycles freed slots; the generation check means a stale `MarkerId` used
//! after its marker is deregistered is detected rather than silently
//! aliasing whatever marker now lives in the reused slot.

/// Opaque handle to a marker tracked by a [`GapBuffer`](crate::gap_buffer::GapBuffer).
///
/// Cheap to copy, carries no lifetime, and is inert once its marker has been
/// deregistered or its buffer destroyed: operations against a stale handle
/// return `None` rather than aliasing a reused slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId {
    index: usize,
    generation: u32,
}

/// Tie-breaking rule for a marker at the exact position of an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionType {
    /// The marker stays put when text is inserted exactly at its position.
    StayBehind,
    /// The marker advances past text inserted exactly at its position.
    Advance,
}

impl InsertionType {
    fn advances(self) -> bool {
        matches!(self, InsertionType::Advance)
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    pos: usize,
    insertion_type: InsertionType,
    occupied: bool,
    /// Bumped every time this index is recycled, so a `MarkerId` minted
    /// before the slot was freed no longer matches.
    generation: u32,
}

/// Arena of live markers, addressed by [`MarkerId`].
///
/// A [`GapBuffer`](crate::gap_buffer::GapBuffer) owns one of these and
/// updates every live slot on each `insert`/`delete` per the rules in
/// [`GapBuffer::insert`](crate::gap_buffer::GapBuffer::insert) and
/// [`GapBuffer::delete`](crate::gap_buffer::GapBuffer::delete).
#[derive(Debug, Default)]
pub struct MarkerArena {
    slots: Vec<Slot>,
    free_list: Vec<usize>,
}

impl MarkerArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new marker at `pos` and return its handle.
    pub fn register(&mut self, pos: usize, insertion_type: InsertionType) -> MarkerId {
        if let Some(index) = self.free_list.pop() {
            let generation = self.slots[index].generation;
            self.slots[index] = Slot {
                pos,
                insertion_type,
                occupied: true,
                generation,
            };
            MarkerId { index, generation }
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                pos,
                insertion_type,
                occupied: true,
                generation: 0,
            });
            MarkerId { index, generation: 0 }
        }
    }

    /// Stop tracking `id`. No-op (returns `false`) if `id` is already stale.
    pub fn deregister(&mut self, id: MarkerId) -> bool {
        match self.slots.get_mut(id.index) {
            Some(slot) if slot.occupied && slot.generation == id.generation => {
                slot.occupied = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(id.index);
                true
            }
            _ => false,
        }
    }

    /// Current position of `id`, or `None` if stale.
    pub fn pos(&self, id: MarkerId) -> Option<usize> {
        self.slot(id).map(|s| s.pos)
    }

    /// Insertion-type tie-break of `id`, or `None` if stale.
    pub fn insertion_type(&self, id: MarkerId) -> Option<InsertionType> {
        self.slot(id).map(|s| s.insertion_type)
    }

    fn slot(&self, id: MarkerId) -> Option<&Slot> {
        self.slots
            .get(id.index)
            .filter(|s| s.occupied && s.generation == id.generation)
    }

    /// Apply an insertion of `len` bytes at `pos` to every live marker, per
    /// the rule in §4.1: a marker strictly after `pos`, or exactly at `pos`
    /// with `Advance` affinity, shifts forward by `len`.
    pub fn apply_insert(&mut self, pos: usize, len: usize) {
        if len == 0 {
            return;
        }
        for slot in self.slots.iter_mut().filter(|s| s.occupied) {
            if slot.pos > pos || (slot.pos == pos && slot.insertion_type.advances()) {
                slot.pos += len;
            }
        }
    }

    /// Apply a deletion of `[pos, pos + len)` to every live marker: markers
    /// past the deleted range shift back by `len`; markers inside it
    /// collapse to `pos`; markers before it are untouched.
    pub fn apply_delete(&mut self, pos: usize, len: usize) {
        if len == 0 {
            return;
        }
        let end = pos + len;
        for slot in self.slots.iter_mut().filter(|s| s.occupied) {
            if slot.pos >= end {
                slot.pos -= len;
            } else if slot.pos > pos {
                slot.pos = pos;
            }
        }
    }

    /// Number of currently registered (non-stale) markers.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.occupied).count()
    }

    /// True if no markers are currently registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "marker/tests.rs"]
mod tests;
