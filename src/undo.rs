//! Linear two-stack undo/redo history over [`GapBuffer`] edit primitives.
//!
//! Unlike a branching undo tree, this manager models exactly one timeline:
//! undoing then performing a new edit discards the redo branch rather than
//! preserving it. That is the trade the spec makes in exchange for a much
//! smaller, easier-to-reason-about implementation.

use log::{debug, trace};

use crate::error::{CoreError, Result};
use crate::gap_buffer::GapBuffer;

/// One recorded edit primitive, paired with enough data to invert it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UndoEntry {
    /// `len` bytes were inserted at logical `pos`. Inverting deletes them.
    Insert { pos: usize, len: usize },
    /// `text` was removed starting at logical `pos`. Inverting re-inserts it.
    Delete { pos: usize, text: Vec<u8> },
    /// Reserved: a marker's position prior to some other edit. Not yet
    /// produced by [`UndoManager`]; see the data model's open question on
    /// whether marker moves need their own undo entries.
    MarkerMove { marker_ref: u64, old_pos: usize },
}

impl UndoEntry {
    fn estimated_size(&self) -> usize {
        match self {
            UndoEntry::Insert { .. } => std::mem::size_of::<Self>(),
            UndoEntry::Delete { text, .. } => std::mem::size_of::<Self>() + text.len(),
            UndoEntry::MarkerMove { .. } => std::mem::size_of::<Self>(),
        }
    }
}

/// An ordered list of [`UndoEntry`] values forming one atomic user-visible edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UndoGroup {
    entries: Vec<UndoEntry>,
}

impl UndoGroup {
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn estimated_size(&self) -> usize {
        self.entries.iter().map(UndoEntry::estimated_size).sum()
    }
}

/// Two-stack linear undo/redo manager over a single [`GapBuffer`].
///
/// Owns the captured `Delete` bytes for every group on either stack; dropping
/// the manager, clearing it, or evicting a group under `max_undo_steps`
/// releases them.
#[derive(Debug)]
pub struct UndoManager {
    undo_stack: Vec<UndoGroup>,
    redo_stack: Vec<UndoGroup>,
    current: Option<UndoGroup>,
    max_undo_steps: usize,
}

impl UndoManager {
    /// Create a manager with the spec's default `max_undo_steps` (1000).
    pub fn new() -> Self {
        Self::with_max_undo_steps(crate::config::DEFAULT_MAX_UNDO_STEPS)
    }

    /// Create a manager with an explicit cap on retained undo groups.
    pub fn with_max_undo_steps(max_undo_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current: None,
            max_undo_steps,
        }
    }

    /// Start a new open group. No-op if one is already open.
    pub fn begin_group(&mut self) {
        if self.current.is_none() {
            self.current = Some(UndoGroup::default());
        }
    }

    /// Close the open group and push it onto the undo stack, clearing the
    /// redo stack. No-op if no group is open, or the open group is empty.
    pub fn end_group(&mut self) {
        let Some(group) = self.current.take() else {
            return;
        };
        if group.is_empty() {
            return;
        }

        if !self.redo_stack.is_empty() {
            trace!("undo: new edit group closed, discarding {} redo group(s)", self.redo_stack.len());
        }
        self.redo_stack.clear();
        self.push_undo(group);
    }

    fn push_undo(&mut self, group: UndoGroup) {
        self.undo_stack.push(group);
        if self.undo_stack.len() > self.max_undo_steps {
            debug!("undo: undo stack exceeded {} groups, dropping oldest", self.max_undo_steps);
            self.undo_stack.remove(0);
        }
    }

    /// Append an `Insert` entry to the open group, opening one if needed.
    pub fn record_insert(&mut self, pos: usize, len: usize) {
        self.begin_group();
        self.current
            .as_mut()
            .expect("begin_group just ensured a current group")
            .entries
            .push(UndoEntry::Insert { pos, len });
    }

    /// Append a `Delete` entry (copying `text`) to the open group, opening
    /// one if needed.
    pub fn record_delete(&mut self, pos: usize, text: &[u8]) {
        self.begin_group();
        self.current
            .as_mut()
            .expect("begin_group just ensured a current group")
            .entries
            .push(UndoEntry::Delete { pos, text: text.to_vec() });
    }

    /// Undo one group against `buffer`, pushing its inverse onto the redo
    /// stack. Returns `false` if the undo stack is empty.
    pub fn undo(&mut self, buffer: &mut GapBuffer) -> Result<bool> {
        Self::apply_top(&mut self.undo_stack, &mut self.redo_stack, buffer)
    }

    /// Redo one group against `buffer`, pushing its inverse back onto the
    /// undo stack. Returns `false` if the redo stack is empty.
    pub fn redo(&mut self, buffer: &mut GapBuffer) -> Result<bool> {
        Self::apply_top(&mut self.redo_stack, &mut self.undo_stack, buffer)
    }

    /// Shared undo/redo machinery: pop a group from `from`, apply each
    /// entry's inverse to `buffer` in reverse order, and push the
    /// constructed inverse group onto `onto`.
    ///
    /// On failure, `from` is restored to its pre-call state (the popped
    /// group is pushed back) and `onto` is left untouched, per the
    /// documented failure semantics: both stacks must end up exactly where
    /// they started, with the in-progress inverse group discarded.
    fn apply_top(
        from: &mut Vec<UndoGroup>,
        onto: &mut Vec<UndoGroup>,
        buffer: &mut GapBuffer,
    ) -> Result<bool> {
        let Some(group) = from.pop() else {
            return Ok(false);
        };

        match Self::invert_group(&group, buffer) {
            Ok(inverse_entries) => {
                onto.push(UndoGroup { entries: inverse_entries });
                Ok(true)
            }
            Err(err) => {
                from.push(group);
                Err(err)
            }
        }
    }

    /// Apply every entry of `group` to `buffer` in reverse order, returning
    /// the entries of the constructed inverse group.
    fn invert_group(group: &UndoGroup, buffer: &mut GapBuffer) -> Result<Vec<UndoEntry>> {
        let mut inverse_entries = Vec::with_capacity(group.entries.len());
        for entry in group.entries.iter().rev() {
            match entry {
                UndoEntry::Insert { pos, len } => {
                    let mut bytes = vec![0u8; *len];
                    if *len > 0 {
                        buffer.copy_at(*pos, &mut bytes).ok_or(CoreError::AllocationFailure)?;
                    }
                    buffer.delete(*pos, *len);
                    inverse_entries.push(UndoEntry::Delete { pos: *pos, text: bytes });
                }
                UndoEntry::Delete { pos, text } => {
                    buffer.insert(*pos, text)?;
                    inverse_entries.push(UndoEntry::Insert { pos: *pos, len: text.len() });
                }
                UndoEntry::MarkerMove { marker_ref, old_pos } => {
                    inverse_entries.push(UndoEntry::MarkerMove {
                        marker_ref: *marker_ref,
                        old_pos: *old_pos,
                    });
                }
            }
        }
        Ok(inverse_entries)
    }

    /// True if at least one group is available to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// True if at least one group is available to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of groups currently on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of groups currently on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Total bytes retained across both stacks (diagnostic only).
    pub fn estimated_memory(&self) -> usize {
        self.undo_stack.iter().map(UndoGroup::estimated_size).sum::<usize>()
            + self.redo_stack.iter().map(UndoGroup::estimated_size).sum::<usize>()
    }

    /// Drop both stacks and any in-progress group, releasing all owned bytes.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current = None;
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
#[path = "undo/fuzz_tests.rs"]
mod fuzz_tests;
