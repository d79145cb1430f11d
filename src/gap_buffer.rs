//! Gap buffer: the byte container backing a ZEMACS editor core buffer.
//!
//! Text before the cursor and text after the cursor are kept in one
//! contiguous allocation with a "gap" of unspecified bytes between them.
//! Editing at the cursor is then a pointer bump instead of a shift of
//! everything downstream; editing away from the cursor first slides the gap
//! over, which is the only operation that costs more than O(edit size).

use std::alloc::{alloc, dealloc, Layout};
use std::ops::Range;

use log::{debug, trace};

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::marker::{InsertionType, MarkerArena, MarkerId};

/// Gap move distances at or above this many bytes get a debug log line;
/// smaller moves are the common case and would just be noise.
const GAP_MOVE_LOG_THRESHOLD: usize = 4096;

/// A byte-addressed gap buffer with an attached marker arena.
///
/// `GapBuffer` owns its storage and the slot arena for every [`MarkerId`]
/// registered against it; it is intentionally not `Sync` or `Send`-derived
/// beyond what raw-pointer fields naturally forbid, matching the
/// single-writer, single-threaded scheduling model this core assumes.
pub struct GapBuffer {
    /// Layout: `[before_gap][gap][after_gap]`.
    buffer: *mut u8,
    capacity: usize,
    gap_start: usize,
    gap_end: usize,
    markers: MarkerArena,
    config: CoreConfig,
}

impl GapBuffer {
    /// Create a buffer with at least `requested_capacity` bytes of storage,
    /// using [`CoreConfig::default`] for the capacity floor and growth factor.
    pub fn new(requested_capacity: usize) -> Result<Self> {
        Self::with_config(requested_capacity, CoreConfig::default())
    }

    /// Create a buffer under an explicit [`CoreConfig`].
    pub fn with_config(requested_capacity: usize, config: CoreConfig) -> Result<Self> {
        let capacity = requested_capacity.max(config.min_capacity);
        let layout = Self::layout(capacity)?;

        let buffer = unsafe { alloc(layout) };
        if buffer.is_null() {
            return Err(CoreError::AllocationFailure);
        }

        Ok(GapBuffer {
            buffer,
            capacity,
            gap_start: 0,
            gap_end: capacity,
            markers: MarkerArena::new(),
            config,
        })
    }

    fn layout(capacity: usize) -> Result<Layout> {
        Layout::from_size_align(capacity, 1).map_err(|_| CoreError::AllocationFailure)
    }

    /// Logical length of the buffer's content, excluding the gap.
    pub fn len(&self) -> usize {
        self.gap_start + (self.capacity - self.gap_end)
    }

    /// True if the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map a logical position to its physical offset in `buffer`.
    fn physical_of(&self, logical: usize) -> usize {
        if logical < self.gap_start {
            logical
        } else {
            logical + (self.gap_end - self.gap_start)
        }
    }

    /// Read one logical byte, or `None` if `p` is out of `[0, len())`.
    pub fn get(&self, p: usize) -> Option<u8> {
        if p >= self.len() {
            return None;
        }
        let physical = self.physical_of(p);
        Some(unsafe { *self.buffer.add(physical) })
    }

    /// Copy `out.len()` logical bytes starting at `p` into `out`.
    ///
    /// Returns `None` if `p + out.len()` exceeds `len()`; `out` is left
    /// untouched in that case.
    pub fn copy_at(&self, p: usize, out: &mut [u8]) -> Option<()> {
        let n = out.len();
        if p.checked_add(n)? > self.len() {
            return None;
        }
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.get(p + i).expect("range already bounds-checked");
        }
        Some(())
    }

    /// Render a logical byte range as a UTF-8-lossy `String`.
    pub fn slice_to_string_lossy(&self, range: Range<usize>) -> String {
        let mut bytes = vec![0u8; range.len()];
        if !range.is_empty() {
            self.copy_at(range.start, &mut bytes)
                .expect("caller-provided range must be in bounds");
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Iterate logical bytes in `range` one at a time, crossing the gap
    /// transparently, without an intervening allocation.
    pub fn byte_iter(&self, range: Range<usize>) -> ByteIter<'_> {
        ByteIter {
            buffer: self,
            pos: range.start,
            end: range.end.min(self.len()),
        }
    }

    /// Move the gap so that `gap_start == p`. `p` must already be `<= len()`.
    fn move_gap(&mut self, p: usize) {
        let g = self.gap_start;
        if p == g {
            return;
        }
        let distance = p.abs_diff(g);
        if distance >= GAP_MOVE_LOG_THRESHOLD {
            debug!("gap_buffer: moving gap {distance} bytes (from {g} to {p})");
        }
        if p < g {
            // Shift [p, g) rightward into [gap_end - (g - p), gap_end).
            let shift = g - p;
            unsafe {
                std::ptr::copy(
                    self.buffer.add(p),
                    self.buffer.add(self.gap_end - shift),
                    shift,
                );
            }
            self.gap_start = p;
            self.gap_end -= shift;
        } else {
            // Shift [gap_end, gap_end + (p - g)) leftward into [g, p).
            let shift = p - g;
            unsafe {
                std::ptr::copy(self.buffer.add(self.gap_end), self.buffer.add(g), shift);
            }
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Ensure the gap can hold at least `need` bytes, reallocating if not.
    fn ensure_gap(&mut self, need: usize) -> Result<()> {
        if self.gap_end - self.gap_start >= need {
            return Ok(());
        }

        let content_len = self.len();
        let new_capacity = (self.config.gap_growth_factor * self.capacity)
            .max(content_len + need + self.config.min_capacity);
        trace!(
            "gap_buffer: growing capacity {} -> {new_capacity} (need {need} more bytes)",
            self.capacity
        );

        let new_layout = Self::layout(new_capacity)?;
        let new_buffer = unsafe { alloc(new_layout) };
        if new_buffer.is_null() {
            return Err(CoreError::AllocationFailure);
        }

        unsafe {
            std::ptr::copy_nonoverlapping(self.buffer, new_buffer, self.gap_start);
        }

        let after_len = self.capacity - self.gap_end;
        unsafe {
            std::ptr::copy_nonoverlapping(
                self.buffer.add(self.gap_end),
                new_buffer.add(new_capacity - after_len),
                after_len,
            );
        }

        let old_layout = Self::layout(self.capacity)?;
        unsafe {
            dealloc(self.buffer, old_layout);
        }

        self.gap_end = new_capacity - after_len;
        self.capacity = new_capacity;
        self.buffer = new_buffer;
        Ok(())
    }

    /// Insert `text` at logical position `p`, updating every registered
    /// marker per the tie-break rules in [`MarkerArena::apply_insert`].
    ///
    /// Returns `Err(CoreError::PositionOutOfBounds)` if `p > len()`; `text`
    /// is not touched and no marker is updated in that case.
    pub fn insert(&mut self, p: usize, text: &[u8]) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if p > self.len() {
            return Err(CoreError::PositionOutOfBounds { pos: p, len: self.len() });
        }

        self.move_gap(p);
        self.ensure_gap(text.len())?;

        unsafe {
            std::ptr::copy_nonoverlapping(text.as_ptr(), self.buffer.add(self.gap_start), text.len());
        }
        self.gap_start += text.len();

        self.markers.apply_insert(p, text.len());
        Ok(())
    }

    /// Delete up to `requested_len` logical bytes starting at `p`, clamped
    /// to the end of the buffer. No-op if `requested_len` is `0`.
    pub fn delete(&mut self, p: usize, requested_len: usize) {
        if requested_len == 0 || p >= self.len() {
            return;
        }
        let n = requested_len.min(self.len() - p);

        self.move_gap(p);
        self.gap_end += n;

        self.markers.apply_delete(p, n);
    }

    /// Materialize the entire logical content as a freshly allocated `Vec`.
    pub fn to_owned_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.len()];
        if !out.is_empty() {
            self.copy_at(0, &mut out).expect("whole-buffer range is always in bounds");
        }
        out
    }

    /// Register a new marker at logical position `p` and return its handle.
    ///
    /// Returns `None` if `p > len()`, the same out-of-range signal `get`
    /// and `copy_at` give rather than silently substituting a different
    /// position.
    pub fn register_marker(&mut self, p: usize, insertion_type: InsertionType) -> Option<MarkerId> {
        if p > self.len() {
            return None;
        }
        Some(self.markers.register(p, insertion_type))
    }

    /// Stop tracking `id`. Returns `false` if `id` was already stale.
    pub fn deregister_marker(&mut self, id: MarkerId) -> bool {
        self.markers.deregister(id)
    }

    /// Current position of `id`, or `None` if stale.
    pub fn marker_pos(&self, id: MarkerId) -> Option<usize> {
        self.markers.pos(id)
    }

    /// Insertion-type tie-break of `id`, or `None` if stale.
    pub fn marker_insertion_type(&self, id: MarkerId) -> Option<InsertionType> {
        self.markers.insertion_type(id)
    }

    /// Number of currently registered markers.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

/// Iterator over a logical byte range of a [`GapBuffer`], crossing the gap
/// transparently.
pub struct ByteIter<'a> {
    buffer: &'a GapBuffer,
    pos: usize,
    end: usize,
}

impl<'a> Iterator for ByteIter<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.pos >= self.end {
            return None;
        }
        let byte = self.buffer.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }
}

impl Drop for GapBuffer {
    fn drop(&mut self) {
        if let Ok(layout) = Self::layout(self.capacity) {
            unsafe {
                dealloc(self.buffer, layout);
            }
        }
    }
}
