//! Typed configuration surface for the editor core.
//!
//! There is nothing here to load from disk or environment: the core's
//! non-goal of no persistence means `CoreConfig` is a builder, not a file
//! format. It exists so the tunables the spec calls out by name have one
//! place to live instead of being scattered magic numbers.

/// Minimum capacity floor for a [`GapBuffer`](crate::gap_buffer::GapBuffer), in bytes.
pub const MIN_CAPACITY: usize = 1024;

/// Default growth factor applied when a buffer's gap is exhausted.
pub const GAP_GROWTH_FACTOR: usize = 2;

/// Default cap on the number of undo groups an [`UndoManager`](crate::undo::UndoManager) retains.
pub const DEFAULT_MAX_UNDO_STEPS: usize = 1000;

/// Default nested-parenthesis recursion depth the scanner tolerates before
/// failing with [`CoreError::RecursionLimitExceeded`](crate::error::CoreError::RecursionLimitExceeded).
pub const DEFAULT_MAX_SCAN_DEPTH: usize = 512;

/// Tunables for a buffer/undo-manager pair.
///
/// Constructed with [`CoreConfig::default`] for the spec's stated defaults,
/// or built up field-by-field for callers (tests, the fuzz harness) that
/// need tighter bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreConfig {
    /// Capacity floor applied to every newly created buffer.
    pub min_capacity: usize,
    /// Growth factor used by `ensure_gap` when the buffer must reallocate.
    pub gap_growth_factor: usize,
    /// Maximum number of undo groups retained before the oldest is dropped.
    pub max_undo_steps: usize,
    /// Maximum scanner recursion depth before `scan_sexp` fails.
    pub max_scan_depth: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            min_capacity: MIN_CAPACITY,
            gap_growth_factor: GAP_GROWTH_FACTOR,
            max_undo_steps: DEFAULT_MAX_UNDO_STEPS,
            max_scan_depth: DEFAULT_MAX_SCAN_DEPTH,
        }
    }
}

impl CoreConfig {
    /// Defaults, with `max_undo_steps` overridden. Convenience for tests and
    /// callers that want a tight undo history without hand-building the rest
    /// of the struct.
    #[must_use]
    pub fn with_max_undo_steps(max_undo_steps: usize) -> Self {
        Self {
            max_undo_steps,
            ..Self::default()
        }
    }
}
