//! ZEMACS editor core: gap-buffer text storage, markers, undo/redo history,
//! and an s-expression scanner.
//!
//! This crate has no wire, file, or CLI surface of its own (§6 of the
//! design) — it is a library an RPC tool dispatcher embeds. It is
//! single-threaded and cooperative: nothing here is `Sync`, and a buffer
//! must not be shared across threads without external synchronization.

pub mod config;
pub mod error;
pub mod gap_buffer;
pub mod marker;
pub mod syntax;
pub mod undo;

pub use config::CoreConfig;
pub use error::{CoreError, Result};
pub use gap_buffer::GapBuffer;
pub use marker::{InsertionType, MarkerId};
pub use syntax::{scan_sexp, scan_sexp_n, scan_sexp_with_config, skip_whitespace, SyntaxClass, SyntaxTable};
pub use undo::{UndoEntry, UndoGroup, UndoManager};
