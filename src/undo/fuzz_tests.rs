//! Undo/redo fuzz test against a shadow linear history (scenario E).

use super::*;
use crate::gap_buffer::GapBuffer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ITERATIONS: usize = 1_000;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Action {
    NewEdit,
    Undo,
    Redo,
}

#[test]
fn test_undo_fuzz_against_shadow_history() {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let mut buf = GapBuffer::new(16).unwrap();
    let mut mgr = UndoManager::new();

    // shadow[i] is the materialized state after i edits have been applied
    // (i.e. shadow[current_index] always matches buf's content).
    let mut shadow: Vec<Vec<u8>> = vec![Vec::new()];
    let mut current_index = 0usize;

    for _ in 0..ITERATIONS {
        let undo_depth = mgr.undo_depth();
        let redo_depth = mgr.redo_depth();

        let choices: Vec<Action> = [
            Some(Action::NewEdit),
            (undo_depth > 0).then_some(Action::Undo),
            (redo_depth > 0).then_some(Action::Redo),
        ]
        .into_iter()
        .flatten()
        .collect();

        match choices[rng.gen_range(0..choices.len())] {
            Action::NewEdit => {
                let pos = rng.gen_range(0..=buf.len());
                let byte = b'a' + (rng.gen_range(0..26) as u8);
                buf.insert(pos, &[byte]).unwrap();
                mgr.record_insert(pos, 1);
                mgr.end_group();

                // A new edit while undo_depth > 0 discards the shadow's
                // redo suffix before appending the fresh state.
                shadow.truncate(current_index + 1);
                shadow.push(buf.to_owned_bytes());
                current_index += 1;
            }
            Action::Undo => {
                assert!(mgr.undo(&mut buf).unwrap());
                current_index -= 1;
            }
            Action::Redo => {
                assert!(mgr.redo(&mut buf).unwrap());
                current_index += 1;
            }
        }

        assert_eq!(buf.to_owned_bytes(), shadow[current_index]);
    }
}
