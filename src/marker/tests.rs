//! Tests for the marker arena

use super::*;

#[test]
fn test_register_and_pos_roundtrip() {
    let mut arena = MarkerArena::new();
    let id = arena.register(5, InsertionType::StayBehind);
    assert_eq!(arena.pos(id), Some(5));
    assert_eq!(arena.insertion_type(id), Some(InsertionType::StayBehind));
    assert_eq!(arena.len(), 1);
    assert!(!arena.is_empty());
}

#[test]
fn test_deregister_then_stale_lookups_fail() {
    let mut arena = MarkerArena::new();
    let id = arena.register(0, InsertionType::Advance);
    assert!(arena.deregister(id));
    assert_eq!(arena.pos(id), None);
    assert_eq!(arena.insertion_type(id), None);
    assert!(!arena.deregister(id));
    assert!(arena.is_empty());
}

#[test]
fn test_recycled_slot_does_not_alias_stale_handle() {
    let mut arena = MarkerArena::new();
    let first = arena.register(10, InsertionType::StayBehind);
    assert!(arena.deregister(first));

    let second = arena.register(20, InsertionType::Advance);
    // Same slot index recycled, but the generation bump means these differ.
    assert_ne!(first, second);
    assert_eq!(arena.pos(first), None);
    assert_eq!(arena.pos(second), Some(20));
}

#[test]
fn test_slot_recycled_twice_never_aliases() {
    let mut arena = MarkerArena::new();
    let gen0 = arena.register(1, InsertionType::StayBehind);
    assert!(arena.deregister(gen0));
    let gen1 = arena.register(2, InsertionType::StayBehind);
    assert!(arena.deregister(gen1));
    let gen2 = arena.register(3, InsertionType::StayBehind);

    assert_ne!(gen0, gen1);
    assert_ne!(gen1, gen2);
    assert_ne!(gen0, gen2);
    assert_eq!(arena.pos(gen0), None);
    assert_eq!(arena.pos(gen1), None);
    assert_eq!(arena.pos(gen2), Some(3));
}

#[test]
fn test_apply_insert_strictly_after_shifts() {
    let mut arena = MarkerArena::new();
    let before = arena.register(3, InsertionType::Advance);
    let after = arena.register(10, InsertionType::Advance);
    arena.apply_insert(5, 4);
    assert_eq!(arena.pos(before), Some(3));
    assert_eq!(arena.pos(after), Some(14));
}

#[test]
fn test_apply_insert_at_exact_position_tie_break() {
    let mut arena = MarkerArena::new();
    let stay = arena.register(5, InsertionType::StayBehind);
    let advance = arena.register(5, InsertionType::Advance);
    arena.apply_insert(5, 3);
    assert_eq!(arena.pos(stay), Some(5));
    assert_eq!(arena.pos(advance), Some(8));
}

#[test]
fn test_apply_insert_zero_len_is_noop() {
    let mut arena = MarkerArena::new();
    let id = arena.register(5, InsertionType::Advance);
    arena.apply_insert(5, 0);
    assert_eq!(arena.pos(id), Some(5));
}

#[test]
fn test_apply_delete_before_range_untouched() {
    let mut arena = MarkerArena::new();
    let id = arena.register(2, InsertionType::StayBehind);
    arena.apply_delete(5, 3);
    assert_eq!(arena.pos(id), Some(2));
}

#[test]
fn test_apply_delete_inside_range_collapses_to_start() {
    let mut arena = MarkerArena::new();
    let id = arena.register(6, InsertionType::StayBehind);
    arena.apply_delete(5, 3);
    assert_eq!(arena.pos(id), Some(5));
}

#[test]
fn test_apply_delete_past_range_shifts_back() {
    let mut arena = MarkerArena::new();
    let id = arena.register(10, InsertionType::StayBehind);
    arena.apply_delete(5, 3);
    assert_eq!(arena.pos(id), Some(7));
}

#[test]
fn test_apply_delete_at_boundary_shifts_back() {
    let mut arena = MarkerArena::new();
    let id = arena.register(8, InsertionType::StayBehind);
    arena.apply_delete(5, 3);
    assert_eq!(arena.pos(id), Some(5));
}

#[test]
fn test_multiple_markers_independent() {
    let mut arena = MarkerArena::new();
    let a = arena.register(0, InsertionType::StayBehind);
    let b = arena.register(4, InsertionType::StayBehind);
    let c = arena.register(8, InsertionType::StayBehind);
    assert!(arena.deregister(b));
    arena.apply_insert(2, 1);
    assert_eq!(arena.pos(a), Some(0));
    assert_eq!(arena.pos(b), None);
    assert_eq!(arena.pos(c), Some(9));
    assert_eq!(arena.len(), 2);
}
