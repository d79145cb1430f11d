use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use zemacs_core::{GapBuffer, UndoManager};

fn push_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_push_edit");

    group.bench_function("record_100_groups", |b| {
        b.iter_batched(
            UndoManager::new,
            |mut mgr| {
                for i in 0..100 {
                    mgr.record_insert(i, 1);
                    mgr.end_group();
                }
                mgr
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn undo_redo_small(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_redo_small");

    group.bench_function("undo_then_redo_50", |b| {
        b.iter_batched(
            || {
                let mut buf = GapBuffer::new(4096).unwrap();
                let mut mgr = UndoManager::new();
                for _ in 0..100 {
                    let len = buf.len();
                    buf.insert(len, b"x").unwrap();
                    mgr.record_insert(len, 1);
                    mgr.end_group();
                }
                (buf, mgr)
            },
            |(mut buf, mut mgr)| {
                for _ in 0..50 {
                    black_box(mgr.undo(&mut buf).unwrap());
                }
                for _ in 0..50 {
                    black_box(mgr.redo(&mut buf).unwrap());
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn deep_undo_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_deep_stack");

    group.bench_function("undo_all_of_1000", |b| {
        b.iter_batched(
            || {
                let mut buf = GapBuffer::new(4096).unwrap();
                let mut mgr = UndoManager::with_max_undo_steps(2000);
                for _ in 0..1000 {
                    let len = buf.len();
                    buf.insert(len, b"x").unwrap();
                    mgr.record_insert(len, 1);
                    mgr.end_group();
                }
                (buf, mgr)
            },
            |(mut buf, mut mgr)| {
                while mgr.can_undo() {
                    black_box(mgr.undo(&mut buf).unwrap());
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, push_edit, undo_redo_small, deep_undo_stack);
criterion_main!(benches);
