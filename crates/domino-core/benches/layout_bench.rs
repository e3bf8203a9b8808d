//! Criterion benchmarks for [`LayoutEngine`] and [`MoveResolver`] hot paths.
//!
//! The board is laid out again on every state refresh and every click is
//! hit-tested against the result, so both must stay well under a frame.
//!
//! Run with:
//! ```bash
//! cargo bench --package domino-core --bench layout_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use domino_core::{
    BoardTree, LayoutEngine, LegalMove, MoveResolver, Point, Sides, TileId, Viewport,
};

// ── Board fixture builders ────────────────────────────────────────────────────

/// Builds a chain of `n` tiles hanging off a double origin's east slot.
fn build_chain(n: usize) -> BoardTree {
    let pairs = (0..=6u8)
        .flat_map(|a| (a..=6u8).map(move |b| Sides::new(a, b)))
        .filter(|s| s.key() != Sides::new(6, 6).key());
    let mut tree = BoardTree::new(Sides::new(6, 6));
    let mut tail = TileId::ROOT;
    for sides in pairs.take(n) {
        tail = tree
            .attach(tail, sides)
            .expect("chain tiles always have a free slot");
    }
    tree
}

/// Builds a spinner with all four arms played, each arm `arm_len` tiles long.
fn build_spinner(arm_len: usize) -> BoardTree {
    let mut tree = BoardTree::new(Sides::new(6, 6));
    let mut pip = 0u8;
    for _ in 0..4 {
        let mut tail = tree
            .attach(TileId::ROOT, Sides::new(6, pip))
            .expect("a double has four slots");
        for _ in 1..arm_len {
            let next = (pip + 1) % 6;
            tail = tree
                .attach(tail, Sides::new(pip, next))
                .expect("chain tiles always have a free slot");
            pip = next;
        }
        pip = (pip + 1) % 6;
    }
    tree
}

// ── Benchmarks: layout ────────────────────────────────────────────────────────

/// Benchmarks [`LayoutEngine::layout`] scaling with chain length.
fn bench_layout_chain(c: &mut Criterion) {
    let engine = LayoutEngine::default();
    let mut group = c.benchmark_group("layout_chain");

    for &len in &[1usize, 8, 16, 27] {
        let tree = build_chain(len);
        group.bench_with_input(BenchmarkId::new("tiles", len + 1), &tree, |b, tree| {
            b.iter(|| engine.layout(black_box(tree), black_box(Point::new(500.0, 500.0))))
        });
    }

    group.finish();
}

/// Benchmarks [`LayoutEngine::layout`] on a full four-armed spinner.
fn bench_layout_spinner(c: &mut Criterion) {
    let engine = LayoutEngine::default();
    let tree = build_spinner(6);

    c.bench_function("layout_spinner_25_tiles", |b| {
        b.iter(|| engine.layout(black_box(&tree), black_box(Point::new(500.0, 500.0))))
    });
}

// ── Benchmarks: resolve ───────────────────────────────────────────────────────

/// Benchmarks [`MoveResolver::resolve`] for a hit and for a miss.
fn bench_resolve(c: &mut Criterion) {
    let registry = LayoutEngine::default()
        .layout(&build_spinner(6), Point::new(500.0, 500.0))
        .expect("spinner must lay out");
    let resolver = MoveResolver::default();
    let viewport = Viewport::default();
    let moves = vec![
        LegalMove::new(Sides::new(6, 0), Sides::new(0, 0)),
        LegalMove::new(Sides::new(6, 6), Sides::new(6, 5)),
    ];
    let mut group = c.benchmark_group("resolve");

    group.bench_function("hit_origin", |b| {
        b.iter(|| {
            resolver.resolve(
                black_box(Point::new(500.0, 500.0)),
                &viewport,
                &registry,
                black_box(Some(Sides::new(5, 6))),
                &moves,
            )
        })
    });

    group.bench_function("miss_far_away", |b| {
        b.iter(|| {
            resolver.resolve(
                black_box(Point::new(-5000.0, -5000.0)),
                &viewport,
                &registry,
                black_box(Some(Sides::new(5, 6))),
                &moves,
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_layout_chain,
    bench_layout_spinner,
    bench_resolve,
);
criterion_main!(benches);
