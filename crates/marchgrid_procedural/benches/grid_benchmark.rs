//! Benchmark for grid building, cleanup and tiling.
//!
//! Run with: `cargo bench --package marchgrid_procedural --bench grid_benchmark`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marchgrid_procedural::{cleanup, tile_placements, GridBuilder, NoiseSeed, ScreenSize};

fn builder(cell_size: usize) -> GridBuilder {
    let screen = ScreenSize::new(1920, 1080);
    GridBuilder::new(screen, cell_size, 0.5, 1.0, 1920 * 1080 / cell_size)
        .with_seed(NoiseSeed::new(42))
}

fn benchmark_build(c: &mut Criterion) {
    let builder = builder(9);
    c.bench_function("build_1080p_9px", |b| b.iter(|| black_box(builder.build())));
}

fn benchmark_cleanup(c: &mut Criterion) {
    let grid = builder(9).build();
    c.bench_function("cleanup_1080p_9px", |b| b.iter(|| black_box(cleanup(&grid))));
}

fn benchmark_tiling(c: &mut Criterion) {
    let grid = builder(9).build();
    c.bench_function("tile_indices_1080p_9px", |b| {
        b.iter(|| {
            let sum: usize = tile_placements(&grid, 9)
                .map(|p| usize::from(p.index.value()))
                .sum();
            black_box(sum)
        });
    });
}

criterion_group!(benches, benchmark_build, benchmark_cleanup, benchmark_tiling);
criterion_main!(benches);
