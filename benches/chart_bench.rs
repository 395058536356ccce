//! Benchmarks for chart layout and animation
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pulseboard::chart::bar::{performance_metrics, performance_months};
use pulseboard::chart::geometry::map_line_points;
use pulseboard::chart::pie::compute_segments;
use pulseboard::chart::{
    Animator, AnimatorConfig, BarChart, ChartDataset, Color, LineChart, PieCategory, SvgSurface,
    ValueFormat, Viewport,
};

fn series(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 50.0 + 40.0 * (i as f64 * 0.3).sin())
        .collect()
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let viewport = Viewport::new(400.0, 200.0, 20.0);

    for size in [5, 100, 1000] {
        let values = series(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("map_line_points", size), &values, |b, v| {
            b.iter(|| map_line_points(black_box(v), &viewport))
        });
    }

    group.finish();
}

fn bench_animator(c: &mut Criterion) {
    let mut group = c.benchmark_group("animator");

    for size in [4, 64] {
        let targets = series(size);
        group.bench_function(format!("run_to_rest_{}", size), |b| {
            b.iter(|| {
                let mut animator = Animator::new(targets.clone(), AnimatorConfig::default());
                animator.run_to_rest(black_box(1000))
            })
        });
    }

    group.finish();
}

fn bench_pie(c: &mut Criterion) {
    let categories: Vec<PieCategory> = (0..8)
        .map(|i| PieCategory::new(format!("slice-{}", i), Color::GRAY_500))
        .collect();
    let values = series(8);

    c.bench_function("compute_segments_8", |b| {
        b.iter(|| compute_segments(black_box(&categories), black_box(&values)))
    });
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let viewport = Viewport::new(520.0, 220.0, 20.0);

    let labels: Vec<String> = (0..30).map(|i| format!("Day {}", i + 1)).collect();
    let dataset = ChartDataset::from_pairs(
        &labels,
        &series(30),
        Color::rgb(0x3b, 0x82, 0xf6),
        ValueFormat::Count,
    );
    let line = LineChart::new(dataset, viewport).animated(false);

    group.bench_function("line_svg", |b| {
        b.iter(|| {
            let mut surface = SvgSurface::new(viewport.width, viewport.height);
            line.draw_frame(&mut surface);
            surface.finish()
        })
    });

    let bars = BarChart::new(
        performance_metrics(),
        performance_months(),
        Viewport::new(520.0, 256.0, 16.0),
    );
    let displayed = bars.targets();

    group.bench_function("bar_svg", |b| {
        b.iter(|| {
            let mut surface = SvgSurface::new(520.0, 280.0);
            bars.draw(&mut surface, black_box(&displayed));
            surface.finish()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_geometry,
    bench_animator,
    bench_pie,
    bench_render
);
criterion_main!(benches);
