//! Benchmarks for drag selection and layer redraw.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plateview::layout::ContainerRect;
use plateview::render::{LayerSet, RecordingSurface};
use plateview::{Dimensions, Lifecycle, PlateModel, PlateUpdate, WellLabel};

const FORMATS: [(u32, u32); 3] = [(8, 12), (16, 24), (32, 48)];

fn mounted(rows: u32, cols: u32) -> PlateModel<RecordingSurface> {
    let mut model = PlateModel::new(
        Dimensions::new(rows, cols),
        LayerSet::new_with(|_| RecordingSurface::new()),
    );
    model.mount(Box::new(ContainerRect::new(0.0, 0.0, 1024.0, 768.0)));
    model
}

fn take_all(model: &PlateModel<RecordingSurface>) {
    for layer in plateview::render::Layer::ALL {
        model.layer_mut(layer).take_ops();
    }
}

/// Press in the top-left well and sweep to the bottom-right one.
fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_sweep");
    for (rows, cols) in FORMATS {
        let model = mounted(rows, cols);
        model.pointer_enter();
        let metrics = model.metrics();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}")),
            &(rows, cols),
            |b, &(rows, cols)| {
                b.iter(|| {
                    model.pointer_down(24.0 + metrics.dx / 2.0, 24.0 + metrics.dy / 2.0);
                    for step in 1..rows.max(cols) {
                        let row = f64::from(step.min(rows - 1));
                        let col = f64::from(step.min(cols - 1));
                        black_box(model.pointer_move(
                            24.0 + (col + 0.5) * metrics.dx,
                            24.0 + (row + 0.5) * metrics.dy,
                        ));
                    }
                    model.pointer_up();
                    take_all(&model);
                });
            },
        );
    }
    group.finish();
}

/// Full redraw of a plate with every well colored and labeled.
fn bench_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_redraw");
    for (rows, cols) in FORMATS {
        let model = mounted(rows, cols);
        let size = (rows * cols) as usize;
        let palette = ["#1f77b4", "#ff7f0e", "white", "hsl(200, 50%, 80%)"];
        let colors = (0..size)
            .map(|i| palette.get(i % palette.len()).map(|c| (*c).to_string()))
            .collect();
        let labels = (0..size)
            .map(|i| Some(WellLabel::two_line(format!("S{i}"), format!("{}.5", i * 3))))
            .collect();
        model.update(PlateUpdate::default().colors(colors).labels(labels));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}")),
            &model,
            |b, model| {
                b.iter(|| {
                    model.handle_resize();
                    take_all(model);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_drag, bench_redraw);
criterion_main!(benches);
