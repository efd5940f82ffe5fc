use chart_primitives::core::{LinearScale, ScaleValue, SeriesItem, TimeScale};
use chart_primitives::interaction::{nearest_item_index, resolve_index};
use chart_primitives::layout::{TickLayoutOptions, compute_ticks, compute_ticks_with, diff_ticks};
use chart_primitives::shape::{Curve, line_path, path_length, project_points};
use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_resolve_index_sweep(c: &mut Criterion) {
    c.bench_function("resolve_index_sweep_1920px", |b| {
        b.iter(|| {
            for x in 0..1_920 {
                let _ = resolve_index(black_box(x as f64), black_box(1_920.0), black_box(12));
            }
        })
    });
}

fn bench_nearest_item_10k(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 10_000.0)
        .and_then(|scale| scale.with_range(0.0, 1_920.0))
        .expect("valid scale");
    let items: Vec<SeriesItem> = (0..10_000)
        .map(|i| SeriesItem::new(i as f64, 100.0 + (i as f64 * 0.01).sin()))
        .collect();

    c.bench_function("nearest_item_10k", |b| {
        b.iter(|| {
            let _ = nearest_item_index(black_box(&scale), black_box(1_234.5), black_box(&items))
                .expect("nearest item");
        })
    });
}

fn bench_time_tick_layout(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
    let end = start + TimeDelta::days(5 * 365);
    let scale = TimeScale::new(start, end)
        .and_then(|scale| scale.with_range(0.0, 1_600.0))
        .expect("valid time scale");
    let options = TickLayoutOptions::new(10).with_reserve_first_tick(true);

    c.bench_function("time_tick_layout_10", |b| {
        b.iter(|| {
            let _ = compute_ticks_with(black_box(&scale), black_box(&options));
        })
    });
}

fn bench_tick_reconcile_shift(c: &mut Criterion) {
    let before = LinearScale::new(0.0, 1_000.0)
        .and_then(|scale| scale.with_range(0.0, 1_600.0))
        .expect("valid scale");
    let after = LinearScale::new(250.0, 1_250.0)
        .and_then(|scale| scale.with_range(0.0, 1_600.0))
        .expect("valid scale");
    let previous = compute_ticks(&before, 20);
    let next = compute_ticks(&after, 20);

    c.bench_function("tick_reconcile_shift_20", |b| {
        b.iter(|| {
            let _ = diff_ticks(black_box(&previous), black_box(&next));
        })
    });
}

fn bench_smooth_line_path_2k(c: &mut Criterion) {
    let x = LinearScale::new(0.0, 2_000.0)
        .and_then(|scale| scale.with_range(0.0, 1_600.0))
        .expect("valid scale");
    let y = LinearScale::new(-1.0, 1.0)
        .and_then(|scale| scale.with_range(900.0, 0.0))
        .expect("valid scale");
    let items: Vec<SeriesItem> = (0..2_000)
        .map(|i| SeriesItem::new(ScaleValue::Number(i as f64), (i as f64 * 0.05).sin()))
        .collect();

    c.bench_function("smooth_line_path_2k", |b| {
        b.iter(|| {
            let points = project_points(black_box(&items), &x, &y).expect("projection");
            let _ = line_path(&points, Curve::CatmullRom);
            let _ = path_length(&points, Curve::CatmullRom);
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_index_sweep,
    bench_nearest_item_10k,
    bench_time_tick_layout,
    bench_tick_reconcile_shift,
    bench_smooth_line_path_2k
);
criterion_main!(benches);
