// Benchmark for segment planning
// Measures layout cost for growing task sets on a six-week grid

use chrono::{NaiveDate, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_taskgrid::grid::{cap_lanes, DateGrid, SegmentPlanner};
use rust_taskgrid::models::task::{Task, TaskCategory};
use rust_taskgrid::utils::date::add_days;

fn june_grid() -> DateGrid {
    let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    DateGrid::new(june, june, Weekday::Sun)
}

/// Deterministic mix of short and multi-week tasks around the month.
fn sample_tasks(count: usize) -> Vec<Task> {
    let base = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
    (0..count)
        .map(|i| {
            let start = add_days(base, (i * 7 % 50) as i64);
            let days = (i * 13 % 21) as i64;
            Task::new(
                format!("t{}", i),
                format!("Task {}", i),
                TaskCategory::ALL[i % TaskCategory::ALL.len()],
                start,
                add_days(start, days),
            )
            .unwrap()
        })
        .collect()
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_plan");
    let grid = june_grid();

    for count in [10, 100, 1000].iter() {
        let tasks = sample_tasks(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &tasks, |b, tasks| {
            b.iter(|| SegmentPlanner::plan(black_box(&grid), black_box(tasks)));
        });
    }

    group.finish();
}

fn bench_capped_layout(c: &mut Criterion) {
    let grid = june_grid();
    let segments = SegmentPlanner::plan(&grid, &sample_tasks(200));

    c.bench_function("cap_lanes_200", |b| {
        b.iter(|| cap_lanes(black_box(&segments), black_box(Some(3))));
    });
}

criterion_group!(benches, bench_plan, bench_capped_layout);
criterion_main!(benches);
