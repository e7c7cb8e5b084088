//! Benchmarks for the filter and the reorder reconciler.
//!
//! Both run on every keystroke or drop in the interactive board, so they are
//! measured over a board far larger than anyone keeps by hand.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taskboard::board::{
    reconcile, visible_tasks, FilterSelection, Lane, Priority, PrioritySelector, Task, TaskFields,
    TaskStore,
};

const TASKS: usize = 2_000;

fn board() -> Vec<Task> {
    let mut store = TaskStore::new();
    let priorities = [Priority::Low, Priority::Medium, Priority::High];
    for n in 0..TASKS {
        let fields = TaskFields::new(format!("Task number {}", n))
            .with_priority(priorities[n % 3])
            .with_tags([format!("tag{}", n % 17), "shared".to_string()]);
        store.create(fields).expect("generated task is valid");
    }
    store
        .tasks()
        .iter()
        .cloned()
        .enumerate()
        .map(|(n, mut task)| {
            task.status = Lane::ALL[n % 3].into();
            task
        })
        .collect()
}

fn bench_visible_tasks(c: &mut Criterion) {
    let tasks = board();
    let unfiltered = FilterSelection::new();
    let filtered = FilterSelection::new()
        .with_search("TAG1")
        .with_priority(PrioritySelector::Only(Priority::High));

    c.bench_function("visible_tasks_unfiltered", |b| {
        b.iter(|| visible_tasks(black_box(&tasks), black_box(&unfiltered)))
    });
    c.bench_function("visible_tasks_search_and_priority", |b| {
        b.iter(|| visible_tasks(black_box(&tasks), black_box(&filtered)))
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let tasks = board();
    let selection = FilterSelection::new().with_search("tag3");
    let mut layout = visible_tasks(&tasks, &selection).layout();
    if let Some(id) = layout.lane_mut(Lane::Todo).pop() {
        layout.lane_mut(Lane::Done).insert(0, id);
    }

    c.bench_function("reconcile_filtered_drop", |b| {
        b.iter(|| reconcile(black_box(&tasks), black_box(&layout)))
    });
}

criterion_group!(benches, bench_visible_tasks, bench_reconcile);
criterion_main!(benches);
