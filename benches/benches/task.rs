// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `kiln_task`.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use kiln_task::{DependencyContext, TaskDependencySet, TaskId, TaskRegistry};

fn bench_task(c: &mut Criterion) {
    let mut group = c.benchmark_group("task/registry");

    for count in [16_u32, 256, 4096] {
        let paths: Vec<String> = (0..count).map(|i| format!(":project{i}:compile")).collect();

        group.bench_with_input(BenchmarkId::new("register", count), &paths, |b, paths| {
            b.iter(|| {
                let mut tasks = TaskRegistry::new();
                for path in paths {
                    black_box(tasks.register(path.as_str()));
                }
                tasks
            })
        });

        let mut tasks = TaskRegistry::new();
        for path in &paths {
            tasks.register(path.as_str());
        }
        group.bench_with_input(BenchmarkId::new("lookup", count), &paths, |b, paths| {
            b.iter(|| {
                for path in paths {
                    black_box(tasks.lookup(path));
                }
            })
        });
    }

    group.finish();

    let mut group = c.benchmark_group("task/dependency_set");

    for count in [4_u32, 64] {
        let id = BenchmarkId::new("add_with_duplicates", count);
        group.bench_with_input(id, &count, |b, &n| {
            b.iter(|| {
                let mut deps = TaskDependencySet::new();
                for i in 0..n * 2 {
                    deps.add(TaskId::new(i % n));
                }
                deps
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_task);
criterion_main!(benches);
