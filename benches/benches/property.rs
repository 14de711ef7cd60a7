// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `kiln_property`.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use std::fmt;
use std::sync::{Arc, Once};

use kiln_property::{NoOpHost, PhaseHost, Property, PropertyBuilder, ValueSupplier};
use kiln_task::{TaskDependencySet, TaskDependencySource, TaskId};

#[derive(Clone)]
struct Fixed(Option<Arc<str>>);

impl TaskDependencySource for Fixed {}

impl ValueSupplier<Arc<str>> for Fixed {
    fn absent() -> Self {
        Self(None)
    }

    fn is_present(&self) -> bool {
        self.0.is_some()
    }

    fn calculate_value(&self) -> Option<Arc<str>> {
        self.0.clone()
    }

    fn final_value(&self) -> Self {
        self.clone()
    }

    fn describe_contents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fixed({:?})", self.0)
    }
}

fn fixed(value: &str) -> Fixed {
    Fixed(Some(Arc::from(value)))
}

fn bench_property(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: Property<Arc<str>, Fixed>={} Fixed={}",
            core::mem::size_of::<Property<Arc<str>, Fixed>>(),
            core::mem::size_of::<Fixed>(),
        );
    });

    let mut group = c.benchmark_group("property/read");

    group.bench_function("convention", |b| {
        let dir = fixed("build/classes");
        let mut p: Property<Arc<str>, Fixed> = PropertyBuilder::new().convention(dir).build();
        b.iter(|| black_box(p.get()))
    });

    group.bench_function("final", |b| {
        let dir = fixed("build/classes");
        let mut p: Property<Arc<str>, Fixed> = PropertyBuilder::new().value(dir).build();
        p.finalize_value();
        b.iter(|| black_box(p.get()))
    });

    group.bench_function("unsafe_read_vetoed", |b| {
        let mut p: Property<Arc<str>, Fixed> = PropertyBuilder::new()
            .host(Arc::new(PhaseHost::new("project ':app'")))
            .value(fixed("build/classes"))
            .disallow_unsafe_read()
            .build();
        b.iter(|| black_box(p.get().is_err()))
    });

    group.finish();

    let mut group = c.benchmark_group("property/lifecycle");

    group.bench_function("configure_then_finalize_on_read", |b| {
        b.iter_batched(
            || Property::<Arc<str>, Fixed>::new(NoOpHost::shared()),
            |mut p| {
                p.set_convention(fixed("default")).ok();
                p.set_supplier(fixed("explicit")).ok();
                p.implicit_finalize_value();
                black_box(p.get().ok());
                black_box(p);
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("discard_value", |b| {
        b.iter_batched(
            || {
                let mut p = Property::<Arc<str>, Fixed>::new(NoOpHost::shared());
                p.set_convention(fixed("default")).ok();
                p.set_supplier(fixed("explicit")).ok();
                p
            },
            |mut p| {
                p.discard_value().ok();
                black_box(p);
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();

    let mut group = c.benchmark_group("property/producers");

    group.bench_function("explicit_producer", |b| {
        let p: Property<Arc<str>, Fixed> = PropertyBuilder::new()
            .value(fixed("out"))
            .producer(TaskId::new(3))
            .build();
        let mut deps = TaskDependencySet::new();
        b.iter(|| {
            deps.clear();
            black_box(p.maybe_visit_build_dependencies(&mut deps))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_property);
criterion_main!(benches);
