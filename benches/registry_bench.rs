//! Benchmarks for the task registry core.
//!
//! Benchmarks cover:
//! - Register/unregister churn
//! - Status-update throughput across the lifecycle
//! - Finished-ring garbage collection at saturation
//! - Filtered list scans

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use podbind::core::{
    ContainerReport, InMemoryTaskRegistry, PodRuntimeInfo, PodSnapshot, PodTask, RemoteTaskState,
    StatusUpdate, TaskRegistry, TaskState, NET_CONTAINER_NAME,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn build_task(i: u64) -> Result<PodTask, podbind::core::SchedulerError> {
    PodTask::new(
        format!("task-{i}"),
        PodSnapshot::new(format!("pod-{i}"), "bench"),
    )
}

fn running_status(i: u64) -> StatusUpdate {
    let mut info = PodRuntimeInfo::new();
    info.insert(
        NET_CONTAINER_NAME.to_string(),
        ContainerReport {
            pod_ip: format!("10.0.{}.{}", (i >> 8) & 0xff, i & 0xff),
        },
    );
    StatusUpdate::new(format!("task-{i}"), RemoteTaskState::Running).with_pod_info(&info)
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

fn bench_register_unregister(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_unregister");

    for size in [100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let registry = InMemoryTaskRegistry::new();
                let mut tasks = Vec::with_capacity(size as usize);
                for i in 0..size {
                    tasks.push(registry.register(build_task(i)).unwrap());
                }
                for task in &tasks {
                    registry.unregister(task);
                }
                black_box(registry.list(None).len());
            });
        });
    }
    group.finish();
}

fn bench_status_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("status_lifecycle");

    for size in [100u64, 1_000, 5_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let registry = InMemoryTaskRegistry::new();
                for i in 0..size {
                    registry.register(build_task(i)).unwrap();
                    registry.update_status(&StatusUpdate::new(
                        format!("task-{i}"),
                        RemoteTaskState::Starting,
                    ));
                    registry.update_status(&running_status(i));
                    registry.update_status(&StatusUpdate::new(
                        format!("task-{i}"),
                        RemoteTaskState::Finished,
                    ));
                }
                black_box(registry.recently_finished().len());
            });
        });
    }
    group.finish();
}

fn bench_ring_gc_saturation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_gc_saturation");

    // small ring forces an eviction on nearly every finished task
    for capacity in [16usize, 256, 1024] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let registry = InMemoryTaskRegistry::with_finished_capacity(capacity);
                    for i in 0..(capacity as u64 * 4) {
                        registry.register(build_task(i)).unwrap();
                        registry.update_status(&running_status(i));
                        registry.update_status(&StatusUpdate::new(
                            format!("task-{i}"),
                            RemoteTaskState::Finished,
                        ));
                    }
                    // retained finished tasks never exceed ring capacity
                    black_box(registry.list(Some(TaskState::Finished)).len());
                });
            },
        );
    }
    group.finish();
}

fn bench_list_filtered(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_filtered");

    for size in [1_000u64, 10_000] {
        let registry = InMemoryTaskRegistry::new();
        for i in 0..size {
            registry.register(build_task(i)).unwrap();
            if i % 2 == 0 {
                registry.update_status(&running_status(i));
            }
        }
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(registry.list(Some(TaskState::Running)).len());
            });
        });
    }
    group.finish();
}

// ============================================================================
// Benchmark Groups
// ============================================================================

criterion_group!(
    registry_benches,
    bench_register_unregister,
    bench_status_lifecycle,
    bench_ring_gc_saturation,
    bench_list_filtered
);

criterion_main!(registry_benches);
