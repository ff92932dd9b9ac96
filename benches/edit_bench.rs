// model = "claude-opus-4-5"
// created = "2026-08-01"
// modified = "2026-08-02"
// driver = "Isaac Clayton"

//! Benchmarks for the common editing workloads: sequential typing, random
//! single-element edits, content snapshots, and history traversal.

use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use piecewise::buffer::Buffer;

fn seed_text(len: usize) -> String {
    return ('a'..='z').cycle().take(len).collect();
}

fn bench_typing_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing_run");
    for count in [100usize, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut buffer: Buffer<char> = Buffer::new();
                for i in 0..count {
                    buffer.insert(i, 'x').unwrap();
                }
                black_box(buffer.size())
            });
        });
    }
    group.finish();
}

fn bench_random_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_edits");
    for count in [100usize, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut buffer = Buffer::from_str(&seed_text(1000));
                let mut rng = StdRng::seed_from_u64(42);
                for _ in 0..count {
                    let size = buffer.size();
                    if size > 0 && rng.gen_range(0..5) < 2 {
                        buffer.delete(rng.gen_range(0..size)).unwrap();
                    } else {
                        buffer.insert(rng.gen_range(0..=size), 'x').unwrap();
                    }
                }
                black_box(buffer.size())
            });
        });
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    // A fragmented buffer: scattered single-element inserts over a base text.
    let mut buffer = Buffer::from_str(&seed_text(4000));
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let size = buffer.size();
        buffer.insert(rng.gen_range(0..=size), 'x').unwrap();
    }

    c.bench_function("snapshot_to_string", |b| {
        b.iter(|| black_box(buffer.to_string()));
    });
    c.bench_function("snapshot_content", |b| {
        b.iter(|| black_box(buffer.content().len()));
    });
}

fn bench_history_cycle(c: &mut Criterion) {
    c.bench_function("undo_redo_cycle", |b| {
        // Scattered edits so no two records coalesce.
        let mut buffer = Buffer::from_str(&seed_text(1000));
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let size = buffer.size();
            buffer.insert(rng.gen_range(0..=size), 'x').unwrap();
        }

        b.iter(|| {
            let mut steps = 0;
            while buffer.undo().is_ok() {
                steps += 1;
            }
            while buffer.redo().is_ok() {}
            black_box(steps)
        });
    });
}

criterion_group!(
    benches,
    bench_typing_run,
    bench_random_edits,
    bench_snapshot,
    bench_history_cycle,
);
criterion_main!(benches);
