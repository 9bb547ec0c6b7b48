use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tilegen_chunk::generate_chunk;
use tilegen_world::Generator;
use tilegen_world::biome::biome_for;

fn bench_generate(c: &mut Criterion) {
    let generator = Generator::new(0);
    let mut group = c.benchmark_group("chunk");
    group.bench_function("generate_row", |b| {
        let mut x = 0i32;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(generate_chunk(&generator, x, 0))
        })
    });
    group.bench_function("raw_bytes", |b| {
        let chunk = generate_chunk(&generator, 0, 0);
        b.iter(|| black_box(chunk.raw_bytes()))
    });
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    // Best case exits on the first threshold, worst case scans both ladders.
    group.bench_function("best", |b| b.iter(|| biome_for(black_box(0.0), black_box(0.0))));
    group.bench_function("worst", |b| b.iter(|| biome_for(black_box(1.0), black_box(1.0))));
    group.bench_function("avg", |b| b.iter(|| biome_for(black_box(0.5), black_box(0.5))));
    group.finish();
}

criterion_group!(benches, bench_generate, bench_classify);
criterion_main!(benches);
