use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rscmp::{Algorithm, CodecEngine};
use std::hint::black_box;

fn sample(name: &str, size: usize) -> Vec<u8> {
    match name {
        "runs" => (0..size).map(|i| (i / 40) as u8).collect(),
        "text" => b"the quick brown fox jumps over the lazy dog. "
            .iter()
            .copied()
            .cycle()
            .take(size)
            .collect(),
        // xorshift noise, no repeats to speak of
        _ => {
            let mut state = 0x2545_f491_u32;
            (0..size)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state as u8
                })
                .collect()
        },
    }
}

fn bench_codecs(c: &mut Criterion) {
    let engine = CodecEngine::new();
    let size = 16 * 1024;

    for content in ["runs", "text", "noise"] {
        let input = sample(content, size);

        let mut group_encode = c.benchmark_group(format!("Compress_{content}"));
        group_encode.throughput(Throughput::Bytes(size as u64));
        for &algo in Algorithm::all() {
            group_encode.bench_with_input(BenchmarkId::new(algo.name(), size), &input, |b, i| {
                b.iter(|| engine.compress(black_box(i), algo).unwrap())
            });
        }
        group_encode.finish();

        let mut group_decode = c.benchmark_group(format!("Decompress_{content}"));
        group_decode.throughput(Throughput::Bytes(size as u64));
        for &algo in Algorithm::all() {
            let artifact = engine.compress(&input, algo).unwrap().data;
            group_decode.bench_with_input(
                BenchmarkId::new(algo.name(), size),
                &artifact,
                |b, a| b.iter(|| engine.decompress(black_box(a)).unwrap()),
            );
        }
        group_decode.finish();
    }
}

fn bench_window(c: &mut Criterion) {
    let input = sample("text", 16 * 1024);
    let mut group = c.benchmark_group("Lz77_window");
    for window in [10, 64, 256, 1024] {
        let engine = CodecEngine::new().with_window_size(window);
        group.bench_with_input(BenchmarkId::from_parameter(window), &input, |b, i| {
            b.iter(|| engine.compress(black_box(i), Algorithm::Lz77).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codecs, bench_window);
criterion_main!(benches);
