use criterion::{Bencher, black_box, Criterion, criterion_group, criterion_main};
use criterion::measurement::WallTime;
use digest::Digest;

use cryptonight_hash::{cn_slow_hash_with_buffer, CryptoNight, Variant};

fn bench_buffer_reuse(b: &mut Bencher<WallTime>) {
    let mut scratchpad = CryptoNight::allocate_scratchpad();

    b.iter(|| CryptoNight::digest_with_buffer(black_box(b""), scratchpad.as_mut()));
}

fn bench_variant(variant: Variant) -> impl FnMut(&mut Bencher<WallTime>) {
    let mut scratchpad = CryptoNight::allocate_scratchpad();
    move |b: &mut Bencher<WallTime>| {
        b.iter(|| cn_slow_hash_with_buffer(black_box(b""), variant, 0, scratchpad.as_mut()));
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("Hash with allocator", |b| {
        b.iter(|| CryptoNight::digest(black_box(b"")));
    });

    c.bench_function("Hash with external buffer", bench_buffer_reuse);

    c.bench_function("Variant 0", bench_variant(Variant::V0));
    c.bench_function("Variant 2", bench_variant(Variant::V2));
    c.bench_function("Variant 4", bench_variant(Variant::V4));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
