use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use sm4_core::gf::{gf_inv, gf_inv_ct};
use sm4_core::{
    encrypt_block_with, expand_key_with, ComputedSbox, LookupSbox, Sm4Key, Substitutor,
};

fn bench_key_schedule(c: &mut Criterion) {
    let key = Sm4Key::from([0x42u8; 16]);
    let mut group = c.benchmark_group("key_schedule");
    group.bench_function("lookup", |b| {
        b.iter(|| expand_key_with(&LookupSbox, black_box(&key)));
    });
    group.bench_function("computed", |b| {
        b.iter(|| expand_key_with(&ComputedSbox, black_box(&key)));
    });
    group.finish();
}

fn bench_block<S: Substitutor>(c: &mut Criterion, name: &str, sbox: S) {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let mut key = [0u8; 16];
    let mut block = [0u8; 16];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut block);
    let round_keys = expand_key_with(&sbox, &Sm4Key::from(key));

    let mut group = c.benchmark_group("encrypt_block");
    group.bench_function(name, |b| {
        b.iter(|| encrypt_block_with(&sbox, black_box(&block), &round_keys));
    });
    group.finish();
}

fn bench_blocks(c: &mut Criterion) {
    bench_block(c, "lookup", LookupSbox);
    bench_block(c, "computed", ComputedSbox);
}

fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("gf_inverse");
    group.bench_function("branching", |b| {
        b.iter(|| (0..=255u8).fold(0u8, |acc, x| acc ^ gf_inv(black_box(x))));
    });
    group.bench_function("constant_time", |b| {
        b.iter(|| (0..=255u8).fold(0u8, |acc, x| acc ^ gf_inv_ct(black_box(x))));
    });
    group.finish();
}

criterion_group!(benches, bench_key_schedule, bench_blocks, bench_inverse);
criterion_main!(benches);
