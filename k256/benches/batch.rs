//! secp256k1 verification benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use k256_batch::{
    batch::BatchContext,
    lincomb_vartime,
    schnorr::{Signature, SigningKey, VerifyingKey},
    Context, FieldBytes, ProjectivePoint, Scalar, StraussScratch,
};

fn test_scalar(seed: u8) -> Scalar {
    Scalar::from_bytes_reduced(&FieldBytes::from([seed; 32]))
}

fn signatures(ctx: &Context, count: usize) -> Vec<(VerifyingKey, [u8; 32], Signature)> {
    (0..count)
        .map(|i| {
            let sk = SigningKey::from_bytes(ctx, &[(i % 250) as u8 + 1; 32]).unwrap();
            let msg = [i as u8; 32];
            let sig = sk.sign(ctx, &msg).unwrap();
            (*sk.verifying_key(), msg, sig)
        })
        .collect()
}

fn bench_scalar_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar multiplication");
    let ctx = Context::new();
    let k = test_scalar(0x5A);
    let p = ProjectivePoint::GENERATOR * test_scalar(0x11);
    let mut scratch = StraussScratch::new(1).unwrap();

    group.bench_function("point mul (constant time)", |b| {
        b.iter(|| black_box(p) * black_box(k))
    });
    group.bench_function("generator table mul", |b| {
        b.iter(|| ctx.mul_generator(black_box(&k)))
    });
    group.bench_function("lincomb_vartime, one term", |b| {
        b.iter(|| lincomb_vartime(&[(black_box(k), p)], &Scalar::ZERO, &mut scratch).unwrap())
    });
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("schnorr verification");
    let ctx = Context::new();

    for count in [1usize, 8, 64, 256] {
        let sigs = signatures(&ctx, count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("single", count), &sigs, |b, sigs| {
            b.iter(|| {
                sigs.iter().all(|(pk, msg, sig)| pk.verify(black_box(msg), sig))
            })
        });

        group.bench_with_input(BenchmarkId::new("batch", count), &sigs, |b, sigs| {
            b.iter(|| {
                let mut batch = BatchContext::new(sigs.len()).unwrap();
                for (pk, msg, sig) in sigs {
                    batch.add_schnorr(&sig.to_bytes(), black_box(msg), pk).unwrap();
                }
                batch.verify()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scalar_mul, bench_verify);
criterion_main!(benches);
