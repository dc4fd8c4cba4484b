//! # Sentinel Registry Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | `codec` | length-prefixed record encode and decode |
//! | `evidence` | submit and verify through the ledger, staging included |
//! | `profile` | register and update with growing payloads |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use sentinel_registry::domain::codec::{decode_fields, encode_fields};
use sentinel_registry::prelude::*;

fn random_bytes(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);

    for size in [16_usize, 256, 4096] {
        let fields: Vec<Vec<u8>> = (0..6).map(|_| random_bytes(&mut rng, size)).collect();
        let encoded = encode_fields(&fields).expect("fields fit the frame");

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &fields, |b, fields| {
            b.iter(|| black_box(encode_fields(fields)));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| black_box(decode_fields(encoded, 6)));
        });
    }
    group.finish();
}

fn bench_evidence(c: &mut Criterion) {
    let mut group = c.benchmark_group("evidence");
    let admin = Identity::from("A");
    let hash = content_hash_hex(b"benchmark payload");

    group.bench_function("submit", |b| {
        let mut ledger: InMemoryLedger = InMemoryLedger::default();
        let program = ledger.deploy(Family::Evidence, &admin).expect("deploy");
        let mut next = 0_u64;
        b.iter(|| {
            next += 1;
            let id = next.to_string();
            black_box(ledger.call(
                program,
                &Identity::from("B"),
                &Invocation::call("submit_evidence", &[id.as_str(), "cid", hash.as_str()]),
            ))
        });
    });

    group.bench_function("verify", |b| {
        let mut ledger: InMemoryLedger = InMemoryLedger::default();
        let program = ledger.deploy(Family::Evidence, &admin).expect("deploy");
        ledger
            .call(
                program,
                &Identity::from("B"),
                &Invocation::call("submit_evidence", &["E1", "cid", hash.as_str()]),
            )
            .expect("submit");
        let verify = Invocation::call("verify_evidence", &["E1", hash.as_str()]);
        let auditor = Identity::from("C");
        b.iter(|| black_box(ledger.call(program, &auditor, &verify)));
    });

    group.finish();
}

fn bench_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile");
    let mut rng = rand::rngs::StdRng::seed_from_u64(29);

    for size in [32_usize, 512, 1024] {
        let payload = random_bytes(&mut rng, size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("update", size), &payload, |b, payload| {
            let mut ledger: InMemoryLedger = InMemoryLedger::default();
            let program = ledger.deploy(Family::Profile, &Identity::from("A")).expect("deploy");
            let owner = Identity::from("D");
            ledger
                .call(
                    program,
                    &owner,
                    &Invocation::call("register_profile", &[b"P1".as_slice(), payload.as_slice()]),
                )
                .expect("register");
            let update = Invocation::call("update_profile", &[payload.as_slice()]);
            b.iter(|| black_box(ledger.call(program, &owner, &update)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec, bench_evidence, bench_profile);
criterion_main!(benches);
