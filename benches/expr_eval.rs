//! Benchmarks for the hot paths of the expression layer: building deep
//! arithmetic terms and reducing `keccak` over buffers of varying size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use symbex_evm_core::expr::{keccak, Buf, EWord};
use symbex_evm_core::numeric::W256;

fn build_add_chain(depth: usize) -> EWord {
    (0..depth).fold(EWord::Lit(W256::from_u64(0)), |acc, i| {
        EWord::Add(Box::new(acc), Box::new(EWord::Lit(W256::from_u64(i as u64))))
    })
}

fn bench_add_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_chain_construction");
    for depth in [8usize, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| black_box(build_add_chain(depth)));
        });
    }
    group.finish();
}

fn bench_keccak_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("keccak_concrete_reduction");
    for size in [0usize, 32, 1024, 8192] {
        let bytes = vec![0xabu8; size];
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| black_box(keccak(Buf::ConcreteBuf(bytes.clone()))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add_chain, bench_keccak_reduction);
criterion_main!(benches);
