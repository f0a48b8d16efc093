//! Benchmarks for atom interning.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opalc_util::AtomTable;

fn bench_intern_hit(c: &mut Criterion) {
    let mut atoms = AtomTable::new();
    atoms.intern(b"frequently_used_identifier").unwrap();

    c.bench_function("intern_hit", |b| {
        b.iter(|| {
            atoms
                .intern(black_box(b"frequently_used_identifier"))
                .unwrap()
        })
    });
}

fn bench_intern_unique(c: &mut Criterion) {
    let names: Vec<String> = (0..10_000).map(|i| format!("ident_{i}")).collect();

    c.bench_function("intern_10k_unique", |b| {
        b.iter(|| {
            let mut atoms = AtomTable::new();
            for name in &names {
                atoms.intern(black_box(name.as_bytes())).unwrap();
            }
            atoms.len()
        })
    });
}

fn bench_find(c: &mut Criterion) {
    let mut atoms = AtomTable::new();
    for i in 0..10_000 {
        atoms.intern(format!("ident_{i}").as_bytes()).unwrap();
    }

    c.bench_function("find_hot", |b| {
        b.iter(|| atoms.find(black_box(b"ident_5000")))
    });
}

criterion_group!(benches, bench_intern_hit, bench_intern_unique, bench_find);
criterion_main!(benches);
