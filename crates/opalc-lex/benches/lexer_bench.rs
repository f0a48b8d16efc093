//! Benchmarks for the lexer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opalc_lex::tokenize;
use opalc_util::{AtomTable, Handler};

fn sample_source(statements: usize) -> String {
    let mut source = String::new();
    for i in 0..statements {
        source.push_str(&format!("total_{i} += 0x1F * weight_{i}; // accumulate\n"));
        source.push_str("if count >= limit then flag = \"overflow\" else flag = \"ok\"\n");
        source.push_str("while x != 0b1010 { x -= 2.5 }\n");
    }
    source
}

fn bench_tokenize(c: &mut Criterion) {
    let source = sample_source(1000);

    c.bench_function("tokenize_3k_lines", |b| {
        let mut atoms = AtomTable::new();
        let mut tokens = Vec::new();
        let handler = Handler::new();
        b.iter(|| {
            tokenize(black_box(source.as_bytes()), &mut tokens, &mut atoms, &handler).unwrap();
            tokens.len()
        })
    });
}

fn bench_tokenize_identifiers(c: &mut Criterion) {
    // Heavy interning traffic: the same small identifier set repeated.
    let mut source = String::new();
    for _ in 0..5000 {
        source.push_str("alpha beta gamma delta epsilon ");
    }

    c.bench_function("tokenize_hot_identifiers", |b| {
        let mut atoms = AtomTable::new();
        let mut tokens = Vec::new();
        let handler = Handler::new();
        b.iter(|| {
            tokenize(black_box(source.as_bytes()), &mut tokens, &mut atoms, &handler).unwrap();
            tokens.len()
        })
    });
}

criterion_group!(benches, bench_tokenize, bench_tokenize_identifiers);
criterion_main!(benches);
