//! This bench test parses a large question bank and samples sessions from it.

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion};
use quizkit::{domain::session::SESSION_LENGTH, Bank, Session};
use rand::{rngs::StdRng, SeedableRng};

/// Generates a bank with a mix of valid and malformed lines
fn bank_source(lines: usize) -> String {
    (0..lines)
        .map(|i| match i % 10 {
            0 => format!("Malformed line {i}\n"),
            1 => "\n".to_string(),
            _ => format!("What is question number {i} about? first* second third* fourth\n"),
        })
        .collect()
}

fn parse_bank(c: &mut Criterion) {
    let source = bank_source(10_000);

    c.bench_function("parse bank", |b| {
        b.iter(|| Bank::parse(std::hint::black_box(&source)));
    });
}

fn start_session(c: &mut Criterion) {
    let bank = Bank::parse(&bank_source(10_000));
    let mut rng = StdRng::seed_from_u64(0);

    c.bench_function("start session", |b| {
        b.iter(|| Session::start("Quiz 1", bank.questions(), SESSION_LENGTH, &mut rng));
    });
}

criterion_group!(benches, parse_bank, start_session);
criterion_main!(benches);
