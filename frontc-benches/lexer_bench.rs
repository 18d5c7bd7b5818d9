//! Criterion benchmarks for the three hottest paths in `frontc`: arena
//! allocation, string interning, and end-to-end lexing. Tuned for
//! stable numbers rather than quick iteration (longer warm-up,
//! more samples).

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use frontc::arena::Arena;
use frontc::diagnostics::{DiagnosticManager, DiagnosticOptions};
use frontc::interner::Interner;
use frontc::lexer::{Lexer, LexerOptions};
use std::time::Duration;

fn configure_criterion() -> Criterion {
  Criterion::default()
    .sample_size(30)
    .measurement_time(Duration::from_secs(10))
    .warm_up_time(Duration::from_secs(2))
}

/// A synthetic C-family source file of roughly `lines` lines, built from
/// a small rotating set of statement shapes so the lexer exercises
/// identifiers, keywords, numbers, strings, and operators together.
fn synthetic_source(lines: usize) -> String {
  let mut out = String::with_capacity(lines * 32);
  for i in 0..lines {
    match i % 5 {
      0 => out.push_str(&format!("let value_{i} = {i} + {};\n", i * 2)),
      1 => out.push_str(&format!("fn function_{i}(a: i32, b: i32) -> i32 {{ return a + b; }}\n")),
      2 => out.push_str(&format!("// comment line {i}\n")),
      3 => out.push_str(&format!("if value_{i} >= {i} && value_{i} <= {} {{ x += 1; }}\n", i + 10)),
      _ => out.push_str(&format!("let name_{i} = \"literal number {i}\";\n")),
    }
  }
  out
}

fn bench_arena_allocate_string(c: &mut Criterion) {
  let mut group = c.benchmark_group("arena_allocate_string");
  for len in [8usize, 64, 512] {
    let payload = vec![b'x'; len];
    group.bench_with_input(BenchmarkId::from_parameter(len), &payload, |b, payload| {
      b.iter(|| {
        let arena = Arena::new();
        arena.allocate_string(payload)
      });
    });
  }
  group.finish();
}

fn bench_interner_intern(c: &mut Criterion) {
  let mut group = c.benchmark_group("interner_intern");
  let words: Vec<String> = (0..2000).map(|i| format!("identifier_{i}")).collect();
  group.bench_function("unique_strings", |b| {
    b.iter(|| {
      let interner = Interner::new();
      for word in &words {
        interner.intern(word.as_bytes());
      }
    });
  });
  group.bench_function("repeated_strings", |b| {
    let interner = Interner::new();
    b.iter(|| {
      for word in words.iter().take(200) {
        interner.intern(word.as_bytes());
      }
    });
  });
  group.finish();
}

fn bench_lexer_tokenize(c: &mut Criterion) {
  let mut group = c.benchmark_group("lexer_tokenize");
  for lines in [100usize, 1_000, 10_000] {
    let source = synthetic_source(lines);
    group.bench_with_input(BenchmarkId::from_parameter(lines), &source, |b, source| {
      b.iter(|| {
        let interner = Interner::new();
        let diagnostics = DiagnosticManager::new(DiagnosticOptions::default());
        let mut lexer = Lexer::for_slice(source.as_bytes(), &interner, &diagnostics, LexerOptions::default());
        lexer.tokenize()
      });
    });
  }
  group.finish();
}

criterion_group! {
  name = benches;
  config = configure_criterion();
  targets = bench_arena_allocate_string, bench_interner_intern, bench_lexer_tokenize
}
criterion_main!(benches);
