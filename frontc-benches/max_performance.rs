//! Stress-test binary that pushes frontc's concurrent-reader components
//! (interner, file manager, source manager) toward their practical
//! limits: maximum concurrent threads lexing independent sources,
//! maximum concurrent files registered with one `SourceManager`, and a
//! rough per-token memory estimate.
//!
//! Run with `cargo run --release --bin max_performance [threads|files|memory|all]`.

use frontc::diagnostics::{DiagnosticManager, DiagnosticOptions};
use frontc::file_manager::FileManager;
use frontc::interner::Interner;
use frontc::lexer::{Lexer, LexerOptions};
use frontc::source_manager::SourceManager;
use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

struct TestResult {
  name: String,
  value: f64,
  unit: String,
  duration: Duration,
  info: String,
}

fn print_results(results: &[TestResult], title: &str) {
  println!("\n{}", "=".repeat(88));
  println!("{title}");
  println!("{}", "=".repeat(88));
  for r in results {
    println!(
      "  {:<28} {:>14.2} {:<14} ({:.2?})  {}",
      r.name, r.value, r.unit, r.duration, r.info
    );
  }
  println!("{}", "=".repeat(88));
}

fn synthetic_source(lines: usize, seed: usize) -> String {
  let mut out = String::with_capacity(lines * 32);
  for i in 0..lines {
    match (i + seed) % 5 {
      0 => out.push_str(&format!("let value_{i} = {i} + {};\n", i * 2)),
      1 => out.push_str(&format!("fn function_{i}(a: i32, b: i32) -> i32 {{ return a + b; }}\n")),
      2 => out.push_str(&format!("// comment line {i}\n")),
      3 => out.push_str(&format!("if value_{i} >= {i} && value_{i} <= {} {{ x += 1; }}\n", i + 10)),
      _ => out.push_str(&format!("let name_{i} = \"literal number {i}\";\n")),
    }
  }
  out
}

/// Maximum number of concurrent lexing threads the process can sustain
/// in a bounded time budget before the attempt is abandoned.
fn max_concurrent_lexing_threads(max_threads: usize) -> TestResult {
  let start = Instant::now();
  let mut reached = 0usize;
  let mut attempts = Vec::new();

  for &thread_count in &[1, 2, 4, 8, 16, 32, 64, 128, 256] {
    if thread_count > max_threads {
      break;
    }
    let attempt_start = Instant::now();
    let handles: Vec<_> = (0..thread_count)
      .map(|i| {
        thread::spawn(move || {
          let interner = Interner::new();
          let diagnostics = DiagnosticManager::new(DiagnosticOptions::default());
          let source = synthetic_source(200, i);
          let mut lexer = Lexer::for_slice(source.as_bytes(), &interner, &diagnostics, LexerOptions::default());
          lexer.tokenize().len()
        })
      })
      .collect();

    let all_ok = handles.into_iter().all(|h| h.join().is_ok());
    let attempt_duration = attempt_start.elapsed();

    if all_ok && attempt_duration < Duration::from_secs(30) {
      reached = thread_count;
      attempts.push(format!("{thread_count} threads ok in {attempt_duration:.2?}"));
    } else {
      attempts.push(format!("{thread_count} threads failed/slow ({attempt_duration:.2?})"));
      break;
    }
  }

  TestResult {
    name: "max concurrent lexer threads".to_string(),
    value: reached as f64,
    unit: "threads".to_string(),
    duration: start.elapsed(),
    info: attempts.join(", "),
  }
}

/// Maximum number of files one `SourceManager` can register before
/// growth in the 32-bit global location space or the file table becomes
/// the bottleneck, within a bounded file count.
fn max_concurrent_files(max_files: usize) -> TestResult {
  let start = Instant::now();
  let dir = tempfile::tempdir().expect("create temp dir");
  let file_manager = Arc::new(FileManager::new());
  let source_manager = Arc::new(SourceManager::new(Arc::clone(&file_manager)));

  let mut registered = 0usize;
  for i in 0..max_files {
    let path = dir.path().join(format!("f{i}.src"));
    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(format!("let x{i} = {i};\n").as_bytes()).expect("write temp file");
    drop(file);
    if source_manager.create_file(&path).is_ok() {
      registered += 1;
    }
  }

  TestResult {
    name: "max files in one source manager".to_string(),
    value: registered as f64,
    unit: "files".to_string(),
    duration: start.elapsed(),
    info: format!("file_count() == {}", source_manager.file_count()),
  }
}

/// Rough estimate of bytes consumed per interned token spelling, using
/// the interner's own byte-accounting stats rather than process RSS
/// (frontc has no platform-specific memory probe; this is intentional —
/// see DESIGN.md).
fn memory_per_interned_token(token_count: usize) -> TestResult {
  let start = Instant::now();
  let interner = Interner::new();
  for i in 0..token_count {
    interner.intern(format!("tok_{i}").as_bytes());
  }
  let stats = interner.stats();
  let bytes_per_token = if stats.unique_strings == 0 {
    0.0
  } else {
    stats.bytes_stored as f64 / stats.unique_strings as f64
  };

  TestResult {
    name: "bytes stored per unique token".to_string(),
    value: bytes_per_token,
    unit: "bytes/token".to_string(),
    duration: start.elapsed(),
    info: format!("{} unique strings, {} bytes stored", stats.unique_strings, stats.bytes_stored),
  }
}

fn run_threads_suite() {
  let results = vec![max_concurrent_lexing_threads(256)];
  print_results(&results, "MAX CONCURRENT THREADS");
}

fn run_files_suite() {
  let results = vec![max_concurrent_files(5_000)];
  print_results(&results, "MAX CONCURRENT FILES");
}

fn run_memory_suite() {
  let results = vec![
    memory_per_interned_token(1_000),
    memory_per_interned_token(100_000),
  ];
  print_results(&results, "MEMORY EFFICIENCY");
}

fn run_all() {
  let mut results = Vec::new();
  results.push(max_concurrent_lexing_threads(256));
  results.push(max_concurrent_files(5_000));
  results.push(memory_per_interned_token(100_000));
  print_results(&results, "COMPREHENSIVE STRESS TEST RESULTS");
}

fn main() {
  println!("frontc maximum-performance stress suite");
  println!("=========================================");

  let args: Vec<String> = std::env::args().collect();
  match args.get(1).map(String::as_str) {
    Some("threads") => run_threads_suite(),
    Some("files") => run_files_suite(),
    Some("memory") => run_memory_suite(),
    _ => run_all(),
  }

  println!("\nstress suite completed");
}
