//! Plain println-based performance report for frontc's core hot paths:
//! arena allocation, string interning, file loading, and end-to-end
//! lexing. Run with `cargo run --release --bin test_performance`.
//!
//! This is a human-readable companion to `lexer_bench`'s criterion
//! numbers — no statistical rigor, just a quick before/after sanity
//! check during development.

use frontc::arena::Arena;
use frontc::diagnostics::{DiagnosticManager, DiagnosticOptions};
use frontc::file_manager::FileManager;
use frontc::interner::Interner;
use frontc::lexer::{Lexer, LexerOptions};
use frontc::source_manager::SourceManager;
use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() {
  println!("frontc performance test results");
  println!("================================");
  println!();

  test_arena_performance();
  test_interner_performance();
  test_file_manager_performance();
  test_lexer_performance();
  test_concurrent_interning();

  println!("all performance tests completed");
}

fn test_arena_performance() {
  println!("arena allocation performance:");
  println!("------------------------------");

  let arena = Arena::new();
  let start = Instant::now();
  for i in 0..100_000 {
    let bytes = format!("token_{i}");
    arena.allocate_string(bytes.as_bytes());
  }
  let elapsed = start.elapsed();
  let throughput = 100_000.0 / elapsed.as_secs_f64();
  println!("  allocate_string x100K: {throughput:.2} allocs/sec");

  let stats = arena.stats();
  println!(
    "  chunks: {}, total allocated: {} bytes, wasted: {} bytes",
    stats.chunk_count, stats.total_allocated, stats.wasted_bytes
  );
  println!();
}

fn test_interner_performance() {
  println!("interner performance:");
  println!("----------------------");

  let interner = Interner::new();
  let words: Vec<String> = (0..100_000).map(|i| format!("identifier_{i}")).collect();

  let start = Instant::now();
  for word in &words {
    interner.intern(word.as_bytes());
  }
  let unique_time = start.elapsed();
  println!(
    "  intern 100K unique strings: {:.2} interns/sec",
    100_000.0 / unique_time.as_secs_f64()
  );

  let start = Instant::now();
  for word in words.iter().take(1000).cycle().take(100_000) {
    interner.intern(word.as_bytes());
  }
  let repeat_time = start.elapsed();
  println!(
    "  intern 100K repeated strings: {:.2} interns/sec",
    100_000.0 / repeat_time.as_secs_f64()
  );

  let stats = interner.stats();
  println!(
    "  unique: {}, collisions: {}, avg length: {:.1}",
    stats.unique_strings, stats.collision_count, stats.average_length
  );
  println!();
}

fn test_file_manager_performance() {
  println!("file manager performance:");
  println!("---------------------------");

  let dir = tempfile::tempdir().expect("create temp dir");
  let path = dir.path().join("sample.src");
  let mut file = std::fs::File::create(&path).expect("create temp file");
  file
    .write_all(&vec![b'x'; 64 * 1024])
    .expect("write temp file");
  drop(file);

  let manager = FileManager::new();
  let start = Instant::now();
  for _ in 0..10_000 {
    manager.get_file(&path).expect("cached read");
  }
  let elapsed = start.elapsed();
  println!(
    "  get_file x10K (cache hits): {:.2} calls/sec",
    10_000.0 / elapsed.as_secs_f64()
  );

  let stats = manager.stats();
  println!("  opens: {}, hits: {}, misses: {}", stats.opens, stats.hits, stats.misses);
  println!();
}

fn test_lexer_performance() {
  println!("lexer performance:");
  println!("-------------------");

  for lines in [1_000usize, 10_000] {
    let source = synthetic_source(lines);
    let interner = Interner::new();
    let diagnostics = DiagnosticManager::new(DiagnosticOptions::default());

    let start = Instant::now();
    let mut lexer = Lexer::for_slice(source.as_bytes(), &interner, &diagnostics, LexerOptions::default());
    let table = lexer.tokenize();
    let elapsed = start.elapsed();

    println!(
      "  {lines} lines -> {} tokens in {:.2?} ({:.2} tokens/sec)",
      table.len(),
      elapsed,
      table.len() as f64 / elapsed.as_secs_f64()
    );
  }
  println!();
}

fn test_concurrent_interning() {
  println!("concurrent interning:");
  println!("-----------------------");

  let file_manager = Arc::new(FileManager::new());
  let source_manager = Arc::new(SourceManager::new(Arc::clone(&file_manager)));

  let start = Instant::now();
  let handles: Vec<_> = (0..8)
    .map(|thread_id| {
      let source_manager = Arc::clone(&source_manager);
      thread::spawn(move || {
        let interner = Interner::new();
        let diagnostics = DiagnosticManager::new(DiagnosticOptions::default());
        let source = synthetic_source(500);
        let mut lexer = Lexer::for_slice(source.as_bytes(), &interner, &diagnostics, LexerOptions::default());
        let table = lexer.tokenize();
        let _ = &source_manager;
        (thread_id, table.len())
      })
    })
    .collect();

  let total_tokens: usize = handles.into_iter().map(|h| h.join().unwrap().1).sum();
  let elapsed = start.elapsed();
  println!("  8 threads, 500 lines each: {total_tokens} tokens total in {elapsed:.2?}");
  println!();
}

/// A synthetic C-family source file of roughly `lines` lines, mirroring
/// the shape used in `lexer_bench`'s criterion harness.
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
