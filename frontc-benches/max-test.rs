use frontc::diagnostics::{DiagnosticManager, DiagnosticOptions};
use frontc::interner::Interner;
use frontc::lexer::{Lexer, LexerOptions};
use std::{sync::Arc, thread, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, Registry};

/// Harness configuration for concurrent lexing runs.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
  /// Number of worker threads, each with its own interner and diagnostic manager.
  pub thread_count: usize,
  /// Synthetic source lines lexed per worker.
  pub lines_per_thread: usize,
  /// Retain trivia (comments) while lexing, exercising the heavier code path.
  pub retain_comments: bool,
  /// Install a tracing-subscriber layer for the duration of the run.
  pub with_tracing: bool,
}

impl Default for HarnessConfig {
  fn default() -> Self {
    Self {
      thread_count: 8,
      lines_per_thread: 5_000,
      retain_comments: false,
      with_tracing: true,
    }
  }
}

/// Per-worker outcome: tokens produced and diagnostics raised.
#[derive(Debug, Clone, Copy)]
pub struct WorkerOutcome {
  pub thread_index: usize,
  pub tokens: usize,
  pub errors: u64,
}

/// Drives `thread_count` lexer workers concurrently over independently
/// generated synthetic sources, optionally under a `tracing_subscriber`
/// layer, and reports aggregate throughput.
#[derive(Debug)]
pub struct ConcurrentLexHarness {
  config: HarnessConfig,
  _subscriber_guard: Option<tracing::subscriber::DefaultGuard>,
}

impl ConcurrentLexHarness {
  /// Initialize the harness, installing a tracing subscriber scoped to
  /// this value's lifetime when `config.with_tracing` is set.
  pub fn init(config: HarnessConfig) -> Self {
    let guard = if config.with_tracing {
      let subscriber = Registry::default().with(tracing_subscriber::fmt::layer());
      Some(tracing::subscriber::set_default(subscriber))
    } else {
      None
    };

    Self {
      config,
      _subscriber_guard: guard,
    }
  }

  /// Run all workers to completion and return their outcomes in
  /// thread-index order.
  pub fn run(&self) -> Vec<WorkerOutcome> {
    let handles: Vec<_> = (0..self.config.thread_count)
      .map(|thread_index| {
        let lines = self.config.lines_per_thread;
        let retain_comments = self.config.retain_comments;
        thread::spawn(move || {
          let interner = Interner::new();
          let diagnostics = DiagnosticManager::new(DiagnosticOptions::default());
          let source = synthetic_source(lines, thread_index);
          let options = LexerOptions {
            retain_comments,
            ..LexerOptions::default()
          };
          let mut lexer = Lexer::for_slice(source.as_bytes(), &interner, &diagnostics, options);
          let table = lexer.tokenize();
          WorkerOutcome {
            thread_index,
            tokens: table.len(),
            errors: diagnostics.counts().errors,
          }
        })
      })
      .collect();

    let mut outcomes: Vec<_> = handles.into_iter().map(|h| h.join().expect("worker panicked")).collect();
    outcomes.sort_by_key(|o| o.thread_index);
    outcomes
  }
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

/// Convenience constructor matching the defaults above.
pub fn init_default_harness() -> ConcurrentLexHarness {
  ConcurrentLexHarness::init(HarnessConfig::default())
}

/// Convenience constructor that pushes thread count and per-thread work
/// higher, for a heavier stress run.
pub fn init_maximum_harness() -> ConcurrentLexHarness {
  let config = HarnessConfig {
    thread_count: 32,
    lines_per_thread: 20_000,
    retain_comments: true,
    with_tracing: true,
  };
  ConcurrentLexHarness::init(config)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Instant;

  #[test]
  fn test_default_harness_runs_all_workers() {
    let harness = init_default_harness();
    let start = Instant::now();
    let outcomes = harness.run();
    let elapsed = start.elapsed();

    assert_eq!(outcomes.len(), 8);
    let total_tokens: usize = outcomes.iter().map(|o| o.tokens).sum();
    println!("Lexed {total_tokens} tokens across 8 threads in {elapsed:.2?}");
    println!("Rate: {:.0} tokens/sec", total_tokens as f64 / elapsed.as_secs_f64());
    assert!(outcomes.iter().all(|o| o.errors == 0));
  }

  #[test]
  fn test_interner_throughput_under_contention() {
    let interner = Arc::new(Interner::new());

    let start = Instant::now();
    let handles: Vec<_> = (0..8)
      .map(|t| {
        let interner = Arc::clone(&interner);
        thread::spawn(move || {
          for i in 0..25_000 {
            interner.intern(format!("sym_{}_{}", t, i % 500).as_bytes());
          }
        })
      })
      .collect();
    for h in handles {
      h.join().unwrap();
    }
    let elapsed = start.elapsed();

    println!("Interned 200,000 strings under contention in {elapsed:.2?}");
    println!("Rate: {:.0} ops/sec", 200_000.0 / elapsed.as_secs_f64());
    println!("Stats: {:?}", interner.stats());
  }

  #[test]
  fn test_single_lexer_pass_is_consistent() {
    let interner = Interner::new();
    let diagnostics = DiagnosticManager::new(DiagnosticOptions::default());
    let source = synthetic_source(10_000, 0);

    let start = Instant::now();
    let mut lexer = Lexer::for_slice(source.as_bytes(), &interner, &diagnostics, LexerOptions::default());
    let table = lexer.tokenize();
    let elapsed = start.elapsed();

    println!("Tokenized 10,000 lines in {elapsed:?}");
    println!("Rate: {:.0} tokens/sec", table.len() as f64 / elapsed.as_secs_f64());
    assert_eq!(diagnostics.counts().errors, 0);
  }
}

pub mod benchmarks {
  use super::*;
  use std::time::Instant;

  pub fn benchmark_interning(strings_per_thread: usize) {
    let interner = Arc::new(Interner::new());

    let start = Instant::now();
    let handles: Vec<_> = (0..8)
      .map(|t| {
        let interner = Arc::clone(&interner);
        thread::spawn(move || {
          for i in 0..strings_per_thread {
            interner.intern(format!("tok::{t}::{i}").as_bytes());
          }
        })
      })
      .collect();
    for h in handles {
      h.join().unwrap();
    }
    let elapsed = start.elapsed();
    let total = strings_per_thread * 8;

    println!("Interned {total} strings in {elapsed:?}");
    println!("Rate: {:.0} ops/sec", total as f64 / elapsed.as_secs_f64());
  }

  pub fn benchmark_concurrent_lexing(lines_per_thread: usize, thread_count: usize) {
    let harness = ConcurrentLexHarness::init(HarnessConfig {
      thread_count,
      lines_per_thread,
      retain_comments: false,
      with_tracing: false,
    });

    let start = Instant::now();
    let outcomes = harness.run();
    let elapsed = start.elapsed();
    let total_tokens: usize = outcomes.iter().map(|o| o.tokens).sum();

    println!("Full pipeline {total_tokens} tokens across {thread_count} threads in {elapsed:?}");
    println!("Rate: {:.0} tokens/sec", total_tokens as f64 / elapsed.as_secs_f64());
    thread::sleep(Duration::from_millis(10));
  }
}

fn main() {
  benchmarks::benchmark_interning(25_000);
  benchmarks::benchmark_concurrent_lexing(5_000, 8);
  benchmarks::benchmark_interning(250_000);
  benchmarks::benchmark_concurrent_lexing(20_000, 32);
}
