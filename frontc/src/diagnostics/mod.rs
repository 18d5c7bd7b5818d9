//! # Diagnostic manager
//!
//! The single sink every other component reports problems through.
//! Diagnostics carry a stable [`catalog::DiagnosticId`] rather than a
//! free-form message, so behavior (suppression, promotion to error,
//! counting) is driven off the static table in [`catalog`] and never
//! off string matching.
//!
//! ## Filtering and counting
//!
//! `report` resolves the id, applies `suppressWarnings`/`suppressNotes`,
//! promotes `Warning` to `Error` under `warningsAsErrors`, then updates
//! the matching counter. Once the error counter reaches `maxErrors`
//! (when nonzero) further diagnostics are still counted but no longer
//! dispatched to consumers — counting never stops, only fan-out does.
//!
//! ## Consumers
//!
//! Registered consumers ([`TextConsumer`], [`JsonConsumer`], or any
//! other [`DiagnosticConsumer`]) are invoked in registration order,
//! outside the manager's internal lock.

pub mod catalog;
pub mod consumer;
pub mod json_consumer;
pub mod text_consumer;

mod __test__;

pub use catalog::{DiagnosticId, Kind, Level};
pub use consumer::{DiagnosticConsumer, RenderedDiagnostic};
pub use json_consumer::JsonConsumer;
pub use text_consumer::TextConsumer;

use crate::source_manager::SourceLoc;
use crate::source_manager::SourceManager;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// A `(range, replacement)` suggestion. `range` is a byte offset range
/// relative to whatever text [`Fixit::apply`] is given — typically a
/// single rendered source line — not a global [`SourceLoc`] pair, so
/// applying a fixit never needs a bound source manager.
#[derive(Debug, Clone)]
pub struct Fixit {
  pub range: std::ops::Range<usize>,
  pub replacement: String,
}

impl Fixit {
  pub fn new(range: std::ops::Range<usize>, replacement: impl Into<String>) -> Self {
    Self {
      range,
      replacement: replacement.into(),
    }
  }

  /// Pure convenience: splice `self.replacement` into `text` at
  /// `self.range`, clamped to `text`'s bounds.
  pub fn apply(&self, text: &str) -> String {
    let start = self.range.start.min(text.len());
    let end = self.range.end.clamp(start, text.len());
    let mut out = String::with_capacity(text.len() - (end - start) + self.replacement.len());
    out.push_str(&text[..start]);
    out.push_str(&self.replacement);
    out.push_str(&text[end..]);
    out
  }
}

/// A diagnostic as reported by a caller, before filtering/rendering.
#[derive(Debug, Clone)]
pub struct Diagnostic {
  pub id: DiagnosticId,
  pub location: SourceLoc,
  pub args: SmallVec<[String; 2]>,
  pub ranges: SmallVec<[(SourceLoc, SourceLoc); 1]>,
  pub fixits: SmallVec<[Fixit; 1]>,
}

impl Diagnostic {
  pub fn new(id: DiagnosticId, location: SourceLoc) -> Self {
    Self {
      id,
      location,
      args: SmallVec::new(),
      ranges: SmallVec::new(),
      fixits: SmallVec::new(),
    }
  }

  pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn with_range(mut self, range: (SourceLoc, SourceLoc)) -> Self {
    self.ranges.push(range);
    self
  }

  pub fn with_fixit(mut self, fixit: Fixit) -> Self {
    self.fixits.push(fixit);
    self
  }
}

/// Filter configuration. `max_errors == 0` means unlimited.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticOptions {
  pub suppress_warnings: bool,
  pub suppress_notes: bool,
  pub warnings_as_errors: bool,
  pub max_errors: u32,
}

impl Default for DiagnosticOptions {
  fn default() -> Self {
    Self {
      suppress_warnings: false,
      suppress_notes: false,
      warnings_as_errors: false,
      max_errors: 0,
    }
  }
}

#[derive(Debug, Default)]
struct Counters {
  notes: AtomicU64,
  warnings: AtomicU64,
  errors: AtomicU64,
  fatals: AtomicU64,
}

/// Point-in-time counter snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
  pub notes: u64,
  pub warnings: u64,
  pub errors: u64,
  pub fatals: u64,
}

/// Restores the previous `suppress_warnings`/`suppress_notes` settings
/// when dropped. See [`DiagnosticManager::suppress_scope`].
pub struct SuppressGuard<'a> {
  manager: &'a DiagnosticManager,
  prev_warnings: bool,
  prev_notes: bool,
}

impl<'a> Drop for SuppressGuard<'a> {
  fn drop(&mut self) {
    let mut options = self.manager.options.lock().unwrap();
    options.suppress_warnings = self.prev_warnings;
    options.suppress_notes = self.prev_notes;
  }
}

/// Central diagnostic sink. See module docs.
pub struct DiagnosticManager {
  consumers: Mutex<Vec<Box<dyn DiagnosticConsumer>>>,
  options: Mutex<DiagnosticOptions>,
  counters: Counters,
  fatal_seen: AtomicBool,
  source_manager: Option<Arc<SourceManager>>,
}

impl DiagnosticManager {
  pub fn new(options: DiagnosticOptions) -> Self {
    Self {
      consumers: Mutex::new(Vec::new()),
      options: Mutex::new(options),
      counters: Counters::default(),
      fatal_seen: AtomicBool::new(false),
      source_manager: None,
    }
  }

  pub fn with_source_manager(options: DiagnosticOptions, source_manager: Arc<SourceManager>) -> Self {
    Self {
      source_manager: Some(source_manager),
      ..Self::new(options)
    }
  }

  pub fn add_consumer(&self, consumer: Box<dyn DiagnosticConsumer>) {
    self.consumers.lock().unwrap().push(consumer);
  }

  /// Resolve, filter, count, and (if not suppressed) dispatch `diagnostic`.
  pub fn report(&self, diagnostic: Diagnostic) {
    let info = catalog::info(diagnostic.id);
    let mut level = info.level;

    {
      let options = self.options.lock().unwrap();
      if level == Level::Note && options.suppress_notes {
        return;
      }
      if level == Level::Warning && options.suppress_warnings {
        return;
      }
      if level == Level::Warning && options.warnings_as_errors {
        level = Level::Error;
      }
    }

    let suppressed_by_cap = match level {
      Level::Note => {
        self.counters.notes.fetch_add(1, Ordering::SeqCst);
        false
      },
      Level::Warning => {
        self.counters.warnings.fetch_add(1, Ordering::SeqCst);
        false
      },
      Level::Error => {
        let count = self.counters.errors.fetch_add(1, Ordering::SeqCst) + 1;
        let max = self.options.lock().unwrap().max_errors;
        max > 0 && count >= max
      },
      Level::Fatal => {
        self.counters.fatals.fetch_add(1, Ordering::SeqCst);
        self.fatal_seen.store(true, Ordering::SeqCst);
        false
      },
    };

    if suppressed_by_cap {
      tracing::warn!(id = ?diagnostic.id, "diagnostic suppressed: error cap reached");
      return;
    }

    let rendered = self.render(diagnostic, level, info.detailed_template);
    let consumers = self.consumers.lock().unwrap();
    for consumer in consumers.iter() {
      consumer.handle(&rendered);
    }
  }

  fn render(&self, diagnostic: Diagnostic, level: Level, template: &'static str) -> RenderedDiagnostic {
    let message = catalog::expand_template(template, &diagnostic.args);

    let location = self
      .source_manager
      .as_ref()
      .filter(|_| diagnostic.location.is_valid())
      .map(|sm| sm.full_loc(diagnostic.location));

    let source_line = self
      .source_manager
      .as_ref()
      .and_then(|sm| sm.line_text(diagnostic.location));

    let highlight_columns = location
      .as_ref()
      .zip(self.source_manager.as_ref())
      .map(|(loc, sm)| {
        diagnostic
          .ranges
          .iter()
          .filter_map(|&(start, end)| {
            let (start_line, start_col) = sm.line_and_column(start);
            let (end_line, end_col) = sm.line_and_column(end);
            if start_line == loc.line && end_line == loc.line {
              Some((start_col, end_col))
            } else {
              None
            }
          })
          .collect()
      })
      .unwrap_or_default();

    RenderedDiagnostic {
      id: diagnostic.id,
      level,
      kind: catalog::info(diagnostic.id).kind,
      message,
      location,
      ranges: diagnostic.ranges,
      fixits: diagnostic.fixits,
      source_line,
      highlight_columns,
    }
  }

  /// `false` once a Fatal has been reported, or once the error count
  /// has reached a nonzero `maxErrors`.
  pub fn should_continue(&self) -> bool {
    if self.fatal_seen.load(Ordering::SeqCst) {
      return false;
    }
    let errors = self.counters.errors.load(Ordering::SeqCst);
    let max = self.options.lock().unwrap().max_errors;
    !(max > 0 && errors >= max)
  }

  pub fn counts(&self) -> DiagnosticCounts {
    DiagnosticCounts {
      notes: self.counters.notes.load(Ordering::SeqCst),
      warnings: self.counters.warnings.load(Ordering::SeqCst),
      errors: self.counters.errors.load(Ordering::SeqCst),
      fatals: self.counters.fatals.load(Ordering::SeqCst),
    }
  }

  /// Scoped suppression of warnings and notes, restored on drop. Handy
  /// for bulk operations (e.g. speculative re-lexing) that shouldn't
  /// spam diagnostics for input the caller may discard.
  pub fn suppress_scope(&self) -> SuppressGuard<'_> {
    let mut options = self.options.lock().unwrap();
    let prev = (options.suppress_warnings, options.suppress_notes);
    options.suppress_warnings = true;
    options.suppress_notes = true;
    drop(options);
    SuppressGuard {
      manager: self,
      prev_warnings: prev.0,
      prev_notes: prev.1,
    }
  }

  /// Call every registered consumer's [`DiagnosticConsumer::finish`],
  /// in registration order. A driver calls this once a compilation unit
  /// is entirely done reporting, after any per-file `end_source_file`
  /// calls, so consumers that batch output (e.g. [`JsonConsumer`]) get a
  /// chance to flush before the manager is dropped or reused.
  pub fn finish(&self) {
    let consumers = self.consumers.lock().unwrap();
    for consumer in consumers.iter() {
      consumer.finish();
    }
  }

  /// Zero every counter and clear the fatal latch. Registered consumers
  /// and filter options are left untouched.
  pub fn reset(&self) {
    self.counters.notes.store(0, Ordering::SeqCst);
    self.counters.warnings.store(0, Ordering::SeqCst);
    self.counters.errors.store(0, Ordering::SeqCst);
    self.counters.fatals.store(0, Ordering::SeqCst);
    self.fatal_seen.store(false, Ordering::SeqCst);
  }
}
