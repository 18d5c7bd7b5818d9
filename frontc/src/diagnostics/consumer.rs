use crate::diagnostics::catalog::{DiagnosticId, Kind, Level};
use crate::diagnostics::Fixit;
use crate::source_manager::{FullSourceLoc, SourceLoc};
use smallvec::SmallVec;

/// A diagnostic after filtering/promotion but before rendering: what a
/// [`DiagnosticConsumer`] actually sees.
#[derive(Debug, Clone)]
pub struct RenderedDiagnostic {
  pub id: DiagnosticId,
  pub level: Level,
  pub kind: Kind,
  pub message: String,
  pub location: Option<FullSourceLoc>,
  pub ranges: SmallVec<[(SourceLoc, SourceLoc); 1]>,
  pub fixits: SmallVec<[Fixit; 1]>,
  /// The text of `location`'s line, when a source manager is bound and
  /// the location resolved to one. Precomputed by the manager so
  /// consumers stay free of a `SourceManager` dependency.
  pub source_line: Option<String>,
  /// `(start_column, end_column)` pairs for `ranges` that fall on
  /// `source_line`, 1-based and end-exclusive.
  pub highlight_columns: SmallVec<[(u32, u32); 1]>,
}

/// Receives diagnostics dispatched by a [`crate::diagnostics::DiagnosticManager`]
/// in registration order. Consumers are not called under the manager's
/// internal lock, but must serialize their own output if shared across
/// threads.
pub trait DiagnosticConsumer: Send + Sync {
  fn handle(&self, diagnostic: &RenderedDiagnostic);

  /// Called when a new source file starts being processed. Default
  /// no-op; the JSON consumer uses this to open its file grouping.
  fn begin_source_file(&self, _filename: &str) {}

  /// Called when a source file is done being processed.
  fn end_source_file(&self) {}

  /// Called once a compilation unit is entirely done dispatching
  /// diagnostics, after any `end_source_file` calls. Default no-op; a
  /// consumer that batches output (e.g. to flush a JSON document or
  /// close a report) overrides this instead of requiring callers to
  /// know its concrete type.
  fn finish(&self) {}
}
