#[cfg(test)]
mod __test__ {
  use crate::diagnostics::{
    Diagnostic, DiagnosticId, DiagnosticManager, DiagnosticOptions, Fixit, JsonConsumer, Level,
  };
  use crate::file_manager::FileManager;
  use crate::source_manager::{SourceLoc, SourceManager};
  use std::io::Write;
  use std::sync::Arc;

  fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
  }

  #[test]
  fn test_report_without_consumers_still_counts() {
    let manager = DiagnosticManager::new(DiagnosticOptions::default());
    manager.report(Diagnostic::new(DiagnosticId::UnexpectedValue, SourceLoc::INVALID));
    assert_eq!(manager.counts().errors, 1);
  }

  #[test]
  fn test_suppress_warnings_drops_before_counting() {
    // Suppressed diagnostics are filtered before the counters below the
    // report path fire, but since every catalog entry used here is an
    // Error, exercise the warnings-as-errors promotion path instead of
    // inventing a warning-level id.
    let mut options = DiagnosticOptions::default();
    options.warnings_as_errors = true;
    let manager = DiagnosticManager::new(options);
    manager.report(Diagnostic::new(DiagnosticId::UnexpectedValue, SourceLoc::INVALID));
    assert_eq!(manager.counts().errors, 1);
  }

  #[test]
  fn test_max_errors_suppresses_dispatch_but_keeps_counting() {
    let manager = DiagnosticManager::new(DiagnosticOptions {
      max_errors: 2,
      ..DiagnosticOptions::default()
    });
    let json = Arc::new(JsonConsumer::new());
    manager.add_consumer(Box::new(ArcConsumer(Arc::clone(&json))));

    for _ in 0..3 {
      manager.report(Diagnostic::new(DiagnosticId::UnexpectedValue, SourceLoc::INVALID));
    }

    assert_eq!(manager.counts().errors, 3);
    // Only the first (errorCount < maxErrors) diagnostic was dispatched.
    assert_eq!(json.len(), 1);
  }

  #[test]
  fn test_should_continue_false_after_fatal() {
    let manager = DiagnosticManager::new(DiagnosticOptions::default());
    assert!(manager.should_continue());
    manager.report(Diagnostic::new(DiagnosticId::InvalidDiagnostic, SourceLoc::INVALID));
    assert!(!manager.should_continue());
  }

  #[test]
  fn test_should_continue_false_at_max_errors() {
    let manager = DiagnosticManager::new(DiagnosticOptions {
      max_errors: 1,
      ..DiagnosticOptions::default()
    });
    assert!(manager.should_continue());
    manager.report(Diagnostic::new(DiagnosticId::UnexpectedValue, SourceLoc::INVALID));
    assert!(!manager.should_continue());
  }

  #[test]
  fn test_reset_zeroes_counters_and_clears_fatal_latch() {
    let manager = DiagnosticManager::new(DiagnosticOptions::default());
    manager.report(Diagnostic::new(DiagnosticId::InvalidDiagnostic, SourceLoc::INVALID));
    assert!(!manager.should_continue());
    manager.reset();
    assert_eq!(manager.counts(), Default::default());
    assert!(manager.should_continue());
  }

  #[test]
  fn test_suppress_scope_restores_previous_settings() {
    let manager = DiagnosticManager::new(DiagnosticOptions::default());
    {
      let _guard = manager.suppress_scope();
      // Inside the scope, a note-equivalent diagnostic would be dropped;
      // we don't have a Note-level catalog entry, so just verify the
      // guard releases cleanly via a second nested check below.
    }
    // After the guard drops, reporting still counts normally.
    manager.report(Diagnostic::new(DiagnosticId::UnexpectedValue, SourceLoc::INVALID));
    assert_eq!(manager.counts().errors, 1);
  }

  #[test]
  fn test_json_consumer_emits_expected_shape() {
    let manager = DiagnosticManager::new(DiagnosticOptions::default());
    let json = Arc::new(JsonConsumer::new());
    manager.add_consumer(Box::new(ArcConsumer(Arc::clone(&json))));
    manager.report(
      Diagnostic::new(DiagnosticId::UnexpectedValue, SourceLoc::INVALID)
        .with_arg("';'")
        .with_arg("'@'"),
    );
    let doc = json.to_json();
    assert!(doc.contains("UnexpectedValue"));
    assert!(doc.contains("expected ';', found '@'"));
  }

  #[test]
  fn test_text_consumer_renders_source_line_and_caret() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "a.txt", b"let x = ;\n");
    let file_manager = Arc::new(FileManager::new());
    let source_manager = Arc::new(SourceManager::new(Arc::clone(&file_manager)));
    let fid = source_manager.create_file(&path).unwrap();
    let loc = source_manager.loc_for_file_offset(fid, 8);

    let manager =
      DiagnosticManager::with_source_manager(DiagnosticOptions::default(), Arc::clone(&source_manager));
    // No assertion on stdout bytes; this exercises the render path
    // (location resolution, source line lookup) without panicking.
    manager.report(
      Diagnostic::new(DiagnosticId::UnexpectedValue, loc)
        .with_arg("an expression")
        .with_arg("';'"),
    );
    assert_eq!(manager.counts().errors, 1);
  }

  #[test]
  fn test_fixit_apply_splices_replacement() {
    let fixit = Fixit::new(8..9, "0");
    assert_eq!(fixit.apply("let x = ;"), "let x = 0;");
  }

  #[test]
  fn test_diagnostic_info_levels_resolve() {
    assert_eq!(
      crate::diagnostics::catalog::info(DiagnosticId::UnterminatedStringLiteral).level,
      Level::Error
    );
    assert_eq!(crate::diagnostics::catalog::info(DiagnosticId::InvalidDiagnostic).level, Level::Fatal);
  }

  #[test]
  fn test_finish_calls_every_consumer_once() {
    let manager = DiagnosticManager::new(DiagnosticOptions::default());
    let tracker = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    manager.add_consumer(Box::new(FinishTrackingConsumer(Arc::clone(&tracker))));
    manager.add_consumer(Box::new(FinishTrackingConsumer(Arc::clone(&tracker))));

    assert_eq!(tracker.load(std::sync::atomic::Ordering::SeqCst), 0);
    manager.finish();
    assert_eq!(tracker.load(std::sync::atomic::Ordering::SeqCst), 2);
  }

  /// Adapts a shared `JsonConsumer` to the consumer trait's
  /// `Box<dyn DiagnosticConsumer>` ownership without cloning its state.
  struct ArcConsumer(Arc<JsonConsumer>);
  impl crate::diagnostics::DiagnosticConsumer for ArcConsumer {
    fn handle(&self, diagnostic: &crate::diagnostics::RenderedDiagnostic) {
      self.0.handle(diagnostic);
    }
  }

  /// Records how many times `finish` was called, to verify the manager
  /// dispatches it to every registered consumer.
  struct FinishTrackingConsumer(Arc<std::sync::atomic::AtomicUsize>);
  impl crate::diagnostics::DiagnosticConsumer for FinishTrackingConsumer {
    fn handle(&self, _diagnostic: &crate::diagnostics::RenderedDiagnostic) {}
    fn finish(&self) {
      self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
  }
}
