//! JSON diagnostic rendering: accumulates every diagnostic seen, then
//! emits `{"diagnostics":[...]}` on demand via [`JsonConsumer::to_json`].

use crate::diagnostics::consumer::{DiagnosticConsumer, RenderedDiagnostic};
use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Serialize)]
struct JsonLocation {
  file: String,
  line: u32,
  column: u32,
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic {
  id: &'static str,
  level: String,
  message: String,
  location: Option<JsonLocation>,
}

fn id_name(id: crate::diagnostics::catalog::DiagnosticId) -> &'static str {
  use crate::diagnostics::catalog::DiagnosticId::*;
  match id {
    UnterminatedStringLiteral => "UnterminatedStringLiteral",
    UnterminatedCharacterLiteral => "UnterminatedCharacterLiteral",
    UnterminatedBlockComment => "UnterminatedBlockComment",
    UnexpectedValue => "UnexpectedValue",
    InvalidDiagnostic => "InvalidDiagnostic",
  }
}

/// Collects diagnostics in arrival order for a single JSON document.
/// `begin_source_file`/`end_source_file` are accepted for symmetry with
/// the text consumer but don't change the flat output shape — every
/// diagnostic already carries its own file in `location`.
pub struct JsonConsumer {
  diagnostics: Mutex<Vec<JsonDiagnostic>>,
}

impl JsonConsumer {
  pub fn new() -> Self {
    Self {
      diagnostics: Mutex::new(Vec::new()),
    }
  }

  pub fn to_json(&self) -> String {
    let diagnostics = self.diagnostics.lock().unwrap();
    #[derive(Serialize)]
    struct Document<'a> {
      diagnostics: &'a [JsonDiagnostic],
    }
    serde_json::to_string(&Document {
      diagnostics: &diagnostics,
    })
    .unwrap_or_else(|_| "{\"diagnostics\":[]}".to_string())
  }

  pub fn len(&self) -> usize {
    self.diagnostics.lock().unwrap().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for JsonConsumer {
  fn default() -> Self {
    Self::new()
  }
}

impl DiagnosticConsumer for JsonConsumer {
  fn handle(&self, diagnostic: &RenderedDiagnostic) {
    let location = diagnostic.location.as_ref().map(|loc| JsonLocation {
      file: loc.filename.clone(),
      line: loc.line,
      column: loc.column,
    });
    self.diagnostics.lock().unwrap().push(JsonDiagnostic {
      id: id_name(diagnostic.id),
      level: diagnostic.level.to_string(),
      message: diagnostic.message.clone(),
      location,
    });
  }
}
