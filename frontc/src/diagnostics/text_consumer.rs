//! Human-readable diagnostic rendering: `FILE:LINE:COL: LEVEL: MESSAGE`
//! followed by the offending source line, a caret, and `~` underlines
//! for any highlight ranges on that line.

use crate::diagnostics::catalog::Level;
use crate::diagnostics::consumer::{DiagnosticConsumer, RenderedDiagnostic};
use std::io::{self, Write};
use std::sync::Mutex;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD_RED: &str = "\x1b[1;31m";

fn color_for(level: Level) -> &'static str {
  match level {
    Level::Note => CYAN,
    Level::Warning => YELLOW,
    Level::Error => RED,
    Level::Fatal => BOLD_RED,
  }
}

/// Writes ANSI-colored (optionally) diagnostics to a shared buffer,
/// flushed to stdout per diagnostic.
pub struct TextConsumer {
  buffer: Mutex<String>,
  color: bool,
}

impl TextConsumer {
  pub fn new() -> Self {
    Self {
      buffer: Mutex::new(String::with_capacity(256)),
      color: true,
    }
  }

  pub fn without_color() -> Self {
    Self {
      buffer: Mutex::new(String::with_capacity(256)),
      color: false,
    }
  }

  fn paint(&self, color: &str, text: &str) -> String {
    if self.color {
      format!("{color}{text}{RESET}")
    } else {
      text.to_string()
    }
  }
}

impl Default for TextConsumer {
  fn default() -> Self {
    Self::new()
  }
}

impl DiagnosticConsumer for TextConsumer {
  fn handle(&self, diagnostic: &RenderedDiagnostic) {
    let Ok(mut buf) = self.buffer.lock() else { return };
    buf.clear();

    use std::fmt::Write as _;

    let (path, line, col) = match &diagnostic.location {
      Some(loc) => (loc.filename.clone(), loc.line, loc.column),
      None => ("<unknown>".to_string(), 0, 0),
    };

    let level_colored = self.paint(color_for(diagnostic.level), &diagnostic.level.to_string());
    let _ = writeln!(buf, "{path}:{line}:{col}: {level_colored}: {}", diagnostic.message);

    if let Some(source_line) = &diagnostic.source_line {
      let _ = writeln!(buf, "{source_line}");
      let mut marks = vec![b' '; source_line.chars().count().max(col as usize)];
      for &(start, end) in &diagnostic.highlight_columns {
        for i in start.saturating_sub(1)..end.saturating_sub(1) {
          if let Some(slot) = marks.get_mut(i as usize) {
            *slot = b'~';
          }
        }
      }
      if col > 0 {
        if let Some(slot) = marks.get_mut((col - 1) as usize) {
          *slot = b'^';
        }
      }
      let caret_line = String::from_utf8(marks).unwrap_or_default();
      let _ = writeln!(buf, "{}", self.paint(GREEN, &caret_line));
    }

    for fixit in &diagnostic.fixits {
      let _ = writeln!(buf, "  fix-it: replace with '{}'", fixit.replacement);
    }

    let _ = io::stdout().write_all(buf.as_bytes());
  }
}
