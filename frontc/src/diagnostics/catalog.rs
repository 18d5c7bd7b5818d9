//! Static diagnostic table: one entry per [`DiagnosticId`], frozen at
//! compile time. Nothing here is mutable — the table is a pure
//! function from id to (level, kind, message templates).

use std::fmt;

/// Severity. Ordered `Note < Warning < Error < Fatal` so comparisons
/// read naturally ("at least an error").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
  Note,
  Warning,
  Error,
  Fatal,
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Level::Note => "note",
      Level::Warning => "warning",
      Level::Error => "error",
      Level::Fatal => "fatal error",
    };
    write!(f, "{s}")
  }
}

/// What phase a diagnostic came from, independent of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
  System,
  Lexical,
  Syntax,
  Semantic,
  Type,
  Codegen,
  Link,
  Runtime,
}

/// Stable, enumerated diagnostic identifiers. Adding a variant is safe;
/// removing or repurposing one is not — parsers/tests may match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticId {
  UnterminatedStringLiteral,
  UnterminatedCharacterLiteral,
  UnterminatedBlockComment,
  UnexpectedValue,
  /// Catch-all for ids that don't resolve to a real table entry. Never
  /// constructed by this crate's own lexer; exists so callers building
  /// `Diagnostic`s by hand always have a valid fallback.
  InvalidDiagnostic,
}

/// One static table entry.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticInfo {
  pub level: Level,
  pub kind: Kind,
  pub short_message: &'static str,
  /// `%0`, `%1`, ... placeholders, substituted from `Diagnostic::args`.
  pub detailed_template: &'static str,
}

pub fn info(id: DiagnosticId) -> DiagnosticInfo {
  match id {
    DiagnosticId::UnterminatedStringLiteral => DiagnosticInfo {
      level: Level::Error,
      kind: Kind::Lexical,
      short_message: "unterminated string literal",
      detailed_template: "string literal is missing a closing '\"'",
    },
    DiagnosticId::UnterminatedCharacterLiteral => DiagnosticInfo {
      level: Level::Error,
      kind: Kind::Lexical,
      short_message: "unterminated character literal",
      detailed_template: "character literal is missing a closing '\\''",
    },
    DiagnosticId::UnterminatedBlockComment => DiagnosticInfo {
      level: Level::Error,
      kind: Kind::Lexical,
      short_message: "unterminated block comment",
      detailed_template: "block comment reaches end of file without a closing '*/'",
    },
    DiagnosticId::UnexpectedValue => DiagnosticInfo {
      level: Level::Error,
      kind: Kind::Lexical,
      short_message: "unexpected byte",
      detailed_template: "expected %0, found %1",
    },
    DiagnosticId::InvalidDiagnostic => DiagnosticInfo {
      level: Level::Fatal,
      kind: Kind::System,
      short_message: "invalid diagnostic id",
      detailed_template: "diagnostic manager was asked to report an unrecognized id",
    },
  }
}

/// Substitute `%0`, `%1`, ... in `template` with `args` in order.
/// Placeholders past the end of `args` are left as-is rather than
/// panicking — a malformed template should not crash diagnostic
/// reporting, the one subsystem that has to work when everything else
/// is already broken.
pub fn expand_template(template: &str, args: &[String]) -> String {
  let capacity = template.len() + args.iter().map(String::len).sum::<usize>();
  let mut out = String::with_capacity(capacity);
  let mut chars = template.char_indices().peekable();
  while let Some((i, c)) = chars.next() {
    if c == '%' {
      if let Some(&(_, next)) = chars.peek() {
        if next.is_ascii_digit() {
          let mut end = i + 1;
          while let Some(&(j, d)) = chars.peek() {
            if d.is_ascii_digit() {
              end = j + 1;
              chars.next();
            } else {
              break;
            }
          }
          if let Ok(index) = template[i + 1..end].parse::<usize>() {
            if let Some(arg) = args.get(index) {
              out.push_str(arg);
              continue;
            }
          }
          out.push_str(&template[i..end]);
          continue;
        }
      }
    }
    out.push(c);
  }
  out
}
