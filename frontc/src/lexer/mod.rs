//! # Lexer
//!
//! Turns a file's bytes (addressed either through a [`SourceManager`] +
//! [`FileId`], or as a raw byte slice with no location mapping) into a
//! stream of classified [`Token`]s. Every lexical mishap is reported
//! through a [`DiagnosticManager`] and the scan keeps going — the lexer
//! never unwinds, so a consumer always sees a complete token stream
//! terminated by [`TokenKind::EndOfFile`].
//!
//! ## Scanning model
//!
//! One byte of lookahead drives dispatch (`peek_byte(0)`), with a second
//! byte of lookahead for the handful of two-byte operators and the `//`
//! / `/*` comment openers. The scanner never backtracks across bytes it
//! has already classified — trivia is skipped or emitted as it's seen,
//! and the position only ever moves forward.
//!
//! ## Line tracking
//!
//! `line` and `line_start` are maintained incrementally as the scan
//! crosses newlines (including inside block comments, which may span
//! several lines). `AtStartOfLine` on an emitted token means scanning
//! began exactly at `line_start`.

pub mod escape;
pub mod keywords;
pub mod token;
pub mod token_table;

pub use token::{Token, TokenFlags, TokenKind};
pub use token_table::TokenTable;

use crate::diagnostics::{Diagnostic, DiagnosticId, DiagnosticManager};
use crate::file_manager::FileEntry;
use crate::interner::{Handle, Interner};
use crate::source_manager::{FileId, SourceLoc, SourceManager};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How unknown high bytes (0x80-0xFF) should be described in
/// diagnostics. Purely advisory — it never changes which bytes are
/// accepted, only how an `Unknown` byte is rendered in an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
  Utf8,
  Ascii,
  Latin1,
}

/// Tunable lexer behavior: whether trivia is retained in the token
/// stream, how identifiers and numbers are interpreted, and whether
/// warnings escalate to errors. The `enable_*` fields are
/// implementation-choice flags that must not
/// alter the emitted token stream — they exist so a future performance
/// pass has somewhere to hang itself without changing this module's
/// public contract.
#[derive(Debug, Clone, Copy)]
pub struct LexerOptions {
  pub retain_comments: bool,
  pub retain_whitespace: bool,
  pub allow_unicode_identifiers: bool,
  pub strict_mode: bool,
  pub warnings_as_errors: bool,
  pub enable_fast_path: bool,
  pub enable_lookup_tables: bool,
  pub enable_prefetching: bool,
  pub enable_simd_optimizations: bool,
  pub input_encoding: InputEncoding,
}

impl Default for LexerOptions {
  fn default() -> Self {
    Self {
      retain_comments: false,
      retain_whitespace: false,
      allow_unicode_identifiers: false,
      strict_mode: false,
      warnings_as_errors: false,
      enable_fast_path: true,
      enable_lookup_tables: true,
      enable_prefetching: false,
      enable_simd_optimizations: false,
      input_encoding: InputEncoding::Utf8,
    }
  }
}

/// Running counters for one [`Lexer`] instance. Every field is an
/// atomic; `per_kind` is mutex-guarded since it's a map rather than a
/// scalar, but is never touched under any other lock.
#[derive(Debug, Default)]
pub struct LexerStats {
  pub chars_processed: AtomicU64,
  pub tokens_emitted: AtomicU64,
  pub comments: AtomicU64,
  pub lines: AtomicU64,
  pub lexing_time_nanos: AtomicU64,
  pub simd_batches: AtomicU64,
  pub lookup_table_hits: AtomicU64,
  per_kind: std::sync::Mutex<HashMap<TokenKind, u64>>,
}

impl LexerStats {
  fn record_token(&self, kind: TokenKind, bytes: usize) {
    self.tokens_emitted.fetch_add(1, Ordering::Relaxed);
    self.chars_processed.fetch_add(bytes as u64, Ordering::Relaxed);
    if matches!(kind, TokenKind::LineComment | TokenKind::BlockComment) {
      self.comments.fetch_add(1, Ordering::Relaxed);
    }
    *self.per_kind.lock().unwrap().entry(kind).or_insert(0) += 1;
  }

  fn record_lexing_time(&self, elapsed: Duration) {
    self.lexing_time_nanos.fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
  }

  pub fn snapshot(&self) -> LexerStatsSnapshot {
    LexerStatsSnapshot {
      chars_processed: self.chars_processed.load(Ordering::Relaxed),
      tokens_emitted: self.tokens_emitted.load(Ordering::Relaxed),
      comments: self.comments.load(Ordering::Relaxed),
      lines: self.lines.load(Ordering::Relaxed),
      lexing_time: Duration::from_nanos(self.lexing_time_nanos.load(Ordering::Relaxed)),
      simd_batches: self.simd_batches.load(Ordering::Relaxed),
      lookup_table_hits: self.lookup_table_hits.load(Ordering::Relaxed),
      per_kind: self.per_kind.lock().unwrap().clone(),
    }
  }
}

/// Plain-value snapshot of [`LexerStats`] for logging/assertions.
#[derive(Debug, Clone, Default)]
pub struct LexerStatsSnapshot {
  pub chars_processed: u64,
  pub tokens_emitted: u64,
  pub comments: u64,
  pub lines: u64,
  pub lexing_time: Duration,
  pub simd_batches: u64,
  pub lookup_table_hits: u64,
  pub per_kind: HashMap<TokenKind, u64>,
}

/// Where a [`Lexer`] gets its bytes from. A file-backed lexer attaches
/// real [`SourceLoc`]s to every token; a slice-backed one reports
/// [`SourceLoc::INVALID`] throughout, since it has no source manager to
/// issue locations from.
enum Source<'a> {
  File { entry: Arc<FileEntry>, base: SourceLoc },
  Slice(&'a [u8]),
}

impl<'a> Source<'a> {
  fn bytes(&self) -> &[u8] {
    match self {
      Source::File { entry, .. } => entry.bytes(),
      Source::Slice(s) => s,
    }
  }

  fn loc_at(&self, offset: usize) -> SourceLoc {
    match self {
      Source::File { base, .. } => SourceLoc::from_raw(base.raw() + offset as u32),
      Source::Slice(_) => SourceLoc::INVALID,
    }
  }
}

/// Scans one source (file or raw slice) into a token stream. See module
/// docs for the overall model.
pub struct Lexer<'a> {
  source: Source<'a>,
  interner: &'a Interner<'a>,
  diagnostics: &'a DiagnosticManager,
  options: LexerOptions,
  pos: usize,
  line: u32,
  line_start: usize,
  peeked: Option<Token>,
  stats: LexerStats,
}

impl<'a> Lexer<'a> {
  /// Scan the whole of `file_id`'s content as registered with
  /// `source_manager`. Tokens carry real [`SourceLoc`]s into that file's
  /// slice of the global location space.
  pub fn for_file(
    source_manager: &SourceManager,
    file_id: FileId,
    interner: &'a Interner<'a>,
    diagnostics: &'a DiagnosticManager,
    options: LexerOptions,
  ) -> Self {
    let entry = source_manager
      .file_entry(file_id)
      .expect("Lexer::for_file requires a FileId already registered with this SourceManager");
    let base = source_manager.start_loc(file_id);
    Self::new(Source::File { entry, base }, interner, diagnostics, options)
  }

  /// Scan a raw byte slice with no location mapping. Every token's
  /// `location` is [`SourceLoc::INVALID`]; callers that need positions
  /// should register the bytes with a [`SourceManager`] first and use
  /// [`Lexer::for_file`] instead.
  pub fn for_slice(
    bytes: &'a [u8],
    interner: &'a Interner<'a>,
    diagnostics: &'a DiagnosticManager,
    options: LexerOptions,
  ) -> Self {
    Self::new(Source::Slice(bytes), interner, diagnostics, options)
  }

  fn new(source: Source<'a>, interner: &'a Interner<'a>, diagnostics: &'a DiagnosticManager, options: LexerOptions) -> Self {
    Self {
      source,
      interner,
      diagnostics,
      options,
      pos: 0,
      line: 1,
      line_start: 0,
      peeked: None,
      stats: LexerStats::default(),
    }
  }

  pub fn stats(&self) -> LexerStatsSnapshot {
    self.stats.snapshot()
  }

  /// Return (without consuming) the next token. At most one token is
  /// ever buffered; a following [`Lexer::next_token`] returns it without
  /// rescanning.
  pub fn peek_token(&mut self) -> Token {
    if self.peeked.is_none() {
      let token = self.scan();
      self.peeked = Some(token);
    }
    self.peeked.unwrap()
  }

  pub fn next_token(&mut self) -> Token {
    if let Some(token) = self.peeked.take() {
      return token;
    }
    self.scan()
  }

  /// Scan the entire input into a [`TokenTable`], including the
  /// trailing `EndOfFile` token.
  pub fn tokenize(&mut self) -> TokenTable {
    let mut table = TokenTable::new();
    loop {
      let token = self.next_token();
      let done = token.kind == TokenKind::EndOfFile;
      table.push(token);
      if done {
        break;
      }
    }
    table
  }

  fn bytes(&self) -> &[u8] {
    self.source.bytes()
  }

  fn byte_at(&self, offset: usize) -> Option<u8> {
    self.bytes().get(offset).copied()
  }

  fn current(&self) -> Option<u8> {
    self.byte_at(self.pos)
  }

  fn peek_byte(&self, ahead: usize) -> Option<u8> {
    self.byte_at(self.pos + ahead)
  }

  fn advance(&mut self) {
    self.pos += 1;
  }

  fn loc_at(&self, offset: usize) -> SourceLoc {
    self.source.loc_at(offset)
  }

  /// Consume one line terminator (`CR`, `LF`, or `CR LF`, collapsed to a
  /// single line increment) starting at `self.pos`. Caller must have
  /// already confirmed `self.current()` is `CR` or `LF`.
  fn consume_newline(&mut self) {
    let first = self.current().expect("consume_newline requires a newline at the cursor");
    self.advance();
    if first == b'\r' && self.current() == Some(b'\n') {
      self.advance();
    }
    self.line += 1;
    self.line_start = self.pos;
    self.stats.lines.fetch_add(1, Ordering::Relaxed);
  }

  fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
  }

  fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
  }

  fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | 0x09 | 0x0b | 0x0c)
  }

  fn is_newline_byte(b: u8) -> bool {
    matches!(b, b'\r' | b'\n')
  }

  fn make_token(&self, kind: TokenKind, start: usize, at_start_of_line: bool, has_leading_space: bool, text: Handle, extra_flags: TokenFlags) -> Token {
    let mut flags = extra_flags;
    if at_start_of_line {
      flags.insert(TokenFlags::AT_START_OF_LINE);
    }
    if has_leading_space {
      flags.insert(TokenFlags::HAS_LEADING_SPACE);
    }
    if kind.is_keyword() {
      flags.insert(TokenFlags::IS_KEYWORD);
    }
    let length = (self.pos - start) as u32;
    let token = Token {
      kind,
      location: self.loc_at(start),
      length,
      flags,
      text,
    };
    self.stats.record_token(kind, length as usize);
    token
  }

  fn report(&self, id: DiagnosticId, loc: SourceLoc, args: &[&str]) {
    let mut diagnostic = Diagnostic::new(id, loc);
    for arg in args {
      diagnostic = diagnostic.with_arg(*arg);
    }
    self.diagnostics.report(diagnostic);
  }

  /// The main scan step: skip/emit trivia, then dispatch the next real
  /// token. Never panics on malformed input — lexical errors are
  /// reported and scanning continues.
  fn scan(&mut self) -> Token {
    let started = std::time::Instant::now();
    let mut has_leading_space = false;

    loop {
      let Some(b) = self.current() else {
        let token = self.make_token(TokenKind::EndOfFile, self.pos, self.pos == self.line_start, has_leading_space, Handle::NULL, TokenFlags::NONE);
        self.stats.record_lexing_time(started.elapsed());
        return token;
      };

      if Self::is_whitespace(b) {
        if self.options.retain_whitespace {
          let token = self.scan_whitespace_run();
          self.stats.record_lexing_time(started.elapsed());
          return token;
        }
        self.advance();
        has_leading_space = true;
        continue;
      }

      if Self::is_newline_byte(b) {
        if self.options.retain_whitespace {
          let token = self.scan_newline();
          self.stats.record_lexing_time(started.elapsed());
          return token;
        }
        self.consume_newline();
        has_leading_space = false;
        continue;
      }

      if b == b'/' && self.peek_byte(1) == Some(b'/') {
        if self.options.retain_comments {
          let token = self.scan_line_comment(has_leading_space);
          self.stats.record_lexing_time(started.elapsed());
          return token;
        }
        self.skip_line_comment();
        has_leading_space = true;
        continue;
      }

      if b == b'/' && self.peek_byte(1) == Some(b'*') {
        if self.options.retain_comments {
          let token = self.scan_block_comment(has_leading_space);
          self.stats.record_lexing_time(started.elapsed());
          return token;
        }
        self.skip_block_comment();
        has_leading_space = true;
        continue;
      }

      break;
    }

    let at_start_of_line = self.pos == self.line_start;
    let start = self.pos;
    let b = self.current().expect("loop above only exits when a byte is present");

    let token = if Self::is_alpha(b) {
      self.scan_identifier(start, at_start_of_line, has_leading_space)
    } else if Self::is_digit(b) {
      self.scan_number(start, at_start_of_line, has_leading_space)
    } else if b == b'"' {
      self.scan_string(start, at_start_of_line, has_leading_space)
    } else if b == b'\'' {
      self.scan_char(start, at_start_of_line, has_leading_space)
    } else {
      self.scan_operator(start, at_start_of_line, has_leading_space)
    };
    self.stats.record_lexing_time(started.elapsed());
    token
  }

  fn scan_whitespace_run(&mut self) -> Token {
    let at_start_of_line = self.pos == self.line_start;
    let start = self.pos;
    while self.current().is_some_and(Self::is_whitespace) {
      self.advance();
    }
    self.make_token(TokenKind::Whitespace, start, at_start_of_line, false, Handle::NULL, TokenFlags::NONE)
  }

  fn scan_newline(&mut self) -> Token {
    let at_start_of_line = self.pos == self.line_start;
    let start = self.pos;
    self.consume_newline();
    self.make_token(TokenKind::Newline, start, at_start_of_line, false, Handle::NULL, TokenFlags::NONE)
  }

  fn scan_line_comment(&mut self, has_leading_space: bool) -> Token {
    let at_start_of_line = self.pos == self.line_start;
    let start = self.pos;
    self.advance();
    self.advance();
    while self.current().is_some_and(|b| !Self::is_newline_byte(b)) {
      self.advance();
    }
    self.make_token(TokenKind::LineComment, start, at_start_of_line, has_leading_space, Handle::NULL, TokenFlags::NONE)
  }

  fn skip_line_comment(&mut self) {
    self.advance();
    self.advance();
    while self.current().is_some_and(|b| !Self::is_newline_byte(b)) {
      self.advance();
    }
  }

  /// Block comments are not nestable: scanning terminates on the first
  /// `*/`. A comment that reaches EOF without one is reported as
  /// `UnterminatedBlockComment` rather than silently emitting a token
  /// with no diagnostic, but still yields a (possibly retained) comment
  /// token spanning to EOF.
  fn scan_block_comment(&mut self, has_leading_space: bool) -> Token {
    let at_start_of_line = self.pos == self.line_start;
    let start = self.pos;
    self.consume_block_comment_body(start);
    self.make_token(TokenKind::BlockComment, start, at_start_of_line, has_leading_space, Handle::NULL, TokenFlags::NONE)
  }

  fn skip_block_comment(&mut self) {
    let start = self.pos;
    self.consume_block_comment_body(start);
  }

  fn consume_block_comment_body(&mut self, start: usize) {
    self.advance();
    self.advance();
    loop {
      match self.current() {
        None => {
          self.report(DiagnosticId::UnterminatedBlockComment, self.loc_at(start), &[]);
          return;
        },
        Some(b'*') if self.peek_byte(1) == Some(b'/') => {
          self.advance();
          self.advance();
          return;
        },
        Some(b) if Self::is_newline_byte(b) => self.consume_newline(),
        Some(_) => self.advance(),
      }
    }
  }

  fn scan_identifier(&mut self, start: usize, at_start_of_line: bool, has_leading_space: bool) -> Token {
    while self.current().is_some_and(|b| Self::is_alpha(b) || Self::is_digit(b)) {
      self.advance();
    }
    let spelling = &self.bytes()[start..self.pos];
    let handle = self.interner.intern(spelling);
    let kind = std::str::from_utf8(spelling)
      .ok()
      .and_then(keywords::lookup)
      .unwrap_or(TokenKind::Identifier);
    let text = if kind == TokenKind::Identifier { handle } else { Handle::NULL };
    self.make_token(kind, start, at_start_of_line, has_leading_space, text, TokenFlags::NONE)
  }

  /// `number ::= int_suffix | float_suffix`. Hex/binary/octal prefixes
  /// are decided right after a leading `0`; a
  /// `.` is only consumed as the start of a float when immediately
  /// followed by a digit, so `1.foo()` still lexes as `Integer Dot
  /// Identifier LParen RParen`.
  fn scan_number(&mut self, start: usize, at_start_of_line: bool, has_leading_space: bool) -> Token {
    let mut kind = TokenKind::Integer;
    let first = self.current().expect("scan_number requires a digit at the cursor");
    self.advance();

    if first == b'0' {
      match self.current() {
        Some(b'x') | Some(b'X') => {
          self.advance();
          while self.current().is_some_and(|b| b.is_ascii_hexdigit()) {
            self.advance();
          }
        },
        Some(b'b') | Some(b'B') => {
          self.advance();
          while matches!(self.current(), Some(b'0') | Some(b'1')) {
            self.advance();
          }
        },
        _ => {
          while matches!(self.current(), Some(b'0'..=b'7')) {
            self.advance();
          }
        },
      }
    } else {
      while self.current().is_some_and(Self::is_digit) {
        self.advance();
      }
    }

    if self.current() == Some(b'.') && self.peek_byte(1).is_some_and(Self::is_digit) {
      kind = TokenKind::Float;
      self.advance();
      while self.current().is_some_and(Self::is_digit) {
        self.advance();
      }
      if matches!(self.current(), Some(b'e') | Some(b'E')) {
        let mut lookahead = self.pos + 1;
        if matches!(self.byte_at(lookahead), Some(b'+') | Some(b'-')) {
          lookahead += 1;
        }
        if self.byte_at(lookahead).is_some_and(Self::is_digit) {
          self.pos = lookahead;
          while self.current().is_some_and(Self::is_digit) {
            self.advance();
          }
        }
      }
    }

    // Suffix: `alpha*`, not validated at lex time, retained verbatim.
    while self.current().is_some_and(|b| b.is_ascii_alphabetic()) {
      self.advance();
    }

    let spelling = &self.bytes()[start..self.pos];
    let text = self.interner.intern(spelling);
    self.make_token(kind, start, at_start_of_line, has_leading_space, text, TokenFlags::NONE)
  }

  /// String literals. A raw `CR`/`LF` before the closing quote
  /// terminates the scan early and reports `UnterminatedStringLiteral`
  /// at the opening quote; EOF does likewise.
  fn scan_string(&mut self, start: usize, at_start_of_line: bool, has_leading_space: bool) -> Token {
    let open_loc = self.loc_at(start);
    self.advance(); // opening quote
    let mut needs_cleaning = false;

    loop {
      match self.current() {
        None => {
          self.report(DiagnosticId::UnterminatedStringLiteral, open_loc, &[]);
          break;
        },
        Some(b'"') => {
          self.advance();
          break;
        },
        Some(b) if Self::is_newline_byte(b) => {
          self.report(DiagnosticId::UnterminatedStringLiteral, open_loc, &[]);
          break;
        },
        Some(b'\\') => {
          needs_cleaning = true;
          self.advance();
          if self.current().is_some() {
            self.advance();
          }
        },
        Some(_) => self.advance(),
      }
    }

    let spelling = &self.bytes()[start..self.pos];
    let text = self.interner.intern(spelling);
    let flags = if needs_cleaning { TokenFlags::NEEDS_CLEANING } else { TokenFlags::NONE };
    self.make_token(TokenKind::String, start, at_start_of_line, has_leading_space, text, flags)
  }

  /// Character literals: same escapes as strings, exactly one logical
  /// character expected. A missing closing quote reports
  /// `UnterminatedCharacterLiteral`.
  fn scan_char(&mut self, start: usize, at_start_of_line: bool, has_leading_space: bool) -> Token {
    let open_loc = self.loc_at(start);
    self.advance(); // opening quote
    let mut needs_cleaning = false;

    match self.current() {
      Some(b'\\') => {
        needs_cleaning = true;
        self.advance();
        if self.current().is_some() {
          self.advance();
        }
      },
      Some(b) if !Self::is_newline_byte(b) && b != b'\'' => {
        self.advance();
      },
      _ => {},
    }

    match self.current() {
      Some(b'\'') => {
        self.advance();
      },
      _ => {
        self.report(DiagnosticId::UnterminatedCharacterLiteral, open_loc, &[]);
      },
    }

    let spelling = &self.bytes()[start..self.pos];
    let text = self.interner.intern(spelling);
    let flags = if needs_cleaning { TokenFlags::NEEDS_CLEANING } else { TokenFlags::NONE };
    self.make_token(TokenKind::Char, start, at_start_of_line, has_leading_space, text, flags)
  }

  /// Operators/punctuation: longest match first. Any byte outside the
  /// closed two-byte/single-byte sets yields an `Unknown` token of
  /// length 1 plus an `UnexpectedValue` diagnostic.
  fn scan_operator(&mut self, start: usize, at_start_of_line: bool, has_leading_space: bool) -> Token {
    let b0 = self.current().expect("scan_operator requires a byte at the cursor");
    let b1 = self.peek_byte(1);

    if let Some(kind) = two_byte_operator(b0, b1) {
      self.advance();
      self.advance();
      return self.make_token(kind, start, at_start_of_line, has_leading_space, Handle::NULL, TokenFlags::NONE);
    }

    if let Some(kind) = single_byte_operator(b0) {
      self.advance();
      return self.make_token(kind, start, at_start_of_line, has_leading_space, Handle::NULL, TokenFlags::NONE);
    }

    let loc = self.loc_at(start);
    self.advance();
    if b0.is_ascii_graphic() {
      let ch = (b0 as char).to_string();
      self.report(DiagnosticId::UnexpectedValue, loc, &["a recognized token", &format!("'{ch}'")]);
    } else {
      self.report(DiagnosticId::UnexpectedValue, loc, &["a recognized token", &format!("byte 0x{b0:02X}")]);
    }
    self.make_token(TokenKind::Unknown, start, at_start_of_line, has_leading_space, Handle::NULL, TokenFlags::NONE)
  }
}

fn two_byte_operator(b0: u8, b1: Option<u8>) -> Option<TokenKind> {
  let b1 = b1?;
  use TokenKind::*;
  Some(match (b0, b1) {
    (b'+', b'=') => PlusEqual,
    (b'+', b'+') => PlusPlus,
    (b'-', b'=') => MinusEqual,
    (b'-', b'-') => MinusMinus,
    (b'-', b'>') => Arrow,
    (b'*', b'=') => StarEqual,
    (b'/', b'=') => SlashEqual,
    (b'%', b'=') => PercentEqual,
    (b'=', b'=') => EqualEqual,
    (b'!', b'=') => BangEqual,
    (b'<', b'=') => LessEqual,
    (b'<', b'<') => ShiftLeft,
    (b'>', b'=') => GreaterEqual,
    (b'>', b'>') => ShiftRight,
    (b'&', b'&') => AmpAmp,
    (b'|', b'|') => PipePipe,
    (b':', b':') => ColonColon,
    _ => return None,
  })
}

fn single_byte_operator(b: u8) -> Option<TokenKind> {
  use TokenKind::*;
  Some(match b {
    b'+' => Plus,
    b'-' => Minus,
    b'*' => Star,
    b'/' => Slash,
    b'%' => Percent,
    b'=' => Equal,
    b'!' => Bang,
    b'<' => Less,
    b'>' => Greater,
    b'&' => Amp,
    b'|' => Pipe,
    b'^' => Caret,
    b'~' => Tilde,
    b'(' => LParen,
    b')' => RParen,
    b'{' => LBrace,
    b'}' => RBrace,
    b'[' => LBracket,
    b']' => RBracket,
    b';' => Semicolon,
    b',' => Comma,
    b'.' => Dot,
    b':' => Colon,
    b'?' => Question,
    b'@' => At,
    b'#' => Hash,
    b'\\' => Backslash,
    _ => return None,
  })
}
