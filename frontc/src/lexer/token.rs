//! Token representation: kind enumeration, flag bitset, and the
//! fixed-size [`Token`] struct the lexer emits one of per step.

use crate::interner::Handle;
use crate::source_manager::SourceLoc;

/// Every kind of token this lexer can produce. Stable within a release
/// — both the lexer and anything reading its output key off these
/// variants directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  // Keywords (canonical spellings only; see `keywords` module).
  Auto,
  Break,
  Case,
  Const,
  Continue,
  Default,
  Do,
  Else,
  Enum,
  Extern,
  False,
  Fn,
  For,
  If,
  Import,
  Let,
  Mod,
  Mut,
  Null,
  Return,
  Struct,
  Switch,
  True,
  Type,
  Var,
  While,

  Identifier,
  Integer,
  Float,
  String,
  Char,

  LineComment,
  BlockComment,
  Whitespace,
  Newline,

  // Two-byte operators.
  PlusEqual,
  PlusPlus,
  MinusEqual,
  MinusMinus,
  Arrow,
  StarEqual,
  SlashEqual,
  PercentEqual,
  EqualEqual,
  BangEqual,
  LessEqual,
  ShiftLeft,
  GreaterEqual,
  ShiftRight,
  AmpAmp,
  PipePipe,
  ColonColon,

  // Single-byte operators/punctuation.
  Plus,
  Minus,
  Star,
  Slash,
  Percent,
  Equal,
  Bang,
  Less,
  Greater,
  Amp,
  Pipe,
  Caret,
  Tilde,
  LParen,
  RParen,
  LBrace,
  RBrace,
  LBracket,
  RBracket,
  Semicolon,
  Comma,
  Dot,
  Colon,
  Question,
  At,
  Hash,
  Backslash,

  Unknown,
  EndOfFile,
}

impl TokenKind {
  pub fn is_keyword(&self) -> bool {
    matches!(
      self,
      TokenKind::Auto
        | TokenKind::Break
        | TokenKind::Case
        | TokenKind::Const
        | TokenKind::Continue
        | TokenKind::Default
        | TokenKind::Do
        | TokenKind::Else
        | TokenKind::Enum
        | TokenKind::Extern
        | TokenKind::False
        | TokenKind::Fn
        | TokenKind::For
        | TokenKind::If
        | TokenKind::Import
        | TokenKind::Let
        | TokenKind::Mod
        | TokenKind::Mut
        | TokenKind::Null
        | TokenKind::Return
        | TokenKind::Struct
        | TokenKind::Switch
        | TokenKind::True
        | TokenKind::Type
        | TokenKind::Var
        | TokenKind::While
    )
  }

  pub fn is_trivia(&self) -> bool {
    matches!(
      self,
      TokenKind::LineComment | TokenKind::BlockComment | TokenKind::Whitespace | TokenKind::Newline
    )
  }
}

/// Bitset of per-token flags. Stored as a plain `u8`; there are only
/// four flags and they never grow past one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenFlags(u8);

impl TokenFlags {
  pub const NONE: TokenFlags = TokenFlags(0);
  pub const AT_START_OF_LINE: TokenFlags = TokenFlags(1 << 0);
  pub const HAS_LEADING_SPACE: TokenFlags = TokenFlags(1 << 1);
  pub const NEEDS_CLEANING: TokenFlags = TokenFlags(1 << 2);
  pub const IS_KEYWORD: TokenFlags = TokenFlags(1 << 3);

  pub fn contains(&self, other: TokenFlags) -> bool {
    self.0 & other.0 == other.0
  }

  pub fn insert(&mut self, other: TokenFlags) {
    self.0 |= other.0;
  }
}

impl std::ops::BitOr for TokenFlags {
  type Output = TokenFlags;
  fn bitor(self, rhs: TokenFlags) -> TokenFlags {
    TokenFlags(self.0 | rhs.0)
  }
}

/// One lexical token: a classified, located span of the input.
#[derive(Debug, Clone, Copy)]
pub struct Token {
  pub kind: TokenKind,
  pub location: SourceLoc,
  pub length: u32,
  pub flags: TokenFlags,
  /// Interned spelling for identifiers, keywords, and literals.
  /// [`Handle::NULL`] for everything else.
  pub text: Handle,
}

impl Token {
  pub fn at_start_of_line(&self) -> bool {
    self.flags.contains(TokenFlags::AT_START_OF_LINE)
  }

  pub fn needs_cleaning(&self) -> bool {
    self.flags.contains(TokenFlags::NEEDS_CLEANING)
  }

  pub fn is_keyword(&self) -> bool {
    self.flags.contains(TokenFlags::IS_KEYWORD)
  }

  /// Decode escapes in a `String`/`Char` token's spelling into a cleaned
  /// byte string, stripping the surrounding quotes. Returns `None` for
  /// any other token kind. This is the "separate pure function" spec
  /// §4.5 calls for: the raw, quoted spelling is what's interned and
  /// stored on the token; cleaning happens on demand, not at scan time.
  pub fn cleaned_text(&self) -> Option<Vec<u8>> {
    if !matches!(self.kind, TokenKind::String | TokenKind::Char) {
      return None;
    }
    let raw = self.text.as_bytes();
    let inner = raw.strip_prefix(b"\"").or_else(|| raw.strip_prefix(b"'"))?;
    let inner = inner.strip_suffix(b"\"").or_else(|| inner.strip_suffix(b"'")).unwrap_or(inner);
    Some(crate::lexer::escape::decode(inner))
  }
}
