//! A companion structure for code downstream of the lexer (a parser,
//! a diagnostic renderer) that wants random access into an already-
//! scanned token stream instead of re-lexing.

use crate::lexer::token::{Token, TokenKind};
use crate::source_manager::SourceLoc;

/// Returned by [`TokenTable::find_at_location`] when nothing matches.
pub const NOT_FOUND: usize = usize::MAX;

/// An append-only, indexable collection of [`Token`]s.
#[derive(Debug, Default)]
pub struct TokenTable {
  tokens: Vec<Token>,
}

impl TokenTable {
  pub fn new() -> Self {
    Self { tokens: Vec::new() }
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      tokens: Vec::with_capacity(capacity),
    }
  }

  pub fn push(&mut self, token: Token) {
    self.tokens.push(token);
  }

  pub fn len(&self) -> usize {
    self.tokens.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tokens.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&Token> {
    self.tokens.get(index)
  }

  /// Index of the token starting exactly at `loc`, or [`NOT_FOUND`].
  /// Tokens are appended in scan order, i.e. already sorted by
  /// location, so this is a binary search.
  pub fn find_at_location(&self, loc: SourceLoc) -> usize {
    self
      .tokens
      .binary_search_by_key(&loc.raw(), |t| t.location.raw())
      .unwrap_or(NOT_FOUND)
  }

  /// Indices of every token whose span intersects `[begin, end)`.
  pub fn find_in_range(&self, begin: SourceLoc, end: SourceLoc) -> Vec<usize> {
    let start_index = self
      .tokens
      .partition_point(|t| t.location.raw() + t.length < begin.raw());
    self.tokens[start_index..]
      .iter()
      .enumerate()
      .take_while(|(_, t)| t.location.raw() < end.raw())
      .map(|(offset, _)| start_index + offset)
      .collect()
  }

  pub fn find_by_kind(&self, kind: TokenKind) -> Vec<usize> {
    self
      .tokens
      .iter()
      .enumerate()
      .filter(|(_, t)| t.kind == kind)
      .map(|(i, _)| i)
      .collect()
  }

  /// A forward stream over the table with a one-token lookahead,
  /// mirroring the lexer's own `peek_token`/`next_token` pair for
  /// callers that consume an already-built table instead of a live
  /// lexer.
  pub fn iter(&self) -> TokenTableIter<'_> {
    TokenTableIter { table: self, index: 0 }
  }
}

pub struct TokenTableIter<'a> {
  table: &'a TokenTable,
  index: usize,
}

impl<'a> TokenTableIter<'a> {
  pub fn peek(&self) -> Option<&'a Token> {
    self.table.get(self.index)
  }
}

impl<'a> Iterator for TokenTableIter<'a> {
  type Item = &'a Token;

  fn next(&mut self) -> Option<Self::Item> {
    let token = self.table.get(self.index)?;
    self.index += 1;
    Some(token)
  }
}
