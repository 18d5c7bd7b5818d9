//! The canonical keyword table. Sorted lexicographically so lookup is a
//! binary search, matching the "exact case-sensitive binary search"
//! the lexer's identifier path is specified to perform.
//!
//! Only one spelling per concept is accepted (`fn`, `mod`) — not the
//! long-form synonyms (`function`, `module`). Mixing both into one
//! lexer instance is explicitly allowed, but not required, so this
//! implementation picks the short forms and is consistent about it.

use crate::lexer::token::TokenKind;

const KEYWORDS: &[(&str, TokenKind)] = &[
  ("auto", TokenKind::Auto),
  ("break", TokenKind::Break),
  ("case", TokenKind::Case),
  ("const", TokenKind::Const),
  ("continue", TokenKind::Continue),
  ("default", TokenKind::Default),
  ("do", TokenKind::Do),
  ("else", TokenKind::Else),
  ("enum", TokenKind::Enum),
  ("extern", TokenKind::Extern),
  ("false", TokenKind::False),
  ("fn", TokenKind::Fn),
  ("for", TokenKind::For),
  ("if", TokenKind::If),
  ("import", TokenKind::Import),
  ("let", TokenKind::Let),
  ("mod", TokenKind::Mod),
  ("mut", TokenKind::Mut),
  ("null", TokenKind::Null),
  ("return", TokenKind::Return),
  ("struct", TokenKind::Struct),
  ("switch", TokenKind::Switch),
  ("true", TokenKind::True),
  ("type", TokenKind::Type),
  ("var", TokenKind::Var),
  ("while", TokenKind::While),
];

/// Look up `spelling` in the keyword table. `None` means "treat as a
/// plain identifier".
pub fn lookup(spelling: &str) -> Option<TokenKind> {
  KEYWORDS.binary_search_by(|&(kw, _)| kw.cmp(spelling)).ok().map(|i| KEYWORDS[i].1)
}

#[cfg(test)]
mod __test__ {
  use super::*;

  #[test]
  fn test_table_is_sorted() {
    for pair in KEYWORDS.windows(2) {
      assert!(pair[0].0 < pair[1].0, "{} should sort before {}", pair[0].0, pair[1].0);
    }
  }

  #[test]
  fn test_lookup_hits_and_misses() {
    assert_eq!(lookup("fn"), Some(TokenKind::Fn));
    assert_eq!(lookup("mod"), Some(TokenKind::Mod));
    assert_eq!(lookup("function"), None);
    assert_eq!(lookup("module"), None);
    assert_eq!(lookup("nope"), None);
  }
}
