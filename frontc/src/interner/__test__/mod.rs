#[cfg(test)]
mod __test__ {
  use crate::arena::Arena;
  use crate::interner::{Handle, Interner};
  use std::sync::Arc;
  use std::thread;

  #[test]
  fn test_intern_identity() {
    let interner = Interner::new();
    let a = interner.intern(b"hello");
    let b = interner.intern(b"hello");
    assert_eq!(a, b);
  }

  #[test]
  fn test_intern_distinct_content_distinct_handles() {
    let interner = Interner::new();
    let a = interner.intern(b"hello");
    let b = interner.intern(b"world");
    assert_ne!(a, b);
  }

  #[test]
  fn test_empty_input_returns_null_handle() {
    let interner = Interner::new();
    let handle = interner.intern(b"");
    assert!(handle.is_null());
    assert_eq!(handle, Handle::NULL);
  }

  #[test]
  fn test_lookup_before_intern_is_none() {
    let interner = Interner::new();
    assert!(interner.lookup(b"nope").is_none());
    assert!(!interner.contains(b"nope"));
    let handle = interner.intern(b"nope");
    assert_eq!(interner.lookup(b"nope"), Some(handle));
    assert!(interner.contains(b"nope"));
  }

  #[test]
  fn test_handle_as_bytes_roundtrips() {
    let interner = Interner::new();
    let handle = interner.intern(b"roundtrip");
    assert_eq!(handle.as_bytes(), b"roundtrip");
    assert_eq!(handle.as_str(), "roundtrip");
  }

  #[test]
  fn test_size_counts_unique_strings() {
    let interner = Interner::new();
    interner.intern(b"a");
    interner.intern(b"b");
    interner.intern(b"a");
    assert_eq!(interner.size(), 2);
  }

  #[test]
  fn test_clear_invalidates_dedup_table() {
    let interner = Interner::new();
    let first = interner.intern(b"x");
    interner.clear();
    assert_eq!(interner.size(), 0);
    let second = interner.intern(b"x");
    // Different backing allocation after clear; handles need not match,
    // but a second clear-and-reintern cycle must still be internally
    // consistent (deduplicates with itself).
    assert_eq!(second, interner.intern(b"x"));
    let _ = first;
  }

  #[test]
  fn test_with_arena_backing() {
    let arena = Arena::new();
    let interner = Interner::with_arena(&arena);
    let a = interner.intern(b"arena-backed");
    let b = interner.intern(b"arena-backed");
    assert_eq!(a, b);
    assert_eq!(a.as_bytes(), b"arena-backed");
  }

  #[test]
  fn test_concurrent_intern_of_same_bytes_yields_one_handle() {
    let interner = Arc::new(Interner::new());
    let mut handles = Vec::new();
    for _ in 0..8 {
      let interner = Arc::clone(&interner);
      handles.push(thread::spawn(move || interner.intern(b"shared")));
    }
    let results: Vec<Handle> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let first = results[0];
    assert!(results.iter().all(|h| *h == first));
    assert_eq!(interner.size(), 1);
  }

  #[test]
  fn test_stats_reflect_activity() {
    let interner = Interner::new();
    interner.intern(b"one");
    interner.intern(b"two");
    interner.intern(b"one");
    interner.lookup(b"one");
    let stats = interner.stats();
    assert_eq!(stats.unique_strings, 2);
    assert_eq!(stats.intern_count, 3);
    assert_eq!(stats.lookup_count, 1);
  }
}
