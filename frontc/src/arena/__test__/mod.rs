#[cfg(test)]
mod __test__ {
  use crate::arena::{Arena, ArenaOptions};
  use std::ffi::CStr;

  #[test]
  fn test_allocate_is_aligned() {
    let arena = Arena::new();
    for align in [1usize, 2, 4, 8, 16] {
      let ptr = arena.allocate(3, align);
      assert_eq!(ptr.as_ptr() as usize % align, 0);
    }
  }

  #[test]
  fn test_allocate_string_is_nul_terminated() {
    let arena = Arena::new();
    let ptr = arena.allocate_string(b"hello");
    let s = unsafe { CStr::from_ptr(ptr.as_ptr() as *const i8) };
    assert_eq!(s.to_str().unwrap(), "hello");
  }

  #[test]
  fn test_allocate_empty_string() {
    let arena = Arena::new();
    let ptr = arena.allocate_string(b"");
    let s = unsafe { CStr::from_ptr(ptr.as_ptr() as *const i8) };
    assert_eq!(s.to_bytes().len(), 0);
  }

  #[test]
  fn test_chunk_opens_on_overflow() {
    let options = ArenaOptions {
      default_chunk_size: 64,
      min_chunk_size: 64,
      max_request_size: 1024,
    };
    let arena = Arena::with_options(options);
    assert_eq!(arena.chunk_count(), 1);

    // Fill past the first chunk's capacity to force a new one.
    for _ in 0..10 {
      arena.allocate(16, 1);
    }
    assert!(arena.chunk_count() > 1);
  }

  #[test]
  fn test_stats_track_allocations() {
    let arena = Arena::new();
    arena.allocate(10, 1);
    arena.allocate(20, 1);
    let stats = arena.stats();
    assert_eq!(stats.allocation_count, 2);
    assert_eq!(stats.total_requested, 30);
    assert!(stats.total_allocated >= 30);
  }

  #[test]
  fn test_clear_rewinds_without_dropping_chunks() {
    let arena = Arena::new();
    arena.allocate(100, 1);
    let chunk_count_before = arena.chunk_count();
    assert!(arena.used_bytes() >= 100);

    arena.clear();
    assert_eq!(arena.used_bytes(), 0);
    assert_eq!(arena.chunk_count(), chunk_count_before);

    // Cumulative counters survive a clear.
    let stats = arena.stats();
    assert_eq!(stats.allocation_count, 1);
    assert_eq!(stats.current_usage, 0);
  }

  #[test]
  fn test_reset_drops_chunks_and_stats() {
    let options = ArenaOptions {
      default_chunk_size: 64,
      min_chunk_size: 64,
      max_request_size: 1024,
    };
    let arena = Arena::with_options(options);
    for _ in 0..10 {
      arena.allocate(16, 1);
    }
    assert!(arena.chunk_count() > 1);

    arena.reset();
    assert_eq!(arena.chunk_count(), 1);
    assert_eq!(arena.used_bytes(), 0);
    let stats = arena.stats();
    assert_eq!(stats.allocation_count, 0);
    assert_eq!(stats.total_requested, 0);
  }

  #[test]
  #[should_panic(expected = "exceeds the per-request cap")]
  fn test_allocate_over_cap_panics() {
    let options = ArenaOptions {
      default_chunk_size: 1024,
      min_chunk_size: 1024,
      max_request_size: 64,
    };
    let arena = Arena::with_options(options);
    arena.allocate(65, 1);
  }

  #[test]
  fn test_large_request_grows_chunk_to_fit() {
    let options = ArenaOptions {
      default_chunk_size: 64,
      min_chunk_size: 64,
      max_request_size: 4096,
    };
    let arena = Arena::with_options(options);
    let ptr = arena.allocate(2048, 1);
    assert!(!ptr.as_ptr().is_null());
    assert!(arena.reserved_bytes() >= 2048);
  }
}
