//! # Arena allocator
//!
//! A bump allocator for the many-small-object workloads that show up in a
//! compiler front end: interned string bytes, small scratch buffers, and
//! anything else with a lifetime tied to "this compilation" rather than
//! to any individual owner.
//!
//! ## Design
//!
//! The arena holds a chain of fixed-size chunks. Allocation bumps a
//! cursor inside the current (last) chunk; when a request doesn't fit,
//! a new chunk is opened and linked on, sized to fit the request. No
//! chunk is ever freed individually — the whole arena goes away at once
//! on [`Arena::reset`] or when the arena itself is dropped.
//!
//! ## Thread safety
//!
//! Not thread-safe. An `Arena` is meant to be owned exclusively by one
//! phase of the front end (or lent to exactly one [`crate::interner`]);
//! share it across threads behind your own synchronization if you need
//! to.
//!
//! ## Example
//!
//! ```rust
//! use frontc::arena::Arena;
//!
//! let arena = Arena::new();
//! let ptr = arena.allocate_string(b"hello");
//! let s = unsafe { std::ffi::CStr::from_ptr(ptr.as_ptr() as *const i8) };
//! assert_eq!(s.to_str().unwrap(), "hello");
//! ```

mod __test__;

use std::cell::{Cell, RefCell};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default size for a freshly opened chunk: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;
/// No chunk is ever opened smaller than this, even for a tiny request.
pub const MIN_CHUNK_SIZE: usize = 1024;
/// A single `allocate` call may not request more than this many bytes.
/// Exceeding it is a programmer error, not a recoverable condition —
/// callers that legitimately need more should split the request or use
/// their own allocation, not this arena.
pub const MAX_REQUEST_SIZE: usize = 512 * 1024;

/// Tunable knobs for an [`Arena`]. Defaults match the values above.
#[derive(Debug, Clone, Copy)]
pub struct ArenaOptions {
  pub default_chunk_size: usize,
  pub min_chunk_size: usize,
  pub max_request_size: usize,
}

impl Default for ArenaOptions {
  fn default() -> Self {
    Self {
      default_chunk_size: DEFAULT_CHUNK_SIZE,
      min_chunk_size: MIN_CHUNK_SIZE,
      max_request_size: MAX_REQUEST_SIZE,
    }
  }
}

/// Running counters for an [`Arena`]. Every field is an atomic so that
/// reading stats never requires holding the same lock as allocation,
/// even though the arena itself is single-threaded — this keeps the
/// counters correct if a caller chooses to share one behind a `Mutex`.
#[derive(Debug, Default)]
pub struct ArenaStats {
  /// Sum of the raw sizes passed to `allocate`, ignoring alignment padding.
  pub total_requested: AtomicUsize,
  /// Sum of bytes actually consumed, including alignment padding.
  pub total_allocated: AtomicUsize,
  /// Number of `allocate`/`allocate_string` calls.
  pub allocation_count: AtomicUsize,
  /// Number of chunks currently owned by the arena.
  pub chunk_count: AtomicUsize,
  /// Bytes currently in use across all chunks (reset by `clear`/`reset`).
  pub current_usage: AtomicUsize,
  /// High-water mark of `current_usage`.
  pub peak_usage: AtomicUsize,
  /// Bytes lost to alignment padding.
  pub wasted_bytes: AtomicUsize,
}

impl ArenaStats {
  fn record_allocation(&self, requested: usize, consumed: usize, padding: usize) {
    self.total_requested.fetch_add(requested, Ordering::Relaxed);
    self.total_allocated.fetch_add(consumed, Ordering::Relaxed);
    self.allocation_count.fetch_add(1, Ordering::Relaxed);
    self.wasted_bytes.fetch_add(padding, Ordering::Relaxed);
    let current = self.current_usage.fetch_add(consumed, Ordering::Relaxed) + consumed;
    self.peak_usage.fetch_max(current, Ordering::Relaxed);
  }

  /// A point-in-time snapshot, handy for logging or assertions in tests.
  pub fn snapshot(&self) -> ArenaStatsSnapshot {
    ArenaStatsSnapshot {
      total_requested: self.total_requested.load(Ordering::Relaxed),
      total_allocated: self.total_allocated.load(Ordering::Relaxed),
      allocation_count: self.allocation_count.load(Ordering::Relaxed),
      chunk_count: self.chunk_count.load(Ordering::Relaxed),
      current_usage: self.current_usage.load(Ordering::Relaxed),
      peak_usage: self.peak_usage.load(Ordering::Relaxed),
      wasted_bytes: self.wasted_bytes.load(Ordering::Relaxed),
    }
  }
}

/// Plain-value snapshot of [`ArenaStats`], for callers who want a `Copy`
/// struct instead of chasing atomics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStatsSnapshot {
  pub total_requested: usize,
  pub total_allocated: usize,
  pub allocation_count: usize,
  pub chunk_count: usize,
  pub current_usage: usize,
  pub peak_usage: usize,
  pub wasted_bytes: usize,
}

/// A single owned block of bytes with a bump cursor.
struct Chunk {
  storage: Box<[u8]>,
  cursor: Cell<usize>,
}

impl Chunk {
  fn new(size: usize) -> Self {
    Self {
      storage: vec![0u8; size].into_boxed_slice(),
      cursor: Cell::new(0),
    }
  }

  fn capacity(&self) -> usize {
    self.storage.len()
  }

  fn used(&self) -> usize {
    self.cursor.get()
  }

  /// Try to carve `size` bytes aligned to `align` out of the remaining
  /// space. Returns the pointer and the alignment padding consumed, or
  /// `None` if it doesn't fit.
  fn try_allocate(&self, size: usize, align: usize) -> Option<(NonNull<u8>, usize)> {
    let base = self.storage.as_ptr() as usize;
    let cursor = self.cursor.get();
    let unaligned_start = base + cursor;
    let aligned_start = align_up(unaligned_start, align);
    let padding = aligned_start - unaligned_start;
    let new_cursor = cursor.checked_add(padding)?.checked_add(size)?;
    if new_cursor > self.storage.len() {
      return None;
    }
    self.cursor.set(new_cursor);
    // SAFETY: `aligned_start` sits inside `storage`'s allocation because
    // `new_cursor <= storage.len()` and `aligned_start - base == cursor + padding`.
    let ptr = unsafe { self.storage.as_ptr().add(cursor + padding) as *mut u8 };
    // `storage` always has nonzero length when this is reachable (size > 0
    // is guaranteed by `Arena::allocate`'s caller-facing contract), so the
    // pointer into it is never null.
    Some((unsafe { NonNull::new_unchecked(ptr) }, padding))
  }
}

#[inline]
fn align_up(addr: usize, align: usize) -> usize {
  debug_assert!(align.is_power_of_two());
  (addr + align - 1) & !(align - 1)
}

/// Bump allocator. See the module docs for the overall design.
pub struct Arena {
  chunks: RefCell<Vec<Chunk>>,
  options: ArenaOptions,
  stats: ArenaStats,
}

impl Arena {
  pub fn new() -> Self {
    Self::with_options(ArenaOptions::default())
  }

  pub fn with_options(options: ArenaOptions) -> Self {
    let arena = Self {
      chunks: RefCell::new(Vec::new()),
      options,
      stats: ArenaStats::default(),
    };
    arena.open_chunk(options.default_chunk_size);
    arena
  }

  fn open_chunk(&self, size_hint: usize) {
    let size = size_hint.max(self.options.min_chunk_size);
    self.chunks.borrow_mut().push(Chunk::new(size));
    self.stats.chunk_count.store(self.chunks.borrow().len(), Ordering::Relaxed);
  }

  /// Allocate `size` bytes aligned to `align` (must be a power of two).
  /// Panics if `size` exceeds the arena's per-request cap — that cap is a
  /// caller contract, not a recoverable error.
  pub fn allocate(&self, size: usize, align: usize) -> NonNull<u8> {
    assert!(align.is_power_of_two(), "alignment must be a power of two");
    assert!(
      size <= self.options.max_request_size,
      "arena request of {size} bytes exceeds the per-request cap of {} bytes",
      self.options.max_request_size
    );

    if let Some((ptr, padding)) = self.try_allocate_in_current(size, align) {
      self.stats.record_allocation(size, size + padding, padding);
      return ptr;
    }

    let new_size = (size + align - 1).max(self.options.default_chunk_size);
    self.open_chunk(new_size);

    let (ptr, padding) = self
      .try_allocate_in_current(size, align)
      .expect("freshly opened chunk must fit the request that demanded it");
    self.stats.record_allocation(size, size + padding, padding);
    ptr
  }

  fn try_allocate_in_current(&self, size: usize, align: usize) -> Option<(NonNull<u8>, usize)> {
    let chunks = self.chunks.borrow();
    chunks.last()?.try_allocate(size, align)
  }

  /// Copy `bytes` into the arena followed by a trailing NUL byte, and
  /// return a pointer to the start of the copy. The returned pointer is
  /// valid for `bytes.len() + 1` bytes and is safe to treat as a C
  /// string via [`std::ffi::CStr::from_ptr`].
  pub fn allocate_string(&self, bytes: &[u8]) -> NonNull<u8> {
    let ptr = self.allocate(bytes.len() + 1, 1);
    // SAFETY: `allocate` guarantees `bytes.len() + 1` writable bytes
    // starting at `ptr`, and we immediately fill every one of them.
    unsafe {
      std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), bytes.len());
      *ptr.as_ptr().add(bytes.len()) = 0;
    }
    ptr
  }

  /// Drop every chunk and open one fresh chunk. All outstanding pointers
  /// into the old chunks are dangling after this call — callers must
  /// ensure nothing they still care about points into this arena.
  /// Unlike [`Arena::clear`], this also resets the cumulative statistics:
  /// a reset starts the arena's whole history over, not just its memory.
  pub fn reset(&self) {
    self.chunks.borrow_mut().clear();
    self.open_chunk(self.options.default_chunk_size);
    self.stats.total_requested.store(0, Ordering::Relaxed);
    self.stats.total_allocated.store(0, Ordering::Relaxed);
    self.stats.allocation_count.store(0, Ordering::Relaxed);
    self.stats.current_usage.store(0, Ordering::Relaxed);
    self.stats.peak_usage.store(0, Ordering::Relaxed);
    self.stats.wasted_bytes.store(0, Ordering::Relaxed);
    self.stats.chunk_count.store(self.chunks.borrow().len(), Ordering::Relaxed);
  }

  /// Rewind every chunk's cursor to zero without freeing any of them.
  /// Cumulative stats (`total_requested`, `total_allocated`,
  /// `allocation_count`, `wasted_bytes`) are preserved; `current_usage`
  /// drops to zero. Like `reset`, every previously returned pointer is
  /// dangling afterwards.
  pub fn clear(&self) {
    let chunks = self.chunks.borrow();
    for chunk in chunks.iter() {
      chunk.cursor.set(0);
    }
    self.stats.current_usage.store(0, Ordering::Relaxed);
  }

  pub fn stats(&self) -> ArenaStatsSnapshot {
    self.stats.snapshot()
  }

  /// Number of chunks currently owned by the arena.
  pub fn chunk_count(&self) -> usize {
    self.chunks.borrow().len()
  }

  /// Total bytes reserved across every chunk (capacity, not usage).
  pub fn reserved_bytes(&self) -> usize {
    self.chunks.borrow().iter().map(Chunk::capacity).sum()
  }

  /// Total bytes currently used across every chunk.
  pub fn used_bytes(&self) -> usize {
    self.chunks.borrow().iter().map(Chunk::used).sum()
  }
}

impl Default for Arena {
  fn default() -> Self {
    Self::new()
  }
}

// SAFETY: `Arena` is explicitly not thread-safe (see module docs); it is
// neither `Sync` nor meant to be shared across threads without external
// synchronization. No unsafe impls are provided here.
