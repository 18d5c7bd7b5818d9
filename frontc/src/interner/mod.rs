//! # String interner
//!
//! Deduplicates byte sequences and hands back a small, `Copy` [`Handle`]
//! whose identity *is* pointer identity: two handles compare equal if
//! and only if they were produced from equal byte content by the same
//! interner. Downstream code (the lexer, the parser it feeds) can treat
//! handle comparison as free — no string comparison ever happens again
//! once something is interned.
//!
//! ## Storage
//!
//! An interner can either borrow an [`Arena`](crate::arena::Arena) for
//! its content storage, or own its storage itself (one separately boxed
//! `[u8]` per entry). Either way content is never moved once written,
//! which is what makes pointer-identity equality sound. Borrowing an
//! arena ties the interner to that arena's single-threaded usage model;
//! an owning interner is fully thread-safe (see below).
//!
//! ## Concurrency
//!
//! The owning form supports multiple concurrent readers (`lookup`,
//! `contains`) and a serialized writer (`intern`) via a reader-preferred
//! `RwLock`. The writer's slow path re-checks the table after acquiring
//! exclusive access, so two threads racing to intern the same bytes
//! never produce two distinct handles for equal content.

mod __test__;

use crate::arena::Arena;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// An opaque, deduplicated string handle.
///
/// Equality, ordering, and hashing are all pointer identity: the handle
/// carries a raw pointer into interner-owned storage that never moves
/// and is never freed while the interner lives. [`Handle::NULL`] is the
/// sentinel for "invalid" and is also exactly what [`Interner::intern`]
/// returns for empty input.
#[derive(Clone, Copy)]
pub struct Handle(*const u8);

// SAFETY: a `Handle` only ever points at NUL-terminated byte content that
// is written once and never mutated or freed for the life of the
// interner that produced it. Reading through the pointer from any thread
// is sound as long as that interner is still alive, which is the same
// contract the interner already documents for its handles.
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

impl Handle {
  /// The sentinel handle: "invalid", and also the canonical empty string.
  pub const NULL: Handle = Handle(std::ptr::null());

  pub fn is_null(&self) -> bool {
    self.0.is_null()
  }

  /// The interned bytes, not including the trailing NUL.
  pub fn as_bytes(&self) -> &[u8] {
    if self.0.is_null() {
      return &[];
    }
    // SAFETY: non-null handles always point at a NUL-terminated buffer
    // owned by the interner that produced them.
    unsafe {
      let cstr = std::ffi::CStr::from_ptr(self.0 as *const i8);
      cstr.to_bytes()
    }
  }

  /// The interned bytes interpreted as UTF-8. Token spellings are ASCII
  /// in practice, so this never fails for well-formed tokens, but invalid
  /// UTF-8 falls back to lossy conversion rather than panicking.
  pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(self.as_bytes())
  }
}

impl fmt::Debug for Handle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_null() {
      write!(f, "Handle(NULL)")
    } else {
      write!(f, "Handle({:?})", self.as_str())
    }
  }
}

impl PartialEq for Handle {
  fn eq(&self, other: &Self) -> bool {
    self.0 == other.0
  }
}
impl Eq for Handle {}

impl Hash for Handle {
  fn hash<H: Hasher>(&self, state: &mut H) {
    (self.0 as usize).hash(state);
  }
}

impl PartialOrd for Handle {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}
impl Ord for Handle {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    (self.0 as usize).cmp(&(other.0 as usize))
  }
}

/// Running counters for an [`Interner`].
#[derive(Debug, Default)]
pub struct InternerStats {
  pub intern_count: AtomicU64,
  pub lookup_count: AtomicU64,
  pub collision_count: AtomicU64,
  pub bytes_stored: AtomicU64,
  pub unique_strings: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InternerStatsSnapshot {
  pub intern_count: u64,
  pub lookup_count: u64,
  pub collision_count: u64,
  pub bytes_stored: u64,
  pub unique_strings: u64,
  pub average_length: f64,
}

impl InternerStats {
  fn snapshot(&self) -> InternerStatsSnapshot {
    let bytes_stored = self.bytes_stored.load(Ordering::Relaxed);
    let unique_strings = self.unique_strings.load(Ordering::Relaxed);
    let average_length = if unique_strings == 0 {
      0.0
    } else {
      bytes_stored as f64 / unique_strings as f64
    };
    InternerStatsSnapshot {
      intern_count: self.intern_count.load(Ordering::Relaxed),
      lookup_count: self.lookup_count.load(Ordering::Relaxed),
      collision_count: self.collision_count.load(Ordering::Relaxed),
      bytes_stored,
      unique_strings,
      average_length,
    }
  }
}

/// FNV-1a, matching the hash used throughout this front end for short,
/// ASCII-ish spellings (identifiers, keywords, literal text).
fn fnv1a(bytes: &[u8]) -> u64 {
  const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
  const PRIME: u64 = 0x100000001b3;
  let mut hash = OFFSET_BASIS;
  for &byte in bytes {
    hash ^= byte as u64;
    hash = hash.wrapping_mul(PRIME);
  }
  hash
}

enum Backing<'a> {
  Arena(&'a Arena),
  Owned(RwLock<Vec<Box<[u8]>>>),
}

/// A bucket of handles sharing one hash value; almost always length 1.
type Bucket = SmallVec<[Handle; 1]>;

/// String interner. See module docs for the storage/concurrency model.
pub struct Interner<'a> {
  backing: Backing<'a>,
  lookup: RwLock<HashMap<u64, Bucket>>,
  stats: InternerStats,
}

impl<'a> Interner<'a> {
  /// An interner that owns its storage and is fully thread-safe.
  pub fn new() -> Self {
    Self {
      backing: Backing::Owned(RwLock::new(Vec::new())),
      lookup: RwLock::new(HashMap::new()),
      stats: InternerStats::default(),
    }
  }

  /// An interner that writes interned content into `arena`. Ties this
  /// interner's lifetime to `'a` and, since the arena is not `Sync`,
  /// makes the resulting `Interner` unusable from more than one thread.
  pub fn with_arena(arena: &'a Arena) -> Self {
    Self {
      backing: Backing::Arena(arena),
      lookup: RwLock::new(HashMap::new()),
      stats: InternerStats::default(),
    }
  }

  /// Deduplicating insert. Returns the same handle for equal content on
  /// every call until the next [`Interner::clear`].
  pub fn intern(&self, bytes: &[u8]) -> Handle {
    self.stats.intern_count.fetch_add(1, Ordering::Relaxed);
    if bytes.is_empty() {
      return Handle::NULL;
    }

    let hash = fnv1a(bytes);

    // Fast path: a read lock is enough if the bytes are already interned.
    if let Some(handle) = self.find_in_table(&self.lookup.read().unwrap(), hash, bytes) {
      return handle;
    }

    self.intern_slow(hash, bytes)
  }

  #[cold]
  fn intern_slow(&self, hash: u64, bytes: &[u8]) -> Handle {
    let mut table = self.lookup.write().unwrap();

    // Double-check: another writer may have inserted these bytes while
    // we were waiting for the write lock.
    if let Some(handle) = self.find_in_table(&table, hash, bytes) {
      return handle;
    }

    let handle = self.store(bytes);
    let bucket = table.entry(hash).or_default();
    if !bucket.is_empty() {
      self.stats.collision_count.fetch_add(1, Ordering::Relaxed);
    }
    bucket.push(handle);

    self.stats.bytes_stored.fetch_add(bytes.len() as u64, Ordering::Relaxed);
    let unique = self.stats.unique_strings.fetch_add(1, Ordering::Relaxed) + 1;

    let load_factor = unique as f64 / table.capacity().max(1) as f64;
    if load_factor > 0.75 {
      let additional = table.capacity().max(1);
      table.reserve(additional);
      tracing::trace!(capacity = table.capacity(), "interner lookup table grown");
    }

    handle
  }

  fn store(&self, bytes: &[u8]) -> Handle {
    match &self.backing {
      Backing::Arena(arena) => Handle(arena.allocate_string(bytes).as_ptr()),
      Backing::Owned(storage) => {
        let mut boxed: Box<[u8]> = vec![0u8; bytes.len() + 1].into_boxed_slice();
        boxed[..bytes.len()].copy_from_slice(bytes);
        boxed[bytes.len()] = 0;
        let ptr = boxed.as_ptr();
        storage.write().unwrap().push(boxed);
        Handle(ptr)
      },
    }
  }

  fn find_in_table(&self, table: &HashMap<u64, Bucket>, hash: u64, bytes: &[u8]) -> Option<Handle> {
    let bucket = table.get(&hash)?;
    bucket.iter().find(|h| h.as_bytes() == bytes).copied()
  }

  /// Look up already-interned `bytes` without inserting. Returns
  /// [`Handle::NULL`] for empty input, `None` if never interned.
  pub fn lookup(&self, bytes: &[u8]) -> Option<Handle> {
    self.stats.lookup_count.fetch_add(1, Ordering::Relaxed);
    if bytes.is_empty() {
      return Some(Handle::NULL);
    }
    let hash = fnv1a(bytes);
    self.find_in_table(&self.lookup.read().unwrap(), hash, bytes)
  }

  pub fn contains(&self, bytes: &[u8]) -> bool {
    self.lookup(bytes).is_some()
  }

  /// Number of distinct strings interned so far.
  pub fn size(&self) -> usize {
    self.stats.unique_strings.load(Ordering::Relaxed) as usize
  }

  /// Forget every interned string. All previously returned handles
  /// become dangling. When backed by an arena, this clears only the
  /// dedup table — the bytes themselves remain allocated in the arena
  /// until the caller resets or clears the arena itself.
  pub fn clear(&self) {
    self.lookup.write().unwrap().clear();
    if let Backing::Owned(storage) = &self.backing {
      storage.write().unwrap().clear();
    }
    self.stats.unique_strings.store(0, Ordering::Relaxed);
    self.stats.bytes_stored.store(0, Ordering::Relaxed);
  }

  pub fn stats(&self) -> InternerStatsSnapshot {
    self.stats.snapshot()
  }
}

impl<'a> Default for Interner<'a> {
  fn default() -> Self {
    Self::new()
  }
}

impl<'a> fmt::Debug for Interner<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Interner").field("stats", &self.stats()).finish()
  }
}
