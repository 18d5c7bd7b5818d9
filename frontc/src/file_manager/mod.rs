//! # File manager
//!
//! Loads files from disk exactly once per canonical path, caches the
//! result, and vends shared, immutable [`FileEntry`] handles to
//! everything downstream (principally [`crate::source_manager`]).
//!
//! ## Caching contract
//!
//! The canonical (platform-normalized) path is the cache key. A loader
//! that finds nothing cached reads the file *outside* any lock, then
//! re-checks the cache under an exclusive lock before publishing —
//! losing that race is not an error, it just means a concurrent loader
//! won and we hand back its entry instead of ours.

mod __test__;

use crate::interner::{Handle, Interner};
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

/// Errors surfaced by the file manager's two fallible operations.
/// Everything else (`file_exists`, `file_size`, ...) reports absence as
/// `None`/`false` rather than an error — a missing file is not
/// exceptional when you're just asking whether it's there.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
  #[error("no such file: {0}")]
  NotFound(PathBuf),
  #[error("I/O error reading {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// An immutable, shared, loaded file. Outlives any [`crate::source_manager::SourceManager`]
/// that references it — hold it behind an `Arc` and clone freely.
pub struct FileEntry {
  /// Canonical path, interned so equal paths compare as equal handles.
  pub canonical_path: Handle,
  /// The canonical path as a display-friendly `PathBuf`.
  pub path: PathBuf,
  /// File content plus a trailing NUL byte. Downstream code (the lexer)
  /// may assume `buffer[size]` is always `0`.
  buffer: Box<[u8]>,
  /// Size in bytes, not counting the trailing NUL.
  pub size: usize,
  pub mtime: SystemTime,
}

impl FileEntry {
  /// File content, not including the trailing NUL.
  pub fn bytes(&self) -> &[u8] {
    &self.buffer[..self.size]
  }

  /// File content including the trailing NUL byte, for code that wants
  /// to treat the buffer as a C string.
  pub fn bytes_with_nul(&self) -> &[u8] {
    &self.buffer[..]
  }
}

impl std::fmt::Debug for FileEntry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FileEntry")
      .field("path", &self.path)
      .field("size", &self.size)
      .finish()
  }
}

/// Running counters for a [`FileManager`].
#[derive(Debug, Default)]
pub struct FileManagerStats {
  pub opens: AtomicU64,
  pub bytes_read: AtomicU64,
  pub hits: AtomicU64,
  pub misses: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileManagerStatsSnapshot {
  pub opens: u64,
  pub cache_entries: u64,
  pub bytes_read: u64,
  pub hits: u64,
  pub misses: u64,
}

struct Cache {
  entries: HashMap<Handle, Arc<FileEntry>>,
  /// Insertion order, oldest first, used for size-based eviction.
  order: VecDeque<Handle>,
  total_bytes: usize,
}

impl Cache {
  fn new() -> Self {
    Self {
      entries: HashMap::new(),
      order: VecDeque::new(),
      total_bytes: 0,
    }
  }

  fn insert(&mut self, key: Handle, entry: Arc<FileEntry>) {
    self.total_bytes += entry.size;
    self.order.push_back(key);
    self.entries.insert(key, entry);
  }

  fn remove(&mut self, key: &Handle) {
    if let Some(entry) = self.entries.remove(key) {
      self.total_bytes = self.total_bytes.saturating_sub(entry.size);
      self.order.retain(|h| h != key);
    }
  }

  fn evict_oldest_until(&mut self, max_bytes: usize) {
    while self.total_bytes > max_bytes {
      let Some(oldest) = self.order.pop_front() else { break };
      if let Some(entry) = self.entries.remove(&oldest) {
        self.total_bytes = self.total_bytes.saturating_sub(entry.size);
      }
    }
  }
}

/// Loads, normalizes, caches, and vends file contents. See module docs.
pub struct FileManager {
  interner: Interner<'static>,
  cache: RwLock<Cache>,
  stats: FileManagerStats,
  max_cache_size: Option<usize>,
}

impl FileManager {
  pub fn new() -> Self {
    Self::with_max_cache_size(None)
  }

  /// `max_cache_size`, if set, triggers eviction of the oldest cached
  /// entries (by insertion order) once the cache's total bytes exceed
  /// it. The entry that triggered the eviction is never evicted by its
  /// own insertion.
  pub fn with_max_cache_size(max_cache_size: Option<usize>) -> Self {
    Self {
      interner: Interner::new(),
      cache: RwLock::new(Cache::new()),
      stats: FileManagerStats::default(),
      max_cache_size,
    }
  }

  fn canonical_key(&self, path: &Path) -> Result<(PathBuf, Handle), FileError> {
    let canonical = fs::canonicalize(path).map_err(|e| classify_io_error(path, e))?;
    let key = self.interner.intern(canonical.to_string_lossy().as_bytes());
    Ok((canonical, key))
  }

  /// Load (or fetch from cache) the file at `path`.
  pub fn get_file(&self, path: impl AsRef<Path>) -> Result<Arc<FileEntry>, FileError> {
    let path = path.as_ref();
    let (canonical, key) = self.canonical_key(path)?;

    if let Some(entry) = self.cache.read().unwrap().entries.get(&key) {
      self.stats.hits.fetch_add(1, Ordering::Relaxed);
      tracing::debug!(path = %canonical.display(), "file manager cache hit");
      return Ok(Arc::clone(entry));
    }

    self.stats.misses.fetch_add(1, Ordering::Relaxed);
    let loaded = Self::load_from_disk(&canonical, key)?;
    self.stats.opens.fetch_add(1, Ordering::Relaxed);
    self.stats.bytes_read.fetch_add(loaded.size as u64, Ordering::Relaxed);

    let mut cache = self.cache.write().unwrap();
    // Double-check: a concurrent loader may have published first.
    if let Some(existing) = cache.entries.get(&key) {
      return Ok(Arc::clone(existing));
    }

    let entry = Arc::new(loaded);
    cache.insert(key, Arc::clone(&entry));
    if let Some(max) = self.max_cache_size {
      cache.evict_oldest_until(max);
      if !cache.entries.contains_key(&key) {
        // Our own entry was the only thing in the cache and is larger
        // than the whole budget; keep it anyway, there is nothing to
        // evict in its favor.
        cache.insert(key, Arc::clone(&entry));
      }
    }
    tracing::debug!(path = %canonical.display(), "file manager cache miss; loaded from disk");
    Ok(entry)
  }

  fn load_from_disk(path: &Path, canonical_path: Handle) -> Result<FileEntry, FileError> {
    let metadata = fs::metadata(path).map_err(|e| classify_io_error(path, e))?;
    let size = metadata.len() as usize;
    let mtime = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

    let mut buffer = vec![0u8; size + 1];
    let mut file = fs::File::open(path).map_err(|e| classify_io_error(path, e))?;
    file
      .read_exact(&mut buffer[..size])
      .map_err(|e| classify_io_error(path, e))?;
    // buffer[size] is already 0 from the `vec![0u8; ...]` initializer.

    Ok(FileEntry {
      canonical_path,
      path: path.to_path_buf(),
      buffer: buffer.into_boxed_slice(),
      size,
      mtime,
    })
  }

  pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref()).is_ok()
  }

  pub fn file_size(&self, path: impl AsRef<Path>) -> Option<u64> {
    fs::metadata(path.as_ref()).ok().map(|m| m.len())
  }

  pub fn file_mod_time(&self, path: impl AsRef<Path>) -> Option<SystemTime> {
    fs::metadata(path.as_ref()).ok().and_then(|m| m.modified().ok())
  }

  pub fn remove_from_cache(&self, path: impl AsRef<Path>) {
    let Ok((_, key)) = self.canonical_key(path.as_ref()) else { return };
    self.cache.write().unwrap().remove(&key);
  }

  pub fn clear_cache(&self) {
    *self.cache.write().unwrap() = Cache::new();
  }

  pub fn stats(&self) -> FileManagerStatsSnapshot {
    FileManagerStatsSnapshot {
      opens: self.stats.opens.load(Ordering::Relaxed),
      cache_entries: self.cache.read().unwrap().entries.len() as u64,
      bytes_read: self.stats.bytes_read.load(Ordering::Relaxed),
      hits: self.stats.hits.load(Ordering::Relaxed),
      misses: self.stats.misses.load(Ordering::Relaxed),
    }
  }
}

impl Default for FileManager {
  fn default() -> Self {
    Self::new()
  }
}

fn classify_io_error(path: &Path, source: std::io::Error) -> FileError {
  if source.kind() == std::io::ErrorKind::NotFound {
    FileError::NotFound(path.to_path_buf())
  } else {
    FileError::Io {
      path: path.to_path_buf(),
      source,
    }
  }
}
