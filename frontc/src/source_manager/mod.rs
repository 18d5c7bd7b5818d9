//! # Source manager
//!
//! Owns the global 32-bit location space. Every loaded file is assigned
//! a contiguous slice `[start, start + size]` of that space (inclusive
//! at the end, so the location just past the last byte is still
//! addressable — useful for "insert here" diagnostics). A [`SourceLoc`]
//! is nothing but an offset into this space; resolving it back to a
//! file, line, and column is this module's whole job.
//!
//! ## Line index
//!
//! Computed lazily, once per file, the first time anything needs a line
//! or column for a location in that file. Computing it requires mutual
//! exclusion (two threads racing to compute the same file's index must
//! not both scan it), but once computed it's read-only and free to
//! share.
//!
//! ## Thread-local cache
//!
//! Sequential scans (lexing, diagnostic rendering) tend to ask about
//! locations that are close to the last one they asked about. A
//! thread-local "last lookup" cache shortcuts the common case; misses
//! fall back to the authoritative binary search.

mod __test__;

use crate::file_manager::{FileEntry, FileManager};
use std::cell::RefCell;
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// 1-based index into the source manager's file table. `0` is the
/// sentinel "invalid" value; ordering matches insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
  pub const INVALID: FileId = FileId(0);

  pub fn is_valid(&self) -> bool {
    self.0 != 0
  }

  fn index(&self) -> Option<usize> {
    if self.0 == 0 {
      None
    } else {
      Some((self.0 - 1) as usize)
    }
  }
}

/// A byte position in the global source space. `0` is "invalid"; any
/// other value lies inside exactly one file's reserved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLoc(u32);

impl SourceLoc {
  pub const INVALID: SourceLoc = SourceLoc(0);

  pub fn is_valid(&self) -> bool {
    self.0 != 0
  }

  pub fn raw(&self) -> u32 {
    self.0
  }

  /// Build a location from a raw global offset. Restricted to the
  /// crate: only [`SourceManager`] (which owns the global counter) and
  /// [`crate::lexer`] (which derives locations from a file's start
  /// location plus a byte offset) have any business minting these.
  pub(crate) fn from_raw(value: u32) -> SourceLoc {
    SourceLoc(value)
  }
}

/// A fully resolved location: everything [`SourceManager`] knows about
/// one [`SourceLoc`], gathered in one place for diagnostic rendering.
#[derive(Debug, Clone)]
pub struct FullSourceLoc {
  pub loc: SourceLoc,
  pub file: FileId,
  pub filename: String,
  pub offset: u32,
  pub line: u32,
  pub column: u32,
}

struct FileInfo {
  entry: Arc<FileEntry>,
  start: u32,
  /// Ascending byte offsets at which each line begins, including 0.
  /// `None` until first queried.
  line_offsets: Mutex<Option<Vec<u32>>>,
}

impl FileInfo {
  fn size(&self) -> u32 {
    self.entry.size as u32
  }

  fn end(&self) -> u32 {
    self.start + self.size()
  }

  fn line_offsets(&self) -> Vec<u32> {
    let mut guard = self.line_offsets.lock().unwrap();
    if let Some(offsets) = guard.as_ref() {
      return offsets.clone();
    }
    let mut offsets = vec![0u32];
    for (i, &byte) in self.entry.bytes().iter().enumerate() {
      if byte == b'\n' {
        offsets.push((i + 1) as u32);
      }
    }
    *guard = Some(offsets.clone());
    offsets
  }
}

#[derive(Clone, Copy)]
struct CacheEntry {
  loc_low: u32,
  loc_high: u32,
  file: FileId,
  line: u32,
  line_start: u32,
}

thread_local! {
  static LAST_LOOKUP: RefCell<Option<CacheEntry>> = const { RefCell::new(None) };
}

/// Owns the global location space and file table. See module docs.
pub struct SourceManager {
  file_manager: Arc<FileManager>,
  files: Mutex<Vec<FileInfo>>,
  next_loc: AtomicU32,
}

impl SourceManager {
  pub fn new(file_manager: Arc<FileManager>) -> Self {
    Self {
      file_manager,
      files: Mutex::new(Vec::new()),
      // 0 is reserved as the invalid sentinel; the first real file
      // starts at offset 1.
      next_loc: AtomicU32::new(1),
    }
  }

  /// Load `path` via the file manager and reserve it a slice of the
  /// global location space. A second call with the same canonical path
  /// returns the existing [`FileId`] instead of reserving again.
  pub fn create_file(
    &self,
    path: impl AsRef<std::path::Path>,
  ) -> Result<FileId, crate::file_manager::FileError> {
    let entry = self.file_manager.get_file(path)?;

    let mut files = self.files.lock().unwrap();
    if let Some((index, _)) = files
      .iter()
      .enumerate()
      .find(|(_, info)| info.entry.canonical_path == entry.canonical_path)
    {
      return Ok(FileId((index + 1) as u32));
    }

    // Reserve [start, start + size] inclusive of the end-of-file slot.
    let size = entry.size as u32;
    let start = self.next_loc.fetch_add(size + 1, Ordering::SeqCst);
    files.push(FileInfo {
      entry,
      start,
      line_offsets: Mutex::new(None),
    });
    tracing::debug!(file_id = files.len(), start, size, "source manager registered file");
    Ok(FileId(files.len() as u32))
  }

  fn with_file<T>(&self, fid: FileId, f: impl FnOnce(&FileInfo) -> T) -> Option<T> {
    let index = fid.index()?;
    let files = self.files.lock().unwrap();
    files.get(index).map(f)
  }

  pub fn start_loc(&self, fid: FileId) -> SourceLoc {
    self.with_file(fid, |info| SourceLoc(info.start)).unwrap_or(SourceLoc::INVALID)
  }

  pub fn end_loc(&self, fid: FileId) -> SourceLoc {
    self.with_file(fid, |info| SourceLoc(info.end())).unwrap_or(SourceLoc::INVALID)
  }

  pub fn loc_for_file_offset(&self, fid: FileId, offset: u32) -> SourceLoc {
    self
      .with_file(fid, |info| {
        if offset > info.size() {
          SourceLoc::INVALID
        } else {
          SourceLoc(info.start + offset)
        }
      })
      .unwrap_or(SourceLoc::INVALID)
  }

  /// Binary search the file table (ordered by start offset, which is
  /// also insertion order) for the file owning `loc`.
  pub fn file_id(&self, loc: SourceLoc) -> FileId {
    if !loc.is_valid() {
      return FileId::INVALID;
    }
    if let Some(cached) = self.check_cache(loc) {
      return cached.file;
    }
    let files = self.files.lock().unwrap();
    let found = files.binary_search_by(|info| {
      if loc.0 < info.start {
        CmpOrdering::Greater
      } else if loc.0 > info.end() {
        CmpOrdering::Less
      } else {
        CmpOrdering::Equal
      }
    });
    match found {
      Ok(index) => FileId((index + 1) as u32),
      Err(_) => FileId::INVALID,
    }
  }

  pub fn file_offset(&self, loc: SourceLoc) -> u32 {
    let fid = self.file_id(loc);
    self.with_file(fid, |info| loc.0 - info.start).unwrap_or(0)
  }

  fn check_cache(&self, loc: SourceLoc) -> Option<CacheEntry> {
    LAST_LOOKUP.with(|cell| {
      cell.borrow().and_then(|entry| {
        if loc.0 >= entry.loc_low && loc.0 <= entry.loc_high {
          Some(entry)
        } else {
          None
        }
      })
    })
  }

  fn store_cache(&self, entry: CacheEntry) {
    LAST_LOOKUP.with(|cell| *cell.borrow_mut() = Some(entry));
  }

  /// Largest line-start offset `<= target`, via binary search over the
  /// file's lazily computed line index.
  fn line_and_column_within(&self, info: &FileInfo, target_offset: u32) -> (u32, u32) {
    let offsets = info.line_offsets();
    let line_index = match offsets.binary_search(&target_offset) {
      Ok(exact) => exact,
      Err(insertion) => insertion - 1,
    };
    let line_start = offsets[line_index];
    let line = (line_index + 1) as u32;
    let column = target_offset - line_start + 1;
    (line, column)
  }

  pub fn line_number(&self, loc: SourceLoc) -> u32 {
    self.line_and_column(loc).0
  }

  pub fn column_number(&self, loc: SourceLoc) -> u32 {
    self.line_and_column(loc).1
  }

  pub fn line_and_column(&self, loc: SourceLoc) -> (u32, u32) {
    if !loc.is_valid() {
      return (0, 0);
    }
    let fid = self.file_id(loc);
    let Some(index) = fid.index() else { return (0, 0) };
    let offset = loc.0 - self.with_file(fid, |info| info.start).unwrap_or(0);

    let files = self.files.lock().unwrap();
    let Some(info) = files.get(index) else { return (0, 0) };
    let (line, column) = self.line_and_column_within(info, offset);

    let offsets = info.line_offsets();
    let line_start = offsets[(line - 1) as usize];
    self.store_cache(CacheEntry {
      loc_low: info.start + line_start,
      loc_high: offsets
        .get(line as usize)
        .map(|&next| info.start + next - 1)
        .unwrap_or(info.end()),
      file: fid,
      line,
      line_start: info.start + line_start,
    });
    (line, column)
  }

  pub fn filename(&self, loc: SourceLoc) -> Option<String> {
    let fid = self.file_id(loc);
    self.with_file(fid, |info| info.entry.path.display().to_string())
  }

  /// The full text of `loc`'s line, excluding the trailing newline.
  /// Used by diagnostic rendering to print the offending source line.
  pub fn line_text(&self, loc: SourceLoc) -> Option<String> {
    if !loc.is_valid() {
      return None;
    }
    let fid = self.file_id(loc);
    let index = fid.index()?;
    let offset = loc.0 - self.with_file(fid, |info| info.start)?;

    let files = self.files.lock().unwrap();
    let info = files.get(index)?;
    let offsets = info.line_offsets();
    let line_index = match offsets.binary_search(&offset) {
      Ok(exact) => exact,
      Err(insertion) => insertion - 1,
    };
    let start = offsets[line_index] as usize;
    let end = offsets
      .get(line_index + 1)
      .map(|&next| next as usize - 1)
      .unwrap_or(info.entry.size);
    let bytes = info.entry.bytes();
    let end = end.min(bytes.len());
    let line = String::from_utf8_lossy(&bytes[start.min(end)..end]).into_owned();
    Some(line.trim_end_matches('\r').to_string())
  }

  /// The byte at `loc`, or `None` if `loc` is invalid or sits exactly at
  /// end-of-file.
  pub fn character_pointer(&self, loc: SourceLoc) -> Option<u8> {
    let fid = self.file_id(loc);
    let offset = self.file_offset(loc);
    self.with_file(fid, |info| info.entry.bytes().get(offset as usize).copied())?
  }

  /// Source text in `[begin, end)`. Empty if the locations span
  /// different files or are otherwise out of order/invalid.
  pub fn source_text(&self, begin: SourceLoc, end: SourceLoc) -> String {
    if !begin.is_valid() || !end.is_valid() || end.0 < begin.0 {
      return String::new();
    }
    let fid = self.file_id(begin);
    if fid != self.file_id(end) {
      return String::new();
    }
    let start_off = self.file_offset(begin) as usize;
    let end_off = self.file_offset(end) as usize;
    self
      .with_file(fid, |info| {
        let bytes = info.entry.bytes();
        let end_off = end_off.min(bytes.len());
        if start_off > end_off {
          String::new()
        } else {
          String::from_utf8_lossy(&bytes[start_off..end_off]).into_owned()
        }
      })
      .unwrap_or_default()
  }

  pub fn source_length(&self, begin: SourceLoc, end: SourceLoc) -> u32 {
    if !begin.is_valid() || !end.is_valid() || end.0 < begin.0 {
      return 0;
    }
    end.0 - begin.0
  }

  pub fn is_before(&self, a: SourceLoc, b: SourceLoc) -> bool {
    a.0 < b.0
  }

  pub fn advance(&self, loc: SourceLoc, n: u32) -> SourceLoc {
    if !loc.is_valid() {
      return SourceLoc::INVALID;
    }
    let fid = self.file_id(loc);
    self
      .with_file(fid, |info| {
        let candidate = loc.0 + n;
        if candidate <= info.end() {
          SourceLoc(candidate)
        } else {
          SourceLoc::INVALID
        }
      })
      .unwrap_or(SourceLoc::INVALID)
  }

  pub fn full_loc(&self, loc: SourceLoc) -> FullSourceLoc {
    let fid = self.file_id(loc);
    let (line, column) = self.line_and_column(loc);
    FullSourceLoc {
      loc,
      file: fid,
      filename: self.filename(loc).unwrap_or_default(),
      offset: self.file_offset(loc),
      line,
      column,
    }
  }

  /// Drop the thread-local last-lookup cache for the calling thread.
  /// Per-file line indices are left intact — this only invalidates the
  /// fast-path hint, not computed state.
  pub fn clear_caches(&self) {
    LAST_LOOKUP.with(|cell| *cell.borrow_mut() = None);
  }

  pub fn file_count(&self) -> usize {
    self.files.lock().unwrap().len()
  }

  /// The shared, loaded content backing `fid`, for callers (the lexer)
  /// that need to scan raw bytes rather than query positions one at a
  /// time.
  pub fn file_entry(&self, fid: FileId) -> Option<Arc<FileEntry>> {
    self.with_file(fid, |info| Arc::clone(&info.entry))
  }
}
