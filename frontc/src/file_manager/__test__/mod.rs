#[cfg(test)]
mod __test__ {
  use crate::file_manager::{FileError, FileManager};
  use std::io::Write;
  use std::sync::Arc;
  use std::thread;

  fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
  }

  #[test]
  fn test_get_file_reads_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "a.txt", b"hello, world");
    let manager = FileManager::new();
    let entry = manager.get_file(&path).unwrap();
    assert_eq!(entry.bytes(), b"hello, world");
    assert_eq!(entry.size, 12);
  }

  #[test]
  fn test_buffer_is_nul_terminated() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "b.txt", b"abc");
    let manager = FileManager::new();
    let entry = manager.get_file(&path).unwrap();
    assert_eq!(entry.bytes_with_nul(), b"abc\0");
  }

  #[test]
  fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let manager = FileManager::new();
    let err = manager.get_file(dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, FileError::NotFound(_)));
  }

  #[test]
  fn test_second_get_is_a_cache_hit() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "c.txt", b"cached");
    let manager = FileManager::new();
    let first = manager.get_file(&path).unwrap();
    let second = manager.get_file(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    let stats = manager.stats();
    assert_eq!(stats.opens, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
  }

  #[test]
  fn test_same_file_two_relative_spellings_share_cache_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "d.txt", b"same");
    let manager = FileManager::new();
    let via_direct = manager.get_file(&path).unwrap();
    let via_dotted = manager.get_file(dir.path().join(".").join("d.txt")).unwrap();
    assert!(Arc::ptr_eq(&via_direct, &via_dotted));
  }

  #[test]
  fn test_remove_from_cache_forces_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "e.txt", b"v1");
    let manager = FileManager::new();
    manager.get_file(&path).unwrap();
    manager.remove_from_cache(&path);
    manager.get_file(&path).unwrap();
    let stats = manager.stats();
    assert_eq!(stats.opens, 2);
  }

  #[test]
  fn test_clear_cache_empties_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "f.txt", b"v1");
    let manager = FileManager::new();
    manager.get_file(&path).unwrap();
    manager.clear_cache();
    assert_eq!(manager.stats().cache_entries, 0);
  }

  #[test]
  fn test_file_exists_and_size_and_mod_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "g.txt", b"0123456789");
    let manager = FileManager::new();
    assert!(manager.file_exists(&path));
    assert_eq!(manager.file_size(&path), Some(10));
    assert!(manager.file_mod_time(&path).is_some());
    assert!(!manager.file_exists(dir.path().join("nope.txt")));
  }

  #[test]
  fn test_eviction_drops_oldest_entry_past_budget() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_temp(&dir, "a.txt", &[0u8; 10]);
    let b = write_temp(&dir, "b.txt", &[0u8; 10]);
    let manager = FileManager::with_max_cache_size(Some(15));
    manager.get_file(&a).unwrap();
    manager.get_file(&b).unwrap();
    // Budget only fits one 10-byte file; the first one should be evicted.
    assert_eq!(manager.stats().cache_entries, 1);
  }

  #[test]
  fn test_concurrent_get_file_converges_on_one_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "h.txt", b"race");
    let manager = Arc::new(FileManager::new());
    let handles: Vec<_> = (0..8)
      .map(|_| {
        let manager = Arc::clone(&manager);
        let path = path.clone();
        thread::spawn(move || manager.get_file(&path).unwrap())
      })
      .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let first = &results[0];
    assert!(results.iter().all(|entry| Arc::ptr_eq(entry, first)));
  }
}
