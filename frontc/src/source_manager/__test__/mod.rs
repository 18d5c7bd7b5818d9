#[cfg(test)]
mod __test__ {
  use crate::file_manager::FileManager;
  use crate::source_manager::{FileId, SourceManager};
  use std::io::Write;
  use std::sync::Arc;

  fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
  }

  fn manager() -> (tempfile::TempDir, SourceManager) {
    let dir = tempfile::tempdir().unwrap();
    let sm = SourceManager::new(Arc::new(FileManager::new()));
    (dir, sm)
  }

  #[test]
  fn test_create_file_assigns_increasing_ids() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"one");
    let b = write_temp(&dir, "b.txt", b"two");
    let fid_a = sm.create_file(&a).unwrap();
    let fid_b = sm.create_file(&b).unwrap();
    assert!(fid_a.is_valid());
    assert!(fid_b.is_valid());
    assert_ne!(fid_a, fid_b);
  }

  #[test]
  fn test_create_file_twice_returns_same_id() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"one");
    let first = sm.create_file(&a).unwrap();
    let second = sm.create_file(&a).unwrap();
    assert_eq!(first, second);
    assert_eq!(sm.file_count(), 1);
  }

  #[test]
  fn test_start_and_end_loc_bracket_file() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"hello");
    let fid = sm.create_file(&a).unwrap();
    let start = sm.start_loc(fid);
    let end = sm.end_loc(fid);
    assert!(start.is_valid());
    assert_eq!(sm.source_length(start, end), 5);
  }

  #[test]
  fn test_file_id_resolves_location_back_to_file() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"hello");
    let b = write_temp(&dir, "b.txt", b"world!");
    let fid_a = sm.create_file(&a).unwrap();
    let fid_b = sm.create_file(&b).unwrap();

    let loc_a = sm.loc_for_file_offset(fid_a, 2);
    let loc_b = sm.loc_for_file_offset(fid_b, 2);
    assert_eq!(sm.file_id(loc_a), fid_a);
    assert_eq!(sm.file_id(loc_b), fid_b);
  }

  #[test]
  fn test_line_and_column_tracks_newlines() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"ab\ncd\nef");
    let fid = sm.create_file(&a).unwrap();

    let loc_first = sm.loc_for_file_offset(fid, 0);
    assert_eq!(sm.line_and_column(loc_first), (1, 1));

    let loc_second_line = sm.loc_for_file_offset(fid, 3); // 'c'
    assert_eq!(sm.line_and_column(loc_second_line), (2, 1));

    let loc_third_line = sm.loc_for_file_offset(fid, 7); // 'f'
    assert_eq!(sm.line_and_column(loc_third_line), (3, 2));
  }

  #[test]
  fn test_character_pointer_reads_byte_at_location() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"xyz");
    let fid = sm.create_file(&a).unwrap();
    let loc = sm.loc_for_file_offset(fid, 1);
    assert_eq!(sm.character_pointer(loc), Some(b'y'));
  }

  #[test]
  fn test_source_text_within_one_file() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"hello world");
    let fid = sm.create_file(&a).unwrap();
    let begin = sm.loc_for_file_offset(fid, 0);
    let end = sm.loc_for_file_offset(fid, 5);
    assert_eq!(sm.source_text(begin, end), "hello");
  }

  #[test]
  fn test_source_text_across_files_is_empty() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"hello");
    let b = write_temp(&dir, "b.txt", b"world");
    let fid_a = sm.create_file(&a).unwrap();
    let fid_b = sm.create_file(&b).unwrap();
    let begin = sm.start_loc(fid_a);
    let end = sm.start_loc(fid_b);
    assert_eq!(sm.source_text(begin, end), "");
  }

  #[test]
  fn test_is_before_reflects_issuance_order() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"hello");
    let fid = sm.create_file(&a).unwrap();
    let begin = sm.start_loc(fid);
    let later = sm.advance(begin, 2);
    assert!(later.is_valid());
    assert!(sm.is_before(begin, later));
  }

  #[test]
  fn test_advance_past_end_of_file_is_invalid() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"hi");
    let fid = sm.create_file(&a).unwrap();
    let start = sm.start_loc(fid);
    assert!(!sm.advance(start, 1000).is_valid());
  }

  #[test]
  fn test_full_loc_reports_filename_and_position() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"line one\nline two");
    let fid = sm.create_file(&a).unwrap();
    let loc = sm.loc_for_file_offset(fid, 9);
    let full = sm.full_loc(loc);
    assert_eq!(full.line, 2);
    assert_eq!(full.column, 1);
    assert!(full.filename.ends_with("a.txt"));
  }

  #[test]
  fn test_invalid_location_is_rejected() {
    let (_dir, sm) = manager();
    assert_eq!(sm.file_id(crate::source_manager::SourceLoc::INVALID), FileId::INVALID);
    assert_eq!(sm.line_and_column(crate::source_manager::SourceLoc::INVALID), (0, 0));
  }

  #[test]
  fn test_clear_caches_does_not_break_subsequent_lookups() {
    let (dir, sm) = manager();
    let a = write_temp(&dir, "a.txt", b"ab\ncd");
    let fid = sm.create_file(&a).unwrap();
    let loc = sm.loc_for_file_offset(fid, 3);
    assert_eq!(sm.line_and_column(loc), (2, 1));
    sm.clear_caches();
    assert_eq!(sm.line_and_column(loc), (2, 1));
  }
}
