use runmode_fs::{NormalizedPath, io};
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("record.toml"));

    io::write_atomic(&path, b"version = 1").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "version = 1");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("record.toml");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("a").join("b").join("record"));

    io::write_atomic(&path, b"deep").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "deep");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("target.txt"));

    io::write_text(&path, "content").unwrap();
    io::write_text(&path, "content again").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(
        leftovers.is_empty(),
        "No temp files should remain, found: {:?}",
        leftovers.iter().map(|e| e.file_name()).collect::<Vec<_>>()
    );
}

#[test]
fn test_write_atomic_fails_when_parent_is_a_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let path = NormalizedPath::new(blocker.join("record"));
    let result = io::write_atomic(&path, b"data");

    assert!(matches!(result, Err(runmode_fs::Error::Io { .. })));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
}

#[test]
fn test_read_if_exists_missing_is_none() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing"));

    assert_eq!(io::read_if_exists(&path).unwrap(), None);
}

#[test]
fn test_read_if_exists_directory_is_error() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path());

    assert!(io::read_if_exists(&path).is_err());
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    assert!(io::read_text(&path).is_err());
}

#[test]
fn test_write_atomic_concurrent_writers_never_truncate() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("shared.txt"));
    let barrier = Arc::new(Barrier::new(3));

    let handles: Vec<_> = ["first writer", "second writer", "third writer"]
        .into_iter()
        .map(|content| {
            let path = path.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..200 {
                    io::write_text(&path, content).unwrap();
                    let seen = io::read_text(&path).unwrap();
                    assert!(seen.ends_with(" writer"), "torn read: {seen:?}");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
