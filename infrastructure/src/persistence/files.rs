//! File primitives shared by the store.

use crate::lock::ScopedFileLock;
use sha2::{Digest, Sha256};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Append `text` to `path` under the file's lock. The lock covers this
/// single write only.
pub fn append_text(path: &Path, text: &str) -> io::Result<()> {
    let _guard = ScopedFileLock::acquire(path)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()
}

/// Last `limit` bytes of `path`, decoded lossily.
///
/// A UTF-8 sequence cut by the window is dropped rather than rendered as a
/// replacement character. A missing file reads as empty.
pub fn tail_bytes(path: &Path, limit: usize) -> io::Result<String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(String::new()),
        Err(e) => return Err(e),
    };

    let len = file.metadata()?.len();
    let start = len.saturating_sub(limit as u64);
    file.seek(SeekFrom::Start(start))?;
    let mut buf = Vec::with_capacity(limit.min(len as usize));
    file.read_to_end(&mut buf)?;

    let skip = if start > 0 {
        buf.iter().take_while(|b| (**b & 0xC0) == 0x80).count()
    } else {
        0
    };
    Ok(String::from_utf8_lossy(&buf[skip..]).into_owned())
}

/// Hex SHA-256 of the file content; a missing file hashes as empty input.
pub fn hash_of(path: &Path) -> io::Result<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e),
    };
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Replace `path` with `text` through a temp file in the same directory and
/// a rename, so readers never see a partial file.
pub fn write_atomic(path: &Path, text: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(text.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_append_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        append_text(&path, "one\n").unwrap();
        append_text(&path, "two\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_tail_of_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(tail_bytes(&dir.path().join("nope"), 10).unwrap(), "");
    }

    #[test]
    fn test_tail_returns_last_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        fs::write(&path, "0123456789").unwrap();
        assert_eq!(tail_bytes(&path, 4).unwrap(), "6789");
        assert_eq!(tail_bytes(&path, 100).unwrap(), "0123456789");
        assert_eq!(tail_bytes(&path, 0).unwrap(), "");
    }

    #[test]
    fn test_tail_drops_split_character() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        // "é" is two bytes; a 3-byte window starts inside it
        fs::write(&path, "aéxy").unwrap();
        assert_eq!(tail_bytes(&path, 3).unwrap(), "xy");
        assert_eq!(tail_bytes(&path, 4).unwrap(), "éxy");
    }

    #[test]
    fn test_hash_tracks_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");

        let missing = hash_of(&path).unwrap();
        assert_eq!(
            missing,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        fs::write(&path, "hello").unwrap();
        let first = hash_of(&path).unwrap();
        assert_eq!(first, hash_of(&path).unwrap());
        append_text(&path, "!").unwrap();
        assert_ne!(first, hash_of(&path).unwrap());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub/state.json");
        write_atomic(&path, "{\"round\": 1}").unwrap();
        write_atomic(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = Arc::new(dir.path().join("t.txt"));

        let writers: Vec<_> = (0..20)
            .map(|i| {
                let path = Arc::clone(&path);
                thread::spawn(move || {
                    let line = format!("{}{}\n", i, "x".repeat(4096));
                    append_text(&path, &line).unwrap();
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let content = fs::read_to_string(&*path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 20);
        for line in lines {
            assert!(line.ends_with(&"x".repeat(4096)));
        }
    }
}
