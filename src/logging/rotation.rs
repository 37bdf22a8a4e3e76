//! Rotation policy for file sinks
//!
//! The rename chain itself is handled by `file-rotate`; this module decides
//! when to rotate and knows how the rotated set is laid out on disk.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};

/// Size the primary file must stay below
pub const MAX_BYTES: usize = 1024 * 1000;

/// Number of rotated predecessors kept next to the primary file
pub const BACKUP_COUNT: usize = 5;

/// Line-oriented writer over a size-bounded rotating file set
///
/// Before each line is written, the set is rotated if the line would bring
/// the primary file to `MAX_BYTES` or more. Rotated files are named
/// `<path>.1` (newest) through `<path>.5` (oldest).
pub struct RotatingWriter {
    inner: FileRotate<AppendCount>,
    written: usize,
}

impl RotatingWriter {
    /// Open the rotating set for `path`, continuing an existing primary file
    pub fn open(path: &Path) -> Self {
        let written = fs::metadata(path)
            .map(|metadata| metadata.len() as usize)
            .unwrap_or(0);
        let inner = FileRotate::new(
            path,
            AppendCount::new(BACKUP_COUNT),
            ContentLimit::None,
            Compression::None,
            #[cfg(unix)]
            None,
        );
        Self { inner, written }
    }

    /// Bytes currently in the primary file
    pub fn written(&self) -> usize {
        self.written
    }

    /// Write one complete line, rotating first if it would not fit
    ///
    /// An empty primary is never rotated, so a single oversized line ends up
    /// alone in its own file.
    pub fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + line.len() >= MAX_BYTES {
            self.inner.rotate()?;
            self.written = 0;
        }
        self.inner.write_all(line)?;
        self.written += line.len();
        self.inner.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Path of the `index`-th rotated predecessor of `path`
pub fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

/// Rotated predecessors of `path` currently on disk, newest first
pub fn existing_backups(path: &Path) -> Vec<PathBuf> {
    (1..=BACKUP_COUNT)
        .map(|index| backup_path(path, index))
        .filter(|backup| backup.is_file())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn line_of(len: usize) -> Vec<u8> {
        let mut line = vec![b'x'; len - 1];
        line.push(b'\n');
        line
    }

    #[test]
    fn test_backup_path_appends_index() {
        let path = Path::new("/var/log/app/app.log");
        assert_eq!(backup_path(path, 1), PathBuf::from("/var/log/app/app.log.1"));
        assert_eq!(backup_path(path, 5), PathBuf::from("/var/log/app/app.log.5"));
    }

    #[test]
    fn test_existing_backups_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        assert!(existing_backups(&path).is_empty());
    }

    #[test]
    fn test_existing_backups_ignores_out_of_range_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");

        for name in ["app.log.1", "app.log.3", "app.log.6", "other.log.2"] {
            File::create(temp_dir.path().join(name))
                .unwrap()
                .write_all(b"test")
                .unwrap();
        }

        let backups = existing_backups(&path);
        assert_eq!(
            backups,
            vec![backup_path(&path, 1), backup_path(&path, 3)]
        );
    }

    #[test]
    fn test_policy_constants() {
        assert_eq!(MAX_BYTES, 1_024_000);
        assert_eq!(BACKUP_COUNT, 5);
    }

    #[test]
    fn test_rotates_before_reaching_max_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let mut writer = RotatingWriter::open(&path);
        let line = line_of(1024);

        // 999 lines leave the primary one line short of the limit
        for _ in 0..999 {
            writer.write_line(&line).unwrap();
        }
        assert!(!backup_path(&path, 1).exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 999 * 1024);

        // the 1000th line would make it exactly MAX_BYTES
        writer.write_line(&line).unwrap();
        assert_eq!(fs::metadata(backup_path(&path, 1)).unwrap().len(), 999 * 1024);
        assert_eq!(fs::metadata(&path).unwrap().len(), 1024);
        assert_eq!(writer.written(), 1024);
    }

    #[test]
    fn test_continues_existing_primary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        fs::write(&path, vec![b'x'; MAX_BYTES - 100]).unwrap();

        let mut writer = RotatingWriter::open(&path);
        assert_eq!(writer.written(), MAX_BYTES - 100);

        writer.write_line(&line_of(100)).unwrap();
        assert_eq!(
            fs::metadata(backup_path(&path, 1)).unwrap().len() as usize,
            MAX_BYTES - 100
        );
        assert_eq!(fs::metadata(&path).unwrap().len(), 100);
    }

    #[test]
    fn test_oversized_line_is_not_split() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let mut writer = RotatingWriter::open(&path);

        writer.write_line(&line_of(MAX_BYTES + 10)).unwrap();
        assert!(!backup_path(&path, 1).exists());
        assert_eq!(fs::metadata(&path).unwrap().len() as usize, MAX_BYTES + 10);

        writer.write_line(&line_of(10)).unwrap();
        assert!(backup_path(&path, 1).exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 10);
    }
}
