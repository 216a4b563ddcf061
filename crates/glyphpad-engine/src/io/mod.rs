use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("No file path chosen for save")]
    NoPath,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a plain-text file and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write content to a plain-text file
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_file_success() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stela.txt");
        std::fs::write(&path, "ḥtp dj nswt").unwrap();

        let content = read_file(&path).unwrap();
        assert_eq!(content, "ḥtp dj nswt");
    }

    #[test]
    fn test_read_file_not_found() {
        let dir = TempDir::new().unwrap();
        let result = read_file(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_file_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tomb").join("walls").join("north.txt");

        write_file(&path, "ỉmꜣḫw").unwrap();
        assert_eq!(read_file(&path).unwrap(), "ỉmꜣḫw");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.txt");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();
        assert_eq!(read_file(&path).unwrap(), "second");
    }
}
