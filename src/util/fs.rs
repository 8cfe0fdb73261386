//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// List the regular files directly inside `dir` whose extension is `ext`.
///
/// The comparison is exact and does not include the dot (`"dll"`, `"so"`).
pub fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// File size in bytes.
pub fn file_size(path: &Path) -> Result<u64> {
    let meta = fs::metadata(path)
        .with_context(|| format!("failed to stat file: {}", path.display()))?;
    Ok(meta.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_files_with_extension() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.dll"), "a").unwrap();
        fs::write(tmp.path().join("b.dll"), "b").unwrap();
        fs::write(tmp.path().join("c.lib"), "c").unwrap();
        fs::write(tmp.path().join("dll"), "no extension").unwrap();
        fs::create_dir(tmp.path().join("nested.dll")).unwrap();

        let files = files_with_extension(tmp.path(), "dll").unwrap();
        assert_eq!(
            files,
            vec![tmp.path().join("a.dll"), tmp.path().join("b.dll")]
        );
    }

    #[test]
    fn test_ensure_dir_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("deep/er");

        ensure_dir(&dir).unwrap();
        fs::write(dir.join("file.txt"), "content").unwrap();
        assert_eq!(file_size(&dir.join("file.txt")).unwrap(), 7);
    }

    #[test]
    fn test_remove_dir_all_if_exists() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("gone");
        fs::create_dir_all(dir.join("inner")).unwrap();

        remove_dir_all_if_exists(&dir).unwrap();
        assert!(!dir.exists());
        // Second call is a no-op
        remove_dir_all_if_exists(&dir).unwrap();
    }
}
