use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Extension of exchange files
pub const EXCHANGE_EXTENSION: &str = "txt";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            let matches = path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted));
            if path.is_file() && matches {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Files to import from `path`: the file itself, or every exchange file
    /// below it when it is a directory
    pub fn import_sources<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
        let path = path.as_ref();
        if Self::file_exists(path) {
            Ok(vec![path.to_path_buf()])
        } else if Self::dir_exists(path) {
            Self::find_files(path, EXCHANGE_EXTENSION)
        } else {
            Err(anyhow::anyhow!("Input path does not exist: {:?}", path))
        }
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writeToFile_shouldCreateParentDirectories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("words.txt");

        FileManager::write_to_file(&path, "content").unwrap();

        assert!(FileManager::file_exists(&path));
        assert_eq!(FileManager::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_importSources_withDirectory_shouldFindExchangeFiles() {
        let dir = tempfile::tempdir().unwrap();
        FileManager::write_to_file(dir.path().join("b.txt"), "").unwrap();
        FileManager::write_to_file(dir.path().join("nested").join("a.TXT"), "").unwrap();
        FileManager::write_to_file(dir.path().join("notes.md"), "").unwrap();

        let sources = FileManager::import_sources(dir.path()).unwrap();

        assert_eq!(sources.len(), 2);
        assert!(sources.iter().all(|p| p.extension().unwrap().eq_ignore_ascii_case("txt")));
        assert!(FileManager::import_sources(dir.path().join("missing")).is_err());
    }
}
