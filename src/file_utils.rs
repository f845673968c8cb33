//! Directory traversal: discovering candidate source files to analyse.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use codescope_core::error::{CoreError, Result};

/// Recursively collects every file under `dir` whose extension matches
/// `extension` (e.g. `"rs"`) into `out_files`, in `walkdir`'s traversal
/// order.
pub fn collect_files_with_extension(
    dir: &Path,
    extension: &str,
    out_files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry_result in WalkDir::new(dir) {
        let entry = entry_result.map_err(|e| CoreError::invalid_input(e.to_string()))?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == extension) {
            out_files.push(entry.into_path());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn empty_directory_yields_no_files() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut files = Vec::new();
        collect_files_with_extension(temp_dir.path(), "rs", &mut files).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn only_matching_extension_is_collected() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        File::create(temp_dir.path().join("a.rs")).unwrap();
        File::create(temp_dir.path().join("b.txt")).unwrap();

        let mut files = Vec::new();
        collect_files_with_extension(temp_dir.path(), "rs", &mut files).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "a.rs");
    }

    #[test]
    fn nested_directories_are_walked_recursively() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        File::create(nested.join("deep.rs")).unwrap();
        File::create(temp_dir.path().join("top.rs")).unwrap();

        let mut files = Vec::new();
        collect_files_with_extension(temp_dir.path(), "rs", &mut files).unwrap();
        assert_eq!(files.len(), 2);
    }
}
