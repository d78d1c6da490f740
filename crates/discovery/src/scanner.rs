use crate::error::{DiscoveryError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scanner for finding Go compilation units below a directory
pub struct SourceScanner {
    root: PathBuf,
}

impl SourceScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Recursively list `*.go` files in a stable order, skipping `_test.go`
    ///
    /// A missing root is not an error: the area simply has no sources.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            log::debug!("Skipping missing source area {}", self.root.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|source| DiscoveryError::Walk {
                path: self.root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !Self::is_source_file(path) {
                continue;
            }

            log::debug!("Found {}", path.display());
            files.push(path.to_path_buf());
        }

        log::info!(
            "Found {} Go files in {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }

    fn is_source_file(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        name.ends_with(".go") && !name.ends_with("_test.go")
    }
}

#[cfg(test)]
mod tests {
    use super::SourceScanner;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn skips_tests_and_foreign_files() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("impl");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("user.go"), b"package services").unwrap();
        fs::write(temp.path().join("user_test.go"), b"package services").unwrap();
        fs::write(temp.path().join("README.md"), b"# docs").unwrap();
        fs::write(nested.join("user_impl.go"), b"package impl").unwrap();

        let files = SourceScanner::new(temp.path()).scan().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(names, vec!["impl/user_impl.go", "user.go"]);
    }

    #[test]
    fn missing_root_is_empty() {
        let temp = tempdir().unwrap();
        let files = SourceScanner::new(temp.path().join("absent")).scan().unwrap();
        assert!(files.is_empty());
    }
}
