//! Source file discovery.

use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects source files by extension under a root directory.
#[derive(Default, Clone)]
pub struct SourceWalk {
    extensions: Vec<String>,
    exclude_globs: Vec<String>,
}

impl SourceWalk {
    /// Creates a walk that skips Android build output by default.
    pub fn new() -> Self {
        Self::default().exclude("**/build/**").exclude("**/.git/**")
    }

    /// Matches files with the given extension (without dot).
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into());
        self
    }

    /// Excludes files matching the glob pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_globs.push(pattern.into());
        self
    }

    /// Collects all matching files from the given root, in walk order.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let exclude_set = self.build_glob_set()?;
        let mut matched = Vec::new();

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            if !self.extensions.is_empty() {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                if !self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                    continue;
                }
            }

            let rel_path = path.strip_prefix(root).unwrap_or(path);
            if exclude_set.is_match(rel_path) {
                continue;
            }

            matched.push(path.to_path_buf());
        }

        Ok(matched)
    }

    fn build_glob_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_globs {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_android_project(dir: &Path) {
        fs::create_dir_all(dir.join("app/src/main/java/com/example")).unwrap();
        fs::create_dir_all(dir.join("app/build/generated")).unwrap();

        File::create(dir.join("app/src/main/java/com/example/MainActivity.kt"))
            .unwrap()
            .write_all(b"class MainActivity\n")
            .unwrap();
        File::create(dir.join("app/src/main/java/com/example/LegacyActivity.java"))
            .unwrap()
            .write_all(b"class LegacyActivity {}\n")
            .unwrap();
        File::create(dir.join("app/build/generated/Gen.kt"))
            .unwrap()
            .write_all(b"class Gen\n")
            .unwrap();
    }

    #[test]
    fn test_collect_by_extension() {
        let dir = TempDir::new().unwrap();
        create_android_project(dir.path());

        let files = SourceWalk::new().extension("kt").collect(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("MainActivity.kt"));
    }

    #[test]
    fn test_build_output_excluded() {
        let dir = TempDir::new().unwrap();
        create_android_project(dir.path());

        let files = SourceWalk::new()
            .extension("kt")
            .extension("java")
            .collect(dir.path())
            .unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| !f.to_string_lossy().contains("build")));
    }

    #[test]
    fn test_custom_exclude() {
        let dir = TempDir::new().unwrap();
        create_android_project(dir.path());

        let files = SourceWalk::new()
            .extension("java")
            .exclude("**/Legacy*")
            .collect(dir.path())
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = SourceWalk::new().extension("kt").collect(dir.path()).unwrap();
        assert!(files.is_empty());
    }
}
