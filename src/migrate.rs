//! The content-view migration entry point.
//!
//! [`ConvertToViewBinding`] rewrites one source text; [`Migration`] drives it
//! over a file or a whole project root, collecting per-file changes with
//! diffs and a summary. Scanning, resolving, and planning are read-only; the
//! only mutation is the final whole-file write per migrated file.

use crate::apply;
use crate::change::{ChangeSummary, FileChange};
use crate::error::{MigrateError, Result};
use crate::files::SourceWalk;
use crate::lang::{Kotlin, Language};
use crate::notify::{Notifier, UNRESOLVED_LAYOUT_MESSAGE};
use crate::plan::{plan, EditPlan};
use crate::resolve::{FileIndex, ResourceCategory};
use crate::scan::{enclosing_class_body, Scanner};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rewrites `setContentView(R.layout.x)`, `findViewById` calls, and
/// synthetic accessors into the generated view-binding API.
#[derive(Default)]
pub struct ConvertToViewBinding;

impl ConvertToViewBinding {
    pub fn new() -> Self {
        Self
    }

    /// Computes the rewritten source for one file.
    ///
    /// Returns `Ok(None)` when the file contains no content-view call to
    /// migrate (including files already migrated, which makes a second run a
    /// no-op). Returns [`MigrateError::UnresolvedLayout`] when the call is
    /// present but its argument is not a layout resource field; no text is
    /// produced in that case.
    pub fn rewrite(&self, path: &Path, source: &str) -> Result<Option<(String, EditPlan)>> {
        let tree = Kotlin.parse(source)?;
        let scanner = Scanner::new(&tree, source);

        let Some(target) = scanner.target_call() else {
            return Ok(None);
        };

        let index = FileIndex::build(&scanner);
        let argument = &target.call.args[0].text;
        let field = index
            .resolve_resource_field(argument)
            .filter(|f| f.category == ResourceCategory::Layout)
            .ok_or_else(|| MigrateError::UnresolvedLayout {
                path: path.to_path_buf(),
                argument: argument.clone(),
            })?;

        let scope = enclosing_class_body(target.node).ok_or_else(|| MigrateError::PlanConflict {
            message: format!("{}: setContentView call is not inside a class body", path.display()),
        })?;
        let find_view_calls = scanner.find_view_calls(scope);
        let accessors = scanner.synthetic_accessors(scope, &index);

        let plan = plan(&scanner, &index, &target, &field, &find_view_calls, &accessors)?;
        debug!(
            file = %path.display(),
            binding = %plan.binding_type,
            views = plan.rewritten_views,
            accessors = plan.rewritten_accessors,
            "planned migration"
        );

        let rewritten = apply::apply(source, &plan)?;
        Ok(Some((rewritten, plan)))
    }
}

/// The result of running a migration over one or more files.
#[derive(Debug, Default)]
pub struct MigrationResult {
    pub changes: Vec<FileChange>,
    pub summary: ChangeSummary,
    /// Files whose content-view argument did not resolve; left untouched.
    pub unresolved: Vec<PathBuf>,
}

impl MigrationResult {
    /// Returns the number of files that were modified.
    pub fn files_modified(&self) -> usize {
        self.changes.iter().filter(|c| c.is_modified()).count()
    }

    /// Generates a unified diff of all changes.
    pub fn diff(&self) -> String {
        self.changes
            .iter()
            .filter(|c| c.is_modified())
            .map(FileChange::diff)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Generates a colorized diff for terminal display.
    pub fn colorized_diff(&self) -> String {
        self.changes
            .iter()
            .filter(|c| c.is_modified())
            .map(FileChange::colorized_diff)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Builder for running the migration against a file or project root.
pub struct Migration {
    path: PathBuf,
    dry_run: bool,
}

impl Migration {
    /// Creates a migration rooted at a Kotlin file or a project directory.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dry_run: false,
        }
    }

    /// Enables dry-run mode (preview changes without writing).
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Runs the migration. Unresolved layouts are reported through the
    /// notifier and leave their file untouched; other files still migrate.
    pub fn run(self, notifier: &Notifier) -> Result<MigrationResult> {
        let files = self.collect_files()?;
        if files.is_empty() {
            return Err(MigrateError::NoFilesMatched);
        }

        let operation = ConvertToViewBinding::new();
        let mut result = MigrationResult::default();

        for path in files {
            let original = std::fs::read_to_string(&path)?;

            let change = match operation.rewrite(&path, &original) {
                Ok(Some((transformed, plan))) => {
                    notifier.info(&format!(
                        "{}: migrated to {} ({} view lookups, {} accessors, {} imports removed)",
                        path.display(),
                        plan.binding_type,
                        plan.rewritten_views,
                        plan.rewritten_accessors,
                        plan.removed_imports
                    ));
                    FileChange {
                        path: path.clone(),
                        original,
                        transformed,
                    }
                }
                Ok(None) => FileChange {
                    path: path.clone(),
                    original: original.clone(),
                    transformed: original,
                },
                Err(MigrateError::UnresolvedLayout { path, argument }) => {
                    notifier.error(&format!(
                        "{UNRESOLVED_LAYOUT_MESSAGE} ({}: {argument})",
                        path.display()
                    ));
                    result.unresolved.push(path);
                    continue;
                }
                Err(other) => return Err(other),
            };

            result.summary.record(&change);
            if !self.dry_run {
                change.write()?;
            }
            result.changes.push(change);
        }

        Ok(result)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.path.is_file() {
            if !Kotlin.matches_extension(
                self.path.extension().and_then(|e| e.to_str()).unwrap_or(""),
            ) {
                return Err(MigrateError::UnsupportedLanguage(
                    self.path.display().to_string(),
                ));
            }
            return Ok(vec![self.path.clone()]);
        }
        if !self.path.exists() {
            return Err(MigrateError::FileNotFound(self.path.clone()));
        }
        SourceWalk::new().extension("kt").collect(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVITY: &str = r#"package com.example.app

import android.os.Bundle
import android.widget.Button
import androidx.appcompat.app.AppCompatActivity
import kotlinx.android.synthetic.main.main_screen.*

class MainActivity : AppCompatActivity() {
    private val greeting = "hello"

    override fun onCreate(savedInstanceState: Bundle?) {
        super.onCreate(savedInstanceState)
        setContentView(R.layout.main_screen)

        val submit = findViewById<Button>(R.id.submit_button)
        submit.isEnabled = true
        label_text.text = greeting
    }
}
"#;

    fn rewrite(source: &str) -> Option<(String, EditPlan)> {
        ConvertToViewBinding::new()
            .rewrite(Path::new("MainActivity.kt"), source)
            .unwrap()
    }

    #[test]
    fn test_full_rewrite() {
        let (rewritten, plan) = rewrite(ACTIVITY).unwrap();

        assert_eq!(plan.binding_type, "MainScreenBinding");
        assert!(rewritten.contains("import com.example.app.databinding.MainScreenBinding"));
        assert!(rewritten.contains("private lateinit var binding: MainScreenBinding"));
        assert!(rewritten.contains("binding = MainScreenBinding.inflate(layoutInflater)"));
        assert!(rewritten.contains("setContentView(binding.root)"));
        assert!(rewritten.contains("val submit = binding.submitButton"));
        assert!(rewritten.contains("binding.labelText.text = greeting"));
        assert!(!rewritten.contains("kotlinx.android.synthetic"));
        assert!(!rewritten.contains("R.layout.main_screen"));
    }

    #[test]
    fn test_exactly_one_binding_property_and_import() {
        let (rewritten, _) = rewrite(ACTIVITY).unwrap();
        assert_eq!(rewritten.matches("private lateinit var binding:").count(), 1);
        assert_eq!(rewritten.matches("import com.example.app.databinding").count(), 1);
    }

    #[test]
    fn test_second_run_is_noop() {
        let (rewritten, _) = rewrite(ACTIVITY).unwrap();
        assert!(rewrite(&rewritten).is_none());
    }

    #[test]
    fn test_no_target_call() {
        assert!(rewrite("package com.example.app\n\nclass Plain\n").is_none());
    }

    #[test]
    fn test_unresolved_layout_aborts_without_edits() {
        let source = r#"package com.example.app

class MainActivity {
    fun onCreate() {
        val layout = pickLayout()
        setContentView(layout)
    }
}
"#;
        let err = ConvertToViewBinding::new()
            .rewrite(Path::new("MainActivity.kt"), source)
            .unwrap_err();
        assert!(matches!(err, MigrateError::UnresolvedLayout { .. }));
    }

    #[test]
    fn test_migration_over_project() {
        use std::fs;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let src = dir.path().join("app/src/main/java/com/example");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("MainActivity.kt"), ACTIVITY).unwrap();
        fs::write(src.join("Plain.kt"), "package com.example.app\n\nclass Plain\n").unwrap();

        let notifier = Notifier::new();
        let result = Migration::at(dir.path()).run(&notifier).unwrap();

        assert_eq!(result.changes.len(), 2);
        assert_eq!(result.files_modified(), 1);
        assert!(result.unresolved.is_empty());

        let migrated = fs::read_to_string(src.join("MainActivity.kt")).unwrap();
        assert!(migrated.contains("setContentView(binding.root)"));
    }

    #[test]
    fn test_dry_run_leaves_files_untouched() {
        use std::fs;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("MainActivity.kt");
        fs::write(&file, ACTIVITY).unwrap();

        let notifier = Notifier::new();
        let result = Migration::at(&file).dry_run().run(&notifier).unwrap();

        assert_eq!(result.files_modified(), 1);
        assert!(result.diff().contains("+        setContentView(binding.root)"));
        assert_eq!(fs::read_to_string(&file).unwrap(), ACTIVITY);
    }
}
