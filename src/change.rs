//! File change values with diff previews.

use similar::{ChangeTag, TextDiff};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::error::Result;

/// A pending or applied rewrite of one source file.
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub original: String,
    pub transformed: String,
}

impl FileChange {
    /// Returns true if the content was modified.
    pub fn is_modified(&self) -> bool {
        self.original != self.transformed
    }

    /// Writes the transformed content to disk.
    pub fn write(&self) -> Result<()> {
        if self.is_modified() {
            std::fs::write(&self.path, &self.transformed)?;
        }
        Ok(())
    }

    /// Generates a unified diff of this change.
    pub fn diff(&self) -> String {
        self.render_diff(false)
    }

    /// Generates a colorized unified diff for terminal display.
    pub fn colorized_diff(&self) -> String {
        self.render_diff(true)
    }

    fn render_diff(&self, color: bool) -> String {
        const RED: &str = "\x1b[31m";
        const GREEN: &str = "\x1b[32m";
        const CYAN: &str = "\x1b[36m";
        const RESET: &str = "\x1b[0m";

        let diff = TextDiff::from_lines(&self.original, &self.transformed);
        let mut output = String::new();

        let (header_color, header_reset) = if color { (CYAN, RESET) } else { ("", "") };
        writeln!(&mut output, "{}--- a/{}{}", header_color, self.path.display(), header_reset)
            .unwrap();
        writeln!(&mut output, "{}+++ b/{}{}", header_color, self.path.display(), header_reset)
            .unwrap();

        for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
            if idx > 0 {
                writeln!(&mut output).unwrap();
            }
            for op in group {
                for line in diff.iter_changes(op) {
                    let (sign, line_color) = match line.tag() {
                        ChangeTag::Delete => ("-", RED),
                        ChangeTag::Insert => ("+", GREEN),
                        ChangeTag::Equal => (" ", ""),
                    };
                    if color && !line_color.is_empty() {
                        write!(&mut output, "{}{}{}{}", line_color, sign, line.value(), RESET)
                            .unwrap();
                    } else {
                        write!(&mut output, "{}{}", sign, line.value()).unwrap();
                    }
                }
            }
        }

        output
    }
}

/// Aggregated line counts across a set of changes.
#[derive(Debug, Default)]
pub struct ChangeSummary {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl ChangeSummary {
    /// Accumulates one file change into the summary.
    pub fn record(&mut self, change: &FileChange) {
        if !change.is_modified() {
            return;
        }
        self.files_changed += 1;
        let diff = TextDiff::from_lines(&change.original, &change.transformed);
        for line in diff.iter_all_changes() {
            match line.tag() {
                ChangeTag::Insert => self.insertions += 1,
                ChangeTag::Delete => self.deletions += 1,
                ChangeTag::Equal => {}
            }
        }
    }
}

impl std::fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} file(s) changed, {} insertions(+), {} deletions(-)",
            self.files_changed, self.insertions, self.deletions
        )
    }
}
