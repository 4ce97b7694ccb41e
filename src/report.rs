//! Read-only listing of legacy content-view call sites in Java sources.
//!
//! The Java path is informational only: call sites are collected and
//! rendered as a list, nothing is rewritten.

use crate::error::Result;
use crate::files::SourceWalk;
use crate::lang::{Java, Language};
use crate::scan::SET_CONTENT_VIEW;
use serde::Serialize;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::QueryCursor;

/// A located legacy call site.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyCallSite {
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    pub text: String,
}

/// The collected call sites of one scan.
#[derive(Debug, Default, Serialize)]
pub struct LegacyReport {
    pub sites: Vec<LegacyCallSite>,
}

impl LegacyReport {
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for LegacyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for site in &self.sites {
            writeln!(
                f,
                "{}:{}:{}: {}",
                site.file.display(),
                site.line,
                site.column,
                site.text
            )?;
        }
        Ok(())
    }
}

/// Scans one Java source for content-view invocations.
pub fn scan_java_source(path: &Path, source: &str) -> Result<Vec<LegacyCallSite>> {
    let tree = Java.parse(source)?;
    let query = Java.query("(method_invocation name: (identifier) @name) @call")?;

    let name_index = query.capture_index_for_name("name").unwrap_or(0);
    let call_index = query.capture_index_for_name("call").unwrap_or(0);

    let mut sites = Vec::new();
    let mut cursor = QueryCursor::new();
    let source_bytes = source.as_bytes();

    let mut matches = cursor.matches(&query, tree.root_node(), source_bytes);
    while let Some(query_match) = matches.next() {
        let name = query_match
            .captures
            .iter()
            .find(|c| c.index == name_index)
            .and_then(|c| c.node.utf8_text(source_bytes).ok());
        if name.is_none_or(|n| !n.starts_with(SET_CONTENT_VIEW)) {
            continue;
        }

        if let Some(call) = query_match.captures.iter().find(|c| c.index == call_index) {
            let position = call.node.start_position();
            sites.push(LegacyCallSite {
                file: path.to_path_buf(),
                line: position.row + 1,
                column: position.column + 1,
                text: call.node.utf8_text(source_bytes).unwrap_or("").to_string(),
            });
        }
    }

    Ok(sites)
}

/// Scans all Java sources under a root and collects their call sites.
pub fn scan_project(root: &Path) -> Result<LegacyReport> {
    let mut report = LegacyReport::default();

    let files = if root.is_file() {
        vec![root.to_path_buf()]
    } else {
        SourceWalk::new().extension("java").collect(root)?
    };

    for file in files {
        let source = std::fs::read_to_string(&file)?;
        report.sites.extend(scan_java_source(&file, &source)?);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"package com.example.app;

public class LegacyActivity extends Activity {
    @Override
    protected void onCreate(Bundle savedInstanceState) {
        super.onCreate(savedInstanceState);
        setContentView(R.layout.legacy_screen);
        Button b = (Button) findViewById(R.id.submit_button);
    }
}
"#;

    #[test]
    fn test_finds_java_call_sites() {
        let sites = scan_java_source(Path::new("LegacyActivity.java"), LEGACY).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].line, 7);
        assert!(sites[0].text.contains("R.layout.legacy_screen"));
    }

    #[test]
    fn test_ignores_other_invocations() {
        let source = "class A { void f() { render(); update(); } }";
        let sites = scan_java_source(Path::new("A.java"), source).unwrap();
        assert!(sites.is_empty());
    }

    #[test]
    fn test_report_rendering() {
        let sites = scan_java_source(Path::new("LegacyActivity.java"), LEGACY).unwrap();
        let report = LegacyReport { sites };

        let listing = format!("{report}");
        assert!(listing.contains("LegacyActivity.java:7:"));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"line\": 7"));
    }
}
