//! Syntax-tree pattern scanning for migratable call sites and references.
//!
//! Matching is by node shape plus textual name prefix: an unqualified call
//! whose callee identifier starts with the target method name is a match,
//! without a full type-checked call resolution. The low precision is
//! compensated at the call site by resolving the argument to an actual
//! resource field before any edit is planned.

use crate::resolve::FileIndex;
use tree_sitter::{Node, Tree};

/// Call-name prefix identifying the content-view call to migrate.
pub const SET_CONTENT_VIEW: &str = "setContentView";

/// Call-name prefix identifying view-lookup calls to rewrite.
pub const FIND_VIEW_BY_ID: &str = "findViewById";

/// Package prefix of the legacy synthetic-accessor imports.
pub const SYNTHETIC_PACKAGE: &str = "kotlinx.android.synthetic";

/// A half-open byte range in the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// The span covered by a syntax node.
    pub fn of(node: Node) -> Self {
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
        }
    }
}

/// One argument of a located call.
#[derive(Debug, Clone)]
pub struct Argument {
    pub span: Span,
    pub text: String,
}

/// A located invocation with its callee name and arguments.
#[derive(Debug, Clone)]
pub struct CallSite {
    pub span: Span,
    pub name: String,
    pub args: Vec<Argument>,
}

/// A name reference that resolves to a synthetic view accessor.
#[derive(Debug, Clone)]
pub struct AccessorReference {
    pub span: Span,
    pub identifier: String,
}

/// A parsed import directive.
#[derive(Debug, Clone)]
pub struct ImportDirective {
    pub span: Span,
    /// Dotted path without the `import` keyword, alias, or wildcard suffix.
    pub path: String,
    pub wildcard: bool,
    pub alias: Option<String>,
}

impl ImportDirective {
    /// Whether this import belongs to the legacy synthetic-accessor namespace.
    pub fn is_synthetic(&self) -> bool {
        self.path.starts_with(SYNTHETIC_PACKAGE)
    }

    /// The simple name this import brings into scope, if any.
    pub fn imported_name(&self) -> Option<&str> {
        if self.wildcard {
            return None;
        }
        match &self.alias {
            Some(alias) => Some(alias),
            None => self.path.rsplit('.').next(),
        }
    }
}

/// The matched content-view call together with its syntax node, so later
/// passes can anchor on the enclosing class.
pub struct TargetCall<'s> {
    pub call: CallSite,
    pub node: Node<'s>,
}

/// Scans one parsed Kotlin file for the shapes the migration rewrites.
pub struct Scanner<'s> {
    source: &'s str,
    root: Node<'s>,
}

impl<'s> Scanner<'s> {
    /// Creates a scanner over a parsed tree and its source text.
    pub fn new(tree: &'s Tree, source: &'s str) -> Self {
        Self {
            source,
            root: tree.root_node(),
        }
    }

    /// Finds the first unqualified call starting with [`SET_CONTENT_VIEW`]
    /// that carries exactly one argument.
    ///
    /// A call already in the migrated form (`setContentView(binding.root)`)
    /// is not a candidate, so running the migration again is a no-op.
    pub fn target_call(&self) -> Option<TargetCall<'s>> {
        let mut found = None;
        for_each_node(self.root, &mut |node| {
            if found.is_some() {
                return;
            }
            if let Some(call) = self.match_call(node, SET_CONTENT_VIEW)
                && call.args.len() == 1
                && call.args[0].text != "binding.root"
            {
                found = Some(TargetCall { call, node });
            }
        });
        found
    }

    /// Finds all unqualified calls starting with [`FIND_VIEW_BY_ID`] within
    /// the given scope.
    pub fn find_view_calls(&self, scope: Node<'s>) -> Vec<CallSite> {
        let mut calls = Vec::new();
        for_each_node(scope, &mut |node| {
            if let Some(call) = self.match_call(node, FIND_VIEW_BY_ID) {
                calls.push(call);
            }
        });
        calls
    }

    /// Finds all identifier references within the scope that resolve to the
    /// synthetic-accessor namespace.
    pub fn synthetic_accessors(&self, scope: Node<'s>, index: &FileIndex) -> Vec<AccessorReference> {
        let mut accessors = Vec::new();
        for_each_node(scope, &mut |node| {
            if node.kind() != "simple_identifier" || !is_expression_reference(node) {
                return;
            }
            let text = self.text(node);
            if index.resolve_accessor(text).is_some() {
                accessors.push(AccessorReference {
                    span: Span::of(node),
                    identifier: text.to_string(),
                });
            }
        });
        accessors
    }

    /// Collects every import directive in the file, in source order.
    pub fn imports(&self) -> Vec<ImportDirective> {
        let mut imports = Vec::new();
        for_each_node(self.root, &mut |node| {
            if node.kind() == "import_header" {
                imports.push(parse_import(node, self.source));
            }
        });
        imports
    }

    /// Collects import directives rooted at the synthetic-accessor package.
    pub fn synthetic_imports(&self) -> Vec<ImportDirective> {
        self.imports().into_iter().filter(ImportDirective::is_synthetic).collect()
    }

    /// The file's package header path, if declared.
    pub fn package(&self) -> Option<String> {
        let mut package = None;
        for_each_node(self.root, &mut |node| {
            if package.is_none() && node.kind() == "package_header" {
                let text = self.text(node);
                package = text
                    .trim_start_matches("package")
                    .trim()
                    .trim_end_matches(';')
                    .split_whitespace()
                    .next()
                    .map(str::to_string);
            }
        });
        package
    }

    fn match_call(&self, node: Node<'s>, prefix: &str) -> Option<CallSite> {
        if node.kind() != "call_expression" {
            return None;
        }
        // The callee of a qualified call is a navigation expression, so
        // requiring a bare identifier keeps `holder.findViewById(...)` and
        // chained calls out.
        let callee = node.named_child(0)?;
        if callee.kind() != "simple_identifier" {
            return None;
        }
        let name = self.text(callee);
        if !name.starts_with(prefix) {
            return None;
        }
        Some(CallSite {
            span: Span::of(node),
            name: name.to_string(),
            args: self.arguments(node),
        })
    }

    fn arguments(&self, call: Node<'s>) -> Vec<Argument> {
        let mut args = Vec::new();
        if let Some(suffix) = child_of_kind(call, "call_suffix")
            && let Some(value_args) = child_of_kind(suffix, "value_arguments")
        {
            let mut cursor = value_args.walk();
            for child in value_args.named_children(&mut cursor) {
                if child.kind() == "value_argument" {
                    args.push(Argument {
                        span: Span::of(child),
                        text: self.text(child).to_string(),
                    });
                }
            }
        }
        args
    }

    fn text(&self, node: Node) -> &'s str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    pub(crate) fn root(&self) -> Node<'s> {
        self.root
    }

    pub(crate) fn source(&self) -> &'s str {
        self.source
    }
}

/// Walks the enclosing declarations up to the class body that owns `node`.
pub fn enclosing_class_body(node: Node) -> Option<Node> {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "class_body" {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Preorder traversal over every node of a subtree.
pub(crate) fn for_each_node<'t>(node: Node<'t>, f: &mut dyn FnMut(Node<'t>)) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        for_each_node(child, f);
    }
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() == kind)
}

/// Whether an identifier node sits in expression position: not a dotted-path
/// segment, not a declaration name, not a navigation selector, and not the
/// callee of a call.
fn is_expression_reference(node: Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    !matches!(
        parent.kind(),
        "identifier"
            | "import_header"
            | "package_header"
            | "navigation_suffix"
            | "call_expression"
            | "variable_declaration"
            | "function_declaration"
            | "class_parameter"
            | "parameter"
            | "import_alias"
    )
}

fn parse_import(node: Node, source: &str) -> ImportDirective {
    let text = &source[node.start_byte()..node.end_byte()];
    let mut body = text.trim_start_matches("import").trim().trim_end_matches(';').trim();

    let mut alias = None;
    if let Some((path_part, alias_part)) = body.split_once(" as ") {
        body = path_part.trim();
        alias = Some(alias_part.trim().to_string());
    }

    let wildcard = body.ends_with(".*");
    let path = body.trim_end_matches(".*").to_string();

    ImportDirective {
        span: Span::of(node),
        path,
        wildcard,
        alias,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{Kotlin, Language};
    use crate::resolve::FileIndex;

    const ACTIVITY: &str = r#"package com.example.app

import android.os.Bundle
import android.widget.Button
import androidx.appcompat.app.AppCompatActivity
import kotlinx.android.synthetic.main.activity_main.*

class MainActivity : AppCompatActivity() {
    private var counter = 0

    override fun onCreate(savedInstanceState: Bundle?) {
        super.onCreate(savedInstanceState)
        setContentView(R.layout.activity_main)

        val submit = findViewById<Button>(R.id.submit_button)
        submit.isEnabled = true
        label_text.text = "ready"
    }
}
"#;

    fn scan(source: &str, f: impl FnOnce(&Scanner)) {
        let tree = Kotlin.parse(source).unwrap();
        let scanner = Scanner::new(&tree, source);
        f(&scanner);
    }

    #[test]
    fn test_finds_target_call() {
        scan(ACTIVITY, |scanner| {
            let target = scanner.target_call().unwrap();
            assert!(target.call.name.starts_with(SET_CONTENT_VIEW));
            assert_eq!(target.call.args.len(), 1);
            assert_eq!(target.call.args[0].text, "R.layout.activity_main");
        });
    }

    #[test]
    fn test_target_call_ignores_qualified_calls() {
        let source = "class A { fun f() { window.setContentView(R.layout.x) } }";
        scan(source, |scanner| {
            assert!(scanner.target_call().is_none());
        });
    }

    #[test]
    fn test_target_call_skips_migrated_form() {
        let source = "class A { fun f() { setContentView(binding.root) } }";
        scan(source, |scanner| {
            assert!(scanner.target_call().is_none());
        });
    }

    #[test]
    fn test_target_call_requires_single_argument() {
        let source = "class A { fun f() { setContentView(view, params) } }";
        scan(source, |scanner| {
            assert!(scanner.target_call().is_none());
        });
    }

    #[test]
    fn test_finds_find_view_calls() {
        scan(ACTIVITY, |scanner| {
            let target = scanner.target_call().unwrap();
            let body = enclosing_class_body(target.node).unwrap();
            let calls = scanner.find_view_calls(body);
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].args[0].text, "R.id.submit_button");
        });
    }

    #[test]
    fn test_finds_synthetic_imports() {
        scan(ACTIVITY, |scanner| {
            let synthetic = scanner.synthetic_imports();
            assert_eq!(synthetic.len(), 1);
            assert!(synthetic[0].wildcard);
            assert_eq!(synthetic[0].path, "kotlinx.android.synthetic.main.activity_main");
        });
    }

    #[test]
    fn test_import_names() {
        scan(ACTIVITY, |scanner| {
            let imports = scanner.imports();
            assert_eq!(imports.len(), 4);
            assert_eq!(imports[0].imported_name(), Some("Bundle"));
            assert_eq!(imports[3].imported_name(), None);
        });
    }

    #[test]
    fn test_finds_accessor_references() {
        scan(ACTIVITY, |scanner| {
            let index = FileIndex::build(scanner);
            let target = scanner.target_call().unwrap();
            let body = enclosing_class_body(target.node).unwrap();
            let accessors = scanner.synthetic_accessors(body, &index);
            let names: Vec<&str> = accessors.iter().map(|a| a.identifier.as_str()).collect();
            assert_eq!(names, ["label_text"]);
        });
    }

    #[test]
    fn test_package_header() {
        scan(ACTIVITY, |scanner| {
            assert_eq!(scanner.package().as_deref(), Some("com.example.app"));
        });
        scan("class A", |scanner| {
            assert!(scanner.package().is_none());
        });
    }
}
