//! File-local symbol resolution.
//!
//! The migration needs two semantic questions answered: which generated
//! resource field a call argument denotes, and whether a bare identifier
//! refers to a legacy synthetic accessor. Both are answered from a
//! [`FileIndex`] built once per invocation out of the file's package header,
//! import list, and declared names. Resolution never fails hard; an absent
//! result means "not a match" and the caller decides severity.

use crate::scan::{for_each_node, ImportDirective, Scanner};
use std::collections::HashSet;

/// Inner class of the generated resource-reference class a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCategory {
    Layout,
    Id,
}

impl ResourceCategory {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "layout" => Some(Self::Layout),
            "id" => Some(Self::Id),
            _ => None,
        }
    }
}

/// The resource field denoted by a call argument such as `R.layout.main_screen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Simple snake_case resource identifier.
    pub name: String,
    pub category: ResourceCategory,
    /// Qualified name of the generated resource class, e.g. `com.example.app.R`.
    pub resource_class: String,
}

impl ResolvedField {
    /// The package generated binding classes live under, derived by stripping
    /// the resource class's own name from its qualified name.
    pub fn binding_package(&self) -> &str {
        self.resource_class.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
    }
}

/// How an identifier reached the synthetic-accessor namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorTarget {
    /// Named directly by a synthetic import.
    Named,
    /// In scope through a synthetic wildcard import.
    Wildcard,
}

/// Per-file symbol table: package, imports, and declared names.
pub struct FileIndex {
    package: Option<String>,
    imports: Vec<ImportDirective>,
    declared: HashSet<String>,
    synthetic_named: HashSet<String>,
    synthetic_wildcard: bool,
}

impl FileIndex {
    /// Builds the index from a scanned file.
    pub fn build(scanner: &Scanner) -> Self {
        let imports = scanner.imports();

        let mut synthetic_named = HashSet::new();
        let mut synthetic_wildcard = false;
        let mut declared = HashSet::new();

        for import in &imports {
            if import.is_synthetic() {
                if import.wildcard {
                    synthetic_wildcard = true;
                } else if let Some(name) = import.imported_name() {
                    synthetic_named.insert(name.to_string());
                }
            } else if let Some(name) = import.imported_name() {
                declared.insert(name.to_string());
            }
        }

        let source = scanner.source();
        for_each_node(scanner.root(), &mut |node| {
            let name_kind = match node.kind() {
                "variable_declaration" | "function_declaration" | "parameter"
                | "class_parameter" => "simple_identifier",
                "class_declaration" | "object_declaration" => "type_identifier",
                _ => return,
            };
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() == name_kind {
                    declared.insert(source[child.start_byte()..child.end_byte()].to_string());
                    break;
                }
            }
        });

        Self {
            package: scanner.package(),
            imports,
            declared,
            synthetic_named,
            synthetic_wildcard,
        }
    }

    /// Resolves a call argument to the resource field it denotes.
    ///
    /// Accepts `R.<inner>.<name>` with the bare `R` resolved through an
    /// explicit import or the file's package, an aliased resource class, or
    /// a fully qualified `<pkg>.R.<inner>.<name>`.
    pub fn resolve_resource_field(&self, argument: &str) -> Option<ResolvedField> {
        let segments: Vec<&str> = argument.trim().split('.').map(str::trim).collect();
        if segments.len() < 3 || segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let name = segments[segments.len() - 1];
        let category = ResourceCategory::from_segment(segments[segments.len() - 2])?;
        let head = &segments[..segments.len() - 2];

        let resource_class = if head.len() == 1 {
            self.resolve_resource_class(head[0])?
        } else {
            // Fully qualified reference; the class segment must still be `R`.
            if *head.last().unwrap() != "R" {
                return None;
            }
            head.join(".")
        };

        Some(ResolvedField {
            name: name.to_string(),
            category,
            resource_class,
        })
    }

    /// Resolves an identifier reference to the synthetic-accessor namespace.
    ///
    /// Resource ids follow lower snake case by the generated-code naming
    /// contract, so only lowercase-initial identifiers participate; that also
    /// keeps class references like `R` out of the accessor set.
    pub fn resolve_accessor(&self, identifier: &str) -> Option<AccessorTarget> {
        if !identifier.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
            return None;
        }
        if self.synthetic_named.contains(identifier) {
            return Some(AccessorTarget::Named);
        }
        if self.synthetic_wildcard && !self.declared.contains(identifier) {
            return Some(AccessorTarget::Wildcard);
        }
        None
    }

    /// The file's declared package, if any.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// All import directives of the file, in source order.
    pub fn imports(&self) -> &[ImportDirective] {
        &self.imports
    }

    fn resolve_resource_class(&self, head: &str) -> Option<String> {
        if head == "R" {
            // An explicit `import <pkg>.R` wins over the package fallback.
            if let Some(import) = self
                .imports
                .iter()
                .find(|i| !i.is_synthetic() && i.imported_name() == Some("R"))
            {
                return Some(import.path.clone());
            }
            return self.package.as_ref().map(|pkg| format!("{pkg}.R"));
        }

        // Aliased resource class, e.g. `import com.example.app.R as AppR`.
        let import = self
            .imports
            .iter()
            .find(|i| !i.is_synthetic() && i.imported_name() == Some(head))?;
        if import.path.rsplit('.').next() == Some("R") {
            Some(import.path.clone())
        } else {
            None
        }
    }
}
