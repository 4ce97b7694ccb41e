//! Computes the ordered list of source edits for one migration.
//!
//! The plan is an immutable value computed over the parsed tree before any
//! text changes; applying it is a separate, mechanical step. Edit spans are
//! byte ranges of the original source and never overlap.

use crate::error::{MigrateError, Result};
use crate::names::{to_property_name, to_type_name};
use crate::resolve::{FileIndex, ResolvedField, ResourceCategory};
use crate::scan::{
    enclosing_class_body, for_each_node, AccessorReference, CallSite, Scanner, Span, TargetCall,
};
use tree_sitter::Node;

/// One text edit over the original source. An insertion has an empty span,
/// a deletion has empty text.
#[derive(Debug, Clone)]
pub struct SourceEdit {
    pub span: Span,
    pub text: String,
}

impl SourceEdit {
    /// Creates an insertion at the given byte offset.
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            span: Span { start: at, end: at },
            text: text.into(),
        }
    }

    /// Creates a replacement of the given span.
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Creates a deletion of the given span.
    pub fn delete(span: Span) -> Self {
        Self {
            span,
            text: String::new(),
        }
    }
}

/// The computed edits for one file, plus the derived names for reporting.
#[derive(Debug, Clone, Default)]
pub struct EditPlan {
    pub edits: Vec<SourceEdit>,
    /// Simple name of the generated binding class, e.g. `MainScreenBinding`.
    pub binding_type: String,
    /// Qualified import path of the binding class.
    pub binding_import: String,
    pub rewritten_views: usize,
    pub rewritten_accessors: usize,
    pub removed_imports: usize,
    /// View-lookup calls whose argument did not resolve; left untouched.
    pub skipped_views: usize,
}

/// Assembles the edit plan for a resolved target call.
pub fn plan(
    scanner: &Scanner,
    index: &FileIndex,
    target: &TargetCall,
    field: &ResolvedField,
    find_view_calls: &[CallSite],
    accessors: &[AccessorReference],
) -> Result<EditPlan> {
    let source = scanner.source();
    let binding_type = format!("{}Binding", to_type_name(&field.name));
    let binding_import = format!(
        "{}.databinding.{}",
        field.binding_package(),
        binding_type
    );

    let class_body = enclosing_class_body(target.node).ok_or_else(|| MigrateError::PlanConflict {
        message: "setContentView call is not inside a class body".to_string(),
    })?;

    let mut edits = Vec::new();

    // New binding import, after the last import that is not itself synthetic.
    edits.push(import_edit(scanner, index, &binding_import));

    // New binding property, after the last existing property in the class.
    edits.push(property_edit(source, class_body, &binding_type));

    // Initializer plus rewritten content-view call, in place of the original.
    let call_indent = indentation_at(source, target.call.span.start);
    edits.push(SourceEdit::insert(
        target.call.span.start,
        format!("binding = {binding_type}.inflate(layoutInflater)\n\n{call_indent}"),
    ));
    edits.push(SourceEdit::replace(
        target.call.span,
        "setContentView(binding.root)",
    ));

    // View-lookup calls become binding property reads. A call whose argument
    // does not resolve to an id field is left untouched.
    let mut rewritten_views = 0;
    let mut skipped_views = 0;
    for call in find_view_calls {
        let resolved = call
            .args
            .first()
            .and_then(|arg| index.resolve_resource_field(&arg.text))
            .filter(|f| f.category == ResourceCategory::Id);
        match resolved {
            Some(view) => {
                edits.push(SourceEdit::replace(
                    call.span,
                    format!("binding.{}", to_property_name(&view.name)),
                ));
                rewritten_views += 1;
            }
            None => skipped_views += 1,
        }
    }

    // Synthetic accessor references become binding property reads.
    for accessor in accessors {
        edits.push(SourceEdit::replace(
            accessor.span,
            format!("binding.{}", to_property_name(&accessor.identifier)),
        ));
    }

    // Synthetic imports are removed whole-line.
    let mut removed_imports = 0;
    for import in index.imports() {
        if import.is_synthetic() {
            edits.push(SourceEdit::delete(line_span(source, import.span)));
            removed_imports += 1;
        }
    }

    Ok(EditPlan {
        edits,
        binding_type,
        binding_import,
        rewritten_views,
        rewritten_accessors: accessors.len(),
        removed_imports,
        skipped_views,
    })
}

/// The import insertion edit: after the last non-synthetic import, else after
/// the package header, else at the start of the file.
fn import_edit(scanner: &Scanner, index: &FileIndex, binding_import: &str) -> SourceEdit {
    let source = scanner.source();

    let anchor = index
        .imports()
        .iter()
        .filter(|i| !i.is_synthetic())
        .last()
        .map(|i| i.span)
        .or_else(|| package_span(scanner));

    match anchor {
        Some(span) => SourceEdit::insert(
            line_end(source, content_end(source, span)),
            format!("\nimport {binding_import}"),
        ),
        None => SourceEdit::insert(0, format!("import {binding_import}\n\n")),
    }
}

/// The property insertion edit: after the last class-body property, else
/// right inside the opening brace.
fn property_edit(source: &str, class_body: Node, binding_type: &str) -> SourceEdit {
    let mut cursor = class_body.walk();
    let last_property = class_body
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "property_declaration")
        .last();

    match last_property {
        Some(property) => {
            let indent = indentation_at(source, property.start_byte());
            SourceEdit::insert(
                content_end(source, Span::of(property)),
                format!("\n{indent}private lateinit var binding: {binding_type}"),
            )
        }
        None => {
            // Indent one level past the class declaration itself.
            let class_start = class_body.parent().map_or(class_body.start_byte(), |p| p.start_byte());
            let indent = format!("{}    ", indentation_at(source, class_start));
            SourceEdit::insert(
                class_body.start_byte() + 1,
                format!("\n{indent}private lateinit var binding: {binding_type}"),
            )
        }
    }
}

fn package_span(scanner: &Scanner) -> Option<Span> {
    let mut span = None;
    for_each_node(scanner.root(), &mut |node| {
        if span.is_none() && node.kind() == "package_header" {
            span = Some(Span::of(node));
        }
    });
    span
}

/// Extends a span to cover its full line including the trailing newline.
fn line_span(source: &str, span: Span) -> Span {
    let start = source[..span.start].rfind('\n').map_or(0, |i| i + 1);
    let end = line_end(source, content_end(source, span));
    Span {
        start,
        end: (end + 1).min(source.len()),
    }
}

/// End offset of a span with trailing whitespace trimmed; statement nodes can
/// swallow the newline that terminates them.
fn content_end(source: &str, span: Span) -> usize {
    span.start + source[span.start..span.end].trim_end().len()
}

/// Byte offset of the newline terminating the line containing `at`, or the
/// end of the source.
fn line_end(source: &str, at: usize) -> usize {
    source[at..].find('\n').map_or(source.len(), |i| at + i)
}

/// Leading whitespace of the line containing `at`.
fn indentation_at(source: &str, at: usize) -> String {
    let line_start = source[..at].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}
