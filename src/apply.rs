//! Applies a computed edit plan to source text.
//!
//! The plan is validated and spliced into a fresh string; the original is
//! never mutated in place, so a failing plan leaves no partial state behind.

use crate::error::{MigrateError, Result};
use crate::plan::{EditPlan, SourceEdit};

/// Applies every edit of the plan and returns the rewritten source.
///
/// Edits are applied position-descending so that earlier spans stay valid
/// while later ones are spliced. Overlapping or out-of-bounds spans abort
/// with [`MigrateError::PlanConflict`] before any text is produced.
pub fn apply(source: &str, plan: &EditPlan) -> Result<String> {
    let mut edits: Vec<&SourceEdit> = plan.edits.iter().collect();
    edits.sort_by_key(|e| (e.span.start, e.span.end));

    for edit in &edits {
        if edit.span.start > edit.span.end || edit.span.end > source.len() {
            return Err(MigrateError::PlanConflict {
                message: format!(
                    "edit span {}..{} is outside the source ({} bytes)",
                    edit.span.start,
                    edit.span.end,
                    source.len()
                ),
            });
        }
    }
    for pair in edits.windows(2) {
        if pair[0].span.end > pair[1].span.start {
            return Err(MigrateError::PlanConflict {
                message: format!(
                    "overlapping edits at {}..{} and {}..{}",
                    pair[0].span.start, pair[0].span.end, pair[1].span.start, pair[1].span.end
                ),
            });
        }
    }

    // Reverse order: at equal start offsets this applies the spanned edit
    // first and the zero-width insertion second, which lands the inserted
    // text before the replacement.
    let mut result = source.to_string();
    for edit in edits.iter().rev() {
        result.replace_range(edit.span.start..edit.span.end, &edit.text);
    }

    Ok(result)
}
