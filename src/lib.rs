//! # ViewBinding Migrator
//!
//! A source-to-source migration tool for Android Kotlin code: it rewrites a
//! class's `setContentView(R.layout.x)` call, its `findViewById` lookups,
//! and its kotlin-android-extensions synthetic accessors into the generated
//! view-binding API.
//!
//! Parsing is tree-sitter based; resolution works from a per-file symbol
//! index; edits are computed as an immutable plan and applied as one splice
//! per file, so a failing plan never leaves partial changes behind.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use viewbinding_migrator::prelude::*;
//!
//! // Migrate every Kotlin source under a project root.
//! let notifier = Notifier::new();
//! let result = Migration::at("./my-app")
//!     .dry_run()
//!     .run(&notifier)?;
//!
//! println!("{}", result.diff());
//! println!("{}", result.summary);
//! # Ok::<(), viewbinding_migrator::error::MigrateError>(())
//! ```
//!
//! ## Single-file rewriting
//!
//! ```rust,no_run
//! use viewbinding_migrator::prelude::*;
//! use std::path::Path;
//!
//! let source = std::fs::read_to_string("MainActivity.kt")?;
//! if let Some((rewritten, plan)) =
//!     ConvertToViewBinding::new().rewrite(Path::new("MainActivity.kt"), &source)?
//! {
//!     println!("uses {}", plan.binding_type);
//!     println!("{rewritten}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Legacy call-site listing
//!
//! Java sources are never rewritten; their `setContentView` call sites can
//! be listed for a manual follow-up:
//!
//! ```rust,no_run
//! use viewbinding_migrator::report;
//!
//! let listing = report::scan_project(std::path::Path::new("./my-app"))?;
//! print!("{listing}");
//! # Ok::<(), viewbinding_migrator::error::MigrateError>(())
//! ```

pub mod apply;
pub mod change;
pub mod error;
pub mod files;
pub mod lang;
pub mod migrate;
pub mod names;
pub mod notify;
pub mod plan;
pub mod report;
pub mod resolve;
pub mod scan;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::change::{ChangeSummary, FileChange};
    pub use crate::error::{MigrateError, Result};
    pub use crate::files::SourceWalk;
    pub use crate::lang::{Java, Kotlin, Language, LanguageRegistry};
    pub use crate::migrate::{ConvertToViewBinding, Migration, MigrationResult};
    pub use crate::names::{to_property_name, to_type_name};
    pub use crate::notify::{Notifier, UNRESOLVED_LAYOUT_MESSAGE};
    pub use crate::plan::{EditPlan, SourceEdit};
    pub use crate::report::{LegacyCallSite, LegacyReport};
    pub use crate::resolve::{AccessorTarget, FileIndex, ResolvedField, ResourceCategory};
    pub use crate::scan::{
        AccessorReference, CallSite, ImportDirective, Scanner, Span, TargetCall,
        FIND_VIEW_BY_ID, SET_CONTENT_VIEW, SYNTHETIC_PACKAGE,
    };
}

pub use prelude::*;
